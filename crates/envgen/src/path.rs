//! Field paths from the root record down to a leaf.

use std::fmt::{self, Display, Formatter};

/// Ordered field names from the root record to a field, e.g. `server.port`.
///
/// Paths are values: extending one with [`child`](Self::child) returns a
/// new path and leaves the parent untouched, so sibling branches of the
/// flattening walk never see each other's segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Prefix of every generated local binding.
    pub const BINDING_PREFIX: &'static str = "val_";

    /// The empty path, naming the root record itself.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns this path extended by `segment`.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Segments from the root outwards.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The logical field name, segments joined with `.`.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }

    /// The local binding used in the generated loader, e.g. `val_server_port`.
    #[must_use]
    pub fn binding(&self) -> String {
        format!("{}{}", Self::BINDING_PREFIX, self.segments.join("_"))
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_does_not_touch_parent() {
        let server = FieldPath::root().child("server");
        let host = server.child("host");
        let port = server.child("port");

        assert_eq!(server.dotted(), "server");
        assert_eq!(host.dotted(), "server.host");
        assert_eq!(port.dotted(), "server.port");
        assert_eq!(port.len(), 2);
    }

    #[test]
    fn test_binding_name() {
        let path = FieldPath::root().child("server").child("shutdown_interval");
        assert_eq!(path.binding(), "val_server_shutdown_interval");
        assert_eq!(path.to_string(), "server.shutdown_interval");
    }
}
