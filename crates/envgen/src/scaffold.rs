//! `.env` scaffold rendering.

use crate::flatten::LeafFieldDescriptor;

/// One `KEY=` line per leaf, in leaf order.
///
/// Values are left empty for the user to fill in:
///
/// ```text
/// APP_APIKEY=
/// APP_SERVER_HOST=
/// APP_SERVER_PORT=
/// ```
#[must_use]
pub fn render_scaffold(leaves: &[LeafFieldDescriptor]) -> String {
    leaves.iter().map(|leaf| format!("{}=\n", leaf.env_key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecordCatalog;
    use crate::flatten::flatten;

    #[test]
    fn test_scaffold_lists_keys_in_leaf_order() {
        let catalog = RecordCatalog::parse(
            "config.rs",
            "struct Config { apikey: String, server: Server, debug: bool }
             struct Server { host: String, port: u16 }",
        )
        .unwrap();
        let flattened = flatten(&catalog, "Config", "APP").unwrap();

        assert_eq!(
            render_scaffold(&flattened.leaves),
            "APP_APIKEY=\nAPP_SERVER_HOST=\nAPP_SERVER_PORT=\nAPP_DEBUG=\n"
        );
    }

    #[test]
    fn test_empty_scaffold() {
        assert_eq!(render_scaffold(&[]), "");
    }
}
