//! Duration fields under every accepted spelling of the type.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: std::time::Duration,
    pub read: core::time::Duration,
}

pub mod loader {
    include!(concat!(env!("OUT_DIR"), "/durations_gen.rs"));
}
