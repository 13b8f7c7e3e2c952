//! A flat config with one field per parser family.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct TestConfig1 {
    pub app_name: String,
    pub debug: bool,
    pub timeout: Duration,
    pub retries: isize,
}

/// Generated with prefix `TESTCONFIG1`.
pub mod loader {
    include!(concat!(env!("OUT_DIR"), "/basic_gen.rs"));
}

/// The `.env` scaffold generated alongside [`loader`].
pub const SCAFFOLD: &str = include_str!(concat!(env!("OUT_DIR"), "/basic.env"));
