//! End-to-end fixtures for envgen.
//!
//! Each module declares config structs and includes the loader that
//! `build.rs` generated for them into `OUT_DIR`. The tests in `tests/`
//! drive those loaders against the real process environment.

pub mod basic;
pub mod durations;
pub mod gated;
pub mod nested;
pub mod numbers;
