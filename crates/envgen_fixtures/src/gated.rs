//! A loader included straight into the module that declares its struct,
//! with every generated item behind a `cfg` gate.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gated {
    pub level: u8,
    pub name: String,
}

include!(concat!(env!("OUT_DIR"), "/gated_gen.rs"));
