//! Every integer and float width, one root struct per family.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfigInts {
    pub int8_val: i8,
    pub int16_val: i16,
    pub int32_val: i32,
    pub int64_val: i64,
    pub word_val: isize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfigUints {
    pub uint8_val: u8,
    pub uint16_val: u16,
    pub uint32_val: u32,
    pub uint64_val: u64,
    pub word_val: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestConfigFloats {
    pub float32_val: f32,
    pub float64_val: f64,
}

pub mod ints {
    include!(concat!(env!("OUT_DIR"), "/ints_gen.rs"));
}

pub mod uints {
    include!(concat!(env!("OUT_DIR"), "/uints_gen.rs"));
}

pub mod floats {
    include!(concat!(env!("OUT_DIR"), "/floats_gen.rs"));
}
