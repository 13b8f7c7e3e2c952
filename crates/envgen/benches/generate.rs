//! Performance benchmarks for loader generation.
//!
//! Run with: `cargo bench -p envgen`

use std::fmt::Write;

use envgen::{Generator, RecordCatalog, flatten};

fn main() {
    divan::main();
}

const SMALL: &str = "
pub struct Config {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}
";

const NESTED: &str = "
pub struct Config {
    pub name: String,
    pub db: Database,
    pub cache: Cache,
    pub timeout: std::time::Duration,
}

pub struct Database {
    pub primary: Endpoint,
    pub replica: Endpoint,
    pub pool_size: u32,
}

pub struct Cache {
    pub endpoint: Endpoint,
    pub ttl: std::time::Duration,
}

pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub tls: bool,
}
";

/// A flat struct with `n` fields cycling through the supported types.
fn wide_source(n: usize) -> String {
    const TYPES: &[&str] = &["String", "bool", "i32", "u64", "f64", "std::time::Duration"];

    let mut source = String::from("pub struct Config {\n");
    for i in 0..n {
        let _ = writeln!(source, "    pub field_{i}: {},", TYPES[i % TYPES.len()]);
    }
    source.push('}');
    source
}

#[divan::bench]
fn generate_small() -> usize {
    Generator::new("Config")
        .generate_str("config.rs", divan::black_box(SMALL))
        .map(|g| g.module().len())
        .unwrap_or_default()
}

#[divan::bench]
fn generate_nested() -> usize {
    Generator::new("Config")
        .generate_str("config.rs", divan::black_box(NESTED))
        .map(|g| g.module().len())
        .unwrap_or_default()
}

#[divan::bench(args = [10, 50, 200])]
fn generate_wide(bencher: divan::Bencher, n: usize) {
    let source = wide_source(n);

    bencher.bench(|| {
        Generator::new("Config")
            .generate_str("config.rs", divan::black_box(&source))
            .map(|g| g.module().len())
            .unwrap_or_default()
    });
}

#[divan::bench]
fn flatten_nested(bencher: divan::Bencher) {
    let catalog = RecordCatalog::parse("config.rs", NESTED).unwrap_or_default();

    bencher.bench(|| {
        flatten(divan::black_box(&catalog), "Config", "APP")
            .map(|f| f.leaves.len())
            .unwrap_or_default()
    });
}
