#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

/// A config struct assembled from fuzzed field names and type choices.
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Raw source text, tried as is
    source: String,
    /// Field names and indexes into `TYPES`
    fields: Vec<(String, u8)>,
    /// Project prefix
    prefix: String,
}

const TYPES: &[&str] = &[
    "String", "bool", "isize", "i8", "i16", "i32", "i64", "usize", "u8", "u16", "u32", "u64",
    "f32", "f64", "std::time::Duration", "Inner", "Vec<u8>", "Config",
];

fuzz_target!(|input: FuzzInput| {
    // === Arbitrary text must produce a result or an error, never a panic ===
    let _ = envgen::Generator::new("Config")
        .prefix(input.prefix.as_str())
        .generate_str("fuzz.rs", &input.source);

    // === Structured sources exercise flattening and rendering ===
    let body: Vec<String> = input
        .fields
        .iter()
        .map(|(name, ty)| format!("{name}: {}", TYPES[usize::from(*ty) % TYPES.len()]))
        .collect();
    let source = format!(
        "struct Config {{ {} }}\nstruct Inner {{ value: u16, flag: bool }}",
        body.join(", ")
    );

    let generator = envgen::Generator::new("Config").prefix(input.prefix.as_str());
    if let Ok(generated) = generator.generate_str("fuzz.rs", &source) {
        // Output must be valid Rust and deterministic
        assert!(generated.module().starts_with("// Code generated by envgen"));
        let again = generator
            .generate_str("fuzz.rs", &source)
            .expect("second run must succeed");
        assert_eq!(generated.module(), again.module());
        assert_eq!(generated.scaffold().lines().count(), generated.leaves().len());
    }
});
