#![no_main]

use libfuzzer_sys::fuzz_target;

use envgen::FieldPath;
use envgen::naming::{env_key, error_ids, normalize_prefix};

fuzz_target!(|input: (String, Vec<String>)| {
    let (prefix, segments) = input;
    let path = segments.into_iter().fold(FieldPath::root(), |p, s| p.child(s));

    let key = env_key(&prefix, &path);
    let ids = error_ids(&prefix, &path);

    // Letters are always upper-cased
    assert!(!key.bytes().any(|b| b.is_ascii_lowercase()));
    assert!(!key.contains(['-', '.', ' ']));
    assert!(ids.missing.ends_with("EnvMissing"));
    assert!(ids.invalid.ends_with("EnvInvalid"));

    if let Ok(normalized) = normalize_prefix(&prefix) {
        assert!(normalized.chars().any(char::is_alphanumeric));
    }
});
