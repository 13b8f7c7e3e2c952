//! Generates the fixture loaders into `OUT_DIR`.

use std::path::PathBuf;

use envgen::Generator;
use envgen::miette;

struct Fixture {
    source: &'static str,
    root: &'static str,
    prefix: &'static str,
    output: &'static str,
    types_path: &'static str,
    cfg: Option<&'static str>,
    scaffold: Option<&'static str>,
}

impl Fixture {
    const fn new(
        source: &'static str,
        root: &'static str,
        prefix: &'static str,
        output: &'static str,
    ) -> Self {
        Self {
            source,
            root,
            prefix,
            output,
            types_path: "super",
            cfg: None,
            scaffold: None,
        }
    }
}

const FIXTURES: &[Fixture] = &[
    Fixture {
        scaffold: Some("basic.env"),
        ..Fixture::new("src/basic.rs", "TestConfig1", "TESTCONFIG1", "basic_gen.rs")
    },
    Fixture::new("src/numbers.rs", "TestConfigInts", "TESTCONFIGINTS", "ints_gen.rs"),
    Fixture::new("src/numbers.rs", "TestConfigUints", "TESTCONFIGUINTS", "uints_gen.rs"),
    Fixture::new("src/numbers.rs", "TestConfigFloats", "TESTCONFIGFLOATS", "floats_gen.rs"),
    Fixture::new("src/nested.rs", "TestConfigNested", "TESTCONFIGNESTED", "nested_gen.rs"),
    Fixture::new("src/nested.rs", "AppConfig", "APP", "app_gen.rs"),
    Fixture::new("src/durations.rs", "Timeouts", "TIMEOUTS", "durations_gen.rs"),
    Fixture {
        types_path: "self",
        cfg: Some("all()"),
        ..Fixture::new("src/gated.rs", "Gated", "GATED", "gated_gen.rs")
    },
];

fn main() -> miette::Result<()> {
    let out_dir = std::env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| miette::miette!("OUT_DIR is not set"))?;

    for fixture in FIXTURES {
        println!("cargo:rerun-if-changed={}", fixture.source);

        let mut generator = Generator::new(fixture.root)
            .prefix(fixture.prefix)
            .types_path(fixture.types_path);
        if let Some(cfg) = fixture.cfg {
            generator = generator.cfg(cfg);
        }

        let generated = generator.generate_file(fixture.source)?;
        generated.write_module(out_dir.join(fixture.output))?;

        if let Some(scaffold) = fixture.scaffold {
            generated.write_scaffold(out_dir.join(scaffold))?;
        }
    }

    Ok(())
}
