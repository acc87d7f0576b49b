//! The `askscale init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("data")?;

    for (path, content) in [
        ("askscale.toml", SAMPLE_CONFIG),
        ("data/catalog.toml", SAMPLE_CATALOG),
        ("data/pools.toml", SAMPLE_POOLS),
        ("data/responses.example.json", SAMPLE_RESPONSES),
    ] {
        if Path::new(path).exists() {
            println!("{path} already exists, skipping.");
        } else {
            std::fs::write(path, content)?;
            println!("Created {path}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Edit data/catalog.toml and data/pools.toml for your questionnaire");
    println!("  2. Run: askscale validate");
    println!("  3. Run: askscale score --responses data/responses.example.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# askscale configuration

catalog = "data/catalog.toml"
pools = "data/pools.toml"
default_format = "text"
# seed = 42
"#;

const SAMPLE_CATALOG: &str = include_str!("../../../../data/catalog.toml");
const SAMPLE_POOLS: &str = include_str!("../../../../data/pools.toml");
const SAMPLE_RESPONSES: &str = include_str!("../../../../data/responses.example.json");
