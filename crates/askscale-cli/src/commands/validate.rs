//! The `askscale validate` command.

use std::path::PathBuf;

use anyhow::Result;

use askscale_core::parser::{
    parse_catalog, parse_pools, validate_catalog, validate_pools, ValidationWarning,
};

use crate::config::load_config_from;

pub fn execute(
    catalog_path: Option<PathBuf>,
    pools_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = parse_catalog(&catalog_path.unwrap_or(config.catalog))?;
    let pools = parse_pools(&pools_path.unwrap_or(config.pools))?;

    println!(
        "Catalog: {} ({} items, {} dimensions)",
        catalog.name,
        catalog.len(),
        catalog.dimensions().len()
    );
    let catalog_warnings = validate_catalog(&catalog);
    print_warnings(&catalog_warnings);

    println!(
        "Pools: {} affirmations, {} conflicts, {} calls to action",
        pools.affirmations().len(),
        pools.conflicts().len(),
        pools.calls_to_action().len()
    );
    let pool_warnings = validate_pools(&pools, Some(&catalog));
    print_warnings(&pool_warnings);

    let total_warnings = catalog_warnings.len() + pool_warnings.len();
    if total_warnings == 0 {
        println!("All files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn print_warnings(warnings: &[ValidationWarning]) {
    for w in warnings {
        let prefix = w
            .location
            .as_ref()
            .map(|loc| format!("  [{loc}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
}
