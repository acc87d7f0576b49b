//! The `askscale dimensions` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use askscale_core::model::Dimension;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Key", "Label"]);

    for d in Dimension::ALL {
        table.add_row(vec![Cell::new(d.key()), Cell::new(d.label())]);
    }

    println!("{table}");
    Ok(())
}
