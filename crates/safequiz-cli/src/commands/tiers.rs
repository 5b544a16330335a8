//! The `safequiz tiers` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use safequiz_core::tier::Tier;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Tier", "Min score", "Color", "Badge", "Message"]);

    for tier in Tier::ALL {
        let min = tier
            .threshold()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(tier),
            Cell::new(min),
            Cell::new(tier.color()),
            Cell::new(tier.badge()),
            Cell::new(tier.message()),
        ]);
    }

    println!("{table}");
    Ok(())
}
