use std::path::Path;

use comfy_table::{Cell, Table};

use crate::categories::categorize;
use crate::error::Result;

pub fn list(rules_path: &Path) -> Result<()> {
    let rules = super::load_rules_or_warn(rules_path)?;

    let mut table = Table::new();
    table.set_header(vec!["Kind", "Type", "Subtype", "Keyword", "Category"]);
    for rule in &rules.type_rules {
        table.add_row(vec![
            Cell::new("type"),
            Cell::new(&rule.transaction_type),
            Cell::new(rule.subtype.as_deref().unwrap_or("(any)")),
            Cell::new(""),
            Cell::new(&rule.category),
        ]);
    }
    for rule in &rules.merchant_rules {
        table.add_row(vec![
            Cell::new("merchant"),
            Cell::new(""),
            Cell::new(""),
            Cell::new(&rule.keyword),
            Cell::new(&rule.category),
        ]);
    }

    println!(
        "Rules ({} type, {} merchant)\n{table}",
        rules.type_rules.len(),
        rules.merchant_rules.len()
    );
    Ok(())
}

pub fn test(
    tx_type: &str,
    subtype: Option<&str>,
    merchant: &str,
    rules_path: &Path,
) -> Result<()> {
    let rules = super::load_rules_or_warn(rules_path)?;
    let category = categorize(tx_type, subtype, merchant, &rules);
    if category.is_empty() {
        println!("No category matched");
    } else {
        println!("Category: {category}");
    }
    Ok(())
}
