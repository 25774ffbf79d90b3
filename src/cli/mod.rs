pub mod export;
pub mod rules;
pub mod select;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::categories::{load_rules, RuleSet};
use crate::error::Result;

/// Default rules location: ~/.config/morsimple/category_rules.json
pub(crate) fn default_rules_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("morsimple")
        .join("category_rules.json")
}

/// Load rules, warning instead of failing when the file is absent.
pub(crate) fn load_rules_or_warn(path: &Path) -> Result<RuleSet> {
    match load_rules(path)? {
        Some(rules) => Ok(rules),
        None => {
            println!(
                "{}",
                format!("Warning: category rules file not found: {}", path.display()).yellow()
            );
            println!("  Transactions will not be categorized.");
            Ok(RuleSet::default())
        }
    }
}

pub(crate) fn parse_iso_date(raw: &str) -> std::result::Result<String, String> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|_| raw.to_string())
        .map_err(|_| format!("Invalid date format: '{raw}'. Use YYYY-MM-DD."))
}

#[derive(Parser)]
#[command(name = "morsimple", about = "Wealthsimple to Monarch Money CSV converter.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert fetched account snapshots to Monarch CSV files.
    Export {
        /// Snapshot directory (accounts.json, activities/, balances/)
        #[arg(long, default_value = "snapshot")]
        input: String,
        /// Directory for the exported CSV files
        #[arg(long = "output-dir", default_value = "output")]
        output_dir: String,
        /// Category rules file (default: ~/.config/morsimple/category_rules.json)
        #[arg(long)]
        rules: Option<String>,
        /// Start date for transactions/balances (YYYY-MM-DD)
        #[arg(long = "from", value_parser = parse_iso_date)]
        from: Option<String>,
        /// End date for transactions/balances (YYYY-MM-DD)
        #[arg(long = "to", value_parser = parse_iso_date)]
        to: Option<String>,
        /// Export every account, skipping the selection menu
        #[arg(long)]
        all: bool,
    },
    /// Validate exported CSV files against the Monarch import format.
    Validate {
        /// Specific CSV files (default: every export in the output directory)
        files: Vec<String>,
        /// Directory containing CSV files
        #[arg(long = "output-dir", default_value = "output")]
        output_dir: String,
    },
    /// Inspect and dry-run categorization rules.
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum RulesCommands {
    /// List the loaded rule set.
    List {
        /// Category rules file
        #[arg(long)]
        rules: Option<String>,
    },
    /// Categorize a hand-supplied transaction against the rules.
    Test {
        /// Transaction type, e.g. CREDIT_CARD
        #[arg(long = "type")]
        tx_type: String,
        /// Transaction subtype, e.g. PAYMENT
        #[arg(long)]
        subtype: Option<String>,
        /// Merchant text (after prefix stripping)
        #[arg(long)]
        merchant: String,
        /// Category rules file
        #[arg(long)]
        rules: Option<String>,
    },
}
