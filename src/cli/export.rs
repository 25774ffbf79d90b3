use std::io::IsTerminal;
use std::path::Path;

use colored::Colorize;

use crate::convert::{to_balance_row, to_transaction_row};
use crate::error::Result;
use crate::export::{write_balances_csv, write_transactions_csv};
use crate::models::Account;
use crate::snapshot::{in_range, Snapshot};

use super::select;

pub fn run(
    input: &Path,
    output_dir: &Path,
    rules_path: &Path,
    from: Option<&str>,
    to: Option<&str>,
    all: bool,
) -> Result<()> {
    let snapshot = Snapshot::open(input)?;
    let rules = super::load_rules_or_warn(rules_path)?;

    let accounts = snapshot.accounts()?;
    println!("Found {} account(s)", accounts.len());

    let accounts = pick_accounts(accounts, all)?;
    std::fs::create_dir_all(output_dir)?;
    println!("Processing {} account(s)...", accounts.len());

    for account in &accounts {
        let number = account.display_number();
        println!("\nProcessing account: {} ({})", account.display_name(), number);

        match snapshot.activities(&account.id)? {
            None => println!("  {}", "No activity snapshot for this account".yellow()),
            Some(mut activities) => {
                activities.retain(|a| in_range(&a.occurred_at, from, to));
                // The API returns newest first; Monarch imports read better
                // oldest first.
                activities.reverse();
                if activities.is_empty() {
                    println!("  No transactions found for account {number}");
                } else {
                    let rows: Vec<_> = activities
                        .iter()
                        .map(|a| to_transaction_row(a, account.display_name(), &rules))
                        .collect();
                    let result = write_transactions_csv(output_dir, number, &rows)?;
                    println!(
                        "  Exported {} transactions to {}",
                        result.rows,
                        result.path.display()
                    );
                }
            }
        }

        match snapshot.balances(&account.id)? {
            None => println!("  {}", "No balance snapshot for this account".yellow()),
            Some(balances) => {
                let balances: Vec<_> = balances
                    .into_iter()
                    .filter(|b| in_range(&b.date, from, to))
                    .collect();
                if balances.is_empty() {
                    println!("  No balance history found for account {number}");
                } else {
                    let rows: Vec<_> = balances.iter().map(to_balance_row).collect();
                    let result = write_balances_csv(output_dir, number, &rows)?;
                    println!(
                        "  Exported {} balance records to {}",
                        result.rows,
                        result.path.display()
                    );
                }
            }
        }
    }

    println!();
    println!(
        "{}",
        format!("Export complete! CSV files are in '{}'.", output_dir.display()).green()
    );
    Ok(())
}

/// Narrow to the accounts the user wants. The menu only makes sense on a
/// real terminal; otherwise everything is exported.
fn pick_accounts(accounts: Vec<Account>, all: bool) -> Result<Vec<Account>> {
    if all || accounts.len() <= 1 || !std::io::stdin().is_terminal() {
        return Ok(accounts);
    }
    println!("\nSelect accounts to export:");
    let labels = accounts.iter().map(Account::label).collect();
    let indices = select::run(labels)?;
    Ok(accounts
        .into_iter()
        .enumerate()
        .filter(|(i, _)| indices.contains(i))
        .map(|(_, account)| account)
        .collect())
}
