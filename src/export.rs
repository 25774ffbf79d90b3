use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{BalanceRow, TransactionRow};

/// Replace characters invalid in filenames with underscores and trim
/// leading/trailing spaces and dots.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c => c,
        })
        .collect();
    replaced.trim_matches(|c| c == ' ' || c == '.').to_string()
}

pub struct ExportResult {
    pub path: PathBuf,
    pub rows: usize,
}

fn write_csv<T: serde::Serialize>(path: PathBuf, rows: &[T]) -> Result<ExportResult> {
    let mut writer = csv::Writer::from_path(&path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(ExportResult {
        path,
        rows: rows.len(),
    })
}

/// Write one account's transactions to
/// `<output_dir>/<sanitized number>_transactions.csv`.
pub fn write_transactions_csv(
    output_dir: &Path,
    account_number: &str,
    rows: &[TransactionRow],
) -> Result<ExportResult> {
    let safe = sanitize_filename(account_number);
    write_csv(output_dir.join(format!("{safe}_transactions.csv")), rows)
}

/// Write one account's balance history to
/// `<output_dir>/<sanitized number>_balances.csv`.
pub fn write_balances_csv(
    output_dir: &Path,
    account_number: &str,
    rows: &[BalanceRow],
) -> Result<ExportResult> {
    let safe = sanitize_filename(account_number);
    write_csv(output_dir.join(format!("{safe}_balances.csv")), rows)
}
