use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::{MorsimpleError, Result};

pub const TRANSACTION_COLUMNS: &[&str] = &[
    "Date",
    "Merchant",
    "Category",
    "Account",
    "Original Statement",
    "Notes",
    "Amount",
    "Tags",
];

pub const BALANCE_COLUMNS: &[&str] = &["Date", "Amount"];

/// Outcome of validating one CSV file. Valid when `errors` is empty.
#[derive(Debug)]
pub struct FileReport {
    pub file: String,
    pub errors: Vec<String>,
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn check_date(date: &str, shape: &Regex) -> Option<String> {
    if !shape.is_match(date) {
        return Some(format!("Date '{date}' is not in MM/DD/YYYY format"));
    }
    let parts: Vec<&str> = date.split('/').collect();
    let (month, day, year): (u32, u32, i32) =
        match (parts[0].parse(), parts[1].parse(), parts[2].parse()) {
            (Ok(m), Ok(d), Ok(y)) => (m, d, y),
            _ => return Some(format!("Could not parse date '{date}'")),
        };
    if !(1..=12).contains(&month) {
        return Some(format!("Invalid month: {month}"));
    }
    if !(1..=31).contains(&day) {
        return Some(format!("Invalid day: {day}"));
    }
    if !(1900..=2100).contains(&year) {
        return Some(format!("Year {year} seems unreasonable"));
    }
    None
}

fn check_amount(amount: &str) -> Option<String> {
    if amount.parse::<f64>().is_err() {
        return Some(format!("Amount '{amount}' is not a valid number"));
    }
    if let Some((_, decimals)) = amount.split_once('.') {
        if decimals.len() > 2 {
            return Some(format!("Amount '{amount}' has more than 2 decimal places"));
        }
    }
    None
}

fn validate_file(path: &Path, expected: &[&str]) -> Result<FileReport> {
    let file = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    if !path.exists() {
        return Ok(FileReport {
            file,
            errors: vec![format!("File does not exist: {}", path.display())],
        });
    }

    let shape = Regex::new(r"^\d{2}/\d{2}/\d{4}$")
        .map_err(|e| MorsimpleError::Other(e.to_string()))?;
    let mut errors = Vec::new();

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Ok(FileReport {
            file,
            errors: vec!["CSV file has no headers".to_string()],
        });
    }

    let missing: Vec<&str> = expected
        .iter()
        .filter(|col| !headers.iter().any(|h| h.as_str() == **col))
        .copied()
        .collect();
    if !missing.is_empty() {
        errors.push(format!("Missing required columns: {}", missing.join(", ")));
    }
    let extra: Vec<&str> = headers
        .iter()
        .filter(|h| !expected.contains(&h.as_str()))
        .map(String::as_str)
        .collect();
    if !extra.is_empty() {
        errors.push(format!("Unexpected columns: {}", extra.join(", ")));
    }
    // Monarch is strict about column order, not just presence.
    if headers.iter().map(String::as_str).collect::<Vec<_>>() != expected {
        errors.push(format!("Column order is incorrect. Expected: {}", expected.join(", ")));
    }

    let date_idx = headers.iter().position(|h| h == "Date");
    let amount_idx = headers.iter().position(|h| h == "Amount");

    let mut row_num = 1usize;
    for record in reader.records() {
        let record = record?;
        row_num += 1;

        let date = date_idx
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .trim();
        if date.is_empty() {
            errors.push(format!("Row {row_num}: Date is empty"));
        } else if let Some(msg) = check_date(date, &shape) {
            errors.push(format!("Row {row_num}: {msg}"));
        }

        let amount = amount_idx
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .trim();
        if amount.is_empty() {
            errors.push(format!("Row {row_num}: Amount is empty"));
        } else if let Some(msg) = check_amount(amount) {
            errors.push(format!("Row {row_num}: {msg}"));
        }
    }
    if row_num == 1 {
        errors.push("CSV file contains no data rows (only headers)".to_string());
    }

    Ok(FileReport { file, errors })
}

/// Validate a transactions CSV against the Monarch import format.
pub fn validate_transactions_csv(path: &Path) -> Result<FileReport> {
    validate_file(path, TRANSACTION_COLUMNS)
}

/// Validate a balance-history CSV against the Monarch import format.
pub fn validate_balances_csv(path: &Path) -> Result<FileReport> {
    validate_file(path, BALANCE_COLUMNS)
}

/// Validate every `*_transactions.csv` and `*_balances.csv` under the
/// output directory.
pub fn validate_all(output_dir: &Path) -> Result<Vec<FileReport>> {
    if !output_dir.is_dir() {
        return Err(MorsimpleError::Other(format!(
            "Output directory does not exist: {}",
            output_dir.display()
        )));
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(output_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    let mut reports = Vec::new();
    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.ends_with("_transactions.csv") {
            reports.push(validate_transactions_csv(&path)?);
        } else if name.ends_with("_balances.csv") {
            reports.push(validate_balances_csv(&path)?);
        }
    }

    if reports.is_empty() {
        return Err(MorsimpleError::Other(format!(
            "No CSV files found in {}",
            output_dir.display()
        )));
    }
    Ok(reports)
}
