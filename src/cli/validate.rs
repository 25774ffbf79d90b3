use std::path::Path;

use colored::Colorize;

use crate::error::{MorsimpleError, Result};
use crate::validate::{validate_all, validate_balances_csv, validate_transactions_csv, FileReport};

pub fn run(files: &[String], output_dir: &Path) -> Result<()> {
    let reports = if files.is_empty() {
        println!("Validating all CSV files in {}...", output_dir.display());
        validate_all(output_dir)?
    } else {
        let mut reports = Vec::new();
        for file in files {
            let path = Path::new(file);
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            if name.ends_with("_transactions.csv") {
                reports.push(validate_transactions_csv(path)?);
            } else if name.ends_with("_balances.csv") {
                reports.push(validate_balances_csv(path)?);
            } else {
                println!("{}", format!("Warning: unknown file type for {name}").yellow());
            }
        }
        reports
    };

    let mut failed = 0usize;
    for report in &reports {
        print_report(report, &mut failed);
    }

    if failed > 0 {
        return Err(MorsimpleError::ValidationFailed(failed));
    }
    println!("{}", "All CSV files are valid!".green());
    Ok(())
}

fn print_report(report: &FileReport, failed: &mut usize) {
    if report.is_valid() {
        println!("{} {} is valid", "\u{2713}".green(), report.file);
    } else {
        *failed += 1;
        println!("{} {} has errors:", "\u{2717}".red(), report.file);
        for error in &report.errors {
            println!("  - {error}");
        }
    }
}
