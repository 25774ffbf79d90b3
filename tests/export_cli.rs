use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const RULES: &str = r#"{
    "type_rules": [
        {"type": "CREDIT_CARD", "subtype": "PAYMENT", "category": "Credit Card Payment"},
        {"type": "INTEREST", "category": "Interest Income"}
    ],
    "merchant_rules": [
        {"keyword": "uber", "category": "Transport"}
    ]
}"#;

const ACTIVITIES: &str = r#"[
    {
        "occurredAt": "2025-01-17T08:00:00Z",
        "description": "Interest",
        "type": "INTEREST",
        "amount": "1.23",
        "amountSign": "positive"
    },
    {
        "occurredAt": "2025-01-16T12:00:00Z",
        "description": "Payment Thank You",
        "type": "CREDIT_CARD",
        "subType": "PAYMENT",
        "amount": "500.00",
        "amountSign": "positive"
    },
    {
        "occurredAt": "2025-01-15T10:30:00Z",
        "description": "Credit card purchase: UBER EATS TORONTO",
        "type": "CREDIT_CARD",
        "subType": "PURCHASE",
        "amount": "23.50",
        "amountSign": "negative"
    }
]"#;

const BALANCES: &str = r#"[
    {"date": "2025-01-15", "netLiquidationValueV2": {"cents": 123456}},
    {"date": "2025-01-16", "netLiquidationValueV2": {"amount": "1250.00"}}
]"#;

fn write_snapshot(root: &Path) {
    std::fs::write(
        root.join("accounts.json"),
        r#"[{"id": "acct-1", "number": "CARD-001", "description": "Visa Infinite", "currency": "CAD"}]"#,
    )
    .unwrap();
    std::fs::create_dir_all(root.join("activities")).unwrap();
    std::fs::write(root.join("activities").join("acct-1.json"), ACTIVITIES).unwrap();
    std::fs::create_dir_all(root.join("balances")).unwrap();
    std::fs::write(root.join("balances").join("acct-1.json"), BALANCES).unwrap();
}

#[test]
fn export_writes_categorized_monarch_csvs() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("snapshot");
    std::fs::create_dir_all(&snapshot).unwrap();
    write_snapshot(&snapshot);
    let rules = dir.path().join("category_rules.json");
    std::fs::write(&rules, RULES).unwrap();
    let output = dir.path().join("output");

    Command::cargo_bin("morsimple")
        .unwrap()
        .arg("export")
        .arg("--input")
        .arg(&snapshot)
        .arg("--output-dir")
        .arg(&output)
        .arg("--rules")
        .arg(&rules)
        .arg("--all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 transactions"))
        .stdout(predicate::str::contains("Exported 2 balance records"));

    let transactions =
        std::fs::read_to_string(output.join("CARD-001_transactions.csv")).unwrap();
    let lines: Vec<&str> = transactions.lines().collect();
    assert_eq!(
        lines[0],
        "Date,Merchant,Category,Account,Original Statement,Notes,Amount,Tags"
    );
    // Oldest first, prefix stripped, keyword rule applied.
    assert!(lines[1].starts_with("01/15/2025,UBER EATS TORONTO,Transport,Visa Infinite"));
    assert!(lines[1].contains("-23.50"));
    // Subtype rule beats merchant matching for card payments.
    assert!(lines[2].contains("Credit Card Payment"));
    // Generic type rule picks up the interest record.
    assert!(lines[3].contains("Interest Income"));

    let balances = std::fs::read_to_string(output.join("CARD-001_balances.csv")).unwrap();
    assert!(balances.contains("01/15/2025,1234.56"));
    assert!(balances.contains("01/16/2025,1250.00"));
}

#[test]
fn export_date_filter_limits_rows() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("snapshot");
    std::fs::create_dir_all(&snapshot).unwrap();
    write_snapshot(&snapshot);
    let output = dir.path().join("output");

    Command::cargo_bin("morsimple")
        .unwrap()
        .arg("export")
        .arg("--input")
        .arg(&snapshot)
        .arg("--output-dir")
        .arg(&output)
        .arg("--rules")
        .arg(dir.path().join("missing_rules.json"))
        .arg("--from")
        .arg("2025-01-16")
        .arg("--to")
        .arg("2025-01-16")
        .arg("--all")
        .assert()
        .success()
        .stdout(predicate::str::contains("category rules file not found"))
        .stdout(predicate::str::contains("Exported 1 transactions"))
        .stdout(predicate::str::contains("Exported 1 balance records"));

    let transactions =
        std::fs::read_to_string(output.join("CARD-001_transactions.csv")).unwrap();
    // Without rules the category column stays empty.
    assert!(transactions.contains("01/16/2025,Payment Thank You,,Visa Infinite"));
}

#[test]
fn export_rejects_missing_snapshot_directory() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("morsimple")
        .unwrap()
        .arg("export")
        .arg("--input")
        .arg(dir.path().join("nope"))
        .arg("--all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Snapshot not found"));
}

#[test]
fn export_rejects_malformed_date_argument() {
    Command::cargo_bin("morsimple")
        .unwrap()
        .arg("export")
        .arg("--from")
        .arg("01/15/2025")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn exported_files_pass_validation() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("snapshot");
    std::fs::create_dir_all(&snapshot).unwrap();
    write_snapshot(&snapshot);
    let rules = dir.path().join("category_rules.json");
    std::fs::write(&rules, RULES).unwrap();
    let output = dir.path().join("output");

    Command::cargo_bin("morsimple")
        .unwrap()
        .args(["export", "--all"])
        .arg("--input")
        .arg(&snapshot)
        .arg("--output-dir")
        .arg(&output)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .success();

    Command::cargo_bin("morsimple")
        .unwrap()
        .arg("validate")
        .arg("--output-dir")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("All CSV files are valid!"));
}
