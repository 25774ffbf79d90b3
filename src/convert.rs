use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::categories::{categorize, RuleSet};
use crate::models::{Activity, BalanceEntry, BalanceRow, TransactionRow};

/// Self-directed buys always move cash out, whatever sign the API reports.
pub const DIY_BUY_TYPE: &str = "DIY_BUY";

/// Description prefixes the upstream client prepends. Longer, more
/// specific prefixes come first so a single pass strips the right one.
const DESCRIPTION_PREFIXES: &[&str] = &[
    "(Pending) Credit card purchase: ",
    "(Pending) Credit card refund: ",
    "Credit card purchase: ",
    "Credit card refund: ",
    "Deposit: ",
    "Withdrawal: ",
    "(Pending) ",
];

/// Strip the first matching known prefix and trim the remainder.
pub fn strip_description_prefixes(text: &str) -> &str {
    for prefix in DESCRIPTION_PREFIXES {
        if let Some(rest) = text.strip_prefix(prefix) {
            return rest.trim();
        }
    }
    text
}

/// Convert an ISO 8601 timestamp (or bare date) to Monarch's MM/DD/YYYY.
/// Unparseable input is passed through unchanged with a warning.
pub fn format_monarch_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%m/%d/%Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%m/%d/%Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%m/%d/%Y").to_string();
    }
    eprintln!("Warning: could not parse date '{raw}'");
    raw.to_string()
}

/// Amount with the sign the statement should carry: the amountSign marker
/// wins, then the DIY_BUY override. Unparseable amounts become 0.
fn signed_amount(activity: &Activity) -> f64 {
    let mut amount = activity
        .amount
        .as_deref()
        .and_then(|raw| raw.parse::<f64>().ok())
        .unwrap_or(0.0);
    match activity.amount_sign.as_deref() {
        Some("negative") => amount = -amount.abs(),
        Some("positive") => amount = amount.abs(),
        _ => {}
    }
    if activity.activity_type.as_deref() == Some(DIY_BUY_TYPE) {
        amount = -amount.abs();
    }
    amount
}

/// Convert one activity to a Monarch transaction row, categorizing it
/// against the loaded rules.
pub fn to_transaction_row(
    activity: &Activity,
    account_name: &str,
    rules: &RuleSet,
) -> TransactionRow {
    let description = activity.description.as_deref().unwrap_or("");

    // Merchant falls back to the transaction type when the description is
    // empty; both go through prefix stripping.
    let merchant = if description.is_empty() {
        activity.activity_type.as_deref().unwrap_or("Unknown")
    } else {
        strip_description_prefixes(description)
    };

    let category = categorize(
        activity.activity_type.as_deref().unwrap_or(""),
        activity.sub_type.as_deref(),
        merchant,
        rules,
    );

    let original_statement = if description.is_empty() {
        String::new()
    } else {
        strip_description_prefixes(description).to_string()
    };

    let mut notes_parts = Vec::new();
    if let Some(t) = activity.activity_type.as_deref().filter(|t| !t.is_empty()) {
        notes_parts.push(format!("Type: {t}"));
    }
    if let Some(s) = activity.sub_type.as_deref().filter(|s| !s.is_empty()) {
        notes_parts.push(format!("SubType: {s}"));
    }

    TransactionRow {
        date: format_monarch_date(&activity.occurred_at),
        merchant: merchant.to_string(),
        category,
        account: account_name.to_string(),
        original_statement,
        notes: notes_parts.join(" | "),
        amount: format!("{:.2}", signed_amount(activity)),
        tags: String::new(),
    }
}

/// Convert one balance-history entry to a Monarch balance row. Integer
/// cents take precedence over the decimal string variant.
pub fn to_balance_row(entry: &BalanceEntry) -> BalanceRow {
    let amount = match &entry.net_liquidation_value_v2 {
        Some(nlv) => match (nlv.cents, nlv.amount.as_deref()) {
            (Some(cents), _) => cents as f64 / 100.0,
            (None, Some(raw)) => raw.parse().unwrap_or(0.0),
            (None, None) => 0.0,
        },
        None => 0.0,
    };
    BalanceRow {
        date: format_monarch_date(&entry.date),
        amount: format!("{amount:.2}"),
    }
}
