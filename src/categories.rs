use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Transaction type whose categorization splits between subtype rules
/// (card-level events like payments) and merchant keywords (purchases,
/// refunds).
pub const CREDIT_CARD_TYPE: &str = "CREDIT_CARD";

/// Rule keyed on transaction type, optionally narrowed by subtype.
/// A rule without a subtype acts as the fallback for its type.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeRule {
    #[serde(rename = "type")]
    pub transaction_type: String,
    #[serde(default)]
    pub subtype: Option<String>,
    pub category: String,
}

/// Rule matching a lowercase keyword as a substring of the merchant text.
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantRule {
    pub keyword: String,
    pub category: String,
}

/// The full rule set, loaded once per run and read-only afterwards.
/// Declaration order within each list is significant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub type_rules: Vec<TypeRule>,
    #[serde(default)]
    pub merchant_rules: Vec<MerchantRule>,
}

/// Load category rules from a JSON file. Returns None when the file does
/// not exist so the caller can warn and carry on with empty rules. A file
/// that exists but does not parse is an error.
pub fn load_rules(path: &Path) -> Result<Option<RuleSet>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let rules: RuleSet = serde_json::from_str(&content)?;
    Ok(Some(rules))
}

/// Scan type rules for `tx_type` in declaration order. An exact
/// (type, subtype) match returns immediately. With `use_fallback`, the
/// first subtype-less rule for the type is remembered and returned when no
/// exact match exists; without it, subtype-less rules are ignored.
fn scan_type_rules(
    rules: &[TypeRule],
    tx_type: &str,
    subtype: Option<&str>,
    use_fallback: bool,
) -> Option<String> {
    let mut fallback = None;
    for rule in rules.iter().filter(|r| r.transaction_type == tx_type) {
        match rule.subtype.as_deref() {
            Some(s) if Some(s) == subtype => return Some(rule.category.clone()),
            None if use_fallback && fallback.is_none() => {
                fallback = Some(rule.category.clone());
            }
            _ => {}
        }
    }
    fallback
}

/// Determine the Monarch category for a transaction. Returns an empty
/// string when no rule matches.
///
/// CREDIT_CARD transactions check subtype rules first, then fall through
/// to merchant keyword matching; subtype-less type rules never apply to
/// them. All other types take an exact (type, subtype) match over the
/// first subtype-less rule for the type, regardless of declaration order.
pub fn categorize(
    tx_type: &str,
    subtype: Option<&str>,
    merchant: &str,
    rules: &RuleSet,
) -> String {
    if tx_type == CREDIT_CARD_TYPE {
        if let Some(category) = scan_type_rules(&rules.type_rules, tx_type, subtype, false) {
            return category;
        }
        let merchant_lower = merchant.to_lowercase();
        for rule in &rules.merchant_rules {
            if merchant_lower.contains(rule.keyword.as_str()) {
                return rule.category.clone();
            }
        }
        return String::new();
    }

    scan_type_rules(&rules.type_rules, tx_type, subtype, true).unwrap_or_default()
}
