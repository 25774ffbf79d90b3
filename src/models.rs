use serde::{Deserialize, Serialize};

/// A brokerage account as fetched by the upstream client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl Account {
    /// Account number, falling back to the opaque id.
    pub fn display_number(&self) -> &str {
        self.number.as_deref().unwrap_or(&self.id)
    }

    /// Human-readable name, falling back to the number.
    pub fn display_name(&self) -> &str {
        match self.description.as_deref() {
            Some(desc) if !desc.is_empty() => desc,
            _ => self.display_number(),
        }
    }

    pub fn display_currency(&self) -> &str {
        self.currency.as_deref().unwrap_or("CAD")
    }

    /// Selection-menu label. The description is omitted when it is empty
    /// or just repeats the number.
    pub fn label(&self) -> String {
        let number = self.display_number();
        let currency = self.display_currency();
        match self.description.as_deref() {
            Some(desc) if !desc.is_empty() && desc != number => {
                format!("{desc} ({number}) [{currency}]")
            }
            _ => format!("{number} [{currency}]"),
        }
    }
}

/// One account activity as fetched. Consumed read-only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub occurred_at: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub amount_sign: Option<String>,
}

/// One balance-history record as fetched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub net_liquidation_value_v2: Option<NetLiquidationValue>,
}

/// Either integer cents or a decimal string, depending on the API version
/// that produced the snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct NetLiquidationValue {
    #[serde(default)]
    pub cents: Option<i64>,
    #[serde(default)]
    pub amount: Option<String>,
}

/// One row of the Monarch transaction import CSV. Field order is the
/// column order Monarch requires.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Merchant")]
    pub merchant: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Original Statement")]
    pub original_statement: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Tags")]
    pub tags: String,
}

/// One row of the Monarch balance-history import CSV.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}
