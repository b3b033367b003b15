//! The expense records returned by the backend and the payload for updating them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::lenient;

/// The ID the backend assigns to an expense.
pub type ExpenseId = i64;

/// Whether a transaction takes money out of the account or puts money in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// A charge. Any unrecognised value is treated as a charge.
    #[default]
    Cargo,
    /// A deposit.
    Abono,
}

impl TransactionType {
    /// The value used by the backend and in form fields.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Cargo => "cargo",
            TransactionType::Abono => "abono",
        }
    }

    /// The badge text shown next to an amount.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Cargo => "CARGO",
            TransactionType::Abono => "ABONO",
        }
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        Ok(match value.as_str().map(|text| text.trim().to_lowercase()) {
            Some(text) if text == "abono" => TransactionType::Abono,
            _ => TransactionType::Cargo,
        })
    }
}

/// Whether an expense recurs with a fixed amount or varies month to month.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedKind {
    /// A recurring expense, e.g. rent or a subscription.
    Fixed,
    /// Any other expense. Unrecognised values are treated as variable.
    #[default]
    Variable,
}

impl FixedKind {
    /// The value used by the backend and in form fields.
    pub fn as_str(self) -> &'static str {
        match self {
            FixedKind::Fixed => "fixed",
            FixedKind::Variable => "variable",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FixedKind::Fixed => "Fijo",
            FixedKind::Variable => "Variable",
        }
    }
}

impl<'de> Deserialize<'de> for FixedKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        Ok(match value.as_str().map(|text| text.trim().to_lowercase()) {
            Some(text) if text == "fixed" => FixedKind::Fixed,
            _ => FixedKind::Variable,
        })
    }
}

/// A single transaction extracted from an uploaded statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,
    /// Always a finite number, non-numeric values from the backend are read as zero.
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
    /// The transaction date as `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub vendor: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub is_fixed: FixedKind,

    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub channel: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub merchant_normalized: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub merchant_category: Option<String>,

    /// A short label describing the nature of the charge, assigned by the backend's model.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub charge_archetype: Option<String>,
    /// The backend's explanation of where the charge comes from.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub charge_origin: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_suspicious: bool,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub suspicious_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub suspicion_score: Option<f64>,

    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub pdf_filename: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub pdf_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub analysis_method: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub updated_at: Option<String>,
}

impl Expense {
    pub fn is_cargo(&self) -> bool {
        self.transaction_type == TransactionType::Cargo
    }

    /// The best available name for the counterparty.
    pub fn merchant(&self) -> Option<&str> {
        self.merchant_normalized
            .as_deref()
            .or(self.vendor.as_deref())
            .filter(|merchant| !merchant.trim().is_empty())
    }

    /// The `YYYY-MM` month the expense falls in, if it has a valid date.
    pub fn month(&self) -> Option<&str> {
        let date = self.date.as_deref()?.trim();
        crate::format::parse_date(date)?;

        date.get(..7)
    }
}

/// The fields to change on an expense.
///
/// Fields set to `None` are left out of the request and keep their current
/// value. The nullable fields use `Some(None)` to clear the value on the backend.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ExpenseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_fixed: Option<FixedKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_archetype: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_origin: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_suspicious: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspicious_reason: Option<Option<String>>,
}

/// The backend's reply to a statement upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: String,
    /// The number of transactions extracted from the statement.
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub pdf_filename: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub transactions: Vec<Expense>,
}
