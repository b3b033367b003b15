//! The aggregate statistics the backend computes over the stored expenses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lenient;

/// Totals for a single category.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: u64,
    /// Share of the total expenses, from 0 to 100.
    #[serde(default, deserialize_with = "lenient::number")]
    pub percentage: f64,
}

/// The total spent in a month.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    /// The month as `YYYY-MM`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub month: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
}

/// The account balance reported on a statement date.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub balance: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMerchant {
    #[serde(default, deserialize_with = "lenient::text")]
    pub merchant: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: u64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub avg_ticket: f64,
}

/// Totals for one kind of charge, e.g. subscriptions.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeTypeBucket {
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub count: u64,
}

/// Aggregate statistics over the expenses, optionally limited to one month.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_expenses: f64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_transactions: u64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub average_ticket: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub fixed_percentage: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub variable_percentage: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_charges: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_deposits: f64,
    /// Deposits minus charges.
    #[serde(default, deserialize_with = "lenient::number")]
    pub net_flow: f64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub categories_breakdown: BTreeMap<String, CategoryBreakdown>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub monthly_evolution: Vec<MonthlyAmount>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub balance_evolution: Vec<BalancePoint>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub top_merchants: Vec<TopMerchant>,
    /// Keyed by bucket, see [crate::stats::charge_type_cards].
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub charge_type_summary: BTreeMap<String, ChargeTypeBucket>,
}
