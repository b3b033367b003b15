//! Dashboard statistics from the backend and the summaries derived from them.

mod model;
mod summary;

pub use model::{BalancePoint, CategoryBreakdown, ChargeTypeBucket, DashboardStats, MonthlyAmount};
pub use summary::{
    ArchetypeGroup, ArchetypeInsights, BalanceSummary, ChargeTypeCard, FixedVariableSplit,
    TemporalSummary, archetype_insights, available_months, categories_by_amount,
    charge_type_cards, sorted_balances, suspicious_alerts, top_category,
};
