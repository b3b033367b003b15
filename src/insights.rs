//! Rule-based insights over the dashboard statistics.
//!
//! Each rule is an independent threshold check. The rules are evaluated in a
//! fixed order so the same input always produces the same list.

use crate::{
    expense::Expense,
    format::{format_currency, format_percentage},
    lenient::finite_or_zero,
    stats::{DashboardStats, top_category},
};

/// Above this share of variable spending the user is warned.
const VARIABLE_PERCENTAGE_THRESHOLD: f64 = 70.0;
/// The number of transactions in "Otros" that triggers a reminder to categorise them.
const UNCATEGORIZED_COUNT_THRESHOLD: u64 = 5;
const UNCATEGORIZED_CATEGORY: &str = "Otros";
/// Average ticket (CLP) above which cheaper alternatives are suggested.
const AVERAGE_TICKET_THRESHOLD: f64 = 50_000.0;
/// Share of spending in a single category above which diversifying is suggested.
const CONCENTRATION_THRESHOLD: f64 = 40.0;
/// The number of days the daily average is computed over.
const DAYS_PER_MONTH: f64 = 30.0;
/// Matched charges needed before suggesting a subscription review.
const SUBSCRIPTION_MIN_COUNT: usize = 2;
const SUBSCRIPTION_KEYWORDS: [&str; 6] = [
    "suscrip",
    "subscription",
    "streaming",
    "membres",
    "netflix",
    "spotify",
];

/// How an insight should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    /// Something the user should act on.
    Alert,
    /// A suggestion for saving money.
    Recommendation,
    /// A neutral fact about the period.
    Summary,
}

/// A human-readable observation about the user's finances.
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    /// A headline figure shown next to the title.
    pub value: Option<String>,
}

impl Insight {
    fn new(kind: InsightKind, title: &str, message: String) -> Self {
        Self {
            kind,
            title: title.to_owned(),
            message,
            value: None,
        }
    }

    fn with_value(mut self, value: String) -> Self {
        self.value = Some(value);
        self
    }
}

/// Generate the insights for `stats` and the full list of `expenses`.
///
/// The result is ordered alerts first, then recommendations, then summaries.
/// A daily average summary is always present.
pub fn generate_insights(stats: &DashboardStats, expenses: &[Expense]) -> Vec<Insight> {
    let variable_percentage = finite_or_zero(stats.variable_percentage);
    let net_flow = finite_or_zero(stats.net_flow);
    let average_ticket = finite_or_zero(stats.average_ticket);
    let total_expenses = finite_or_zero(stats.total_expenses);
    let top_category = top_category(stats);

    let mut insights = Vec::new();

    if variable_percentage > VARIABLE_PERCENTAGE_THRESHOLD {
        insights.push(Insight::new(
            InsightKind::Alert,
            "Alto porcentaje de gastos variables",
            format!(
                "Los gastos variables representan el {} del total. \
                Considera crear un presupuesto más estricto.",
                format_percentage(variable_percentage)
            ),
        ));
    }

    if let Some(uncategorized) = stats
        .categories_breakdown
        .get(UNCATEGORIZED_CATEGORY)
        .filter(|breakdown| breakdown.count >= UNCATEGORIZED_COUNT_THRESHOLD)
    {
        insights.push(Insight::new(
            InsightKind::Alert,
            "Transacciones sin categorizar",
            format!(
                "Hay {} transacciones en \"{UNCATEGORIZED_CATEGORY}\". \
                Revisa y reclasifica para un mejor análisis.",
                uncategorized.count
            ),
        ));
    }

    if net_flow < 0.0 {
        insights.push(
            Insight::new(
                InsightKind::Alert,
                "Flujo neto negativo",
                format!(
                    "Tus cargos superan tus abonos en {}. Revisa tus gastos.",
                    format_currency(net_flow.abs())
                ),
            )
            .with_value(format_currency(net_flow)),
        );
    }

    let suspicious_count = expenses
        .iter()
        .filter(|expense| expense.is_suspicious)
        .count();
    if suspicious_count > 0 {
        insights.push(
            Insight::new(
                InsightKind::Alert,
                "Movimientos sospechosos",
                format!(
                    "Se detectaron {suspicious_count} movimientos inusuales. \
                    Revisa el detalle en las alertas de transacciones."
                ),
            )
            .with_value(suspicious_count.to_string()),
        );
    }

    if average_ticket > AVERAGE_TICKET_THRESHOLD {
        insights.push(Insight::new(
            InsightKind::Recommendation,
            "Ticket promedio elevado",
            format!(
                "Tu gasto promedio por transacción es de {}. \
                Considera buscar alternativas más económicas.",
                format_currency(average_ticket)
            ),
        ));
    }

    let subscriptions: Vec<&Expense> = expenses
        .iter()
        .filter(|expense| is_subscription(expense))
        .collect();
    if subscriptions.len() >= SUBSCRIPTION_MIN_COUNT {
        let total: f64 = subscriptions
            .iter()
            .map(|expense| finite_or_zero(expense.amount))
            .sum();

        insights.push(
            Insight::new(
                InsightKind::Recommendation,
                "Revisa tus suscripciones",
                format!(
                    "Detectamos {} cargos de suscripciones por {}. \
                    Cancela las que ya no utilices.",
                    subscriptions.len(),
                    format_currency(total)
                ),
            )
            .with_value(format_currency(total)),
        );
    }

    if let Some((name, breakdown)) = top_category
        .filter(|(_, breakdown)| finite_or_zero(breakdown.percentage) > CONCENTRATION_THRESHOLD)
    {
        insights.push(Insight::new(
            InsightKind::Recommendation,
            "Concentración de gastos",
            format!(
                "La categoría \"{name}\" representa el {} de tus gastos. \
                Diversifica tus gastos para mejor control.",
                format_percentage(breakdown.percentage)
            ),
        ));
    }

    let daily_average = total_expenses / DAYS_PER_MONTH;
    insights.push(
        Insight::new(
            InsightKind::Summary,
            "Gasto promedio diario",
            format!(
                "Basado en tus transacciones, gastas aproximadamente {} por día.",
                format_currency(daily_average)
            ),
        )
        .with_value(format_currency(daily_average)),
    );

    if let Some((name, breakdown)) = top_category {
        insights.push(
            Insight::new(
                InsightKind::Summary,
                "Categoría principal",
                format!(
                    "Tu mayor gasto es en \"{name}\" con {} ({}).",
                    format_currency(breakdown.amount),
                    format_percentage(breakdown.percentage)
                ),
            )
            .with_value(format_currency(breakdown.amount)),
        );
    }

    if net_flow > 0.0 {
        insights.push(
            Insight::new(
                InsightKind::Summary,
                "Flujo neto positivo",
                format!(
                    "Tus abonos superan tus cargos en {}. ¡Excelente balance!",
                    format_currency(net_flow)
                ),
            )
            .with_value(format_currency(net_flow)),
        );
    }

    insights
}

/// Whether a charge looks like a recurring subscription.
fn is_subscription(expense: &Expense) -> bool {
    if !expense.is_cargo() {
        return false;
    }

    [&expense.charge_archetype, &expense.merchant_category]
        .into_iter()
        .flatten()
        .map(|text| text.to_lowercase())
        .any(|text| {
            SUBSCRIPTION_KEYWORDS
                .iter()
                .any(|keyword| text.contains(keyword))
        })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{
        expense::{Expense, TransactionType, test_utils::expense},
        stats::{CategoryBreakdown, DashboardStats},
    };

    use super::{Insight, InsightKind, generate_insights};

    fn titles(insights: &[Insight]) -> Vec<&str> {
        insights
            .iter()
            .map(|insight| insight.title.as_str())
            .collect()
    }

    fn with_categories(categories: &[(&str, f64, u64, f64)]) -> DashboardStats {
        DashboardStats {
            categories_breakdown: categories
                .iter()
                .map(|&(name, amount, count, percentage)| {
                    (
                        name.to_owned(),
                        CategoryBreakdown {
                            amount,
                            count,
                            percentage,
                        },
                    )
                })
                .collect::<BTreeMap<_, _>>(),
            ..Default::default()
        }
    }

    fn subscription(id: i64, archetype: &str, amount: f64) -> Expense {
        let mut expense = expense(id, "Entretenimiento", amount);
        expense.charge_archetype = Some(archetype.to_owned());
        expense
    }

    #[test]
    fn negative_net_flow_gives_exactly_one_deficit_alert() {
        let stats = DashboardStats {
            net_flow: -1000.0,
            ..Default::default()
        };

        let insights = generate_insights(&stats, &[]);
        let alerts: Vec<&Insight> = insights
            .iter()
            .filter(|insight| insight.kind == InsightKind::Alert)
            .collect();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Flujo neto negativo");
        assert!(alerts[0].message.contains("$1.000"));
        assert_eq!(alerts[0].value.as_deref(), Some("-$1.000"));
        assert!(!titles(&insights).contains(&"Flujo neto positivo"));
    }

    #[test]
    fn empty_stats_only_produce_daily_average() {
        let insights = generate_insights(&DashboardStats::default(), &[]);

        assert_eq!(
            insights,
            [Insight {
                kind: InsightKind::Summary,
                title: "Gasto promedio diario".to_owned(),
                message: "Basado en tus transacciones, gastas aproximadamente $0 por día."
                    .to_owned(),
                value: Some("$0".to_owned()),
            }]
        );
    }

    #[test]
    fn daily_average_is_a_thirtieth_of_total() {
        let stats = DashboardStats {
            total_expenses: 300_000.0,
            ..Default::default()
        };

        let insights = generate_insights(&stats, &[]);

        assert_eq!(insights[0].value.as_deref(), Some("$10.000"));
    }

    #[test]
    fn high_variable_spending_is_an_alert() {
        let stats = DashboardStats {
            variable_percentage: 72.46,
            ..Default::default()
        };

        let insights = generate_insights(&stats, &[]);

        assert_eq!(insights[0].kind, InsightKind::Alert);
        assert_eq!(insights[0].title, "Alto porcentaje de gastos variables");
        assert!(insights[0].message.contains("72.5%"));
    }

    #[test]
    fn variable_threshold_is_exclusive() {
        let stats = DashboardStats {
            variable_percentage: 70.0,
            ..Default::default()
        };

        let insights = generate_insights(&stats, &[]);

        assert!(!titles(&insights).contains(&"Alto porcentaje de gastos variables"));
    }

    #[test]
    fn uncategorized_alert_needs_five_transactions() {
        let four = with_categories(&[("Otros", 100.0, 4, 100.0)]);
        let five = with_categories(&[("Otros", 100.0, 5, 100.0)]);

        assert!(!titles(&generate_insights(&four, &[])).contains(&"Transacciones sin categorizar"));
        assert!(titles(&generate_insights(&five, &[])).contains(&"Transacciones sin categorizar"));
    }

    #[test]
    fn suspicious_movements_are_counted() {
        let mut flagged = expense(1, "Otros", 10.0);
        flagged.is_suspicious = true;

        let insights = generate_insights(&DashboardStats::default(), &[flagged, expense(2, "Otros", 5.0)]);

        assert_eq!(insights[0].title, "Movimientos sospechosos");
        assert_eq!(insights[0].value.as_deref(), Some("1"));
    }

    #[test]
    fn high_average_ticket_is_a_recommendation() {
        let stats = DashboardStats {
            average_ticket: 50_001.0,
            ..Default::default()
        };

        let insights = generate_insights(&stats, &[]);

        assert_eq!(insights[0].kind, InsightKind::Recommendation);
        assert_eq!(insights[0].title, "Ticket promedio elevado");
    }

    #[test]
    fn concentrated_category_is_recommendation_and_summary() {
        let stats = with_categories(&[
            ("Supermercado", 90_000.0, 8, 60.0),
            ("Hogar", 60_000.0, 2, 40.0),
        ]);

        let insights = generate_insights(&stats, &[]);

        assert_eq!(
            titles(&insights),
            [
                "Concentración de gastos",
                "Gasto promedio diario",
                "Categoría principal"
            ]
        );
        assert!(insights[0].message.contains("\"Supermercado\""));
        assert_eq!(
            insights[2].message,
            "Tu mayor gasto es en \"Supermercado\" con $90.000 (60.0%)."
        );
    }

    #[test]
    fn subscriptions_are_matched_by_keyword() {
        let mut by_merchant_category = expense(3, "Entretenimiento", 4_990.0);
        by_merchant_category.merchant_category = Some("Servicios de Streaming".to_owned());
        let mut deposit = subscription(4, "Suscripción", 100_000.0);
        deposit.transaction_type = TransactionType::Abono;
        let expenses = [
            subscription(1, "Suscripción mensual", 9_990.0),
            subscription(2, "Compra", 20_000.0),
            by_merchant_category,
            deposit,
        ];

        let insights = generate_insights(&DashboardStats::default(), &expenses);
        let recommendation = insights
            .iter()
            .find(|insight| insight.title == "Revisa tus suscripciones")
            .expect("subscription recommendation missing");

        assert_eq!(recommendation.kind, InsightKind::Recommendation);
        assert_eq!(recommendation.value.as_deref(), Some("$14.980"));
        assert!(recommendation.message.contains("2 cargos"));
    }

    #[test]
    fn single_subscription_is_not_reported() {
        let expenses = [subscription(1, "Suscripción", 9_990.0)];

        let insights = generate_insights(&DashboardStats::default(), &expenses);

        assert!(!titles(&insights).contains(&"Revisa tus suscripciones"));
    }

    #[test]
    fn positive_net_flow_is_a_summary() {
        let stats = DashboardStats {
            net_flow: 25_000.0,
            ..Default::default()
        };

        let insights = generate_insights(&stats, &[]);
        let last = insights.last().expect("at least one insight");

        assert_eq!(last.kind, InsightKind::Summary);
        assert_eq!(last.title, "Flujo neto positivo");
        assert_eq!(last.value.as_deref(), Some("$25.000"));
    }

    #[test]
    fn non_finite_inputs_are_treated_as_zero() {
        let stats = DashboardStats {
            net_flow: f64::NAN,
            variable_percentage: f64::INFINITY,
            average_ticket: f64::NAN,
            total_expenses: f64::NAN,
            ..Default::default()
        };

        let insights = generate_insights(&stats, &[]);

        assert_eq!(titles(&insights), ["Gasto promedio diario"]);
        assert_eq!(insights[0].value.as_deref(), Some("$0"));
    }

    #[test]
    fn output_is_deterministic_and_ordered_by_kind() {
        let stats = DashboardStats {
            variable_percentage: 80.0,
            net_flow: -5_000.0,
            average_ticket: 60_000.0,
            total_expenses: 90_000.0,
            ..with_categories(&[("Otros", 90_000.0, 6, 100.0)])
        };

        let first = generate_insights(&stats, &[]);
        let second = generate_insights(&stats, &[]);

        assert_eq!(first, second);

        let kinds: Vec<InsightKind> = first.iter().map(|insight| insight.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort_by_key(|kind| match kind {
            InsightKind::Alert => 0,
            InsightKind::Recommendation => 1,
            InsightKind::Summary => 2,
        });
        assert_eq!(kinds, sorted);
        assert_eq!(
            titles(&first),
            [
                "Alto porcentaje de gastos variables",
                "Transacciones sin categorizar",
                "Flujo neto negativo",
                "Ticket promedio elevado",
                "Concentración de gastos",
                "Gasto promedio diario",
                "Categoría principal",
            ]
        );
    }
}
