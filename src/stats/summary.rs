//! View models derived from [DashboardStats] and the expense list.

use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
};

use crate::{
    expense::Expense,
    format::parse_date,
    lenient::finite_or_zero,
    stats::{BalancePoint, CategoryBreakdown, ChargeTypeBucket, DashboardStats},
};

/// The number of archetype groups to show for each transaction type.
const ARCHETYPE_GROUP_LIMIT: usize = 3;
/// The number of suspicious movements to show on the dashboard.
const SUSPICIOUS_ALERT_LIMIT: usize = 5;

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Categories sorted by amount, largest first. Ties keep alphabetical order.
pub fn categories_by_amount(stats: &DashboardStats) -> Vec<(&str, &CategoryBreakdown)> {
    let mut categories: Vec<_> = stats
        .categories_breakdown
        .iter()
        .map(|(name, breakdown)| (name.as_str(), breakdown))
        .collect();

    categories.sort_by(|(_, a), (_, b)| descending(a.amount, b.amount));

    categories
}

/// The category with the largest amount.
pub fn top_category(stats: &DashboardStats) -> Option<(&str, &CategoryBreakdown)> {
    categories_by_amount(stats).into_iter().next()
}

/// Expenses split into fixed and variable amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedVariableSplit {
    pub fixed_amount: f64,
    pub fixed_percentage: f64,
    pub variable_amount: f64,
    pub variable_percentage: f64,
}

impl FixedVariableSplit {
    pub fn from_stats(stats: &DashboardStats) -> Self {
        let total = finite_or_zero(stats.total_expenses);
        let fixed_percentage = finite_or_zero(stats.fixed_percentage);
        let variable_percentage = finite_or_zero(stats.variable_percentage);

        Self {
            fixed_amount: total * fixed_percentage / 100.0,
            fixed_percentage,
            variable_amount: total * variable_percentage / 100.0,
            variable_percentage,
        }
    }
}

/// The display properties of a charge type bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChargeTypeInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub badge_style: &'static str,
}

const OTHER_CHARGE_TYPE: ChargeTypeInfo = ChargeTypeInfo {
    label: "Otros",
    description: "Otros tipos de gastos",
    badge_style: "text-gray-700 bg-gray-100 dark:text-gray-200 dark:bg-gray-700",
};

fn charge_type_info(key: &str) -> ChargeTypeInfo {
    match key {
        "suscripciones" => ChargeTypeInfo {
            label: "Suscripciones",
            description: "Gastos recurrentes mensuales",
            badge_style: "text-purple-700 bg-purple-100 dark:text-purple-200 dark:bg-purple-900",
        },
        "compras_diarias" => ChargeTypeInfo {
            label: "Compras Diarias",
            description: "Gastos cotidianos y esenciales",
            badge_style: "text-blue-700 bg-blue-100 dark:text-blue-200 dark:bg-blue-900",
        },
        "pagos_excepcionales" => ChargeTypeInfo {
            label: "Pagos Excepcionales",
            description: "Gastos únicos o de alto monto",
            badge_style: "text-orange-700 bg-orange-100 dark:text-orange-200 dark:bg-orange-900",
        },
        _ => OTHER_CHARGE_TYPE,
    }
}

/// A charge type bucket ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeTypeCard {
    pub info: ChargeTypeInfo,
    pub amount: f64,
    pub count: u64,
    /// Share of the total charges, from 0 to 100.
    pub percentage: f64,
}

/// The non-empty charge type buckets in display order.
///
/// Unknown bucket keys are added to the `otros` bucket. Returns nothing when
/// there are no charges to compare against.
pub fn charge_type_cards(stats: &DashboardStats) -> Vec<ChargeTypeCard> {
    const ORDER: [&str; 4] = [
        "suscripciones",
        "compras_diarias",
        "pagos_excepcionales",
        "otros",
    ];
    let other_index = ORDER.len() - 1;

    let total_charges = finite_or_zero(stats.total_charges);
    if total_charges == 0.0 {
        return Vec::new();
    }

    let mut totals: [ChargeTypeBucket; ORDER.len()] =
        std::array::from_fn(|_| ChargeTypeBucket::default());
    for (key, bucket) in &stats.charge_type_summary {
        let index = ORDER
            .iter()
            .position(|known| *known == key.as_str())
            .unwrap_or(other_index);

        totals[index].amount += finite_or_zero(bucket.amount);
        totals[index].count += bucket.count;
    }

    ORDER
        .iter()
        .zip(totals)
        .filter(|(_, bucket)| bucket.count > 0)
        .map(|(key, bucket)| ChargeTypeCard {
            info: charge_type_info(key),
            amount: bucket.amount,
            count: bucket.count,
            percentage: bucket.amount / total_charges * 100.0,
        })
        .collect()
}

/// Average, maximum and minimum of the monthly totals.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalSummary {
    pub average: f64,
    pub maximum: f64,
    pub minimum: f64,
}

impl TemporalSummary {
    /// Returns `None` when there are no months.
    pub fn from_stats(stats: &DashboardStats) -> Option<Self> {
        let amounts: Vec<f64> = stats
            .monthly_evolution
            .iter()
            .map(|month| finite_or_zero(month.amount))
            .collect();

        if amounts.is_empty() {
            return None;
        }

        let sum: f64 = amounts.iter().sum();

        Some(Self {
            average: sum / amounts.len() as f64,
            maximum: amounts.iter().copied().fold(f64::MIN, f64::max),
            minimum: amounts.iter().copied().fold(f64::MAX, f64::min),
        })
    }
}

/// The balance series sorted by date. Undated points keep their relative order at the end.
pub fn sorted_balances(stats: &DashboardStats) -> Vec<BalancePoint> {
    let mut points = stats.balance_evolution.clone();
    points.sort_by_key(|point| (parse_date(&point.date).is_none(), parse_date(&point.date)));

    points
}

/// How the balance changed over the statement period.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSummary {
    pub initial: f64,
    pub current: f64,
    pub change: f64,
}

impl BalanceSummary {
    /// `points` must already be sorted by date.
    pub fn from_points(points: &[BalancePoint]) -> Option<Self> {
        let initial = finite_or_zero(points.first()?.balance);
        let current = finite_or_zero(points.last()?.balance);

        Some(Self {
            initial,
            current,
            change: current - initial,
        })
    }
}

/// Expenses that share a charge archetype.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeGroup {
    /// The archetype as first seen, before normalising.
    pub archetype: String,
    pub count: u64,
    pub total: f64,
    /// An explanation of the charge taken from one of the expenses.
    pub sample_origin: Option<String>,
}

/// The largest archetype groups for charges and deposits.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ArchetypeInsights {
    pub cargo: Vec<ArchetypeGroup>,
    pub abono: Vec<ArchetypeGroup>,
}

impl ArchetypeInsights {
    pub fn is_empty(&self) -> bool {
        self.cargo.is_empty() && self.abono.is_empty()
    }
}

/// Group expenses by archetype (ignoring case and surrounding whitespace)
/// and keep the top groups for each transaction type.
pub fn archetype_insights(expenses: &[Expense]) -> ArchetypeInsights {
    fn group_and_rank<'a>(expenses: impl Iterator<Item = &'a Expense>) -> Vec<ArchetypeGroup> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, ArchetypeGroup> = HashMap::new();

        for expense in expenses {
            let Some(archetype) = expense
                .charge_archetype
                .as_deref()
                .filter(|archetype| !archetype.trim().is_empty())
            else {
                continue;
            };

            let key = archetype.trim().to_lowercase();
            let group = groups.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                ArchetypeGroup {
                    archetype: archetype.trim().to_owned(),
                    count: 0,
                    total: 0.0,
                    sample_origin: None,
                }
            });

            group.count += 1;
            group.total += finite_or_zero(expense.amount);
            if group.sample_origin.is_none() {
                group.sample_origin = expense
                    .charge_origin
                    .clone()
                    .filter(|origin| !origin.trim().is_empty());
            }
        }

        let mut ranked: Vec<ArchetypeGroup> = order
            .into_iter()
            .filter_map(|key| groups.remove(&key))
            .collect();
        ranked.sort_by(|a, b| descending(a.total, b.total));
        ranked.truncate(ARCHETYPE_GROUP_LIMIT);

        ranked
    }

    ArchetypeInsights {
        cargo: group_and_rank(expenses.iter().filter(|expense| expense.is_cargo())),
        abono: group_and_rank(expenses.iter().filter(|expense| !expense.is_cargo())),
    }
}

/// The most recent expenses flagged as suspicious. Undated expenses come last.
pub fn suspicious_alerts(expenses: &[Expense]) -> Vec<&Expense> {
    let mut alerts: Vec<&Expense> = expenses
        .iter()
        .filter(|expense| expense.is_suspicious)
        .collect();

    alerts.sort_by(|a, b| {
        let a = a.date.as_deref().and_then(parse_date);
        let b = b.date.as_deref().and_then(parse_date);

        match (a, b) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    alerts.truncate(SUSPICIOUS_ALERT_LIMIT);

    alerts
}

/// The distinct `YYYY-MM` months that have expenses, newest first.
pub fn available_months(expenses: &[Expense]) -> Vec<String> {
    let months: BTreeSet<&str> = expenses.iter().filter_map(Expense::month).collect();

    months.into_iter().rev().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{
        expense::{TransactionType, test_utils::expense},
        stats::{
            BalancePoint, CategoryBreakdown, ChargeTypeBucket, DashboardStats, MonthlyAmount,
        },
    };

    use super::*;

    fn breakdown(amount: f64, count: u64, percentage: f64) -> CategoryBreakdown {
        CategoryBreakdown {
            amount,
            count,
            percentage,
        }
    }

    #[test]
    fn categories_are_sorted_by_amount() {
        let stats = DashboardStats {
            categories_breakdown: BTreeMap::from([
                ("Hogar".to_owned(), breakdown(100.0, 1, 10.0)),
                ("Comida".to_owned(), breakdown(700.0, 5, 70.0)),
                ("Otros".to_owned(), breakdown(200.0, 2, 20.0)),
            ]),
            ..Default::default()
        };

        let got: Vec<&str> = categories_by_amount(&stats)
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(got, ["Comida", "Otros", "Hogar"]);
        assert_eq!(top_category(&stats).map(|(name, _)| name), Some("Comida"));
    }

    #[test]
    fn top_category_of_empty_breakdown_is_none() {
        assert_eq!(top_category(&DashboardStats::default()), None);
    }

    #[test]
    fn fixed_variable_amounts_are_shares_of_total() {
        let stats = DashboardStats {
            total_expenses: 200_000.0,
            fixed_percentage: 25.0,
            variable_percentage: 75.0,
            ..Default::default()
        };

        let split = FixedVariableSplit::from_stats(&stats);

        assert_eq!(split.fixed_amount, 50_000.0);
        assert_eq!(split.variable_amount, 150_000.0);
    }

    #[test]
    fn charge_type_cards_merge_unknown_buckets_into_otros() {
        let stats = DashboardStats {
            total_charges: 1_000.0,
            charge_type_summary: BTreeMap::from([
                (
                    "otros".to_owned(),
                    ChargeTypeBucket {
                        amount: 100.0,
                        count: 1,
                    },
                ),
                (
                    "suscripciones".to_owned(),
                    ChargeTypeBucket {
                        amount: 250.0,
                        count: 2,
                    },
                ),
                (
                    "pagos_excepcionales".to_owned(),
                    ChargeTypeBucket {
                        amount: 0.0,
                        count: 0,
                    },
                ),
                (
                    "nuevo_tipo".to_owned(),
                    ChargeTypeBucket {
                        amount: 50.0,
                        count: 1,
                    },
                ),
            ]),
            ..Default::default()
        };

        let cards = charge_type_cards(&stats);
        let labels: Vec<&str> = cards.iter().map(|card| card.info.label).collect();

        assert_eq!(labels, ["Suscripciones", "Otros"]);
        assert_eq!(cards[0].percentage, 25.0);
        assert_eq!(cards[1].amount, 150.0);
        assert_eq!(cards[1].count, 2);
        assert_eq!(cards[1].percentage, 15.0);
    }

    #[test]
    fn charge_type_cards_without_charges_is_empty() {
        let stats = DashboardStats {
            charge_type_summary: BTreeMap::from([(
                "otros".to_owned(),
                ChargeTypeBucket {
                    amount: 100.0,
                    count: 1,
                },
            )]),
            ..Default::default()
        };

        assert!(charge_type_cards(&stats).is_empty());
    }

    #[test]
    fn temporal_summary() {
        let stats = DashboardStats {
            monthly_evolution: vec![
                MonthlyAmount {
                    month: "2025-01".to_owned(),
                    amount: 100.0,
                },
                MonthlyAmount {
                    month: "2025-02".to_owned(),
                    amount: 300.0,
                },
            ],
            ..Default::default()
        };

        let got = TemporalSummary::from_stats(&stats);

        assert_eq!(
            got,
            Some(TemporalSummary {
                average: 200.0,
                maximum: 300.0,
                minimum: 100.0
            })
        );
        assert_eq!(TemporalSummary::from_stats(&DashboardStats::default()), None);
    }

    #[test]
    fn balance_summary_uses_date_order() {
        let stats = DashboardStats {
            balance_evolution: vec![
                BalancePoint {
                    date: "2025-01-31".to_owned(),
                    balance: 500.0,
                },
                BalancePoint {
                    date: "2025-01-01".to_owned(),
                    balance: 800.0,
                },
            ],
            ..Default::default()
        };

        let points = sorted_balances(&stats);
        let got = BalanceSummary::from_points(&points);

        assert_eq!(
            got,
            Some(BalanceSummary {
                initial: 800.0,
                current: 500.0,
                change: -300.0
            })
        );
        assert_eq!(BalanceSummary::from_points(&[]), None);
    }

    #[test]
    fn archetypes_are_grouped_case_insensitively() {
        let mut netflix = expense(1, "Entretenimiento", 9_990.0);
        netflix.charge_archetype = Some("Suscripción".to_owned());
        netflix.charge_origin = Some("Cobro mensual de streaming".to_owned());
        let mut spotify = expense(2, "Entretenimiento", 5_990.0);
        spotify.charge_archetype = Some(" suscripción ".to_owned());
        let mut salary = expense(3, "Ingresos", 1_000_000.0);
        salary.transaction_type = TransactionType::Abono;
        salary.charge_archetype = Some("Sueldo".to_owned());
        let untagged = expense(4, "Otros", 100.0);

        let got = archetype_insights(&[netflix, spotify, salary, untagged]);

        assert_eq!(
            got.cargo,
            [ArchetypeGroup {
                archetype: "Suscripción".to_owned(),
                count: 2,
                total: 15_980.0,
                sample_origin: Some("Cobro mensual de streaming".to_owned()),
            }]
        );
        assert_eq!(got.abono.len(), 1);
        assert_eq!(got.abono[0].archetype, "Sueldo");
    }

    #[test]
    fn archetype_groups_are_limited() {
        let expenses: Vec<_> = (0..5)
            .map(|i| {
                let mut expense = expense(i, "Otros", (i + 1) as f64 * 100.0);
                expense.charge_archetype = Some(format!("tipo {i}"));
                expense
            })
            .collect();

        let got = archetype_insights(&expenses);
        let names: Vec<&str> = got.cargo.iter().map(|g| g.archetype.as_str()).collect();

        assert_eq!(names, ["tipo 4", "tipo 3", "tipo 2"]);
        assert!(got.abono.is_empty());
    }

    #[test]
    fn suspicious_alerts_are_newest_first_with_undated_last() {
        let mut expenses = Vec::new();
        for (id, date) in [
            (1, None),
            (2, Some("2025-01-01")),
            (3, Some("2025-03-01")),
            (4, Some("2025-02-01")),
            (5, Some("2024-12-01")),
            (6, Some("2024-11-01")),
        ] {
            let mut expense = expense(id, "Otros", 1.0);
            expense.is_suspicious = true;
            expense.date = date.map(str::to_owned);
            expenses.push(expense);
        }
        expenses.push(expense(7, "Otros", 1.0));

        let got: Vec<i64> = suspicious_alerts(&expenses).iter().map(|e| e.id).collect();

        assert_eq!(got, [3, 4, 2, 5, 6]);
    }

    #[test]
    fn available_months_are_distinct_and_newest_first() {
        let mut expenses = Vec::new();
        for (id, date) in [
            (1, Some("2025-01-10")),
            (2, Some("2025-03-02")),
            (3, Some("2025-01-22")),
            (4, None),
            (5, Some("garbage")),
        ] {
            let mut expense = expense(id, "Otros", 1.0);
            expense.date = date.map(str::to_owned);
            expenses.push(expense);
        }

        assert_eq!(available_months(&expenses), ["2025-03", "2025-01"]);
    }
}
