//! Card and panel components for the dashboard.
//!
//! Provides:
//! - KPI cards for the headline totals
//! - The insights panel with alerts, recommendations and summaries
//! - Suspicious movements flagged by the backend
//! - The charge type summary and the per-archetype analysis
//! - The fixed versus variable split

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    expense::Expense,
    format::{format_currency, format_date, format_percentage},
    html::{ALERT_CONTAINER_ID, CARD_STYLE, MODAL_CONTAINER_ID},
    insights::{Insight, InsightKind},
    stats::{
        ArchetypeGroup, ArchetypeInsights, ChargeTypeCard, DashboardStats, FixedVariableSplit,
    },
};

struct Kpi<'a> {
    label: &'a str,
    value: String,
    caption: &'a str,
    value_style: &'a str,
}

/// The headline totals across the top of the dashboard.
pub(super) fn kpi_cards_view(stats: &DashboardStats) -> Markup {
    let (net_flow_style, net_flow_caption) = if stats.net_flow >= 0.0 {
        ("text-green-600 dark:text-green-400", "Balance positivo")
    } else {
        ("text-red-600 dark:text-red-400", "Balance negativo")
    };

    let kpis = [
        Kpi {
            label: "Total Cargos",
            value: format_currency(stats.total_charges),
            caption: "Gastos y pagos",
            value_style: "text-red-600 dark:text-red-400",
        },
        Kpi {
            label: "Total Abonos",
            value: format_currency(stats.total_deposits),
            caption: "Ingresos y depósitos",
            value_style: "text-green-600 dark:text-green-400",
        },
        Kpi {
            label: "Flujo Neto",
            value: format_currency(stats.net_flow),
            caption: net_flow_caption,
            value_style: net_flow_style,
        },
        Kpi {
            label: "Transacciones",
            value: stats.total_transactions.to_string(),
            caption: "Total del período",
            value_style: "",
        },
        Kpi {
            label: "Ticket Medio",
            value: format_currency(stats.average_ticket),
            caption: "Promedio por transacción",
            value_style: "",
        },
    ];

    html! {
        section class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-5 gap-4" aria-label="Indicadores"
        {
            @for kpi in kpis {
                div class=(CARD_STYLE) data-kpi=(kpi.label)
                {
                    p class="text-xs font-medium uppercase tracking-wide text-gray-500 dark:text-gray-400"
                    {
                        (kpi.label)
                    }
                    p class={ "mt-2 text-2xl font-bold " (kpi.value_style) } { (kpi.value) }
                    p class="mt-1 text-xs text-gray-500 dark:text-gray-400" { (kpi.caption) }
                }
            }
        }
    }
}

fn insight_style(kind: InsightKind) -> (&'static str, &'static str) {
    match kind {
        InsightKind::Alert => (
            "border-red-200 bg-red-50 dark:border-red-800 dark:bg-gray-800",
            "Alerta",
        ),
        InsightKind::Recommendation => (
            "border-yellow-200 bg-yellow-50 dark:border-yellow-800 dark:bg-gray-800",
            "Recomendación",
        ),
        InsightKind::Summary => (
            "border-blue-200 bg-blue-50 dark:border-blue-800 dark:bg-gray-800",
            "Resumen",
        ),
    }
}

pub(super) fn insights_panel_view(insights: &[Insight]) -> Markup {
    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold mb-4" { "Análisis y Recomendaciones" }

            ul class="grid grid-cols-1 md:grid-cols-2 gap-4"
            {
                @for insight in insights {
                    @let (style, kind_label) = insight_style(insight.kind);
                    li class={ "rounded-lg border p-4 " (style) } data-insight-kind=(kind_label)
                    {
                        p class="text-xs font-semibold uppercase text-gray-500 dark:text-gray-400"
                        {
                            (kind_label)
                        }
                        h3 class="font-semibold" { (insight.title) }
                        p class="text-sm mt-1" { (insight.message) }
                        @if let Some(value) = &insight.value {
                            p class="text-lg font-bold mt-2" { (value) }
                        }
                    }
                }
            }
        }
    }
}

/// The suspicious movements or nothing when there are none.
pub(super) fn suspicious_alerts_view(alerts: &[&Expense]) -> Markup {
    if alerts.is_empty() {
        return html! {};
    }

    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold" { "Alertas de Transacciones" }
            p class="text-sm text-gray-600 dark:text-gray-400 mb-4"
            {
                "Movimientos que se salen de tu comportamiento histórico."
            }

            ul class="space-y-3"
            {
                @for alert in alerts {
                    li
                        class="rounded-lg border border-yellow-200 bg-yellow-50 p-4
                            dark:border-yellow-800 dark:bg-gray-800"
                        data-suspicious-id=(alert.id)
                    {
                        div class="flex justify-between gap-4"
                        {
                            div
                            {
                                h3 class="font-semibold"
                                {
                                    (alert.vendor.as_deref().unwrap_or("Comercio desconocido"))
                                }
                                p class="text-xs text-gray-500 dark:text-gray-400"
                                {
                                    (format_date(alert.date.as_deref())) " · " (alert.category)
                                }
                            }
                            div class="text-right"
                            {
                                p class="font-bold text-red-600 dark:text-red-400"
                                {
                                    (format_currency(alert.amount))
                                }
                                button
                                    type="button"
                                    hx-get=(format_endpoint(endpoints::EXPENSE_DETAIL_VIEW, alert.id))
                                    hx-target={ "#" (MODAL_CONTAINER_ID) }
                                    hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                                    class="text-xs text-blue-600 hover:underline"
                                { "Ver detalle" }
                            }
                        }
                        p class="text-sm mt-2"
                        {
                            (alert.suspicious_reason.as_deref().unwrap_or("Movimiento marcado como sospechoso."))
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn charge_type_summary_view(cards: &[ChargeTypeCard]) -> Markup {
    if cards.is_empty() {
        return html! {};
    }

    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold" { "Resumen por Tipo de Cargo" }
            p class="text-sm text-gray-600 dark:text-gray-400 mt-1 mb-4"
            {
                "Clasificación automática de tus gastos según su naturaleza"
            }

            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
            {
                @for card in cards {
                    div class="rounded-lg border border-gray-200 dark:border-gray-700 p-4"
                    {
                        span
                            class={ "inline-flex px-2.5 py-0.5 text-xs font-semibold rounded-full " (card.info.badge_style) }
                        {
                            (card.info.label)
                        }
                        p class="mt-2 text-2xl font-bold" { (format_currency(card.amount)) }
                        p class="text-sm text-gray-600 dark:text-gray-400"
                        {
                            (card.count) " transacciones · " (format_percentage(card.percentage))
                        }
                        p class="mt-1 text-xs text-gray-500 dark:text-gray-400" { (card.info.description) }
                    }
                }
            }
        }
    }
}

fn archetype_list(title: &str, groups: &[ArchetypeGroup]) -> Markup {
    html! {
        div
        {
            h3 class="font-semibold mb-3" { (title) }

            @if groups.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "Sin datos" }
            } @else {
                ul class="space-y-3"
                {
                    @for group in groups {
                        li class="rounded-lg border border-gray-200 dark:border-gray-700 p-3"
                        {
                            div class="flex justify-between"
                            {
                                span class="font-medium" { (group.archetype) }
                                span class="font-semibold" { (format_currency(group.total)) }
                            }
                            p class="text-xs text-gray-500 dark:text-gray-400" { (group.count) " transacciones" }
                            p class="text-sm mt-1"
                            {
                                (group.sample_origin.as_deref().unwrap_or("La IA no entregó detalles adicionales."))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// What the backend's analysis says about the most common kinds of charges and deposits.
pub(super) fn charge_analysis_view(insights: &ArchetypeInsights) -> Markup {
    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold" { "Análisis IA por tipo de transacción" }
            p class="text-sm text-gray-600 dark:text-gray-400 mt-1 mb-4"
            {
                "La IA clasifica los cargos y abonos y explica su origen para ayudarte a entenderlos rápidamente."
            }

            @if insights.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "La IA aún no tiene suficientes transacciones con análisis disponible."
                }
            } @else {
                div class="grid grid-cols-1 md:grid-cols-2 gap-6"
                {
                    (archetype_list("Principales cargos detectados", &insights.cargo))
                    (archetype_list("Principales abonos detectados", &insights.abono))
                }
            }
        }
    }
}

pub(super) fn fixed_variable_view(split: &FixedVariableSplit) -> Markup {
    html! {
        section class="grid grid-cols-1 md:grid-cols-2 gap-4"
        {
            div class=(CARD_STYLE)
            {
                p class="text-xs font-medium uppercase text-gray-500 dark:text-gray-400" { "Gastos Fijos" }
                p class="mt-2 text-2xl font-bold" { (format_currency(split.fixed_amount)) }
                p class="text-sm" { (format_percentage(split.fixed_percentage)) " del total" }
                p class="mt-1 text-xs text-gray-500 dark:text-gray-400"
                {
                    "Suscripciones, arriendos, servicios recurrentes"
                }
            }
            div class=(CARD_STYLE)
            {
                p class="text-xs font-medium uppercase text-gray-500 dark:text-gray-400" { "Gastos Variables" }
                p class="mt-2 text-2xl font-bold" { (format_currency(split.variable_amount)) }
                p class="text-sm" { (format_percentage(split.variable_percentage)) " del total" }
                p class="mt-1 text-xs text-gray-500 dark:text-gray-400"
                {
                    "Compras ocasionales, entretenimiento, varios"
                }
            }
        }
    }
}
