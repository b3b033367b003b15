//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for the dashboard page
//! - The page layout that arranges the cards, charts and table
//! - The error view shown when the backend cannot be reached

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    api::ApiClient,
    dashboard::{
        cards::{
            charge_analysis_view, charge_type_summary_view, fixed_variable_view,
            insights_panel_view, kpi_cards_view, suspicious_alerts_view,
        },
        charts::{balance_chart, category_chart, temporal_chart},
    },
    endpoints::{self, dashboard_url},
    expense::{Expense, TableQuery, expense_table_view},
    format::{format_month_name, parse_month},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    insights::generate_insights,
    navigation::NavBar,
    pagination::PaginationConfig,
    stats::{
        DashboardStats, FixedVariableSplit, archetype_insights, available_months,
        charge_type_cards, suspicious_alerts,
    },
};

/// The query string of the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Limit the statistics to one month, formatted as `YYYY-MM`.
    pub month: Option<String>,
}

impl DashboardQuery {
    /// The selected month, or `None` if it is missing or malformed.
    fn month(&self) -> Option<&str> {
        let month = self.month.as_deref()?.trim();

        if month.is_empty() {
            return None;
        }

        if parse_month(month).is_none() {
            tracing::warn!("ignoring invalid dashboard month {month:?}");
            return None;
        }

        Some(month)
    }
}

/// Display a page with an overview of the user's expenses.
pub async fn get_dashboard_page(
    State(api): State<ApiClient>,
    State(pagination_config): State<PaginationConfig>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let month = query.month();

    let result = tokio::try_join!(api.get_stats(month), api.list_expenses(None));

    match result {
        Ok((stats, expenses)) => {
            dashboard_view(&stats, &expenses, month, &pagination_config).into_response()
        }
        Err(error) => {
            tracing::error!("could not load the dashboard: {error}");
            dashboard_error_view(&error, month).into_response()
        }
    }
}

fn page_header(expenses: &[Expense], month: Option<&str>) -> Markup {
    let months = available_months(expenses);

    html! {
        div class="flex flex-col md:flex-row md:items-end md:justify-between gap-4"
        {
            div
            {
                h1 class="text-3xl font-bold" { "Dashboard" }
                p class="text-gray-600 dark:text-gray-400" { "Análisis de gastos y transacciones" }
            }

            form method="get" action=(endpoints::DASHBOARD_VIEW) class="flex items-end gap-3"
            {
                div
                {
                    label for="month" class=(FORM_LABEL_STYLE) { "Período" }
                    select
                        id="month"
                        name="month"
                        onchange="this.form.submit()"
                        class="block p-2.5 rounded text-sm bg-gray-50 border border-gray-300
                            dark:bg-gray-700 dark:border-gray-600"
                    {
                        option value="" selected[month.is_none()] { "Todos los períodos" }

                        @for available in &months {
                            option
                                value=(available)
                                selected[month == Some(available.as_str())]
                            {
                                (format_month_name(available))
                            }
                        }
                    }
                }

                noscript
                {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Ver" }
                }

                @if month.is_some() {
                    a href=(endpoints::DASHBOARD_VIEW) class={ "pb-2 " (LINK_STYLE) } { "Ver todos" }
                }
            }
        }
    }
}

fn chart_card(title: &str, chart: Markup) -> Markup {
    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold mb-6" { (title) }
            (chart)
        }
    }
}

fn dashboard_view(
    stats: &DashboardStats,
    expenses: &[Expense],
    month: Option<&str>,
    pagination_config: &PaginationConfig,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let insights = generate_insights(stats, expenses);
    let alerts = suspicious_alerts(expenses);
    let table_query = TableQuery {
        month: month.map(str::to_owned),
        ..Default::default()
    };

    let content = html! {
        (nav_bar)

        div class={ (PAGE_CONTAINER_STYLE) " gap-6" }
        {
            (page_header(expenses, month))
            (kpi_cards_view(stats))
            (insights_panel_view(&insights))
            (suspicious_alerts_view(&alerts))
            (charge_type_summary_view(&charge_type_cards(stats)))
            (charge_analysis_view(&archetype_insights(expenses)))

            div class="grid grid-cols-1 lg:grid-cols-2 gap-6"
            {
                (chart_card("Gasto por Categoría", category_chart(stats)))
                (chart_card("Evolución Temporal", temporal_chart(stats)))
            }

            (chart_card("Evolución del Saldo", balance_chart(stats)))
            (fixed_variable_view(&FixedVariableSplit::from_stats(stats)))
            (expense_table_view(expenses, &table_query, pagination_config))
        }
    };

    base("Dashboard", &[], &content)
}

fn dashboard_error_view(error: &Error, month: Option<&str>) -> (axum::http::StatusCode, Markup) {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div
                role="alert"
                class="mx-auto max-w-xl rounded-lg border border-red-200 bg-red-50 p-6 text-center
                    dark:border-red-800 dark:bg-gray-800"
            {
                h1 class="text-xl font-semibold text-red-700 dark:text-red-400"
                {
                    "No se pudo cargar el dashboard"
                }
                p class="mt-2" data-testid="error-message" { (error.user_message()) }
                a href=(dashboard_url(month)) class={ "inline-block mt-4 " (BUTTON_PRIMARY_STYLE) }
                {
                    "Reintentar"
                }
            }
        }
    };

    (error.status_code(), base("Dashboard", &[], &content))
}
