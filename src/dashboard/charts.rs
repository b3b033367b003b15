//! Chart rendering for the dashboard.
//!
//! The charts are plain HTML and inline SVG:
//! - **Category chart**: horizontal bars of spending per category
//! - **Temporal chart**: vertical bars of spending per month
//! - **Balance chart**: a line of the account balance over time

use maud::{Markup, html};

use crate::{
    dashboard::geometry::{
        LineChart, PADDING_LEFT, PADDING_RIGHT, VIEW_HEIGHT, VIEW_WIDTH, bar_percentage,
    },
    format::{format_currency, format_date, format_month, format_percentage},
    stats::{
        BalanceSummary, DashboardStats, TemporalSummary, categories_by_amount, sorted_balances,
    },
};

fn empty_chart(message: &str) -> Markup {
    html! {
        p class="text-center py-8 text-gray-600 dark:text-gray-400" { (message) }
    }
}

/// Spending per category, largest first.
pub(super) fn category_chart(stats: &DashboardStats) -> Markup {
    let categories = categories_by_amount(stats);
    let Some(max) = categories.first().map(|(_, breakdown)| breakdown.amount) else {
        return empty_chart("No hay datos de categorías disponibles");
    };

    html! {
        ul class="space-y-4" data-chart="categories"
        {
            @for (category, breakdown) in &categories {
                li
                {
                    div class="flex justify-between text-sm mb-1"
                    {
                        span class="font-medium" { (category) }
                        span
                        {
                            (format_currency(breakdown.amount))
                            span class="ml-2 text-gray-500 dark:text-gray-400"
                            {
                                "(" (format_percentage(breakdown.percentage)) ")"
                            }
                        }
                    }

                    div class="w-full h-3 bg-gray-200 dark:bg-gray-700 rounded-full"
                    {
                        div
                            class="h-3 bg-blue-500 rounded-full"
                            style={ "width: " (format!("{:.1}", bar_percentage(breakdown.amount, max))) "%" }
                        {}
                    }

                    p class="text-xs text-gray-500 dark:text-gray-400 mt-1"
                    {
                        (breakdown.count) " transacciones"
                    }
                }
            }
        }
    }
}

/// Spending per month with the average, maximum and minimum below.
pub(super) fn temporal_chart(stats: &DashboardStats) -> Markup {
    let Some(summary) = TemporalSummary::from_stats(stats) else {
        return empty_chart("No hay datos de evolución temporal disponibles");
    };

    html! {
        div class="space-y-4"
        {
            div class="flex items-end justify-around h-64 border-b border-gray-200 dark:border-gray-700" data-chart="monthly"
            {
                @for month in &stats.monthly_evolution {
                    div class="flex flex-col items-center justify-end gap-2 flex-1 h-full mx-1"
                    {
                        span class="text-xs font-semibold" { (format_currency(month.amount)) }
                        div
                            class="w-full bg-blue-500 hover:bg-blue-600 rounded-t"
                            style={ "height: " (format!("{:.1}", bar_percentage(month.amount, summary.maximum))) "%" }
                            title={ (format_month(&month.month)) ": " (format_currency(month.amount)) }
                        {}
                        span class="text-xs font-medium" { (format_month(&month.month)) }
                    }
                }
            }

            dl class="grid grid-cols-3 gap-4 pt-2"
            {
                div
                {
                    dt class="text-xs text-gray-500 dark:text-gray-400" { "Promedio" }
                    dd class="text-lg font-semibold" { (format_currency(summary.average)) }
                }
                div
                {
                    dt class="text-xs text-gray-500 dark:text-gray-400" { "Máximo" }
                    dd class="text-lg font-semibold text-red-600" { (format_currency(summary.maximum)) }
                }
                div
                {
                    dt class="text-xs text-gray-500 dark:text-gray-400" { "Mínimo" }
                    dd class="text-lg font-semibold text-green-600" { (format_currency(summary.minimum)) }
                }
            }
        }
    }
}

/// The balance over time as a line, with the initial, current and change below.
pub(super) fn balance_chart(stats: &DashboardStats) -> Markup {
    let points = sorted_balances(stats);
    let balances: Vec<f64> = points.iter().map(|point| point.balance).collect();
    let (Some(chart), Some(summary)) = (LineChart::new(&balances), BalanceSummary::from_points(&points))
    else {
        return empty_chart("No hay datos de evolución de saldo disponibles");
    };

    let first_date = points.first().map(|point| format_date(Some(point.date.as_str())));
    let last_date = (points.len() > 1)
        .then(|| points.last().map(|point| format_date(Some(point.date.as_str()))))
        .flatten();
    let change_sign = if summary.change > 0.0 { "+" } else { "" };

    html! {
        div class="space-y-4"
        {
            svg
                viewBox={ "0 0 " (VIEW_WIDTH) " " (VIEW_HEIGHT) }
                class="w-full h-auto"
                role="img"
                aria-label="Evolución del saldo"
                data-chart="balance"
            {
                @for tick in &chart.ticks {
                    line
                        x1=(PADDING_LEFT)
                        y1=(format!("{:.1}", tick.y))
                        x2=(VIEW_WIDTH - PADDING_RIGHT)
                        y2=(format!("{:.1}", tick.y))
                        stroke="#E5E7EB"
                        stroke-width="1"
                        stroke-dasharray="2 2"
                    {}
                    text
                        x=(PADDING_LEFT - 8.0)
                        y=(format!("{:.1}", tick.y))
                        text-anchor="end"
                        dominant-baseline="middle"
                        font-size="11"
                        fill="#6B7280"
                    {
                        (format_currency(tick.value))
                    }
                }

                @if let Some(zero_y) = chart.zero_line {
                    line
                        x1=(PADDING_LEFT)
                        y1=(format!("{zero_y:.1}"))
                        x2=(VIEW_WIDTH - PADDING_RIGHT)
                        y2=(format!("{zero_y:.1}"))
                        stroke="#9CA3AF"
                        stroke-width="1"
                        stroke-dasharray="3 3"
                        data-zero-line="true"
                    {}
                }

                path
                    d=(chart.path())
                    fill="none"
                    stroke="#3B82F6"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                {}

                @if chart.points.len() == 1 {
                    circle cx=(chart.points[0].x) cy=(chart.points[0].y) r="4" fill="#3B82F6" {}
                }

                @if let Some(first_date) = &first_date {
                    text x=(PADDING_LEFT) y=(VIEW_HEIGHT - 8.0) font-size="11" fill="#6B7280"
                    {
                        (first_date)
                    }
                }

                @if let Some(last_date) = &last_date {
                    text
                        x=(VIEW_WIDTH - PADDING_RIGHT)
                        y=(VIEW_HEIGHT - 8.0)
                        text-anchor="end"
                        font-size="11"
                        fill="#6B7280"
                    {
                        (last_date)
                    }
                }
            }

            dl class="grid grid-cols-3 gap-4 pt-4 border-t border-gray-200 dark:border-gray-700"
            {
                div class="rounded-lg p-3 border border-gray-200 dark:border-gray-700"
                {
                    dt class="text-xs font-medium text-gray-500 uppercase" { "Saldo Inicial" }
                    dd class={ "text-xl font-bold " (balance_style(summary.initial)) }
                    {
                        (format_currency(summary.initial))
                    }
                }
                div class="rounded-lg p-3 border border-gray-200 dark:border-gray-700"
                {
                    dt class="text-xs font-medium text-gray-500 uppercase" { "Saldo Actual" }
                    dd class={ "text-2xl font-extrabold " (balance_style(summary.current)) }
                    {
                        (format_currency(summary.current))
                    }
                }
                div class="rounded-lg p-3 border border-gray-200 dark:border-gray-700"
                {
                    dt class="text-xs font-medium text-gray-500 uppercase" { "Variación" }
                    dd class={ "text-xl font-bold " (balance_style(summary.change)) }
                    {
                        (change_sign) (format_currency(summary.change))
                    }
                }
            }
        }
    }
}

fn balance_style(amount: f64) -> &'static str {
    if amount < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-700 dark:text-green-400"
    }
}
