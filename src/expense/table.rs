//! The searchable, paginated transactions table at the bottom of the dashboard.
//!
//! The full expense list is fetched on every request and filtered here. The
//! search form re-requests [get_expense_table] as the user types and only
//! the results below the form are swapped.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    api::ApiClient,
    endpoints::{self, dashboard_url, format_endpoint},
    expense::{Expense, ExpenseFilter, distinct_categories},
    format::{format_currency, format_date},
    html::{
        ALERT_CONTAINER_ID, BADGE_STYLE, CARD_STYLE, FORM_TEXT_INPUT_STYLE, MODAL_CONTAINER_ID,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
    },
    pagination::{
        PaginationConfig, PaginationIndicator, clamp_page, create_pagination_indicators,
        page_count, paginate,
    },
};

/// The element the table partial is swapped into.
pub const TABLE_RESULTS_ID: &str = "expense-table-results";

const MAX_DESCRIPTION_GRAPHEMES: usize = 40;

/// The query string of the table partial.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<String>,
    /// The page to show, starting from one.
    pub page: Option<u64>,
    /// The month selected on the dashboard, edits and deletes return to it.
    #[serde(default)]
    pub month: Option<String>,
}

impl TableQuery {
    fn filter(&self) -> ExpenseFilter {
        ExpenseFilter {
            search: self.search.clone(),
            category: self.category.clone(),
        }
    }

    fn month(&self) -> Option<&str> {
        self.month.as_deref().filter(|month| !month.is_empty())
    }

    fn page_url(&self, page: u64) -> String {
        let page = page.to_string();
        let params: Vec<(&str, &str)> = [
            ("search", self.search.trim()),
            ("category", self.category.as_deref().unwrap_or_default()),
            ("month", self.month().unwrap_or_default()),
            ("page", page.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect();

        match serde_urlencoded::to_string(params) {
            Ok(query) => format!("{}?{query}", endpoints::DASHBOARD_TRANSACTIONS),
            Err(_) => endpoints::DASHBOARD_TRANSACTIONS.to_owned(),
        }
    }
}

/// Route handler for the table partial.
pub async fn get_expense_table(
    State(api): State<ApiClient>,
    State(pagination_config): State<PaginationConfig>,
    Query(query): Query<TableQuery>,
) -> Response {
    match api.list_expenses(None).await {
        Ok(expenses) => expense_table_results(&expenses, &query, &pagination_config).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// The table panel with its search form and the first page of results.
pub fn expense_table_view(
    expenses: &[Expense],
    query: &TableQuery,
    pagination_config: &PaginationConfig,
) -> Markup {
    let categories = distinct_categories(expenses);
    let selected_category = query.category.as_deref().unwrap_or_default();

    html! {
        section class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold mb-6" { "Detalle de Transacciones" }

            form
                hx-get=(endpoints::DASHBOARD_TRANSACTIONS)
                hx-trigger="input changed delay:300ms, change, submit"
                hx-target={ "#" (TABLE_RESULTS_ID) }
                hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                class="flex flex-col sm:flex-row gap-4 mb-6"
            {
                @if let Some(month) = query.month() {
                    input type="hidden" name="month" value=(month);
                }

                input
                    type="search"
                    name="search"
                    value=(query.search)
                    aria-label="Buscar transacciones"
                    placeholder="Buscar por descripción, vendedor o categoría..."
                    class={ "flex-1 " (FORM_TEXT_INPUT_STYLE) };

                select
                    name="category"
                    aria-label="Filtrar por categoría"
                    class={ "sm:max-w-xs " (FORM_TEXT_INPUT_STYLE) }
                {
                    option value="" selected[selected_category.is_empty()] { "Todas las categorías" }

                    @for category in categories {
                        option value=(category) selected[category == selected_category] { (category) }
                    }
                }
            }

            div id=(TABLE_RESULTS_ID)
            {
                (expense_table_results(expenses, query, pagination_config))
            }
        }
    }
}

/// The filtered page of the table, its row count and the page links.
pub fn expense_table_results(
    expenses: &[Expense],
    query: &TableQuery,
    pagination_config: &PaginationConfig,
) -> Markup {
    let filtered = query.filter().apply(expenses);
    let page_size = pagination_config.default_page_size;
    let page_count = page_count(filtered.len(), page_size);
    let page = clamp_page(
        query.page.unwrap_or(pagination_config.default_page),
        page_count,
    );
    let rows = paginate(&filtered, page, page_size);
    let indicators = create_pagination_indicators(page, page_count, pagination_config.max_pages);
    let redirect_url = dashboard_url(query.month());

    html! {
        p class="mb-4 text-sm text-gray-600 dark:text-gray-400" data-testid="row-count"
        {
            (filtered.len()) " de " (expenses.len()) " transacciones"
        }

        div class="overflow-x-auto"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Fecha" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Tipo" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Categoría" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Vendedor" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Descripción" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Monto" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Fijo/Variable" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Acciones" }
                    }
                }

                tbody
                {
                    @for expense in rows {
                        (expense_row(expense, &redirect_url))
                    }
                }
            }

            @if filtered.is_empty() {
                p class="text-center py-8 text-gray-700 dark:text-gray-300"
                {
                    "No se encontraron transacciones que coincidan con los filtros"
                }
            }
        }

        @if page_count > 1 {
            (pagination_view(&indicators, query))
        }
    }
}

fn expense_row(expense: &Expense, redirect_url: &str) -> Markup {
    let (description, tooltip) = format_description(expense.description.as_deref());
    let amount_style = if expense.is_cargo() {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };
    let type_style = if expense.is_cargo() {
        "bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-300"
    } else {
        "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-300"
    };
    let redirect_query = serde_urlencoded::to_string([("redirect_url", redirect_url)])
        .unwrap_or_default();
    let detail_url = format_endpoint(endpoints::EXPENSE_DETAIL_VIEW, expense.id);
    let edit_url = format!(
        "{}?{redirect_query}",
        format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id)
    );
    let delete_url = format!(
        "{}?{redirect_query}",
        format_endpoint(endpoints::EXPENSE, expense.id)
    );

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            td class={ (TABLE_CELL_STYLE) " whitespace-nowrap" } { (format_date(expense.date.as_deref())) }
            td class=(TABLE_CELL_STYLE)
            {
                span class={ "px-2 py-1 text-xs font-medium rounded-full " (type_style) }
                {
                    (expense.transaction_type.label())
                }
            }
            td class=(TABLE_CELL_STYLE) { span class=(BADGE_STYLE) { (expense.category) } }
            td class=(TABLE_CELL_STYLE) { (expense.vendor.as_deref().unwrap_or("N/A")) }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class={ (TABLE_CELL_STYLE) " text-right font-semibold whitespace-nowrap " (amount_style) }
            {
                (format_currency(expense.amount))
            }
            td class=(TABLE_CELL_STYLE) { (expense.is_fixed.label()) }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-3 text-xs font-medium"
                {
                    button
                        type="button"
                        hx-get=(detail_url)
                        hx-target={ "#" (MODAL_CONTAINER_ID) }
                        hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                        class="text-gray-700 dark:text-gray-300 hover:underline"
                    { "Ver" }

                    button
                        type="button"
                        hx-get=(edit_url)
                        hx-target={ "#" (MODAL_CONTAINER_ID) }
                        hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                        class="text-blue-600 dark:text-blue-400 hover:underline"
                    { "Editar" }

                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-confirm="¿Estás seguro de eliminar este gasto?"
                        hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                        class="text-red-600 dark:text-red-400 hover:underline"
                    { "Eliminar" }
                }
            }
        }
    }
}

fn pagination_view(indicators: &[PaginationIndicator], query: &TableQuery) -> Markup {
    let page_link = |page: u64, text: String| {
        html! {
            a
                href="#"
                hx-get=(query.page_url(page))
                hx-target={ "#" (TABLE_RESULTS_ID) }
                class="block px-3 py-2 rounded-sm text-blue-600 hover:underline"
            { (text) }
        }
    };

    html! {
        nav class="pagination flex justify-center mt-4" aria-label="Paginación"
        {
            ul class="pagination flex items-center gap-1"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::Page(page) => (page_link(*page, page.to_string())),
                            PaginationIndicator::CurrPage(page) => {
                                p aria-current="page" class="block px-3 py-2 rounded-sm font-bold"
                                {
                                    (page)
                                }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="px-3 py-2 text-gray-400" { "..." }
                            }
                            PaginationIndicator::BackButton(page) => (page_link(*page, "Anterior".to_owned())),
                            PaginationIndicator::NextButton(page) => (page_link(*page, "Siguiente".to_owned())),
                        }
                    }
                }
            }
        }
    }
}

/// Truncate long descriptions, returning the full text as the tooltip when truncated.
fn format_description(description: Option<&str>) -> (String, Option<&str>) {
    let Some(description) = description.filter(|description| !description.trim().is_empty())
    else {
        return ("Sin descripción".to_owned(), None);
    };

    if description.graphemes(true).count() <= MAX_DESCRIPTION_GRAPHEMES {
        return (description.to_owned(), None);
    }

    let truncated: String = description
        .graphemes(true)
        .take(MAX_DESCRIPTION_GRAPHEMES - 3)
        .collect();

    (truncated + "...", Some(description))
}
