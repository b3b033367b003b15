//! The edit modal and the endpoint that saves the changes to the backend.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    api::ApiClient,
    endpoints::{self, format_endpoint},
    expense::{Expense, ExpenseId, ExpenseUpdate, FixedKind, TransactionType},
    format::format_currency,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        loading_spinner, modal,
    },
};

const EDIT_ALERT_ID: &str = "edit-expense-alert";

/// Where to send the browser after the change is saved.
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    pub redirect_url: Option<String>,
}

impl QueryParams {
    /// The redirect URL if it is a path on this site, otherwise the dashboard.
    pub fn redirect_url(&self) -> String {
        self.redirect_url
            .as_deref()
            .filter(|url| url.starts_with('/') && !url.starts_with("//"))
            .unwrap_or(endpoints::DASHBOARD_VIEW)
            .to_owned()
    }
}

#[derive(Debug, Deserialize)]
pub struct EditExpenseForm {
    pub category: String,
    pub is_fixed: FixedKind,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub description: String,
}

impl EditExpenseForm {
    fn into_update(self) -> ExpenseUpdate {
        let description = self.description.trim();

        ExpenseUpdate {
            category: Some(self.category.trim().to_owned()),
            is_fixed: Some(self.is_fixed),
            transaction_type: Some(self.transaction_type),
            description: Some((!description.is_empty()).then(|| description.to_owned())),
            ..Default::default()
        }
    }
}

/// Route handler for the edit modal partial.
pub async fn get_edit_expense_view(
    State(api): State<ApiClient>,
    Path(expense_id): Path<ExpenseId>,
    Query(query_params): Query<QueryParams>,
) -> Response {
    let (expense, categories) = tokio::join!(api.get_expense(expense_id), api.list_categories());

    let expense = match expense {
        Ok(expense) => expense,
        Err(error) => return error.into_alert_response(),
    };

    let mut categories = categories.unwrap_or_else(|error| {
        tracing::warn!(
            "Could not get categories for expense {expense_id}, using its current category: {error}"
        );
        Vec::new()
    });
    if !expense.category.is_empty() && !categories.contains(&expense.category) {
        categories.insert(0, expense.category.clone());
    }

    edit_expense_view(&expense, &categories, &query_params.redirect_url()).into_response()
}

fn edit_expense_view(expense: &Expense, categories: &[String], redirect_url: &str) -> Markup {
    let redirect_query =
        serde_urlencoded::to_string([("redirect_url", redirect_url)]).unwrap_or_default();
    let update_url = format!(
        "{}?{redirect_query}",
        format_endpoint(endpoints::EXPENSE, expense.id)
    );
    let description = expense.description.as_deref().unwrap_or_default();

    let body = html! {
        p class="mb-4 text-sm text-gray-600 dark:text-gray-400"
        {
            (expense.merchant().unwrap_or("Sin vendedor")) " · " (format_currency(expense.amount))
        }

        form
            hx-put=(update_url)
            hx-target-error={ "#" (EDIT_ALERT_ID) }
            hx-disabled-elt="find button"
            class="space-y-4"
        {
            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Categoría" }
                select id="category" name="category" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in categories {
                        option value=(category) selected[*category == expense.category] { (category) }
                    }
                }
            }

            div
            {
                label for="is_fixed" class=(FORM_LABEL_STYLE) { "Tipo de Gasto" }
                select id="is_fixed" name="is_fixed" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for kind in [FixedKind::Fixed, FixedKind::Variable] {
                        option value=(kind.as_str()) selected[kind == expense.is_fixed] { (kind.label()) }
                    }
                }
            }

            div
            {
                label for="transaction_type" class=(FORM_LABEL_STYLE) { "Tipo de Transacción" }
                select id="transaction_type" name="transaction_type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="cargo" selected[expense.is_cargo()] { "Cargo" }
                    option value="abono" selected[!expense.is_cargo()] { "Abono" }
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Descripción" }
                input
                    id="description"
                    type="text"
                    name="description"
                    value=(description)
                    placeholder="Descripción opcional"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div id=(EDIT_ALERT_ID) {}

            div class="flex gap-3 pt-2"
            {
                button
                    type="button"
                    onclick="document.getElementById('modal').remove()"
                    class={ "flex-1 " (BUTTON_SECONDARY_STYLE) }
                { "Cancelar" }

                button type="submit" class={ "flex-1 " (BUTTON_PRIMARY_STYLE) }
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    "Guardar"
                }
            }
        }
    };

    modal("Editar Transacción", &body)
}

/// Route handler that saves an edited expense and redirects back to the dashboard.
pub async fn update_expense_endpoint(
    State(api): State<ApiClient>,
    Path(expense_id): Path<ExpenseId>,
    Query(query_params): Query<QueryParams>,
    Form(form): Form<EditExpenseForm>,
) -> Response {
    if let Err(error) = api.update_expense(expense_id, &form.into_update()).await {
        tracing::error!("Could not update expense {expense_id}: {error}");
        return error.into_alert_response();
    }

    (HxRedirect(query_params.redirect_url()), StatusCode::OK).into_response()
}
