//! The modal that shows every field of an expense, including the fields filled in by the backend's analysis.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    api::ApiClient,
    expense::{Expense, ExpenseId},
    format::{format_currency, format_date},
    html::{BUTTON_SECONDARY_STYLE, modal},
};

/// Route handler for the detail modal partial.
pub async fn get_expense_detail(
    State(api): State<ApiClient>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    match api.get_expense(expense_id).await {
        Ok(expense) => expense_detail_view(&expense).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn expense_detail_view(expense: &Expense) -> Markup {
    let amount_style = if expense.is_cargo() {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };
    let score = expense
        .suspicion_score
        .map(|score| format!("{score:.2}"));

    let body = html! {
        p class={ "text-3xl font-bold mb-4 " (amount_style) }
        {
            (format_currency(expense.amount))
            span class="ml-2 text-sm font-medium" { (expense.transaction_type.label()) }
        }

        @if expense.is_suspicious {
            div
                class="mb-4 p-3 text-sm rounded-lg bg-yellow-50 text-yellow-800
                    dark:bg-gray-700 dark:text-yellow-300"
            {
                p class="font-semibold" { "Movimiento sospechoso" }
                @if let Some(reason) = &expense.suspicious_reason {
                    p { (reason) }
                }
            }
        }

        dl class="grid grid-cols-3 gap-x-4 gap-y-2 text-sm"
        {
            (field("Fecha", Some(format_date(expense.date.as_deref()).as_str())))
            (field("Categoría", Some(expense.category.as_str())))
            (field("Tipo", Some(expense.is_fixed.label())))
            (field("Vendedor", expense.vendor.as_deref()))
            (field("Descripción", expense.description.as_deref()))
            (field("Comercio", expense.merchant_normalized.as_deref()))
            (field("Rubro", expense.merchant_category.as_deref()))
            (field("Canal", expense.channel.as_deref()))
        }

        h3 class="mt-6 mb-2 font-semibold" { "Análisis IA" }
        dl class="grid grid-cols-3 gap-x-4 gap-y-2 text-sm"
        {
            (field("Arquetipo", expense.charge_archetype.as_deref()))
            (field("Origen", expense.charge_origin.as_deref()))
            (field("Puntaje de sospecha", score.as_deref()))
            (field("Método", expense.analysis_method.as_deref()))
        }

        h3 class="mt-6 mb-2 font-semibold" { "Origen del dato" }
        dl class="grid grid-cols-3 gap-x-4 gap-y-2 text-sm"
        {
            (field("Cartola", expense.pdf_filename.as_deref()))
            (field("Ruta", expense.pdf_path.as_deref()))
            (field("Creado", expense.created_at.as_deref()))
            (field("Actualizado", expense.updated_at.as_deref()))
        }

        div class="flex justify-end mt-6"
        {
            button
                type="button"
                onclick="document.getElementById('modal').remove()"
                class=(BUTTON_SECONDARY_STYLE)
            { "Cerrar" }
        }
    };

    modal("Detalle de Transacción", &body)
}

fn field(label: &str, value: Option<&str>) -> Markup {
    let value = value.filter(|value| !value.trim().is_empty());

    html! {
        dt class="font-medium text-gray-500 dark:text-gray-400" { (label) }
        dd class="col-span-2 break-words"
        {
            @match value {
                Some(value) => { (value) }
                None => { span class="text-gray-400" { "N/A" } }
            }
        }
    }
}
