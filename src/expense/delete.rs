use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    api::ApiClient,
    expense::{ExpenseId, edit::QueryParams},
};

/// A route handler for deleting an expense, redirects back to the dashboard.
///
/// The confirmation prompt is shown by the browser before the request is sent.
pub async fn delete_expense_endpoint(
    State(api): State<ApiClient>,
    Path(expense_id): Path<ExpenseId>,
    Query(query_params): Query<QueryParams>,
) -> Response {
    match api.delete_expense(expense_id).await {
        Ok(()) => (HxRedirect(query_params.redirect_url()), StatusCode::OK).into_response(),
        Err(error) => {
            tracing::error!("Could not delete expense {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}
