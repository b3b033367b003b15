//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}', use [format_endpoint].

/// The root route which shows the statement upload page.
pub const ROOT: &str = "/";
/// The page with the charts, insights and transactions for the uploaded statements.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The partial that renders the searchable, paginated transactions table.
pub const DASHBOARD_TRANSACTIONS: &str = "/dashboard/transactions";
/// The modal partial that shows every field of a single expense.
pub const EXPENSE_DETAIL_VIEW: &str = "/expenses/{expense_id}";
/// The modal partial with the form for editing an expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/{expense_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to upload a PDF statement for analysis.
pub const UPLOAD: &str = "/api/upload";
/// The route to update or delete a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/expenses/{expense_id}', '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

/// The dashboard URL, limited to `month` when one is given.
pub fn dashboard_url(month: Option<&str>) -> String {
    match month.filter(|month| !month.is_empty()) {
        Some(month) => match serde_urlencoded::to_string([("month", month)]) {
            Ok(query) => format!("{DASHBOARD_VIEW}?{query}"),
            Err(_) => DASHBOARD_VIEW.to_owned(),
        },
        None => DASHBOARD_VIEW.to_owned(),
    }
}
