//! Application router configuration.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    expense::{
        delete_expense_endpoint, get_edit_expense_view, get_expense_detail, get_expense_table,
        update_expense_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    upload::{UPLOAD_BODY_LIMIT, get_upload_page, upload_statement},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_upload_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // Partials and form endpoints requested by htmx.
    let fragment_routes = Router::new()
        .route(endpoints::DASHBOARD_TRANSACTIONS, get(get_expense_table))
        .route(endpoints::EXPENSE_DETAIL_VIEW, get(get_expense_detail))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_view))
        .route(
            endpoints::EXPENSE,
            put(update_expense_endpoint).delete(delete_expense_endpoint),
        )
        .route(
            endpoints::UPLOAD,
            post(upload_statement).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        );

    page_routes
        .merge(fragment_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use std::path::PathBuf;

    use axum::{
        Json, Router,
        extract::Path,
        http::StatusCode,
        routing::{get, put},
    };
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        AppState, Config, endpoints,
        endpoints::format_endpoint,
        pagination::PaginationConfig,
        test_utils::{spawn_backend, unused_base_url},
    };

    use super::build_router;

    fn config(api_url: &str) -> Config {
        Config {
            api_url: api_url.to_owned(),
            port: 3000,
            request_timeout: 5,
            log_path: PathBuf::from("debug.log"),
        }
    }

    fn test_server(api_url: &str) -> TestServer {
        let state = AppState::new(&config(api_url), PaginationConfig::default())
            .expect("Could not create app state.");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    fn expense_body(id: i64) -> serde_json::Value {
        json!({"id": id, "category": "Supermercado", "amount": 15990, "date": "2025-01-15"})
    }

    #[tokio::test]
    async fn upload_page_is_served_at_root() {
        let server = test_server(&unused_base_url().await);

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        assert!(response.text().contains("Cargar Cartola"));
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let server = test_server(&unused_base_url().await);

        server
            .get("/no-such-page")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_error_page() {
        let server = test_server(&unused_base_url().await);

        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn dashboard_without_backend_shows_error() {
        let server = test_server(&unused_base_url().await);

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        assert!(response.text().contains("Reintentar"));
    }

    #[tokio::test]
    async fn detail_modal_is_routed_by_id() {
        let backend = Router::new().route(
            "/expenses/{id}",
            get(|Path(id): Path<i64>| async move { Json(expense_body(id)) }),
        );
        let server = test_server(&spawn_backend(backend).await);

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE_DETAIL_VIEW, 7))
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("$15.990"));
    }

    #[tokio::test]
    async fn missing_expense_is_not_found() {
        let backend = Router::new().route(
            "/expenses/{id}",
            get(|| async {
                (StatusCode::NOT_FOUND, Json(json!({"detail": "Gasto no encontrado"})))
            }),
        );
        let server = test_server(&spawn_backend(backend).await);

        server
            .get(&format_endpoint(endpoints::EXPENSE_DETAIL_VIEW, 99))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_redirects_with_htmx() {
        let backend = Router::new().route(
            "/expenses/{id}",
            put(|Path(id): Path<i64>| async move { Json(expense_body(id)) }),
        );
        let server = test_server(&spawn_backend(backend).await);

        let response = server
            .put(&format!(
                "{}?redirect_url=%2Fdashboard%3Fmonth%3D2025-01",
                format_endpoint(endpoints::EXPENSE, 7)
            ))
            .form(&[
                ("category", "Hogar"),
                ("is_fixed", "fixed"),
                ("transaction_type", "cargo"),
                ("description", ""),
            ])
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("hx-redirect"), "/dashboard?month=2025-01");
    }

    #[tokio::test]
    async fn delete_is_routed_on_the_expense_path() {
        let backend = Router::new().route(
            "/expenses/{id}",
            axum::routing::delete(|| async { StatusCode::NO_CONTENT }),
        );
        let server = test_server(&spawn_backend(backend).await);

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE, 7))
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("hx-redirect"), endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn oversized_uploads_are_rejected() {
        let server = test_server(&unused_base_url().await);
        let boundary = "MY_BOUNDARY123456789";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"big.pdf\"\r\n\
            Content-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.resize(body.len() + super::UPLOAD_BODY_LIMIT + 1, b'a');
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let response = server
            .post(endpoints::UPLOAD)
            .content_type(&format!("multipart/form-data; boundary={boundary}"))
            .bytes(body.into())
            .await;

        assert_ne!(response.status_code(), StatusCode::CREATED);
        assert!(response.status_code().is_client_error());
    }
}
