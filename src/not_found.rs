//! The page to display when a route or expense does not exist.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        let html = error_view(
            "No encontrado",
            "404",
            "Página no encontrada",
            "La página o el gasto que buscas no existe. Revisa la dirección o vuelve al inicio.",
        );

        (StatusCode::NOT_FOUND, Html(html.into_string())).into_response()
    }
}

pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}
