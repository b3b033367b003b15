//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    alert::Alert, html::error_view, internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request to the backend failed before a response arrived, e.g. the
    /// connection was refused or timed out.
    #[error(
        "No se puede conectar al backend en {base_url}. Asegúrate de que el backend esté corriendo."
    )]
    BackendUnreachable {
        /// The configured backend URL.
        base_url: String,
    },

    /// The backend answered with a non-success status code.
    ///
    /// `detail` is the backend's own explanation when the body includes one.
    #[error("{detail}")]
    RequestRejected {
        /// The HTTP status code returned by the backend.
        status: u16,
        /// A message that can be shown to the user.
        detail: String,
    },

    /// The backend answered with a success status but the body could not be decoded.
    #[error("the backend response could not be decoded: {0}")]
    InvalidResponse(String),

    /// The configured backend URL is not an absolute http(s) URL.
    #[error("invalid backend URL \"{0}\": {1}")]
    InvalidBaseUrl(String, String),

    /// The HTTP client could not be created.
    #[error("could not build the HTTP client: {0}")]
    HttpClient(String),

    /// The uploaded file is not a PDF.
    #[error("the uploaded file is not a PDF")]
    NotPdf,

    /// The upload form did not include a file.
    #[error("the upload form did not include a file")]
    MissingFile,

    /// The multipart form could not be parsed.
    #[error("could not parse multipart form: {0}")]
    MultipartError(String),
}

impl Error {
    /// The single message to show the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            Error::BackendUnreachable { .. } | Error::RequestRejected { .. } => self.to_string(),
            Error::InvalidResponse(_) => {
                "El backend respondió con datos que no se pudieron interpretar.".to_owned()
            }
            Error::NotPdf => "Por favor, sube un archivo PDF".to_owned(),
            Error::MissingFile => "Selecciona un archivo PDF para subir.".to_owned(),
            Error::MultipartError(_) => "No se pudo leer el archivo enviado.".to_owned(),
            Error::InvalidBaseUrl(..) | Error::HttpClient(_) => {
                "El servidor no está configurado correctamente.".to_owned()
            }
        }
    }

    /// The status code to send to the browser for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BackendUnreachable { .. } | Error::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            // Client errors from the backend are passed through, server errors are ours to report.
            Error::RequestRejected { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(StatusCode::is_client_error)
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Error::NotPdf | Error::MissingFile | Error::MultipartError(_) => StatusCode::BAD_REQUEST,
            Error::InvalidBaseUrl(..) | Error::HttpClient(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let status_code = self.status_code();
        let alert = match self {
            Error::NotPdf | Error::MissingFile => Alert::ErrorSimple {
                message: self.user_message(),
            },
            Error::BackendUnreachable { .. } => Alert::Error {
                message: "Sin conexión con el backend".to_owned(),
                details: self.user_message(),
            },
            _ => Alert::Error {
                message: "No se pudo completar la operación".to_owned(),
                details: self.user_message(),
            },
        };

        (status_code, alert.into_html()).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::RequestRejected { status: 404, .. } => NotFoundError.into_response(),
            Error::InvalidBaseUrl(..) | Error::HttpClient(_) => {
                tracing::error!("An unexpected error occurred: {}", self);
                InternalServerError::default().into_response()
            }
            error => {
                let status_code = error.status_code();
                let html = error_view(
                    "Error",
                    status_code.as_str(),
                    "No pudimos completar la solicitud",
                    &error.user_message(),
                );

                (status_code, Html(html.into_string())).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::test_utils::{parse_html_fragment, parse_html_document};

    use super::Error;

    #[test]
    fn unreachable_message_names_backend() {
        let error = Error::BackendUnreachable {
            base_url: "http://localhost:8000".to_owned(),
        };

        assert_eq!(
            error.user_message(),
            "No se puede conectar al backend en http://localhost:8000. \
            Asegúrate de que el backend esté corriendo."
        );
        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn rejected_request_shows_backend_detail() {
        let error = Error::RequestRejected {
            status: 422,
            detail: "Categoría inválida".to_owned(),
        };

        assert_eq!(error.user_message(), "Categoría inválida");
        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn backend_server_errors_are_bad_gateway() {
        let error = Error::RequestRejected {
            status: 500,
            detail: "boom".to_owned(),
        };

        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn missing_expense_renders_not_found_page() {
        let response = Error::RequestRejected {
            status: 404,
            detail: "Gasto no encontrado".to_owned(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_document(response).await;
        assert!(html.root_element().text().any(|text| text.contains("404")));
    }

    #[tokio::test]
    async fn not_pdf_alert_uses_upload_message() {
        let response = Error::NotPdf.into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        let text: String = html.root_element().text().collect();
        assert!(text.contains("Por favor, sube un archivo PDF"));
    }
}
