use axum::{
    extract::{Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    Error,
    alert::Alert,
    api::ApiClient,
    endpoints,
    html::LINK_STYLE,
};

/// The largest request body accepted by the upload route.
pub const UPLOAD_BODY_LIMIT: usize = 25 * 1024 * 1024;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A PDF read from the upload form.
#[derive(Debug, PartialEq)]
struct PdfFile {
    file_name: String,
    contents: Vec<u8>,
}

/// Route handler for uploading a bank statement.
///
/// The statement is forwarded to the backend, which extracts the transactions.
pub async fn upload_statement(State(api): State<ApiClient>, multipart: Multipart) -> Response {
    let file = match read_pdf(multipart).await {
        Ok(file) => file,
        Err(error) => {
            tracing::debug!("rejected upload: {error}");
            return error.into_alert_response();
        }
    };

    tracing::info!(
        "forwarding {} ({} bytes) to the backend",
        file.file_name,
        file.contents.len()
    );

    match api.upload_pdf(&file.file_name, file.contents).await {
        Ok(upload) => {
            let alert = Alert::Success {
                message: "Cartola procesada".to_owned(),
                details: format!("{} transacciones procesadas correctamente", upload.count),
            };

            (
                StatusCode::CREATED,
                html! {
                    (alert.into_html())
                    p class="mt-4 text-center"
                    {
                        a href=(endpoints::DASHBOARD_VIEW) class=(LINK_STYLE) { "Ver dashboard" }
                    }
                },
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not upload {}: {error}", file.file_name);
            error.into_alert_response()
        }
    }
}

async fn read_pdf(mut multipart: Multipart) -> Result<PdfFile, Error> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| Error::MultipartError(error.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        return parse_pdf_field(field).await;
    }

    Err(Error::MissingFile)
}

async fn parse_pdf_field(field: Field<'_>) -> Result<PdfFile, Error> {
    let file_name = match field.file_name() {
        Some(file_name) if !file_name.is_empty() => file_name.to_owned(),
        _ => return Err(Error::MissingFile),
    };

    if !is_pdf(field.content_type(), &file_name) {
        return Err(Error::NotPdf);
    }

    let contents = field
        .bytes()
        .await
        .inspect_err(|error| tracing::error!("Could not read data from multipart form field: {error}"))
        .map_err(|error| Error::MultipartError(error.body_text()))?;

    if contents.is_empty() {
        return Err(Error::MissingFile);
    }

    Ok(PdfFile {
        file_name,
        contents: contents.to_vec(),
    })
}

/// Browsers do not always send a content type for PDFs, so a `.pdf`
/// extension is also accepted.
fn is_pdf(content_type: Option<&str>, file_name: &str) -> bool {
    let has_pdf_type = content_type.is_some_and(|content_type| {
        content_type
            .split(';')
            .next()
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
    });

    has_pdf_type || file_name.to_lowercase().ends_with(".pdf")
}
