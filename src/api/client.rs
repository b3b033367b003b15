//! HTTP client for the expenses backend.

use std::time::Duration;

use reqwest::{
    RequestBuilder, Response,
    multipart::{Form, Part},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    Error,
    config::normalize_base_url,
    expense::{Expense, ExpenseId, ExpenseUpdate, UploadResponse},
    stats::DashboardStats,
};

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    categories: Vec<String>,
}

/// A client for the expenses backend.
///
/// Cloning is cheap, clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// Every request gives up after `timeout`.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::HttpClient(error.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// The backend URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<String, Error> {
        let url = format!("{}{}", self.base_url, path);
        if query.is_empty() {
            return Ok(url);
        }

        let query = serde_urlencoded::to_string(query)
            .map_err(|error| Error::HttpClient(error.to_string()))?;

        Ok(format!("{url}?{query}"))
    }

    fn unreachable(&self) -> Error {
        Error::BackendUnreachable {
            base_url: self.base_url.clone(),
        }
    }

    /// Send `request` and check the response status.
    ///
    /// `fallback` is shown to the user when the backend rejects the request
    /// without explaining why.
    async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<Response, Error> {
        let response = request
            .send()
            .await
            .inspect_err(|error| {
                tracing::error!("Could not reach the backend at {}: {error}", self.base_url)
            })
            .map_err(|_| self.unreachable())?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("The backend rejected the request with status {status}: {body}");

        Err(Error::RequestRejected {
            status: status.as_u16(),
            detail: rejection_detail(&body).unwrap_or_else(|| fallback.to_owned()),
        })
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, Error> {
        let body = response
            .bytes()
            .await
            .inspect_err(|error| tracing::error!("Could not read the backend response: {error}"))
            .map_err(|_| self.unreachable())?;

        serde_json::from_slice(&body)
            .inspect_err(|error| tracing::error!("Could not decode the backend response: {error}"))
            .map_err(|error| Error::InvalidResponse(error.to_string()))
    }

    /// Upload a PDF statement for the backend to analyse.
    pub async fn upload_pdf(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<UploadResponse, Error> {
        let part = Part::bytes(contents)
            .file_name(file_name.to_owned())
            .mime_str("application/pdf")
            .map_err(|error| Error::HttpClient(error.to_string()))?;
        let form = Form::new().part("file", part);

        let url = self.url("/expenses/upload", &[])?;
        let response = self
            .send(
                self.http.post(url).multipart(form),
                "Error al subir el archivo PDF",
            )
            .await?;

        self.decode(response).await
    }

    /// Get every expense, or only the expenses in `category`.
    pub async fn list_expenses(&self, category: Option<&str>) -> Result<Vec<Expense>, Error> {
        let query: Vec<(&str, &str)> = category
            .filter(|category| !category.is_empty())
            .map(|category| ("category", category))
            .into_iter()
            .collect();

        let url = self.url("/expenses/", &query)?;
        let response = self
            .send(self.http.get(url), "No se pudieron obtener los gastos")
            .await?;

        self.decode(response).await
    }

    /// Fetch a single expense by its id.
    pub async fn get_expense(&self, id: ExpenseId) -> Result<Expense, Error> {
        let url = self.url(&format!("/expenses/{id}"), &[])?;
        let response = self
            .send(self.http.get(url), "No se pudo obtener el gasto")
            .await?;

        self.decode(response).await
    }

    /// Apply `update` to an expense and return the updated expense.
    pub async fn update_expense(
        &self,
        id: ExpenseId,
        update: &ExpenseUpdate,
    ) -> Result<Expense, Error> {
        let url = self.url(&format!("/expenses/{id}"), &[])?;
        let response = self
            .send(
                self.http.put(url).json(update),
                "No se pudo actualizar el gasto",
            )
            .await?;

        self.decode(response).await
    }

    /// Delete an expense.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<(), Error> {
        let url = self.url(&format!("/expenses/{id}"), &[])?;
        self.send(self.http.delete(url), "No se pudo eliminar el gasto")
            .await?;

        Ok(())
    }

    /// The category names the backend knows about.
    pub async fn list_categories(&self) -> Result<Vec<String>, Error> {
        let url = self.url("/expenses/categories/list", &[])?;
        let response = self
            .send(self.http.get(url), "No se pudieron obtener las categorías")
            .await?;

        let categories: CategoriesResponse = self.decode(response).await?;

        Ok(categories.categories)
    }

    /// Get the dashboard statistics, optionally limited to a `YYYY-MM` month.
    pub async fn get_stats(&self, month: Option<&str>) -> Result<DashboardStats, Error> {
        let query: Vec<(&str, &str)> = month
            .filter(|month| !month.is_empty())
            .map(|month| ("month", month))
            .into_iter()
            .collect();

        let url = self.url("/expenses/stats", &query)?;
        let response = self
            .send(
                self.http.get(url),
                "No se pudieron obtener las estadísticas",
            )
            .await?;

        self.decode(response).await
    }
}

/// Extract the `detail` message from an error body.
///
/// Validation errors list one message per invalid field, these are joined.
fn rejection_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let detail = match value.get("detail")? {
        Value::String(detail) => detail.trim().to_owned(),
        Value::Array(errors) => errors
            .iter()
            .filter_map(|error| error.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };

    (!detail.is_empty()).then_some(detail)
}
