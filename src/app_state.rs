//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::{Config, Error, api::ApiClient, pagination::PaginationConfig};

/// The state of the REST server.
///
/// Nothing is cached between requests, every page fetches what it shows from the backend.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the expenses backend.
    pub api: ApiClient,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] with a client for the backend named in `config`.
    ///
    /// # Errors
    /// Returns an error if the backend URL is not a valid http(s) URL.
    pub fn new(config: &Config, pagination_config: PaginationConfig) -> Result<Self, Error> {
        let api = ApiClient::new(&config.api_base_url()?, config.request_timeout())?;

        Ok(Self {
            api,
            pagination_config,
        })
    }
}

impl FromRef<AppState> for ApiClient {
    fn from_ref(state: &AppState) -> Self {
        state.api.clone()
    }
}

impl FromRef<AppState> for PaginationConfig {
    fn from_ref(state: &AppState) -> Self {
        state.pagination_config.clone()
    }
}
