//! Command line and environment configuration for the server.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::Error;

/// The web server for the Smart Report dashboard.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// The base URL of the expenses backend.
    #[arg(long, env = "EXPENSES_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    /// The port to serve the dashboard from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// How long to wait for the backend before giving up, in seconds.
    ///
    /// Statement analysis can take a while, so this should be generous.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 120)]
    pub request_timeout: u64,

    /// File path for the debug level log.
    #[arg(long, default_value = "debug.log")]
    pub log_path: PathBuf,
}

impl Config {
    /// The backend URL without trailing slashes.
    ///
    /// # Errors
    /// Returns [Error::InvalidBaseUrl] if the URL is not an absolute http(s) URL.
    pub fn api_base_url(&self) -> Result<String, Error> {
        normalize_base_url(&self.api_url)
    }

    /// The backend request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Check that `url` is an absolute http(s) URL and strip trailing slashes.
pub fn normalize_base_url(url: &str) -> Result<String, Error> {
    let trimmed = url.trim().trim_end_matches('/');

    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|error| Error::InvalidBaseUrl(url.to_owned(), error.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidBaseUrl(
            url.to_owned(),
            format!("unsupported scheme \"{}\"", parsed.scheme()),
        ));
    }

    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use crate::Error;

    use super::{Config, normalize_base_url};

    #[test]
    fn parses_arguments() {
        let config = Config::try_parse_from([
            "server",
            "--api-url",
            "https://api.example.com/",
            "--port",
            "8080",
            "--request-timeout",
            "30",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.api_base_url().unwrap(), "https://api.example.com");
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Config::try_parse_from(["server", "--port", "not-a-port"]).is_err());
    }

    #[test]
    fn base_url_must_be_http() {
        assert!(matches!(
            normalize_base_url("ftp://example.com"),
            Err(Error::InvalidBaseUrl(..))
        ));
        assert!(matches!(
            normalize_base_url("localhost"),
            Err(Error::InvalidBaseUrl(..))
        ));
        assert_eq!(
            normalize_base_url(" http://localhost:8000// ").unwrap(),
            "http://localhost:8000"
        );
    }
}
