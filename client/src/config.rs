use crate::error::{ClientError, Result};
use reqwest::Url;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const API_URL_VAR: &str = "PDF_CHAT_API_URL";
pub const TIMEOUT_VAR: &str = "PDF_CHAT_TIMEOUT_SECS";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|e| ClientError::Config(format!("invalid API url '{}': {}", base_url, e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::Config(format!(
                "API url must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            timeout,
        })
    }

    /// Reads `PDF_CHAT_API_URL` and `PDF_CHAT_TIMEOUT_SECS`, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let base_url = env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout = match env::var(TIMEOUT_VAR) {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        Self::new(&base_url, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    pub fn ask_url(&self) -> String {
        format!("{}/ask", self.base_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    pub fn status_url(&self, job_id: &str) -> String {
        format!("{}/status/{}", self.base_url, job_id)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

pub fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_VAR, raw)))?;
    if secs == 0 {
        return Err(ClientError::Config(format!("{} must be greater than zero", TIMEOUT_VAR)));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_joined_without_double_slashes() {
        let config = ClientConfig::new("http://backend:5000/", None).unwrap();
        assert_eq!(config.base_url(), "http://backend:5000");
        assert_eq!(config.upload_url(), "http://backend:5000/upload");
        assert_eq!(config.ask_url(), "http://backend:5000/ask");
        assert_eq!(config.health_url(), "http://backend:5000/health");
        assert_eq!(config.status_url("abc"), "http://backend:5000/status/abc");
    }

    #[test]
    fn keeps_path_prefix() {
        let config = ClientConfig::new("https://example.com/api", None).unwrap();
        assert_eq!(config.ask_url(), "https://example.com/api/ask");
    }

    #[test]
    fn rejects_garbage_and_other_schemes() {
        assert!(matches!(ClientConfig::new("not a url", None), Err(ClientError::Config(_))));
        assert!(matches!(ClientConfig::new("ftp://example.com", None), Err(ClientError::Config(_))));
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().upload_url(), "http://localhost:5000/upload");
        assert_eq!(ClientConfig::default().timeout(), None);
    }

    #[test]
    fn timeout_parsing() {
        assert_eq!(parse_timeout(" 30 ").unwrap(), Duration::from_secs(30));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }
}
