//! HTTP client for the deployed translation web service
//!
//! The service is a Google Apps Script deployment that accepts a form POST
//! with `action=Translate` and the wire-format batch in `list`, and answers
//! with the delimited reply blob (or an HTML error page, which the
//! reassembler classifies).

use async_trait::async_trait;

use crate::backend::TranslationBackend;
use crate::error::{TranslateError, TranslateResult};

/// Environment variable holding the web service URL.
pub const WEB_SERVICE_URL_VAR: &str = "I2LOC_WEB_SERVICE_URL";

/// Client for the translation web service.
#[derive(Debug, Clone)]
pub struct WebServiceClient {
    url: String,
    client: reqwest::Client,
}

impl WebServiceClient {
    /// Create a client for the service at `url`.
    ///
    /// Fails with a `Config` error when the URL is empty — the service has to
    /// be installed and its URL configured before anything can be translated.
    pub fn new(url: impl Into<String>) -> TranslateResult<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(TranslateError::Config(
                "web service URL is not set; install the web service and configure its URL"
                    .to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                TranslateError::BackendUnreachable(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { url, client })
    }

    /// Create a client from the `I2LOC_WEB_SERVICE_URL` environment variable.
    pub fn from_env() -> TranslateResult<Self> {
        let url = std::env::var(WEB_SERVICE_URL_VAR).map_err(|_| {
            TranslateError::Config(format!(
                "{} environment variable not set",
                WEB_SERVICE_URL_VAR
            ))
        })?;
        Self::new(url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl TranslationBackend for WebServiceClient {
    async fn fetch(&self, request_body: &str) -> TranslateResult<String> {
        let form = [("action", "Translate"), ("list", request_body)];

        let response = self
            .client
            .post(&self.url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                TranslateError::BackendUnreachable(format!(
                    "failed to contact the web service: {}",
                    e
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranslateError::BackendUnreachable(format!(
                "web service returned {}: {}",
                status, body
            )));
        }

        response.text().await.map_err(|e| {
            TranslateError::BackendUnreachable(format!(
                "failed to read the web service response: {}",
                e
            ))
        })
    }

    fn backend_name(&self) -> &str {
        "I2 Localization web service"
    }
}
