use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::domain::DomainError;

/// Default target: the agent API on its standard local port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub const BASE_URL_ENV: &str = "FINCHAT_BASE_URL";
pub const TIMEOUT_ENV: &str = "FINCHAT_TIMEOUT_SECS";

/// [`HttpTransport`] over a shared `reqwest::Client`.
///
/// Request paths are joined onto the base URL, which is stored without a
/// trailing `/`. No timeout is applied unless one is configured, so a call
/// waits as long as the service takes to answer. A zero timeout is rejected
/// as invalid input; leave it unset for no timeout.
///
/// Configuration from the environment:
///
/// | Variable               | Default                 | Purpose                    |
/// |------------------------|-------------------------|----------------------------|
/// | `FINCHAT_BASE_URL`     | `http://localhost:8000` | Root of the agent service  |
/// | `FINCHAT_TIMEOUT_SECS` | unset                   | Per-request timeout, > 0   |
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, DomainError> {
        let base: String = base_url.into();
        let base_url = base.trim_end_matches('/').to_string();

        reqwest::Url::parse(&base_url)
            .map_err(|e| DomainError::invalid_input(format!("invalid base URL '{base}': {e}")))?;

        if timeout.is_some_and(|t| t.is_zero()) {
            return Err(DomainError::invalid_input(
                "timeout must be greater than zero; leave it unset for no timeout",
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn from_env() -> Result<Self, DomainError> {
        Self::new(Self::configured_base_url(), Self::configured_timeout()?)
    }

    pub fn configured_base_url() -> String {
        std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    }

    pub fn configured_timeout() -> Result<Option<Duration>, DomainError> {
        match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(|secs| Some(Duration::from_secs(secs)))
                .map_err(|e| DomainError::invalid_input(format!("{TIMEOUT_ENV}='{raw}': {e}"))),
            Err(_) => Ok(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, DomainError> {
        let url = self.url_for(request.path());
        debug!("{} {}", request.method(), url);

        let mut builder = match request.method() {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_string());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("{} {url}: {e}", request.method())))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::transport(format!("reading body of {url}: {e}")))?;

        debug!("{} {} -> {}", request.method(), url, status);
        Ok(HttpResponse::new(status, body))
    }
}
