//! Shared HTTP plumbing for the API adapters.
//!
//! One client, one timeout, bearer auth, and uniform status mapping.
//! There is deliberately no retry loop here: each user action produces at
//! most one attempt against an external service.

use crate::error::HttpError;
use reqwest::{header, Client, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum response-body bytes echoed into error messages.
const ERROR_BODY_LIMIT: usize = 512;

/// HTTP client with bearer auth and typed status mapping.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tiergate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { inner: client })
    }

    /// Performs a bearer-authenticated JSON POST.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        token: &str,
        body: &T,
    ) -> Result<Response, HttpError> {
        debug!(url = %url, "POST json");

        let response = self
            .inner
            .post(url)
            .bearer_auth(token)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Performs a bearer-authenticated form-encoded POST.
    pub async fn post_form(
        &self,
        url: &str,
        token: &str,
        params: &[(String, String)],
    ) -> Result<Response, HttpError> {
        debug!(url = %url, "POST form");

        let response = self
            .inner
            .post(url)
            .bearer_auth(token)
            .form(params)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Performs a bearer-authenticated GET.
    pub async fn get_with_auth(&self, url: &str, token: &str) -> Result<Response, HttpError> {
        debug!(url = %url, "GET");

        let response = self.inner.get(url).bearer_auth(token).send().await?;

        Self::check_status(response).await
    }

    /// Maps non-success statuses to typed errors.
    ///
    /// 401 and 403 are credential rejections; anything else non-2xx
    /// surfaces as an unexpected status with a truncated body.
    async fn check_status(response: Response) -> Result<Response, HttpError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(HttpError::AuthenticationFailed(
                "Invalid or expired credentials".to_string(),
            ));
        }

        let body = response.text().await.unwrap_or_default();
        let body = if body.chars().count() > ERROR_BODY_LIMIT {
            let truncated: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            format!("{truncated}...")
        } else {
            body
        };

        Err(HttpError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }
}
