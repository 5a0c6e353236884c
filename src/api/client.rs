use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Error body shape the remote API uses for failures.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// HTTP client for the remote dietetics API.
///
/// Holds the base URL and, once a user logs in, the bearer token attached to
/// every subsequent request. Each user action issues a single in-flight
/// request; there is no retry, coalescing or cancellation.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("token lock") = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().expect("token lock") = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock").is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.request(Method::GET, path, None::<&()>).await
    }

    pub(super) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(super) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// DELETE: a 2xx is success regardless of body. The API usually answers
    /// 204 No Content, so nothing is decoded.
    pub(super) async fn delete(&self, path: &str) -> AppResult<()> {
        self.send(Method::DELETE, path, None::<&()>).await?;
        Ok(())
    }

    /// Single request path with a decoded JSON response.
    async fn request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<T> {
        let response = self.send(method.clone(), path, body).await?;
        response.json::<T>().await.map_err(|e| {
            warn!(%method, path, error = %e, "api response decode failure");
            AppError::remote(format!("invalid response from API: {e}"))
        })
    }

    /// Sends one request: attaches the bearer token when present, maps
    /// transport errors and non-2xx responses to `RemoteFailure`, surfacing
    /// the server's `detail` message verbatim when it provides one.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<reqwest::Response> {
        let mut builder = self.http.request(method.clone(), self.url(path));
        if let Some(token) = self.token.read().expect("token lock").as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(%method, path, "api request");
        let response = builder.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "api transport failure");
            AppError::remote(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_response(status, response).await);
        }
        Ok(response)
    }

    async fn error_from_response(status: StatusCode, response: reqwest::Response) -> AppError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorDetail>(&body)
            .map(|e| e.detail)
            .unwrap_or_else(|_| format!("API request failed ({status})"));
        warn!(%status, message, "api error response");
        AppError::remote(message)
    }
}
