//! HTTP transport shared by every endpoint group.
//!
//! One `reqwest` client, built once with the configured timeout. Every request
//! is augmented with `Authorization: Bearer <token>` when the session provider
//! holds one; a missing token is not an error here - the server answers 401 and
//! that is surfaced to the caller like any other error status. No retry, no
//! backoff, no deduplication at this layer.

use std::sync::Arc;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::SessionProvider;

/// Error envelope the API uses for non-success statuses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP request executor for the Copperleaf API.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<TransportInner>,
}

struct TransportInner {
    http: reqwest::Client,
    base_url: String,
    session: SessionProvider,
    /// Bootstrap credential for headless admin tooling. An interactive
    /// session always wins over it.
    service_token: Option<SecretString>,
}

impl Transport {
    /// Create a new transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &ApiConfig, session: SessionProvider) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let base_url = config.base_url.as_str().trim_end_matches('/').to_owned();

        Ok(Self {
            inner: Arc::new(TransportInner {
                http,
                base_url,
                session,
                service_token: config.service_token.clone(),
            }),
        })
    }

    /// The session provider this transport reads tokens from.
    #[must_use]
    pub fn session(&self) -> &SessionProvider {
        &self.inner.session
    }

    /// GET a resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, error status, or decode failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(path, self.request(Method::GET, path)).await
    }

    /// GET a resource with query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, error status, or decode failure.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::GET, path).query(query))
            .await
    }

    /// POST a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, error status, or decode failure.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::POST, path).json(body))
            .await
    }

    /// PATCH a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, error status, or decode failure.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::PATCH, path).json(body))
            .await
    }

    /// DELETE a resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, error status, or decode failure.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(path, self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.inner.base_url);
        let mut request = self.inner.http.request(method, url);

        if let Some(token) = self.inner.session.token() {
            request = request.bearer_auth(token.expose_secret());
        } else if let Some(token) = &self.inner.service_token {
            request = request.bearer_auth(token.expose_secret());
        }

        request
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            error!(
                %status,
                endpoint = path,
                server_message = %message,
                "API returned error status"
            );
            return Err(ApiError::from_status(status, message));
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            error!(
                endpoint = path,
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to decode API response"
            );
            ApiError::Decode {
                endpoint: path.to_owned(),
                source: e,
            }
        })
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.inner.base_url
    }
}
