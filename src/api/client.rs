//! HTTP transport shared by the resource endpoints.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiResponse;
use crate::auth::API_KEY_HEADER;
use crate::config::Config;
use crate::errors::{AppError, ErrorResponse};

/// HTTP client for the marketplace REST backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| AppError::Config(format!("Invalid API URL '{}': {}", config.api_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "API URL '{}' cannot be used as a base",
                config.api_url
            )));
        }

        let mut client_builder = Client::builder();
        if let Some(key) = &config.api_key {
            let mut headers = HeaderMap::new();
            let value = HeaderValue::from_str(key)
                .map_err(|e| AppError::Config(format!("Invalid API key: {}", e)))?;
            headers.insert(API_KEY_HEADER, value);
            client_builder = client_builder.default_headers(headers);
        }

        let http_client = client_builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(base_url = %base_url, "API client initialized");

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Build an endpoint URL from path segments, each one percent-encoded.
    pub(super) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(super) fn http(&self) -> &Client {
        &self.http_client
    }

    /// Send a request and unwrap the response envelope.
    pub(super) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, AppError> {
        let value = self
            .execute(request)
            .await?
            .ok_or_else(|| AppError::Decode("Empty response body".to_string()))?;
        let envelope: ApiResponse<T> = serde_json::from_value(value)?;
        Ok(envelope.data)
    }

    /// Send a request whose success carries no payload. Any 2xx counts,
    /// whether the body is empty, a bare `{ "success": true }` or a full
    /// envelope.
    pub(super) async fn send_empty(&self, request: RequestBuilder) -> Result<(), AppError> {
        self.execute(request).await.map(|_| ())
    }

    /// Run the request and return the parsed body of a successful response,
    /// `None` when the backend sent no body at all.
    async fn execute(&self, request: RequestBuilder) -> Result<Option<Value>, AppError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Backend responded");

        if !status.is_success() {
            let err = match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(envelope) => AppError::from_response(status.as_u16(), envelope.error),
                Err(_) => AppError::from_status(status.as_u16()),
            };
            tracing::warn!("Backend request failed: {}", err);
            return Err(err);
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let value: Value = serde_json::from_slice(&body)?;
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            let envelope: ErrorResponse = serde_json::from_value(value)?;
            return Err(AppError::from_response(status.as_u16(), envelope.error));
        }

        Ok(Some(value))
    }
}
