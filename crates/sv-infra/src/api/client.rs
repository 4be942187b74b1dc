use anyhow::Context;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use sv_core::ports::{DraftStoreError, ServiceError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx answer; the message is the response text or `API error <status>`.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

impl From<ApiError> for DraftStoreError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { message, .. } => DraftStoreError::Api(message),
            ApiError::Transport(message) => DraftStoreError::Storage(message),
            ApiError::Decode(message) => DraftStoreError::Serialization(message),
        }
    }
}

impl From<ApiError> for ServiceError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { status: 404, message } => ServiceError::NotFound(message),
            ApiError::Status { message, .. } => ServiceError::Api(message),
            ApiError::Transport(message) | ApiError::Decode(message) => {
                ServiceError::Transport(message)
            }
        }
    }
}

/// Thin JSON client over `reqwest`, shared by the HTTP adapters.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    /// Send and fail on any non-2xx status.
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "api response");
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = if text.is_empty() {
            format!("API error {}", status.as_u16())
        } else {
            text
        };
        warn!(status = status.as_u16(), %message, "api request failed");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Decode a JSON body; `None` for 204 No Content.
    pub(crate) async fn read_json<T: DeserializeOwned>(
        response: Response,
    ) -> Result<Option<T>, ApiError> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(response.json::<T>().await?))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        Self::read_json(response).await
    }

    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(self.request(method, path).json(body)).await?;
        Self::read_json(response).await
    }

    /// POST a JSON body, ignoring any response content.
    pub async fn post_json_discard<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, path).json(body)).await?;
        Ok(())
    }

    /// POST without a body, ignoring any response content.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, path)).await?;
        Ok(())
    }
}

/// Turn a missing body into a decode error for calls that must return one.
pub(crate) fn required<T>(body: Option<T>) -> Result<T, ApiError> {
    body.ok_or_else(|| ApiError::Decode("empty response body".to_string()))
}
