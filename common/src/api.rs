//! Seams between the import flow and the transport.
//!
//! The frontend implements [`ImportApi`] on top of `fetch` and
//! [`TokenProvider`] on top of `localStorage`; tests plug in in-memory
//! versions.

use thiserror::Error;

use crate::model::entity::ImportEntity;
use crate::model::responses::{ConfirmPayload, ConfirmResponse, UploadResponse};

/// Failure talking to the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be built (form data, JSON body).
    #[error("could not build request: {0}")]
    Request(String),
    /// No response was received.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },
    /// The server answered 2xx with a body we could not read.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message supplied by the server in its `error` field, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Supplies the bearer token attached to every API request.
pub trait TokenProvider {
    fn bearer_token(&self) -> Option<String>;
}

/// Token provider with a fixed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticToken(pub Option<String>);

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Value of the `Authorization` header for `provider`, if it has a token.
pub fn authorization_header(provider: &dyn TokenProvider) -> Option<String> {
    provider
        .bearer_token()
        .filter(|token| !token.is_empty())
        .map(|token| format!("Bearer {}", token))
}

/// Joins the configured API base URL and an endpoint path.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// The two calls of the bulk import contract.
///
/// `Upload` is whatever handle the platform uses for a picked file; the flow
/// never looks inside it.
#[allow(async_fn_in_trait)]
pub trait ImportApi {
    type Upload;

    async fn upload_csv(
        &self,
        entity: ImportEntity,
        file: &Self::Upload,
    ) -> Result<UploadResponse, ApiError>;

    async fn confirm(&self, payload: &ConfirmPayload) -> Result<ConfirmResponse, ApiError>;
}
