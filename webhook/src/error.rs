use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use completion_client::CompletionError;
use thiserror::Error;

/// Every way a webhook invocation can fail. The `Display` text is the
/// plain-text body sent back to the caller.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Error parsing request: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Invalid request type or intent")]
    UnsupportedIntent,

    #[error("No question provided")]
    MissingQuestion,

    #[error("OpenAI API key not configured")]
    CredentialMissing,

    #[error("Error calling OpenAI: {0}")]
    Upstream(#[source] CompletionError),

    #[error("Error creating response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Parse(_) | Self::UnsupportedIntent | Self::MissingQuestion => {
                StatusCode::BAD_REQUEST
            }
            Self::CredentialMissing | Self::Upstream(_) | Self::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<CompletionError> for WebhookError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::CredentialMissing => Self::CredentialMissing,
            other => Self::Upstream(other),
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
