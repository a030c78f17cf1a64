mod openai;
mod prompt;

pub use openai::{OpenAiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use prompt::{ChatMessage, CompletionPrompt, Role, NORMALIZATION_INSTRUCTION, SYSTEM_INSTRUCTION};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("API key not configured")]
    CredentialMissing,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("status code: {status}, message: {message}")]
    Api { status: u16, message: String },

    #[error("completion returned no choices")]
    NoChoices,
}

/// A chat-completion backend that turns a prompt into the text of its first choice.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, CompletionError>;
}
