use crate::{decoder, encoder, OutboundResponse, WebhookError};
use completion_client::{CompletionClient, CompletionPrompt};

use std::sync::Arc;
use std::time::Instant;
use tracing::{instrument, Span};

/// Runs one webhook invocation: decode, ask the completion backend once, encode.
#[derive(Clone)]
pub struct Processor {
    client: Arc<dyn CompletionClient>,
}

impl Processor {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    #[instrument(skip_all, fields(session_id, question_len, answer_len, elapsed_time))]
    pub async fn process(&self, body: &[u8]) -> Result<Vec<u8>, WebhookError> {
        let span = Span::current();
        let start_time = Instant::now();

        let result = self.answer(body, &span).await;

        span.record("elapsed_time", start_time.elapsed().as_secs_f32());
        match &result {
            Ok(_) => tracing::info!("SUCCESS"),
            Err(e) if e.status().is_client_error() => tracing::warn!("Rejected request: {}", e),
            Err(e) => tracing::error!("Error: {}", e),
        }
        result
    }

    async fn answer(&self, body: &[u8], span: &Span) -> Result<Vec<u8>, WebhookError> {
        let request = decoder::decode(body)?;
        span.record("session_id", request.session.session_id.as_str());

        let prompt = CompletionPrompt::for_question(request.question());
        span.record("question_len", prompt.question().chars().count());
        let answer = self.client.complete(&prompt).await?;
        span.record("answer_len", answer.chars().count());

        encoder::encode(&OutboundResponse::speech(answer))
    }
}
