use crate::{InboundRequest, WebhookError, ASK_LLM_INTENT, INTENT_REQUEST};

/// Parses a webhook body and checks it is an `AskLLMIntent` carrying a question.
///
/// The question is not trimmed, only an empty string is rejected.
pub fn decode(body: &[u8]) -> Result<InboundRequest, WebhookError> {
    let request: InboundRequest = serde_json::from_slice::<Option<InboundRequest>>(body)
        .map_err(WebhookError::Parse)?
        .unwrap_or_default();

    if request.request.kind != INTENT_REQUEST || request.request.intent.name != ASK_LLM_INTENT {
        return Err(WebhookError::UnsupportedIntent);
    }

    if request.question().is_empty() {
        return Err(WebhookError::MissingQuestion);
    }

    Ok(request)
}

impl InboundRequest {
    pub fn question(&self) -> &str {
        &self.request.intent.slots.question.value
    }
}
