use crate::{OutboundResponse, OutputSpeech, SpeechResponse, SpeechValues, WebhookError};

pub const RESPONSE_VERSION: &str = "0.1.0";

impl OutboundResponse {
    /// Wraps an answer as Korean plain-text speech. The session is kept open.
    pub fn speech(answer: impl Into<String>) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            session_attributes: serde_json::Map::new(),
            response: SpeechResponse {
                output_speech: OutputSpeech {
                    kind: "SimpleSpeech".to_string(),
                    values: SpeechValues {
                        kind: "PlainText".to_string(),
                        lang: "ko".to_string(),
                        value: answer.into(),
                    },
                },
                card: serde_json::Value::Object(serde_json::Map::new()),
                directives: Vec::new(),
                should_end_session: false,
            },
        }
    }
}

pub fn encode(response: &OutboundResponse) -> Result<Vec<u8>, WebhookError> {
    serde_json::to_vec(response).map_err(WebhookError::Encode)
}
