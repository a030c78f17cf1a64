pub mod decoder;
pub mod encoder;
pub mod error;
pub mod processor;

pub use error::WebhookError;
pub use processor::Processor;

use axum::{
    body::Bytes,
    http::{header, HeaderName},
    routing::post,
    Router,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Path the webhook was originally published under as a serverless function.
pub const FUNCTION_PATH: &str = "/.netlify/functions/query";

pub const INTENT_REQUEST: &str = "IntentRequest";
pub const ASK_LLM_INTENT: &str = "AskLLMIntent";

// Inbound fields accept `null` as well as absence and fall back to the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct InboundRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub session: Session,
    #[serde(deserialize_with = "null_as_default")]
    pub context: Context,
    #[serde(deserialize_with = "null_as_default")]
    pub request: Request,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    #[serde(deserialize_with = "null_as_default")]
    pub new: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Context {
    #[serde(rename = "System", deserialize_with = "null_as_default")]
    pub system: SystemContext,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SystemContext {
    #[serde(deserialize_with = "null_as_default")]
    pub application: Application,
    #[serde(deserialize_with = "null_as_default")]
    pub user: User,
    #[serde(deserialize_with = "null_as_default")]
    pub device: Device,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Application {
    #[serde(deserialize_with = "null_as_default")]
    pub application_id: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub access_token: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Device {
    #[serde(deserialize_with = "null_as_default")]
    pub device_id: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Request {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub intent: Intent,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Intent {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slots: Slots,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Slots {
    #[serde(deserialize_with = "null_as_default")]
    pub question: Slot,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Slot {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    pub version: String,
    pub session_attributes: serde_json::Map<String, serde_json::Value>,
    pub response: SpeechResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    pub output_speech: OutputSpeech,
    pub card: serde_json::Value,
    pub directives: Vec<serde_json::Value>,
    pub should_end_session: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub values: SpeechValues,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpeechValues {
    #[serde(rename = "type")]
    pub kind: String,
    pub lang: String,
    pub value: String,
}

/// Builds the HTTP router serving the webhook at `/` and at [`FUNCTION_PATH`].
pub fn app(processor: Processor) -> Router {
    let handler = move |body: Bytes| message_handler(body, processor.clone());

    Router::new()
        .route("/", post(handler.clone()))
        .route(FUNCTION_PATH, post(handler))
}

async fn message_handler(
    body: Bytes,
    processor: Processor,
) -> Result<([(HeaderName, &'static str); 1], Vec<u8>), WebhookError> {
    let json_response = processor.process(&body).await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], json_response))
}
