use serde::Serialize;

pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant that provides clear and concise answers in Korean.";

pub const NORMALIZATION_INSTRUCTION: &str = "TTS가 답변을 잘 할 수 있도록 이모티콘은 쓰지 않고, 영어나 숫자는 한글로 노말라이즈 하여 적절하게 발화할 수 있도록 해줘.";

/// `function` messages are rejected by the API unless they carry a name.
const NORMALIZATION_NAME: &str = "tts_normalizer";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Function,
    User,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
        }
    }
}

/// The fixed three-message prompt: system instruction, speech normalization
/// instruction, then the user's question verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPrompt {
    messages: [ChatMessage; 3],
}

impl CompletionPrompt {
    pub fn for_question(question: &str) -> Self {
        let mut normalization = ChatMessage::new(Role::Function, NORMALIZATION_INSTRUCTION);
        normalization.name = Some(NORMALIZATION_NAME.to_string());

        Self {
            messages: [
                ChatMessage::new(Role::System, SYSTEM_INSTRUCTION),
                normalization,
                ChatMessage::new(Role::User, question),
            ],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn question(&self) -> &str {
        &self.messages[2].content
    }
}
