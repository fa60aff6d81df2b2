//! Persona chat — multi-turn conversations with the sales-trainer assistant.
//!
//! Conversations are held in memory. A reply is never an error: generation
//! failures are substituted with human-readable text so the transcript, and
//! anything extracted from it, always has content.

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_tactic, TacticDraft};
use crate::llm_client::{GenerationRequest, LlmError, TextGenerator};
use crate::models::chat::{ChatMessage, Role};

pub mod handlers;
pub mod prompts;

use prompts::{
    CHAT_PROMPT_TEMPLATE, CHAT_TEMPERATURE, EMPTY_REPLY, GREETING, MISSING_KEY_REPLY,
    MODEL_NOT_FOUND_REPLY, OFFLINE_REPLY_PREFIX, PERSONA_SYSTEM,
};

#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub id: Uuid,
    pub messages: Vec<ChatMessage>,
    /// Set while a reply is being generated; cleared by `push_reply`.
    pub pending: bool,
}

/// What the model is asked to answer: the user's input plus the transcript
/// that preceded it.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub user_input: String,
    pub context: String,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: vec![ChatMessage::new(Role::Model, GREETING)],
            pending: false,
        }
    }

    fn ensure_idle(&self) -> Result<(), AppError> {
        if self.pending {
            return Err(AppError::Conflict(
                "a reply is still being generated for this conversation".to_string(),
            ));
        }
        Ok(())
    }

    /// Records the user's message and returns the turn to send to the model.
    pub fn begin_turn(&mut self, text: &str) -> Result<Turn, AppError> {
        self.ensure_idle()?;
        if text.trim().is_empty() {
            return Err(AppError::Validation("text cannot be empty".to_string()));
        }
        let context = render_context(&self.messages);
        self.messages.push(ChatMessage::new(Role::User, text));
        self.pending = true;
        Ok(Turn {
            user_input: text.to_string(),
            context,
        })
    }

    /// Drops the latest model reply and returns the turn that produced it.
    /// Only valid when the transcript ends with a user message answered by
    /// the model.
    pub fn begin_regenerate(&mut self) -> Result<Turn, AppError> {
        self.ensure_idle()?;
        let n = self.messages.len();
        let answered = n >= 2
            && self.messages[n - 1].role == Role::Model
            && self.messages[n - 2].role == Role::User;
        if !answered {
            return Err(AppError::Validation(
                "nothing to regenerate: the last reply does not answer a user message".to_string(),
            ));
        }
        self.messages.pop();
        self.pending = true;
        let last_user = &self.messages[n - 2];
        Ok(Turn {
            user_input: last_user.text.clone(),
            context: render_context(&self.messages[..n - 2]),
        })
    }

    pub fn push_reply(&mut self, text: String) -> ChatMessage {
        let message = ChatMessage::new(Role::Model, text);
        self.messages.push(message.clone());
        self.pending = false;
        message
    }

    /// Turns a model reply into a card draft for the library.
    pub fn draft(&self, message_id: Uuid) -> Result<TacticDraft, AppError> {
        let message = self
            .messages
            .iter()
            .find(|m| m.id == message_id)
            .ok_or_else(|| AppError::NotFound(format!("Message {message_id} not found")))?;
        if message.role != Role::Model {
            return Err(AppError::Validation(
                "only assistant replies can be saved as tactics".to_string(),
            ));
        }
        Ok(extract_tactic(&message.text))
    }
}

/// Renders a transcript as `role: text` lines.
fn render_context(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str(), m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Asks the model for the persona's answer to a turn.
pub async fn reply(generator: &dyn TextGenerator, turn: &Turn) -> String {
    let request = GenerationRequest {
        system: Some(PERSONA_SYSTEM.to_string()),
        prompt: CHAT_PROMPT_TEMPLATE
            .replace("{context}", &turn.context)
            .replace("{user_input}", &turn.user_input),
        temperature: Some(CHAT_TEMPERATURE),
    };
    reply_text(generator.generate(&request).await)
}

fn reply_text(result: Result<String, LlmError>) -> String {
    match result {
        Ok(text) if text.is_empty() => EMPTY_REPLY.to_string(),
        Ok(text) => text,
        Err(LlmError::EmptyContent) => EMPTY_REPLY.to_string(),
        Err(LlmError::MissingApiKey) => {
            warn!("API key is missing. Assistant replies are disabled until it is provided.");
            MISSING_KEY_REPLY.to_string()
        }
        Err(LlmError::Api { status: 404, .. }) => {
            warn!("LLM API returned 404");
            MODEL_NOT_FOUND_REPLY.to_string()
        }
        Err(e) => {
            warn!("Assistant reply failed: {e}");
            format!("{OFFLINE_REPLY_PREFIX}{e}")
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;

    /// Returns canned replies and records every request it receives.
    pub(crate) struct StubGenerator {
        reply: Result<String, u16>,
        delay: Option<Duration>,
        pub requests: Mutex<Vec<GenerationRequest>>,
    }

    impl StubGenerator {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                delay: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Fails with an API error of the given status; 0 means no API key.
        pub fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                delay: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Sleeps before answering, so a reply stays in flight.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(0) => Err(LlmError::MissingApiKey),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "boom".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_new_conversation_starts_with_greeting() {
        let conversation = Conversation::new();
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].role, Role::Model);
        assert_eq!(conversation.messages[0].text, GREETING);
    }

    #[test]
    fn test_begin_turn_renders_prior_transcript() {
        let mut conversation = Conversation::new();
        let turn = conversation.begin_turn("客户说太贵了").unwrap();
        assert_eq!(turn.context, format!("model: {GREETING}"));
        assert_eq!(turn.user_input, "客户说太贵了");
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[1].role, Role::User);
    }

    #[test]
    fn test_begin_turn_rejects_blank_text() {
        let mut conversation = Conversation::new();
        let err = conversation.begin_turn("  \n").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(conversation.messages.len(), 1);
    }

    #[test]
    fn test_regenerate_replays_last_user_turn() {
        let mut conversation = Conversation::new();
        conversation.begin_turn("第一问").unwrap();
        conversation.push_reply("第一答".to_string());
        conversation.begin_turn("第二问").unwrap();
        conversation.push_reply("第二答".to_string());

        let turn = conversation.begin_regenerate().unwrap();
        assert_eq!(turn.user_input, "第二问");
        assert_eq!(
            turn.context,
            format!("model: {GREETING}\nuser: 第一问\nmodel: 第一答")
        );
        assert_eq!(conversation.messages.last().unwrap().text, "第二问");
    }

    #[test]
    fn test_regenerate_requires_answered_user_message() {
        let mut conversation = Conversation::new();
        assert!(conversation.begin_regenerate().is_err());

        conversation.begin_turn("问题").unwrap();
        assert!(conversation.begin_regenerate().is_err());
        assert_eq!(conversation.messages.len(), 2);
    }

    #[test]
    fn test_turn_in_flight_blocks_send_and_regenerate() {
        let mut conversation = Conversation::new();
        conversation.begin_turn("第一问").unwrap();
        assert!(conversation.pending);

        assert!(matches!(
            conversation.begin_turn("第二问"),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            conversation.begin_regenerate(),
            Err(AppError::Conflict(_))
        ));
        assert_eq!(conversation.messages.len(), 2);

        conversation.push_reply("第一答".to_string());
        assert!(!conversation.pending);
        conversation.begin_regenerate().unwrap();
        assert!(conversation.pending);
        assert!(matches!(
            conversation.begin_turn("第二问"),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_draft_extracts_from_model_reply() {
        let mut conversation = Conversation::new();
        conversation.begin_turn("问题").unwrap();
        let reply = conversation.push_reply("1. 别怕\n\n2. 因为…\n\n3. 照着说".to_string());
        let draft = conversation.draft(reply.id).unwrap();
        assert_eq!(draft.one_liner, "别怕");
        assert_eq!(draft.sop, "照着说");
    }

    #[test]
    fn test_draft_rejects_user_message_and_unknown_id() {
        let mut conversation = Conversation::new();
        conversation.begin_turn("问题").unwrap();
        let user_id = conversation.messages[1].id;
        assert!(matches!(
            conversation.draft(user_id),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            conversation.draft(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_reply_sends_persona_prompt() {
        let stub = StubGenerator::replying("1. 别怕");
        let turn = Turn {
            user_input: "太贵了".to_string(),
            context: "model: hi".to_string(),
        };
        assert_eq!(reply(&stub, &turn).await, "1. 别怕");

        let requests = stub.requests.lock().unwrap();
        assert_eq!(requests[0].system.as_deref(), Some(PERSONA_SYSTEM));
        assert_eq!(requests[0].temperature, Some(CHAT_TEMPERATURE));
        assert_eq!(
            requests[0].prompt,
            "Context: model: hi\n\nUser Objection/Scenario: 太贵了"
        );
    }

    #[test]
    fn test_reply_text_substitutions() {
        assert_eq!(reply_text(Ok(String::new())), EMPTY_REPLY);
        assert_eq!(reply_text(Err(LlmError::EmptyContent)), EMPTY_REPLY);
        assert_eq!(reply_text(Err(LlmError::MissingApiKey)), MISSING_KEY_REPLY);
        assert_eq!(
            reply_text(Err(LlmError::Api {
                status: 404,
                message: "not found".to_string()
            })),
            MODEL_NOT_FOUND_REPLY
        );
        let offline = reply_text(Err(LlmError::RateLimited { retries: 3 }));
        assert!(offline.starts_with(OFFLINE_REPLY_PREFIX));
    }
}
