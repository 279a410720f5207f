// src/session.rs

use crate::{
    api::{Content, GeminiClient},
    errors::{GatewayError, TuraError, TuraResult},
    models::Role,
};
use serde_json::json;
use std::sync::Arc;

/// One ongoing exchange with the guide: the system instruction plus every
/// completed turn, resent with each request.
#[derive(Debug)]
pub struct ConversationSession {
    gateway: Arc<GeminiClient>,
    model: String,
    system_instruction: String,
    history: Vec<Content>,
}

impl ConversationSession {
    pub fn start(
        gateway: Arc<GeminiClient>,
        model: impl Into<String>,
        system_instruction: impl Into<String>,
    ) -> Self {
        let model = model.into();
        log::info!("Conversation session started with model {}", model);
        Self {
            gateway,
            model,
            system_instruction: system_instruction.into(),
            history: Vec::new(),
        }
    }

    /// Sends one user message and returns the model's reply. The history only
    /// grows when the exchange succeeds, so a failed turn can simply be
    /// re-sent by the user.
    pub async fn send(&mut self, text: &str) -> TuraResult<String> {
        let user_turn = Content::from_text(Role::User, text);
        let mut contents = self.history.clone();
        contents.push(user_turn.clone());

        let payload = json!({
            "systemInstruction": Content::instruction(self.system_instruction.as_str()),
            "contents": contents,
        });

        let response = self
            .gateway
            .generate_content(&self.model, &payload)
            .await
            .map_err(TuraError::Chat)?;

        let reply = response
            .text()
            .ok_or(TuraError::Chat(GatewayError::Empty("reply contained no text")))?;

        self.history.push(user_turn);
        self.history.push(Content::from_text(Role::Model, reply.as_str()));
        log::debug!("Session history now holds {} turns", self.history.len());

        Ok(reply)
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }
}

impl Drop for ConversationSession {
    fn drop(&mut self) {
        log::info!(
            "Conversation session closed after {} turns",
            self.history.len()
        );
    }
}
