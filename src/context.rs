// src/context.rs

use crate::{
    api::GeminiClient,
    app::AppEvent,
    config::Config,
    constants::SYSTEM_INSTRUCTION,
    errors::TuraResult,
    inspiration::InspirationPipeline,
    models::MessageId,
    session::ConversationSession,
};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::{mpsc::UnboundedSender, Mutex};

/// Everything that talks to the remote API. Created once at startup and
/// dropped on shutdown, which closes the conversation session.
#[derive(Debug)]
pub struct AppContext {
    session: Arc<Mutex<ConversationSession>>,
    pipeline: InspirationPipeline,
    export_dir: PathBuf,
}

impl AppContext {
    pub fn start(config: &Config) -> TuraResult<AppContext> {
        let gateway = Arc::new(GeminiClient::from_config(config)?);
        let session =
            ConversationSession::start(gateway.clone(), &config.chat_model, SYSTEM_INSTRUCTION);
        let pipeline =
            InspirationPipeline::new(gateway, &config.idea_model, &config.image_model);

        Ok(AppContext {
            session: Arc::new(Mutex::new(session)),
            pipeline,
            export_dir: config.export_directory(),
        })
    }

    pub fn export_dir(&self) -> &PathBuf {
        &self.export_dir
    }

    pub fn spawn_chat(&self, text: String, tx: UnboundedSender<AppEvent>) {
        let session = self.session.clone();
        tokio::spawn(async move {
            drive_chat(session, text, tx).await;
        });
    }

    pub fn spawn_inspiration(&self, id: MessageId, tx: UnboundedSender<AppEvent>) {
        let pipeline = self.pipeline.clone();
        tokio::spawn(async move {
            drive_inspiration(&pipeline, id, tx).await;
        });
    }
}

pub async fn drive_chat(
    session: Arc<Mutex<ConversationSession>>,
    text: String,
    tx: UnboundedSender<AppEvent>,
) {
    let result = session.lock().await.send(&text).await;
    if tx.send(AppEvent::ChatReply(result)).is_err() {
        log::debug!("UI closed before the chat reply arrived");
    }
}

/// Runs both inspiration stages, reporting each one. The image stage is
/// skipped when the idea fails.
pub async fn drive_inspiration(
    pipeline: &InspirationPipeline,
    id: MessageId,
    tx: UnboundedSender<AppEvent>,
) {
    let idea = pipeline.get_idea().await;
    let prompt = idea.as_ref().ok().map(|idea| idea.image_prompt.clone());
    if tx.send(AppEvent::IdeaReady { id, result: idea }).is_err() {
        log::debug!("UI closed before inspiration {} produced an idea", id);
        return;
    }

    let Some(prompt) = prompt else {
        return;
    };
    let result = pipeline.generate_image(&prompt).await;
    if tx.send(AppEvent::ImageReady { id, result }).is_err() {
        log::debug!("UI closed before inspiration {} produced an image", id);
    }
}
