use crate::constants::{
    CHAT_ERROR_MESSAGE, GREETING, INSPIRATION_ERROR_MESSAGE, INSPIRATION_PLACEHOLDER_TEXT,
    INSPIRATION_REQUEST_TEXT, NO_IMAGE_MESSAGE, PAGE_SCROLL_STEP, SESSION_MISSING_MESSAGE,
};
use crate::errors::{TuraError, TuraResult};
use crate::image_export;
use crate::inspiration::InspirationIdea;
use crate::models::{Message, MessageId, Role};
use crate::status_indicator::StatusIndicator;
use crate::store::MessageStore;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspirationState {
    Idle,
    IdeaPending(MessageId),
    ImagePending(MessageId),
}

/// Completion of a remote call, posted back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    ChatReply(TuraResult<String>),
    IdeaReady {
        id: MessageId,
        result: TuraResult<InspirationIdea>,
    },
    ImageReady {
        id: MessageId,
        result: TuraResult<String>,
    },
}

pub struct App {
    pub store: MessageStore,
    pub chat: ChatState,
    pub inspiration: InspirationState,
    pub input: String,
    pub error: Option<String>,
    pub status_indicator: StatusIndicator,
    pub scroll: u16,
    pub follow_bottom: bool,
    pub should_quit: bool,
    /// Set when the terminal reports modifiers on Enter, so Shift+Enter can
    /// be told apart from Enter.
    pub keyboard_enhanced: bool,
    ready: bool,
}

impl App {
    /// A ready app, greeted by the guide.
    pub fn new() -> App {
        let mut store = MessageStore::new();
        store.push(Message::model(GREETING));
        Self::with_store(store, true, None)
    }

    /// Startup failed: render, but keep the remote features off.
    pub fn with_init_error(err: &TuraError) -> App {
        log::error!("Initialization error: {}", err.detailed());
        Self::with_store(
            MessageStore::new(),
            false,
            Some(format!("Initialization failed: {}", err)),
        )
    }

    fn with_store(store: MessageStore, ready: bool, error: Option<String>) -> App {
        App {
            store,
            chat: ChatState::Idle,
            inspiration: InspirationState::Idle,
            input: String::new(),
            error,
            status_indicator: StatusIndicator::new(),
            scroll: 0,
            follow_bottom: true,
            should_quit: false,
            keyboard_enhanced: false,
            ready,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_sending(&self) -> bool {
        self.chat == ChatState::Sending
    }

    pub fn is_inspiring(&self) -> bool {
        self.inspiration != InspirationState::Idle
    }

    pub fn is_busy(&self) -> bool {
        self.is_sending() || self.is_inspiring()
    }

    /// The "typing" bubble shows while a reply is pending for the last user
    /// message.
    pub fn awaiting_reply(&self) -> bool {
        self.is_sending() && self.store.last().map_or(false, Message::is_user)
    }

    /// Takes the input for sending. Returns `None`, leaving the store and the
    /// input untouched, when the text is blank or a send is in flight.
    pub fn submit_input(&mut self) -> Option<String> {
        let text = self.input.trim();
        if text.is_empty() || self.is_sending() {
            return None;
        }
        if !self.ready {
            self.error = Some(SESSION_MISSING_MESSAGE.to_string());
            return None;
        }

        let text = text.to_string();
        self.input.clear();
        self.error = None;
        self.store.push(Message::user(text.as_str()));
        self.chat = ChatState::Sending;
        self.follow_bottom = true;
        self.refresh_status();
        log::info!("Sending chat message ({} chars)", text.len());
        Some(text)
    }

    /// Adds the request and a placeholder, returning the placeholder id to
    /// drive the pipeline with. Ignored while an inspiration is in flight.
    pub fn begin_inspiration(&mut self) -> Option<MessageId> {
        if self.is_inspiring() {
            return None;
        }
        if !self.ready {
            self.error = Some(SESSION_MISSING_MESSAGE.to_string());
            return None;
        }

        self.error = None;
        let id = self.store.append_with_placeholder(
            Message::user(INSPIRATION_REQUEST_TEXT),
            INSPIRATION_PLACEHOLDER_TEXT,
        );
        self.inspiration = InspirationState::IdeaPending(id);
        self.follow_bottom = true;
        self.refresh_status();
        log::info!("Inspiration {} started", id);
        Some(id)
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::ChatReply(result) => self.finish_chat(result),
            AppEvent::IdeaReady { id, result } => self.idea_ready(id, result),
            AppEvent::ImageReady { id, result } => self.image_ready(id, result),
        }
        self.refresh_status();
    }

    fn finish_chat(&mut self, result: TuraResult<String>) {
        match result {
            Ok(reply) => {
                self.store.push(Message::new(Role::Model, reply));
            }
            Err(e) => {
                log::error!("Gemini API error: {}", e.detailed());
                self.error = Some(CHAT_ERROR_MESSAGE.to_string());
                self.store.push(Message::model(CHAT_ERROR_MESSAGE));
            }
        }
        self.chat = ChatState::Idle;
    }

    fn idea_ready(&mut self, id: MessageId, result: TuraResult<InspirationIdea>) {
        if self.inspiration != InspirationState::IdeaPending(id) {
            log::warn!("Dropping stale idea for inspiration {}", id);
            return;
        }
        let idea = match result {
            Ok(idea) => idea,
            Err(e) => return self.fail_inspiration(id, e),
        };

        let headline = idea.headline();
        match self.store.update(id, |m| {
            m.text = headline;
            m.is_loading_image = true;
        }) {
            Ok(_) => self.inspiration = InspirationState::ImagePending(id),
            Err(e) => {
                log::warn!("Idea for inspiration {} not applied: {}", id, e);
                self.store.release(id);
                self.inspiration = InspirationState::Idle;
            }
        }
    }

    fn image_ready(&mut self, id: MessageId, result: TuraResult<String>) {
        if self.inspiration != InspirationState::ImagePending(id) {
            log::warn!("Dropping stale image for inspiration {}", id);
            return;
        }
        let image_url = match result {
            Ok(url) => url,
            Err(e) => return self.fail_inspiration(id, e),
        };

        if let Err(e) = self.store.update(id, |m| {
            m.image_url = Some(image_url);
            m.is_loading_image = false;
        }) {
            log::warn!("Image for inspiration {} not applied: {}", id, e);
        }
        self.store.release(id);
        self.inspiration = InspirationState::Idle;
        log::info!("Inspiration {} complete", id);
    }

    fn fail_inspiration(&mut self, id: MessageId, err: TuraError) {
        log::error!("Inspiration generation error: {}", err.detailed());
        if let Err(e) = self.store.update(id, |m| {
            m.text = INSPIRATION_ERROR_MESSAGE.to_string();
            m.is_loading_image = false;
        }) {
            log::warn!("Could not mark inspiration {} as failed: {}", id, e);
        }
        self.store.release(id);
        self.error = Some(INSPIRATION_ERROR_MESSAGE.to_string());
        self.inspiration = InspirationState::Idle;
    }

    fn refresh_status(&mut self) {
        self.status_indicator.set_thinking(self.is_busy());
        match self.inspiration {
            InspirationState::IdeaPending(_) => {
                self.status_indicator.set_status("Dreaming up a destination...")
            }
            InspirationState::ImagePending(_) => {
                self.status_indicator.set_status("Painting the view...")
            }
            InspirationState::Idle if self.is_sending() => {
                self.status_indicator.set_status("Tura is typing...")
            }
            InspirationState::Idle => self.status_indicator.clear_status(),
        }
    }

    /// Writes the most recent finished inspiration image under `dir`.
    pub fn export_latest_image(&mut self, dir: &Path) -> Option<PathBuf> {
        let exported = match self.store.latest_image() {
            Some(Message {
                id: Some(id),
                image_url: Some(uri),
                ..
            }) => image_export::export_image(uri, *id, dir),
            _ => {
                self.error = Some(NO_IMAGE_MESSAGE.to_string());
                return None;
            }
        };

        match exported {
            Ok(path) => {
                self.error = None;
                Some(path)
            }
            Err(e) => {
                log::error!("Image export error: {}", e.detailed());
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn scroll_up(&mut self) {
        self.follow_bottom = false;
        self.scroll = self.scroll.saturating_sub(PAGE_SCROLL_STEP);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(PAGE_SCROLL_STEP);
    }

    /// Clamps the scroll offset to the rendered transcript height and
    /// re-attaches to the bottom once the user scrolls past the end.
    pub fn clamp_scroll(&mut self, max_scroll: u16) {
        if self.follow_bottom || self.scroll >= max_scroll {
            self.scroll = max_scroll;
            self.follow_bottom = true;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
