use crate::models::{Message, MessageId, Role};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no message with id {0}")]
    UnknownId(MessageId),

    #[error("message {0} is no longer accepting updates")]
    NotPending(MessageId),
}

/// Ordered, append-only transcript with an id index for in-place updates.
///
/// Only messages created through [`MessageStore::append_with_placeholder`]
/// get an id. Each id is "pending" until [`MessageStore::release`] is called,
/// and updates are only accepted while it is.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    index: HashMap<MessageId, usize>,
    pending: HashSet<MessageId>,
    next_id: MessageId,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        debug_assert!(message.id.is_none(), "use append_with_placeholder for tracked messages");
        self.messages.push(message);
    }

    /// Appends `message` followed by a model placeholder as one operation and
    /// returns the placeholder's id.
    pub fn append_with_placeholder(
        &mut self,
        message: Message,
        placeholder_text: impl Into<String>,
    ) -> MessageId {
        self.next_id += 1;
        let id = self.next_id;

        let mut placeholder = Message::new(Role::Model, placeholder_text);
        placeholder.id = Some(id);

        self.messages.reserve(2);
        self.messages.push(message);
        self.index.insert(id, self.messages.len());
        self.messages.push(placeholder);
        self.pending.insert(id);
        id
    }

    pub fn update<F>(&mut self, id: MessageId, apply: F) -> Result<&Message, StoreError>
    where
        F: FnOnce(&mut Message),
    {
        let position = *self.index.get(&id).ok_or(StoreError::UnknownId(id))?;
        if !self.pending.contains(&id) {
            return Err(StoreError::NotPending(id));
        }
        let message = &mut self.messages[position];
        apply(message);
        Ok(&*message)
    }

    /// Closes the update window for `id`. Returns false if it was not open.
    pub fn release(&mut self, id: MessageId) -> bool {
        self.pending.remove(&id)
    }

    pub fn is_pending(&self, id: MessageId) -> bool {
        self.pending.contains(&id)
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.index.get(&id).map(|&position| &self.messages[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message that carries a finished image.
    pub fn latest_image(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.image_url.is_some() && !m.is_loading_image)
    }
}
