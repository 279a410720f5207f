// src/models.rs

use chrono::{DateTime, Local, Utc};

pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Role name on the Gemini wire format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// A single entry of the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Only set on messages that are going to be updated in place.
    pub id: Option<MessageId>,
    pub role: Role,
    pub text: String,
    pub image_url: Option<String>,
    pub is_loading_image: bool,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Message {
            id: None,
            role,
            text: text.into(),
            image_url: None,
            is_loading_image: false,
            created_at: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Logs details of each API call.
#[derive(Debug)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}
