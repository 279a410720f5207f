// src/errors.rs

use thiserror::Error;

/// Failures talking to the remote generative-language API.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("empty response: {0}")]
    Empty(&'static str),
}

/// Coarse failure category, stable enough for callers and tests to match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Initialization,
    Chat,
    Idea,
    Image,
    Export,
}

#[derive(Debug, Error)]
pub enum TuraError {
    #[error("{0}")]
    Init(String),

    #[error("chat error")]
    Chat(#[source] GatewayError),

    #[error("idea generation failed")]
    Idea(#[source] GatewayError),

    #[error("image generation failed")]
    Image(#[source] GatewayError),

    #[error("image export failed: {0}")]
    Export(String),
}

pub type TuraResult<T> = Result<T, TuraError>;

impl TuraError {
    pub fn init_error(msg: impl Into<String>) -> Self {
        TuraError::Init(msg.into())
    }

    pub fn export_error(msg: impl Into<String>) -> Self {
        TuraError::Export(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            TuraError::Init(_) => ErrorKind::Initialization,
            TuraError::Chat(_) => ErrorKind::Chat,
            TuraError::Idea(_) => ErrorKind::Idea,
            TuraError::Image(_) => ErrorKind::Image,
            TuraError::Export(_) => ErrorKind::Export,
        }
    }

    /// Full error chain on one line, for the log file.
    pub fn detailed(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            TuraError::init_error("no key").kind(),
            ErrorKind::Initialization
        );
        assert_eq!(
            TuraError::Idea(GatewayError::Empty("no candidates")).kind(),
            ErrorKind::Idea
        );
        assert_eq!(
            TuraError::Image(GatewayError::Empty("no images")).kind(),
            ErrorKind::Image
        );
    }

    #[test]
    fn test_detailed_includes_source_chain() {
        let err = TuraError::Chat(GatewayError::Status {
            status: 503,
            body: "overloaded".to_string(),
        });
        assert_eq!(err.to_string(), "chat error");
        assert_eq!(err.detailed(), "chat error: remote returned 503: overloaded");
    }
}
