use clawsetup_common::FromMessage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Provider index outside `1..=count`, or not a number.
    #[error("Invalid selection.")]
    InvalidSelection { input: String, count: usize },

    #[error("API key must not be empty.")]
    EmptyApiKey,

    #[error(transparent)]
    Config(#[from] clawsetup_config::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    /// Whether the run failed because of what the user typed, as opposed to
    /// the config file or the filesystem.
    pub fn is_user_input(&self) -> bool {
        matches!(self, Self::InvalidSelection { .. } | Self::EmptyApiKey)
    }
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

clawsetup_common::impl_context!();
