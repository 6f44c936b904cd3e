//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(u64),

    #[error("Task with this name already exists: {0}")]
    DuplicateName(String),

    #[error("No tasks selected")]
    EmptySelection,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl Error {
    /// Whether this is an input validation failure (bad name, empty selection)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::EmptySelection)
    }

    /// Human readable message without the variant prefix, as shown to users
    pub fn user_message(&self) -> String {
        match self {
            Self::TaskNotFound(_) => "Task not found".to_string(),
            Self::DuplicateName(_) => "Task with this name already exists".to_string(),
            Self::EmptySelection => "No tasks selected".to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
