use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("pet service unavailable: {0}")]
    Unavailable(String),

    #[error("malformed pet payload: {0}")]
    Malformed(String),

    #[error("request timeout")]
    Timeout,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::Unavailable(_) => "Couldn't reach the pet service. Pull to refresh and try again.",
            Self::Malformed(_) => "The pet service sent something we couldn't read.",
            Self::Timeout => "The request took too long. Try again.",
            Self::Internal(_) => "Something went wrong on our side. Try again.",
        }
    }
}
