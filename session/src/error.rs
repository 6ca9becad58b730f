use graph_walk_core::GraphError;
use thiserror::Error;

/// Errors surfaced to the host. Messages are meant to be shown to a user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid edge weight '{0}': enter a non-negative number")]
    InvalidWeightInput(String),

    #[error("vertex label must not be empty")]
    EmptyLabel,

    #[error("graph lock poisoned by a panicking writer")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, SessionError>;
