use crate::models::PollId;
use thiserror::Error;

/// Errors produced by the poll store and the import/export gateway.
///
/// Every variant is recoverable: the session loop reports the message and
/// keeps accepting commands.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("no poll with id {0}")]
    NotFound(PollId),

    #[error("poll {id} has no option named '{label}'")]
    InvalidOption { id: PollId, label: String },

    #[error("poll {0} is closed and no longer accepts votes")]
    PollClosed(PollId),

    #[error("not valid JSON: {0}")]
    Format(#[source] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
