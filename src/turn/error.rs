//! Error taxonomy for turn orchestration.
//!
//! Every failure before streaming starts aborts the turn with no observable
//! history mutation. Cancellation is not an error; it is reported as the
//! [`TurnState::Cancelled`](crate::turn::domain::TurnState::Cancelled)
//! terminal state.

use thiserror::Error;

use super::ports::{
    command_registry::CommandRegistryError, context_provider::ContextGatherError,
    file_reader::FileReadError, history_store::HistoryStoreError, model_client::ModelClientError,
};

/// Errors that end a turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    /// No chat model is selected. Raised before anything else happens.
    #[error("no chat model selected")]
    NoModelSelected,

    /// The context provider failed.
    #[error("context gathering failed: {0}")]
    ContextGatherFailed(#[source] ContextGatherError),

    /// Registered commands could not be listed.
    #[error(transparent)]
    CommandRegistry(#[from] CommandRegistryError),

    /// The invoked command's prompt template could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The history could not be read or written.
    #[error(transparent)]
    History(#[from] HistoryStoreError),

    /// The model transport failed mid-stream. Chunks already yielded remain
    /// valid.
    #[error("model transport failed: {0}")]
    Transport(String),
}

impl From<ContextGatherError> for TurnError {
    fn from(error: ContextGatherError) -> Self {
        Self::ContextGatherFailed(error)
    }
}

impl From<ModelClientError> for TurnError {
    fn from(error: ModelClientError) -> Self {
        match error {
            ModelClientError::NoModelSelected => Self::NoModelSelected,
            ModelClientError::Transport(reason) => Self::Transport(reason),
        }
    }
}

/// Errors raised while rendering a prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A file referenced by the template does not exist.
    #[error("template file not found: {path}")]
    FileNotFound {
        /// The referenced path.
        path: String,
    },

    /// A file referenced by the template could not be read.
    #[error("failed to read template file '{path}': {reason}")]
    FileRead {
        /// The referenced path.
        path: String,
        /// Failure description.
        reason: String,
    },

    /// The template engine rejected the template.
    #[error("template rendering failed: {reason}")]
    Render {
        /// Failure description.
        reason: String,
    },
}

impl From<FileReadError> for TemplateError {
    fn from(error: FileReadError) -> Self {
        match error {
            FileReadError::NotFound(path) => Self::FileNotFound { path },
            FileReadError::Io { path, reason } => Self::FileRead { path, reason },
        }
    }
}
