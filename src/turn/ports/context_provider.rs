//! Port for resolving the context attached to a turn.

use async_trait::async_trait;
use thiserror::Error;

use crate::turn::domain::{ContextRequest, GatheredContext};

/// Resolves context items, selected code and the user message content from
/// the submitted editor state.
///
/// Gathering may wait on the user or on the file system; it is one of the
/// turn's suspension points.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Gathers the context for a turn.
    ///
    /// # Errors
    ///
    /// Returns [`ContextGatherError`] when the user aborts or a context item
    /// cannot be resolved.
    async fn gather_context(
        &self,
        request: &ContextRequest,
    ) -> Result<GatheredContext, ContextGatherError>;
}

/// Failures reported by a context provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContextGatherError {
    /// The user dismissed a prompt raised while gathering context.
    #[error("context gathering was cancelled by the user")]
    UserCancelled,

    /// A context item could not be resolved.
    #[error("context resolution failed: {0}")]
    ResolutionFailed(String),
}
