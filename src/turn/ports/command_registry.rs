//! Slash-command registry port.
//!
//! The registry provides command descriptors to the orchestrator.

use thiserror::Error;

use crate::turn::domain::CommandDescriptor;

/// Result type for command registry operations.
pub type CommandRegistryResult<T> = Result<T, CommandRegistryError>;

/// Port for loading slash-command descriptors.
pub trait CommandRegistry: Send + Sync {
    /// Finds a descriptor by name (without the leading marker).
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError`] when registry access fails.
    fn find_by_name(&self, name: &str) -> CommandRegistryResult<Option<CommandDescriptor>>;

    /// Lists every descriptor in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError`] when registry access fails.
    fn list(&self) -> CommandRegistryResult<Vec<CommandDescriptor>>;
}

/// Errors for command registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandRegistryError {
    /// The registry was given an invalid descriptor.
    #[error("invalid slash-command definition: {0}")]
    InvalidDefinition(String),

    /// General storage or adapter failure.
    #[error("slash-command registry unavailable: {0}")]
    Unavailable(String),
}
