//! In-memory slash-command registry.

use std::sync::{Arc, RwLock};

use crate::turn::domain::{CommandDescriptor, strip_marker};
use crate::turn::ports::command_registry::{
    CommandRegistry, CommandRegistryError, CommandRegistryResult,
};

/// Thread-safe registry that keeps commands in registration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommandRegistry {
    commands: Arc<RwLock<Vec<CommandDescriptor>>>,
}

impl InMemoryCommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `commands`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError::InvalidDefinition`] for the first
    /// descriptor [`register`](Self::register) would refuse.
    pub fn with_commands(
        commands: impl IntoIterator<Item = CommandDescriptor>,
    ) -> CommandRegistryResult<Self> {
        let registry = Self::new();
        for descriptor in commands {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Registers a command.
    ///
    /// A leading `/` on the name is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError::InvalidDefinition`] when the name is
    /// empty, contains whitespace or is already registered.
    pub fn register(&self, mut descriptor: CommandDescriptor) -> CommandRegistryResult<()> {
        let name = strip_marker(&descriptor.name).to_owned();
        if name.is_empty() {
            return Err(CommandRegistryError::InvalidDefinition(
                "command name must not be empty".to_owned(),
            ));
        }
        if name.contains(char::is_whitespace) {
            return Err(CommandRegistryError::InvalidDefinition(format!(
                "command name '{name}' must not contain whitespace"
            )));
        }

        let mut commands = self
            .commands
            .write()
            .map_err(|err| CommandRegistryError::Unavailable(err.to_string()))?;
        if commands.iter().any(|existing| existing.name == name) {
            return Err(CommandRegistryError::InvalidDefinition(format!(
                "command '{name}' is already registered"
            )));
        }
        descriptor.name = name;
        commands.push(descriptor);
        Ok(())
    }
}

impl CommandRegistry for InMemoryCommandRegistry {
    fn find_by_name(&self, name: &str) -> CommandRegistryResult<Option<CommandDescriptor>> {
        let commands = self
            .commands
            .read()
            .map_err(|err| CommandRegistryError::Unavailable(err.to_string()))?;
        let wanted = strip_marker(name);
        Ok(commands
            .iter()
            .find(|descriptor| descriptor.name == wanted)
            .cloned())
    }

    fn list(&self) -> CommandRegistryResult<Vec<CommandDescriptor>> {
        let commands = self
            .commands
            .read()
            .map_err(|err| CommandRegistryError::Unavailable(err.to_string()))?;
        Ok(commands.clone())
    }
}
