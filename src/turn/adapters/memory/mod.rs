//! In-memory adapters for every turn port.
//!
//! These are thread-safe and cheap to clone (clones share state), which makes
//! them suitable for tests and for embedders that keep history in process.

mod command_registry;
mod context_provider;
mod file_reader;
mod history_store;
mod model_client;
mod observer;

pub use command_registry::InMemoryCommandRegistry;
pub use context_provider::StaticContextProvider;
pub use file_reader::InMemoryFileReader;
pub use history_store::InMemoryHistoryStore;
pub use model_client::{RecordedCall, ScriptedModelClient};
pub use observer::RecordingObserver;
