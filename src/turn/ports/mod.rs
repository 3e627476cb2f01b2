//! Port trait definitions for the turn subsystem.
//!
//! Ports are the seams to every external collaborator. The orchestration
//! services depend only on these traits; adapters implement them.

pub mod command_registry;
pub mod context_provider;
pub mod file_reader;
pub mod history_store;
pub mod model_client;
pub mod observer;

pub use command_registry::CommandRegistry;
pub use context_provider::ContextProvider;
pub use file_reader::FileReader;
pub use history_store::HistoryStore;
pub use model_client::ModelClient;
pub use observer::TurnObserver;
