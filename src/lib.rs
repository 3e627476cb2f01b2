//! Colloquy: turn orchestration for chat-driven coding assistants.
//!
//! This crate runs a single conversational turn: it gathers context for the
//! user's input, records the input in a caller-owned history, builds the
//! message list for the model, rewrites the prompt when the input invokes a
//! slash command, and streams the model's response under a cancellation
//! signal.
//!
//! # Architecture
//!
//! Colloquy follows hexagonal architecture principles:
//!
//! - **Domain**: Pure value types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, file system,
//!   tracing)
//!
//! # Modules
//!
//! - [`turn`]: Turn orchestration, slash commands and response streaming

pub mod turn;
