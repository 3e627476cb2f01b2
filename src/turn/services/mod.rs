//! Service layer for turn orchestration.
//!
//! Everything except the orchestrator and the stream is a pure function over
//! domain values.

mod construct;
mod in_flight;
mod orchestrator;
mod reporter;
mod resolver;
mod splice;
mod stream;
mod template;

pub use construct::construct_messages;
pub use orchestrator::{TurnOrchestrator, TurnPorts, TurnRequest};
pub use resolver::{resolve, resolve_with_policy};
pub use splice::splice;
pub use stream::{TurnStream, stream};
pub use template::{INPUT_KEY, render_template};
