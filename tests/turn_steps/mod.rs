//! Step definitions for turn orchestration scenarios.

pub mod given;
pub mod when;
pub mod world;
