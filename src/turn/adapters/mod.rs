//! Adapter implementations for turn ports.

pub mod fs;
pub mod memory;
pub mod tracing;
