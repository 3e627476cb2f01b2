//! Unit tests for the turn module.
//!
//! Tests are organised by concept: domain values, the pure services, the
//! stream and the orchestrator.
