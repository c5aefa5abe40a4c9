//! Process startup: configuration, logging and adapter wiring.

pub mod config;
pub mod tracing;
pub mod wiring;
