//! Shared utilities for the snitch protocol.

pub mod logging;

pub use logging::init_tracing;
