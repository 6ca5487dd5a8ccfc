//! Public surface for Kotoba.
//!
//! Re-exports the core and config crates and provides the file logging setup
//! shared by front ends.

/// Re-export for convenience.
pub use kotoba_config as config;
/// Re-export for convenience.
pub use kotoba_core as core;

pub mod logging;

pub use logging::{RotatingFile, init_logging};
