//! Test helpers shared across Kotoba crates.

pub mod reporter;
pub mod storage;
pub mod words;

pub use reporter::RecordingReporter;
pub use storage::{FailingStorage, MemoryStorage};
pub use words::{WordFixture, date};
