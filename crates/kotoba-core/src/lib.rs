//! Word storage and review selection for Kotoba.

pub mod clock;
pub mod date;
pub mod error;
pub mod model;
pub mod report;
pub mod review;
pub mod storage;
pub mod store;
pub mod update;

/// Source of "today" for stores and selectors.
pub use clock::{Clock, FixedClock, SystemClock};
/// Date fields as stored on disk.
pub use date::StoredDate;
/// Storage and parsing error types.
pub use error::{ParseCategoryError, StoreError};
/// Word record model.
pub use model::{Category, Word, WordId};
/// Advisory results and the logging collaborator.
pub use report::{LogReporter, Persisted, StoreReporter, StoreWarning};
/// Review selection.
pub use review::{ReviewOptions, ScoredWord, rank, score, select_review_words};
/// Storage interface and default JSON file implementation.
pub use storage::{JsonFileStorage, WordStorage};
/// In-memory word collection backed by a storage.
pub use store::{WordStore, WordStoreBuilder};
/// Typed field updates.
pub use update::WordUpdate;
