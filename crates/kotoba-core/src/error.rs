//! Error types for word storage.

/// Errors returned by storage backends.
///
/// These never cross the [`WordStore`](crate::WordStore) API; the store turns
/// them into advisory [`StoreWarning`](crate::StoreWarning)s.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Returned when a string is not a known category label or alias.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl StoreError {
    /// True when stored bytes were read but could not be decoded.
    pub fn is_decode(&self) -> bool {
        match self {
            StoreError::Serde(_) => true,
            StoreError::Io(err) => err.kind() == std::io::ErrorKind::InvalidData,
        }
    }
}
