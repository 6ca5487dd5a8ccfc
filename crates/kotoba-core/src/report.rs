//! Advisory results for store operations and the reporter that logs them.

use log::{error, warn};
use std::fmt;
use std::path::PathBuf;

/// A recovered storage problem.
///
/// Store operations always complete; a warning only tells the caller that the
/// data on disk may not match memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWarning {
    /// The backing file could not be read at all.
    Read { location: String, reason: String },
    /// The backing file was read but did not decode; the store started empty.
    Decode {
        location: String,
        reason: String,
        /// Where the unreadable file was moved, when that succeeded.
        quarantined: Option<PathBuf>,
    },
    /// The collection could not be written.
    Write { location: String, reason: String },
}

impl fmt::Display for StoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreWarning::Read { location, reason } => {
                write!(f, "failed to read {location}: {reason}")
            }
            StoreWarning::Decode {
                location,
                reason,
                quarantined,
            } => {
                write!(f, "failed to decode {location}: {reason}")?;
                if let Some(path) = quarantined {
                    write!(f, " (moved to {})", path.display())?;
                }
                Ok(())
            }
            StoreWarning::Write { location, reason } => {
                write!(f, "failed to save {location}: {reason}")
            }
        }
    }
}

/// Result of a store operation plus an optional advisory warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted<T> {
    pub value: T,
    pub warning: Option<StoreWarning>,
}

impl<T> Persisted<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    pub fn with_warning(value: T, warning: Option<StoreWarning>) -> Self {
        Self { value, warning }
    }

    pub fn is_clean(&self) -> bool {
        self.warning.is_none()
    }

    /// Drop the warning and keep the value.
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Persisted<U> {
        Persisted {
            value: f(self.value),
            warning: self.warning,
        }
    }
}

/// Receives storage warnings as they happen.
pub trait StoreReporter: Send + Sync {
    fn report(&self, warning: &StoreWarning);
}

/// Reporter that forwards warnings to the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct LogReporter {
    target: Option<String>,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log under a custom target instead of this module's path.
    pub fn with_target(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
        }
    }

    fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(module_path!())
    }
}

impl StoreReporter for LogReporter {
    fn report(&self, warning: &StoreWarning) {
        let target = self.target();
        match warning {
            StoreWarning::Decode {
                quarantined: Some(_),
                ..
            } => warn!(target: target, "{warning}"),
            _ => error!(target: target, "{warning}"),
        }
    }
}
