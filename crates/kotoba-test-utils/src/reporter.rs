use kotoba_core::{StoreReporter, StoreWarning};
use parking_lot::Mutex;
use std::sync::Arc;

/// Reporter that keeps every warning it receives.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    warnings: Arc<Mutex<Vec<StoreWarning>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<StoreWarning> {
        self.warnings.lock().clone()
    }
}

impl StoreReporter for RecordingReporter {
    fn report(&self, warning: &StoreWarning) {
        self.warnings.lock().push(warning.clone());
    }
}
