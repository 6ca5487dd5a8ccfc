use kotoba_core::{StoreError, Word, WordStorage};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// In-memory storage. Clones share the same contents, so a test can keep a
/// handle after giving one to a store.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    words: Arc<Mutex<Option<Vec<Word>>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words(words: Vec<Word>) -> Self {
        Self {
            words: Arc::new(Mutex::new(Some(words))),
            saves: Arc::default(),
        }
    }

    /// Last saved (or seeded) collection.
    pub fn stored(&self) -> Option<Vec<Word>> {
        self.words.lock().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl WordStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<Word>>, StoreError> {
        Ok(self.words.lock().clone())
    }

    fn save(&self, words: &[Word]) -> Result<(), StoreError> {
        *self.words.lock() = Some(words.to_vec());
        *self.saves.lock() += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// Storage whose loads and saves fail on demand.
#[derive(Clone, Default)]
pub struct FailingStorage {
    fail_load: bool,
    fail_save: bool,
}

impl FailingStorage {
    /// Loads fail with undecodable data.
    pub fn corrupt() -> Self {
        Self {
            fail_load: true,
            fail_save: false,
        }
    }

    /// Loads find nothing; every save fails.
    pub fn read_only() -> Self {
        Self {
            fail_load: false,
            fail_save: true,
        }
    }
}

impl WordStorage for FailingStorage {
    fn load(&self) -> Result<Option<Vec<Word>>, StoreError> {
        if self.fail_load {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "stub corrupt data",
            )));
        }
        Ok(None)
    }

    fn save(&self, _words: &[Word]) -> Result<(), StoreError> {
        if self.fail_save {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "stub read-only storage",
            )));
        }
        Ok(())
    }

    fn location(&self) -> String {
        "failing".to_string()
    }
}
