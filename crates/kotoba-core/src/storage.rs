//! Storage backends for the word collection.

use crate::error::StoreError;
use crate::model::Word;
use log::{debug, info};
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Whole-collection persistence used by [`WordStore`](crate::WordStore).
pub trait WordStorage: Send + Sync {
    /// Read the stored collection; `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Word>>, StoreError>;

    /// Replace the stored collection.
    fn save(&self, words: &[Word]) -> Result<(), StoreError>;

    /// Move unreadable stored data aside so a later save does not overwrite it.
    ///
    /// Returns where the data went, if anywhere.
    fn quarantine(&self) -> Result<Option<PathBuf>, StoreError> {
        Ok(None)
    }

    /// Human-readable location used in warnings.
    fn location(&self) -> String;
}

/// Stores the collection as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path written before the atomic rename.
    fn temp_path(&self) -> PathBuf {
        with_suffix(&self.path, ".tmp")
    }

    /// First free path for an unreadable file: `<file>.corrupt`, then
    /// `<file>.corrupt.1`, `<file>.corrupt.2`, ...
    fn quarantine_path(&self) -> PathBuf {
        let base = with_suffix(&self.path, ".corrupt");
        if !base.exists() {
            return base;
        }
        (1u32..)
            .map(|n| with_suffix(&base, &format!(".{n}")))
            .find(|candidate| !candidate.exists())
            .unwrap_or(base)
    }

    fn write_temp(&self, temp_path: &Path, words: &[Word]) -> Result<(), StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(temp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, words)?;
        writer.flush()?;
        Ok(())
    }
}

impl WordStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<Word>>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("word file missing (path={})", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(StoreError::Io(err)),
        };
        let words: Vec<Word> = serde_json::from_str(&contents)?;
        Ok(Some(words))
    }

    fn save(&self, words: &[Word]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp_path = self.temp_path();
        if let Err(err) = self.write_temp(&temp_path, words) {
            let _ = fs::remove_file(&temp_path);
            return Err(err);
        }
        fs::rename(&temp_path, &self.path)?;
        debug!(
            "saved words (path={}, count={})",
            self.path.display(),
            words.len()
        );
        Ok(())
    }

    fn quarantine(&self) -> Result<Option<PathBuf>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let target = self.quarantine_path();
        fs::rename(&self.path, &target)?;
        info!(
            "moved unreadable word file aside (from={}, to={})",
            self.path.display(),
            target.display()
        );
        Ok(Some(target))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
