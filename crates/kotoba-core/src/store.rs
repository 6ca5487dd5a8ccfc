//! In-memory word collection with whole-file persistence.

use crate::clock::{Clock, SystemClock};
use crate::date::StoredDate;
use crate::error::StoreError;
use crate::model::{Category, Word, WordId};
use crate::report::{LogReporter, Persisted, StoreReporter, StoreWarning};
use crate::review::{self, ReviewOptions, ScoredWord};
use crate::storage::{JsonFileStorage, WordStorage};
use crate::update::WordUpdate;
use log::{debug, info};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Builder for a [`WordStore`] with custom collaborators.
pub struct WordStoreBuilder {
    storage: Box<dyn WordStorage>,
    reporter: Arc<dyn StoreReporter>,
    clock: Arc<dyn Clock>,
}

impl WordStoreBuilder {
    /// Start from a storage, logging through [`LogReporter`] on the system clock.
    pub fn new(storage: impl WordStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            reporter: Arc::new(LogReporter::new()),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn reporter(mut self, reporter: Arc<dyn StoreReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Load the collection and return the ready store.
    pub fn open(self) -> Persisted<WordStore> {
        let mut store = WordStore {
            storage: self.storage,
            reporter: self.reporter,
            clock: self.clock,
            words: Vec::new(),
        };
        let warning = store.reload();
        Persisted::with_warning(store, warning)
    }
}

/// Authoritative collection of words.
///
/// Every mutation rewrites the whole backing storage before returning. Storage
/// failures never abort an operation; they come back as warnings on the
/// returned [`Persisted`] and are passed to the reporter.
pub struct WordStore {
    storage: Box<dyn WordStorage>,
    reporter: Arc<dyn StoreReporter>,
    clock: Arc<dyn Clock>,
    words: Vec<Word>,
}

impl std::fmt::Debug for WordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordStore")
            .field("location", &self.storage.location())
            .field("words", &self.words.len())
            .finish()
    }
}

impl WordStore {
    /// Open a JSON file store with default collaborators.
    pub fn open(path: impl AsRef<Path>) -> Persisted<Self> {
        Self::builder(JsonFileStorage::new(path)).open()
    }

    pub fn builder(storage: impl WordStorage + 'static) -> WordStoreBuilder {
        WordStoreBuilder::new(storage)
    }

    /// Replace the in-memory collection with the stored one.
    ///
    /// An absent store gives an empty collection. Unreadable data also gives an
    /// empty collection, after being moved aside when the storage supports it.
    pub fn reload(&mut self) -> Option<StoreWarning> {
        let location = self.storage.location();
        let warning = match self.storage.load() {
            Ok(Some(words)) => {
                info!("loaded words (location={location}, count={})", words.len());
                self.words = words;
                None
            }
            Ok(None) => {
                info!("no stored words yet (location={location})");
                self.words.clear();
                None
            }
            Err(err) => {
                self.words.clear();
                Some(self.load_warning(location, err))
            }
        };
        if let Some(warning) = &warning {
            self.reporter.report(warning);
        }
        warning
    }

    fn load_warning(&self, location: String, err: StoreError) -> StoreWarning {
        if !err.is_decode() {
            return StoreWarning::Read {
                location,
                reason: err.to_string(),
            };
        }
        let quarantined = match self.storage.quarantine() {
            Ok(path) => path,
            Err(quarantine_err) => {
                self.reporter.report(&StoreWarning::Write {
                    location: location.clone(),
                    reason: format!("could not move unreadable data aside: {quarantine_err}"),
                });
                None
            }
        };
        StoreWarning::Decode {
            location,
            reason: err.to_string(),
            quarantined,
        }
    }

    /// Write the whole collection to storage.
    pub fn save(&self) -> Option<StoreWarning> {
        match self.storage.save(&self.words) {
            Ok(()) => None,
            Err(err) => {
                let warning = StoreWarning::Write {
                    location: self.storage.location(),
                    reason: err.to_string(),
                };
                self.reporter.report(&warning);
                Some(warning)
            }
        }
    }

    fn persist<T>(&self, value: T) -> Persisted<T> {
        Persisted::with_warning(value, self.save())
    }

    /// Create a word dated today and persist it.
    ///
    /// Inputs are stored as given; callers validate them.
    pub fn add(
        &mut self,
        text: impl Into<String>,
        category: Category,
        explanation: impl Into<String>,
    ) -> Persisted<Word> {
        let word = Word::new(text, category, explanation, self.clock.today());
        debug!("adding word (id={}, category={})", word.id, word.category);
        self.words.push(word.clone());
        self.persist(word)
    }

    /// Remove every word whose id is listed. Returns how many were removed.
    ///
    /// Saves once, even when nothing matched.
    pub fn delete(&mut self, ids: &[WordId]) -> Persisted<usize> {
        let ids: HashSet<&WordId> = ids.iter().collect();
        let before = self.words.len();
        self.words.retain(|word| !ids.contains(&word.id));
        let removed = before - self.words.len();
        debug!("deleted words (requested={}, removed={removed})", ids.len());
        self.persist(removed)
    }

    /// Apply `update` to the word with `id`. Returns whether a word matched.
    ///
    /// An unknown id changes nothing; the collection is still saved.
    pub fn update(&mut self, id: &WordId, update: &WordUpdate) -> Persisted<bool> {
        let found = match self.words.iter_mut().find(|word| &word.id == id) {
            Some(word) => {
                update.apply(word);
                true
            }
            None => {
                debug!("update skipped, unknown word (id={id})");
                false
            }
        };
        self.persist(found)
    }

    /// Flip `remembered` and return the new value, or `None` for an unknown id.
    pub fn toggle_remembered(&mut self, id: &WordId) -> Persisted<Option<bool>> {
        let toggled = self
            .words
            .iter_mut()
            .find(|word| &word.id == id)
            .map(|word| {
                word.remembered = !word.remembered;
                word.remembered
            });
        self.persist(toggled)
    }

    /// Stamp today's date as the last review of every listed word.
    ///
    /// Returns how many words were stamped. Saves once.
    pub fn mark_reviewed(&mut self, ids: &[WordId]) -> Persisted<usize> {
        let today = self.clock.today();
        let ids: HashSet<&WordId> = ids.iter().collect();
        let mut marked = 0;
        for word in self.words.iter_mut().filter(|word| ids.contains(&word.id)) {
            word.last_reviewed_at = StoredDate::Valid(today);
            marked += 1;
        }
        self.persist(marked)
    }

    pub fn get(&self, id: &WordId) -> Option<&Word> {
        self.words.iter().find(|word| &word.id == id)
    }

    /// Words of one category, in insertion order.
    pub fn by_category(&self, category: Category) -> Vec<&Word> {
        self.words
            .iter()
            .filter(|word| word.category == category)
            .collect()
    }

    /// Case-insensitive substring search over text and explanation.
    ///
    /// An empty keyword matches nothing.
    pub fn search(&self, keyword: &str) -> Vec<&Word> {
        if keyword.is_empty() {
            return Vec::new();
        }
        let lowered = keyword.to_lowercase();
        self.words
            .iter()
            .filter(|word| word.matches_lowered(&lowered))
            .collect()
    }

    /// Word count per category, in [`Category::ALL`] order.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let count = self
                    .words
                    .iter()
                    .filter(|word| word.category == category)
                    .count();
                (category, count)
            })
            .collect()
    }

    /// Highest-priority words for review. Does not mark them reviewed.
    pub fn review_words(&self, options: &ReviewOptions) -> Vec<&Word> {
        review::select_review_words(&self.words, self.clock.today(), options)
    }

    /// Every candidate with its score, highest first.
    pub fn ranked(&self, category: Option<Category>) -> Vec<ScoredWord<'_>> {
        review::rank(&self.words, self.clock.today(), category)
    }

    /// Select a review batch and mark it reviewed today.
    ///
    /// Returns the selected words as they are after marking.
    pub fn start_review(&mut self, options: &ReviewOptions) -> Persisted<Vec<Word>> {
        let ids: Vec<WordId> = self
            .review_words(options)
            .into_iter()
            .map(|word| word.id.clone())
            .collect();
        if ids.is_empty() {
            debug!("no words to review");
            return Persisted::clean(Vec::new());
        }
        let marked = self.mark_reviewed(&ids);
        let words: Vec<Word> = ids
            .iter()
            .filter_map(|id| self.get(id).cloned())
            .collect();
        info!("review session started (words={})", ids.len());
        Persisted::with_warning(words, marked.warning)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Location of the backing storage, for messages.
    pub fn location(&self) -> String {
        self.storage.location()
    }
}

#[cfg(test)]
mod tests {
    use super::WordStore;
    use crate::clock::FixedClock;
    use crate::model::{Category, WordId};
    use crate::report::StoreWarning;
    use crate::storage::JsonFileStorage;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).expect("date")
    }

    fn open(path: &std::path::Path) -> WordStore {
        WordStore::builder(JsonFileStorage::new(path))
            .clock(Arc::new(FixedClock(today())))
            .open()
            .into_value()
    }

    #[test]
    fn added_words_survive_reopen() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("words.json");
        let mut store = open(&path);

        let added = store.add("猫", Category::Noun, "cat");
        assert!(added.is_clean());
        assert_eq!(added.value.created_at.date(), Some(today()));
        assert!(!added.value.remembered);

        let reopened = open(&path);
        assert_eq!(reopened.words(), store.words());
    }

    #[test]
    fn corrupt_file_is_moved_aside_and_store_starts_empty() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("words.json");
        std::fs::write(&path, "not json").expect("write");

        let opened = WordStore::open(&path);
        let quarantine = temp.path().join("words.json.corrupt");
        assert!(opened.value.is_empty());
        assert!(matches!(
            &opened.warning,
            Some(StoreWarning::Decode { quarantined: Some(moved), .. }) if moved == &quarantine
        ));
        assert_eq!(
            std::fs::read_to_string(&quarantine).expect("read quarantine"),
            "not json"
        );
    }

    #[test]
    fn second_corrupt_file_does_not_replace_first_quarantine() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("words.json");

        std::fs::write(&path, "first corrupt copy").expect("write");
        let first = WordStore::open(&path);
        std::fs::write(&path, "second corrupt copy").expect("write");
        let second = WordStore::open(&path);

        let first_copy = temp.path().join("words.json.corrupt");
        let second_copy = temp.path().join("words.json.corrupt.1");
        assert!(matches!(
            &first.warning,
            Some(StoreWarning::Decode { quarantined: Some(moved), .. }) if moved == &first_copy
        ));
        assert!(matches!(
            &second.warning,
            Some(StoreWarning::Decode { quarantined: Some(moved), .. }) if moved == &second_copy
        ));
        assert_eq!(
            std::fs::read_to_string(&first_copy).expect("first"),
            "first corrupt copy"
        );
        assert_eq!(
            std::fs::read_to_string(&second_copy).expect("second"),
            "second corrupt copy"
        );
    }

    #[test]
    fn toggle_remembered_flips_and_reports_unknown() {
        let temp = tempdir().expect("tempdir");
        let mut store = open(&temp.path().join("words.json"));
        let id = store.add("犬", Category::Noun, "dog").value.id;

        assert_eq!(store.toggle_remembered(&id).value, Some(true));
        assert_eq!(store.toggle_remembered(&id).value, Some(false));
        assert_eq!(
            store.toggle_remembered(&WordId::from("missing")).value,
            None
        );
    }
}
