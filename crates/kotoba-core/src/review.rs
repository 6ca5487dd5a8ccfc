//! Review selection: scores words by how overdue and how unfamiliar they are.
//!
//! The score is the number of days since a word was last reviewed (or
//! created), plus a fixed bonus while the word is not yet remembered. A word
//! whose reference date is missing or unreadable counts as a year overdue so
//! it surfaces first. An unreadable last review date does not fall back to the
//! creation date.
//!
//! Selecting words does not mark them reviewed. Callers must follow up with
//! [`WordStore::mark_reviewed`](crate::WordStore::mark_reviewed), or use
//! [`WordStore::start_review`](crate::WordStore::start_review), otherwise the
//! same overdue words win every later selection.

use crate::model::{Category, Word};
use chrono::NaiveDate;

/// Words returned per session unless configured otherwise.
pub const DEFAULT_REVIEW_COUNT: usize = 10;
/// Day count used when a word's reference date is missing or unreadable.
pub const MISSING_DATE_DAYS: i64 = 365;
/// Day-equivalent added to words not yet remembered.
pub const NOT_REMEMBERED_BONUS: i64 = 7;

/// Options for a review selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOptions {
    /// Maximum number of words to return.
    pub count: usize,
    /// Restrict candidates to one category.
    pub category: Option<Category>,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_REVIEW_COUNT,
            category: None,
        }
    }
}

impl ReviewOptions {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }
}

/// A candidate word and its review priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredWord<'a> {
    pub word: &'a Word,
    pub score: i64,
}

/// Review priority of `word` as of `today`. Higher is more urgent.
pub fn score(word: &Word, today: NaiveDate) -> i64 {
    let days = word
        .reference_date()
        .date()
        .map_or(MISSING_DATE_DAYS, |date| (today - date).num_days());
    let bonus = if word.remembered {
        0
    } else {
        NOT_REMEMBERED_BONUS
    };
    days + bonus
}

/// Score every candidate and sort by score, highest first.
///
/// The sort is stable: equal scores keep collection order.
pub fn rank(words: &[Word], today: NaiveDate, category: Option<Category>) -> Vec<ScoredWord<'_>> {
    let mut scored: Vec<ScoredWord<'_>> = words
        .iter()
        .filter(|word| category.is_none_or(|category| word.category == category))
        .map(|word| ScoredWord {
            word,
            score: score(word, today),
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// The `options.count` highest-scoring words.
pub fn select_review_words<'a>(
    words: &'a [Word],
    today: NaiveDate,
    options: &ReviewOptions,
) -> Vec<&'a Word> {
    rank(words, today, options.category)
        .into_iter()
        .take(options.count)
        .map(|scored| scored.word)
        .collect()
}
