use chrono::{Days, NaiveDate};
use kotoba_core::{Category, StoredDate, Word};

/// Build a calendar date, panicking on invalid input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Builder for words with controlled dates and flags.
#[derive(Debug, Clone)]
pub struct WordFixture {
    word: Word,
}

impl WordFixture {
    /// A noun created on `created`, not remembered, never reviewed.
    pub fn new(text: &str, created: NaiveDate) -> Self {
        Self {
            word: Word::new(text, Category::Noun, format!("{text} gloss"), created),
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.word.category = category;
        self
    }

    pub fn explanation(mut self, explanation: &str) -> Self {
        self.word.explanation = explanation.to_string();
        self
    }

    pub fn remembered(mut self, remembered: bool) -> Self {
        self.word.remembered = remembered;
        self
    }

    /// Last reviewed `days` before `today`.
    pub fn reviewed_days_ago(mut self, today: NaiveDate, days: u64) -> Self {
        self.word.last_reviewed_at = StoredDate::Valid(today - Days::new(days));
        self
    }

    /// Drop both dates, as a record written without them loads.
    pub fn without_dates(mut self) -> Self {
        self.word.created_at = StoredDate::Absent;
        self.word.last_reviewed_at = StoredDate::Absent;
        self
    }

    /// Set a raw last review value that does not parse as a date.
    pub fn unreadable_review(mut self, raw: &str) -> Self {
        self.word.last_reviewed_at = StoredDate::Unreadable(raw.to_string());
        self
    }

    pub fn build(self) -> Word {
        self.word
    }
}
