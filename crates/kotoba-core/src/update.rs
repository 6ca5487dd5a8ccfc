//! Typed partial updates for stored words.

use crate::date::StoredDate;
use crate::model::{Category, Word};
use chrono::NaiveDate;

/// Set of field changes applied to a single word.
///
/// Fields left as `None` are not touched. `id` and `created_at` are never
/// updatable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordUpdate {
    pub text: Option<String>,
    pub category: Option<Category>,
    pub explanation: Option<String>,
    pub remembered: Option<bool>,
    pub last_reviewed_at: Option<NaiveDate>,
}

impl WordUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn remembered(mut self, remembered: bool) -> Self {
        self.remembered = Some(remembered);
        self
    }

    pub fn last_reviewed_at(mut self, date: NaiveDate) -> Self {
        self.last_reviewed_at = Some(date);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.category.is_none()
            && self.explanation.is_none()
            && self.remembered.is_none()
            && self.last_reviewed_at.is_none()
    }

    /// Apply every set field to `word`.
    pub fn apply(&self, word: &mut Word) {
        if let Some(text) = &self.text {
            word.text.clone_from(text);
        }
        if let Some(category) = self.category {
            word.category = category;
        }
        if let Some(explanation) = &self.explanation {
            word.explanation.clone_from(explanation);
        }
        if let Some(remembered) = self.remembered {
            word.remembered = remembered;
        }
        if let Some(date) = self.last_reviewed_at {
            word.last_reviewed_at = StoredDate::Valid(date);
        }
    }
}
