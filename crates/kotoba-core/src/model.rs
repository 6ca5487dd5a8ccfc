//! Word record model and its persisted layout.

use crate::date::StoredDate;
use crate::error::ParseCategoryError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque word identifier.
///
/// Generated ids are random UUID v4 strings; any string read from an existing
/// data file is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(String);

impl WordId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Grammatical category of a word.
///
/// Persisted by label, so reordering the variants never changes stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "n")]
    Noun,
    #[serde(rename = "vt")]
    TransitiveVerb,
    #[serde(rename = "vi")]
    IntransitiveVerb,
    #[serde(rename = "vt/vi")]
    AmbitransitiveVerb,
    #[serde(rename = "adj1")]
    IAdjective,
    #[serde(rename = "adj2")]
    NaAdjective,
    #[serde(rename = "外来词")]
    Loanword,
    #[serde(rename = "拟声词")]
    Mimetic,
    #[serde(rename = "else")]
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 9] = [
        Category::Noun,
        Category::TransitiveVerb,
        Category::IntransitiveVerb,
        Category::AmbitransitiveVerb,
        Category::IAdjective,
        Category::NaAdjective,
        Category::Loanword,
        Category::Mimetic,
        Category::Other,
    ];

    /// Stored label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Noun => "n",
            Category::TransitiveVerb => "vt",
            Category::IntransitiveVerb => "vi",
            Category::AmbitransitiveVerb => "vt/vi",
            Category::IAdjective => "adj1",
            Category::NaAdjective => "adj2",
            Category::Loanword => "外来词",
            Category::Mimetic => "拟声词",
            Category::Other => "else",
        }
    }

    /// English alias accepted wherever a label is.
    pub fn alias(self) -> &'static str {
        match self {
            Category::Noun => "noun",
            Category::TransitiveVerb => "transitive-verb",
            Category::IntransitiveVerb => "intransitive-verb",
            Category::AmbitransitiveVerb => "ambitransitive-verb",
            Category::IAdjective => "i-adjective",
            Category::NaAdjective => "na-adjective",
            Category::Loanword => "loanword",
            Category::Mimetic => "mimetic",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Category::ALL
            .into_iter()
            .find(|category| {
                category.label() == trimmed || category.alias().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ParseCategoryError(value.to_string()))
    }
}

/// A stored vocabulary entry.
///
/// Field names on disk keep the established data file layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,
    /// Foreign-language word or phrase.
    #[serde(rename = "japanese")]
    pub text: String,
    #[serde(rename = "word_type")]
    pub category: Category,
    pub explanation: String,
    #[serde(default)]
    pub remembered: bool,
    /// Creation date; only loaded records can lack a valid one.
    #[serde(rename = "created_time", default)]
    pub created_at: StoredDate,
    #[serde(rename = "last_review_time", default)]
    pub last_reviewed_at: StoredDate,
}

impl Word {
    /// Build a new, unreviewed word created on `today`.
    pub fn new(
        text: impl Into<String>,
        category: Category,
        explanation: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: WordId::generate(),
            text: text.into(),
            category,
            explanation: explanation.into(),
            remembered: false,
            created_at: StoredDate::Valid(today),
            last_reviewed_at: StoredDate::Absent,
        }
    }

    /// Date review urgency is measured from.
    ///
    /// The last review when one is recorded, even if unreadable; otherwise
    /// the creation date.
    pub fn reference_date(&self) -> &StoredDate {
        if self.last_reviewed_at.is_absent() {
            &self.created_at
        } else {
            &self.last_reviewed_at
        }
    }

    /// Case-insensitive substring match on text or explanation.
    ///
    /// `lowered` must already be lowercase.
    pub(crate) fn matches_lowered(&self, lowered: &str) -> bool {
        self.text.to_lowercase().contains(lowered)
            || self.explanation.to_lowercase().contains(lowered)
    }
}
