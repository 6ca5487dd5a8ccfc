//! Plain-text rendering of words for the terminal.

use kotoba::core::{Category, ScoredWord, StoredDate, Word};

const NEVER: &str = "never";

fn remembered_mark(word: &Word) -> &'static str {
    if word.remembered { "✓" } else { "·" }
}

fn date_or(date: &StoredDate, fallback: &str) -> String {
    match date {
        StoredDate::Absent => fallback.to_string(),
        StoredDate::Valid(_) => date.to_string(),
        StoredDate::Unreadable(raw) => format!("{raw} (unreadable)"),
    }
}

/// One line per word: mark, text, category, explanation, id.
pub fn word_row(word: &Word) -> String {
    format!(
        "{} {}  [{}]  {}  ({})",
        remembered_mark(word),
        word.text,
        word.category,
        word.explanation,
        word.id
    )
}

pub fn word_rows<'a>(words: impl IntoIterator<Item = &'a Word>) -> String {
    words
        .into_iter()
        .map(word_row)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every field of a word, one per line.
pub fn word_detail(word: &Word) -> String {
    [
        format!("id:            {}", word.id),
        format!("text:          {}", word.text),
        format!("category:      {} ({})", word.category, word.category.alias()),
        format!("explanation:   {}", word.explanation),
        format!("remembered:    {}", if word.remembered { "yes" } else { "no" }),
        format!("added:         {}", date_or(&word.created_at, "unknown")),
        format!("last reviewed: {}", date_or(&word.last_reviewed_at, NEVER)),
    ]
    .join("\n")
}

/// Category labels, their aliases, and how many words each holds.
pub fn category_table(counts: &[(Category, usize)]) -> String {
    counts
        .iter()
        .map(|(category, count)| format!("{:<8}{:<22}{count}", category.label(), category.alias()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn review_row(scored: &ScoredWord<'_>) -> String {
    format!("{:>5}  {}", scored.score, word_row(scored.word))
}
