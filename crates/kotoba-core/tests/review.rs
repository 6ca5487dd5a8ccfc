//! Review selection properties.

use kotoba_core::{Category, ReviewOptions, Word, rank, score, select_review_words};
use kotoba_test_utils::{WordFixture, date};
use pretty_assertions::assert_eq;

fn today() -> chrono::NaiveDate {
    date(2024, 10, 15)
}

fn texts<'a>(words: &[&'a Word]) -> Vec<&'a str> {
    words.iter().map(|word| word.text.as_str()).collect()
}

#[test]
fn unremembered_word_outranks_remembered_word_reviewed_same_day() {
    let created = date(2024, 1, 1);
    let words = vec![
        WordFixture::new("B", created)
            .remembered(true)
            .reviewed_days_ago(today(), 6)
            .build(),
        WordFixture::new("A", created)
            .remembered(false)
            .reviewed_days_ago(today(), 6)
            .build(),
    ];

    let scores: Vec<i64> = rank(&words, today(), None)
        .iter()
        .map(|scored| scored.score)
        .collect();
    assert_eq!(scores, vec![13, 6]);

    let options = ReviewOptions::default().with_count(1);
    assert_eq!(
        texts(&select_review_words(&words, today(), &options)),
        vec!["A"]
    );
}

#[test]
fn overdue_remembered_word_beats_fresh_unremembered_word() {
    let created = date(2024, 1, 1);
    let words = vec![
        WordFixture::new("D", created)
            .remembered(false)
            .reviewed_days_ago(today(), 0)
            .build(),
        WordFixture::new("C", created)
            .remembered(true)
            .reviewed_days_ago(today(), 8)
            .build(),
    ];

    let options = ReviewOptions::default().with_count(1);
    assert_eq!(
        texts(&select_review_words(&words, today(), &options)),
        vec!["C"]
    );
}

#[test]
fn words_without_dates_score_a_year_overdue() {
    let words = vec![
        WordFixture::new("recent", date(2024, 1, 1))
            .reviewed_days_ago(today(), 30)
            .build(),
        WordFixture::new("undated-remembered", today())
            .remembered(true)
            .without_dates()
            .build(),
        WordFixture::new("undated", today()).without_dates().build(),
    ];

    let ranked = rank(&words, today(), None);
    let summary: Vec<(&str, i64)> = ranked
        .iter()
        .map(|scored| (scored.word.text.as_str(), scored.score))
        .collect();
    assert_eq!(
        summary,
        vec![("undated", 372), ("undated-remembered", 365), ("recent", 37)]
    );
}

#[test]
fn selection_returns_all_when_fewer_than_count() {
    let words: Vec<Word> = (0..3)
        .map(|n| WordFixture::new(&format!("w{n}"), date(2024, 9, 1)).build())
        .collect();
    assert_eq!(
        select_review_words(&words, today(), &ReviewOptions::default()).len(),
        3
    );
}

#[test]
fn selection_returns_the_ten_highest_scores_of_fifty() {
    let words: Vec<Word> = (0..50u64)
        .map(|n| {
            WordFixture::new(&format!("w{n}"), date(2023, 1, 1))
                .remembered(n % 2 == 0)
                .reviewed_days_ago(today(), n)
                .build()
        })
        .collect();

    let selected = select_review_words(&words, today(), &ReviewOptions::default());
    assert_eq!(selected.len(), 10);

    let mut all_scores: Vec<i64> = rank(&words, today(), None)
        .iter()
        .map(|scored| scored.score)
        .collect();
    all_scores.sort_unstable_by(|a, b| b.cmp(a));
    let threshold = all_scores[9];
    let selected_scores: Vec<i64> = selected
        .iter()
        .map(|word| kotoba_core::score(word, today()))
        .collect();
    assert!(selected_scores.iter().all(|score| *score >= threshold));
    assert_eq!(texts(&selected)[0], "w49");
}

#[test]
fn category_filter_never_leaks_other_categories() {
    let created = date(2024, 1, 1);
    let words = vec![
        WordFixture::new("猫", created).build(),
        WordFixture::new("食べる", created)
            .category(Category::TransitiveVerb)
            .build(),
        WordFixture::new("ゴロゴロ", created)
            .category(Category::Mimetic)
            .without_dates()
            .build(),
        WordFixture::new("飲む", created)
            .category(Category::TransitiveVerb)
            .remembered(true)
            .build(),
    ];

    let options = ReviewOptions::default().with_category(Some(Category::TransitiveVerb));
    let selected = select_review_words(&words, today(), &options);
    assert_eq!(texts(&selected), vec!["食べる", "飲む"]);
    assert!(
        selected
            .iter()
            .all(|word| word.category == Category::TransitiveVerb)
    );

    let loanwords = ReviewOptions::default().with_category(Some(Category::Loanword));
    assert!(select_review_words(&words, today(), &loanwords).is_empty());
}

#[test]
fn empty_collection_selects_nothing() {
    assert!(select_review_words(&[], today(), &ReviewOptions::default()).is_empty());
}

#[test]
fn corrupt_last_review_date_scores_as_a_year_overdue() {
    let word: Word = serde_json::from_value(serde_json::json!({
        "id": "w-corrupt",
        "japanese": "猫",
        "word_type": "n",
        "explanation": "cat",
        "remembered": true,
        "created_time": "2024-10-14",
        "last_review_time": "garbage"
    }))
    .expect("deserialize");

    assert_eq!(score(&word, today()), 365);
}

#[test]
fn corrupt_review_dates_go_to_the_front_of_the_queue() {
    let created = date(2024, 10, 1);
    let words = vec![
        WordFixture::new("stale", created)
            .reviewed_days_ago(today(), 40)
            .build(),
        WordFixture::new("corrupt", created)
            .remembered(true)
            .unreadable_review("15/10/2024")
            .build(),
    ];

    let options = ReviewOptions::default().with_count(1);
    assert_eq!(
        texts(&select_review_words(&words, today(), &options)),
        vec!["corrupt"]
    );
}
