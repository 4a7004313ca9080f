//! Integration tests for lexis-analyzer
//!
//! Analyze a small corpus and check that structured and natural-language
//! predicates select the expected records.

use lexis_analyzer::{analyze, build_structured_filter, interpret, QueryError};
use lexis_domain::{AnalyzedRecord, PredicateSet};
use std::collections::HashMap;

const CORPUS: &[&str] = &[
    "Racecar",
    "hello",
    "hello world",
    "A man a plan a canal Panama",
    "level",
    "noon",
    "abcdefghijkl",
    "zig zag",
];

fn corpus() -> Vec<AnalyzedRecord> {
    CORPUS
        .iter()
        .enumerate()
        .map(|(i, value)| {
            AnalyzedRecord::new(value.to_string(), analyze(value).unwrap(), 1000 + i as u64)
        })
        .collect()
}

fn select(records: &[AnalyzedRecord], predicates: &PredicateSet) -> Vec<String> {
    records
        .iter()
        .filter(|r| predicates.matches(r))
        .map(|r| r.value.clone())
        .collect()
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_hashes_unique_across_corpus() {
    let records = corpus();
    let mut hashes: Vec<_> = records.iter().map(|r| r.id().to_string()).collect();
    hashes.sort();
    hashes.dedup();
    assert_eq!(hashes.len(), CORPUS.len());
}

#[test]
fn test_structured_length_window() {
    let records = corpus();
    let filter = build_structured_filter(&params(&[("min_length", "3"), ("max_length", "5")]))
        .unwrap();

    let selected = select(&records, &filter.predicates());
    assert_eq!(selected, vec!["hello", "level", "noon"]);
}

#[test]
fn test_structured_palindromes_containing_character() {
    let records = corpus();
    let filter = build_structured_filter(&params(&[
        ("is_palindrome", "true"),
        ("contains_character", "R"),
    ]))
    .unwrap();

    assert_eq!(select(&records, &filter.predicates()), vec!["Racecar"]);
}

#[test]
fn test_natural_language_single_word_palindromes() {
    let records = corpus();
    let q = interpret("single word palindrome").unwrap();

    assert_eq!(select(&records, &q.predicates), vec!["Racecar", "level", "noon"]);
}

#[test]
fn test_natural_language_multiple_words_with_letter() {
    let records = corpus();
    let q = interpret("Strings with multiple words containing the letter z").unwrap();

    assert_eq!(select(&records, &q.predicates), vec!["zig zag"]);
}

#[test]
fn test_natural_language_length() {
    let records = corpus();
    let q = interpret("strings longer than 11 characters").unwrap();

    assert_eq!(
        select(&records, &q.predicates),
        vec!["A man a plan a canal Panama", "abcdefghijkl"]
    );
}

#[test]
fn test_natural_language_parsed_but_empty() {
    let records = corpus();
    let q = interpret("palindromes shorter than 2").unwrap();

    assert!(select(&records, &q.predicates).is_empty());
}

#[test]
fn test_natural_language_unparseable() {
    assert!(matches!(
        interpret("gibberish xyz"),
        Err(QueryError::Unparseable(_))
    ));
}
