//! Natural-language query interpretation
//!
//! A query is lowercased and trimmed, then run through a fixed sequence of
//! triggers. Each trigger is an independent substring or regex check that
//! sets one predicate; later triggers overwrite earlier ones on the same key.
//! There is no grammar: a query with no trigger phrase is unparseable.

use crate::QueryError;
use lexis_domain::{Predicate, PredicateSet};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static LETTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(?:containing|have|with|including) the letter ([a-z])") {
        Ok(regex) => regex,
        Err(err) => panic!("Letter regex is invalid: {err}"),
    }
});

static VOWEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(?:contain|include|have|feature).*vowel\s*([aeiou])?") {
        Ok(regex) => regex,
        Err(err) => panic!("Vowel regex is invalid: {err}"),
    }
});

static LONGER_REGEX: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"longer than ([0-9]+)") {
    Ok(regex) => regex,
    Err(err) => panic!("Longer-than regex is invalid: {err}"),
});

static SHORTER_REGEX: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"shorter than ([0-9]+)") {
    Ok(regex) => regex,
    Err(err) => panic!("Shorter-than regex is invalid: {err}"),
});

/// Vowel used when the vowel trigger names none
const DEFAULT_VOWEL: &str = "a";

/// A successfully interpreted query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretedQuery {
    /// The normalized (lowercased, trimmed) query text
    pub original: String,
    /// Predicates produced by the triggers that fired
    pub predicates: PredicateSet,
}

/// Capture a numeric threshold; values too large for `usize` saturate
fn capture_threshold(regex: &Regex, query: &str) -> Option<usize> {
    regex
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse().unwrap_or(usize::MAX))
}

/// Interpret a free-text query into a predicate set
///
/// # Examples
///
/// ```
/// use lexis_analyzer::interpret;
/// use lexis_domain::Predicate;
///
/// let interpreted = interpret("All single word palindromic strings").unwrap();
/// assert_eq!(interpreted.predicates.get("is_palindrome"), Some(&Predicate::IsPalindrome(true)));
/// assert_eq!(interpreted.predicates.get("word_count"), Some(&Predicate::WordCount(1)));
/// ```
pub fn interpret(query: &str) -> Result<InterpretedQuery, QueryError> {
    let normalized = query.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(QueryError::Unparseable(normalized));
    }

    let mut predicates = PredicateSet::new();

    if normalized.contains("palindrome") || normalized.contains("palindromic") {
        predicates.insert(Predicate::IsPalindrome(true));
    }

    if normalized.contains("single word") {
        predicates.insert(Predicate::WordCount(1));
    } else if normalized.contains("multiple words") {
        predicates.insert(Predicate::MoreWordsThan(1));
    }

    if let Some(letter) = LETTER_REGEX.captures(&normalized).and_then(|caps| caps.get(1)) {
        predicates.insert(Predicate::Contains(letter.as_str().to_string()));
    }

    // Overwrites the letter trigger on the same key
    if let Some(caps) = VOWEL_REGEX.captures(&normalized) {
        let vowel = caps.get(1).map_or(DEFAULT_VOWEL, |m| m.as_str());
        predicates.insert(Predicate::Contains(vowel.to_string()));
    }

    if let Some(n) = capture_threshold(&LONGER_REGEX, &normalized) {
        predicates.insert(Predicate::LongerThan(n));
    }

    if let Some(n) = capture_threshold(&SHORTER_REGEX, &normalized) {
        predicates.insert(Predicate::ShorterThan(n));
    }

    if predicates.is_empty() {
        debug!("No trigger matched query {:?}", normalized);
        return Err(QueryError::Unparseable(normalized));
    }

    debug!(
        "Interpreted {:?} into {} predicate(s)",
        normalized,
        predicates.len()
    );

    Ok(InterpretedQuery {
        original: normalized,
        predicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(s: &str) -> Predicate {
        Predicate::Contains(s.to_string())
    }

    #[test]
    fn test_single_word_palindrome() {
        let q = interpret("single word palindrome").unwrap();
        let expected: PredicateSet = [Predicate::IsPalindrome(true), Predicate::WordCount(1)]
            .into_iter()
            .collect();
        assert_eq!(q.predicates, expected);
    }

    #[test]
    fn test_gibberish_unparseable() {
        assert_eq!(
            interpret("gibberish xyz"),
            Err(QueryError::Unparseable("gibberish xyz".to_string()))
        );
    }

    #[test]
    fn test_empty_and_blank_unparseable() {
        assert!(matches!(interpret(""), Err(QueryError::Unparseable(_))));
        assert!(matches!(interpret("   \t "), Err(QueryError::Unparseable(_))));
    }

    #[test]
    fn test_normalization_echoed() {
        let q = interpret("  Show me PALINDROMES  ").unwrap();
        assert_eq!(q.original, "show me palindromes");
    }

    #[test]
    fn test_palindromic_trigger() {
        let q = interpret("palindromic strings").unwrap();
        assert_eq!(q.predicates.get("is_palindrome"), Some(&Predicate::IsPalindrome(true)));
    }

    #[test]
    fn test_palindrome_absent_does_not_fire() {
        let q = interpret("strings longer than 3").unwrap();
        assert_eq!(q.predicates.get("is_palindrome"), None);
    }

    #[test]
    fn test_multiple_words() {
        let q = interpret("strings with multiple words").unwrap();
        assert_eq!(q.predicates.get("word_count__gt"), Some(&Predicate::MoreWordsThan(1)));
        assert_eq!(q.predicates.get("word_count"), None);
    }

    #[test]
    fn test_single_word_wins_over_multiple_words() {
        let q = interpret("single word or multiple words").unwrap();
        assert_eq!(q.predicates.get("word_count"), Some(&Predicate::WordCount(1)));
        assert_eq!(q.predicates.get("word_count__gt"), None);
    }

    #[test]
    fn test_letter_trigger() {
        for query in [
            "strings containing the letter z",
            "words that have the letter q",
            "anything with the letter x",
            "including the letter k please",
        ] {
            let q = interpret(query).unwrap();
            let letter = q.original.split("the letter ").nth(1).unwrap()[..1].to_string();
            assert_eq!(q.predicates.get("value__icontains"), Some(&contains(&letter)), "{query}");
        }
    }

    #[test]
    fn test_letter_trigger_needs_connector() {
        assert!(interpret("the letter z").is_err());
    }

    #[test]
    fn test_vowel_trigger_defaults_to_a() {
        let q = interpret("palindromic strings that contain the first vowel").unwrap();
        assert_eq!(q.predicates.get("value__icontains"), Some(&contains("a")));
        assert_eq!(q.predicates.get("is_palindrome"), Some(&Predicate::IsPalindrome(true)));
    }

    #[test]
    fn test_vowel_trigger_captures_vowel() {
        let q = interpret("strings that include the vowel e").unwrap();
        assert_eq!(q.predicates.get("value__icontains"), Some(&contains("e")));

        let q = interpret("strings that feature vowel o").unwrap();
        assert_eq!(q.predicates.get("value__icontains"), Some(&contains("o")));
    }

    #[test]
    fn test_vowel_overwrites_letter() {
        let q = interpret("strings containing the letter z that have a vowel").unwrap();
        assert_eq!(q.predicates.get("value__icontains"), Some(&contains("a")));
        assert_eq!(q.predicates.len(), 1);
    }

    #[test]
    fn test_length_triggers() {
        let q = interpret("strings longer than 10 characters").unwrap();
        assert_eq!(q.predicates.get("length__gt"), Some(&Predicate::LongerThan(10)));

        let q = interpret("longer than 2 and shorter than 8").unwrap();
        assert_eq!(q.predicates.get("length__gt"), Some(&Predicate::LongerThan(2)));
        assert_eq!(q.predicates.get("length__lt"), Some(&Predicate::ShorterThan(8)));
    }

    #[test]
    fn test_length_trigger_needs_digits() {
        assert!(interpret("longer than ten").is_err());
    }

    #[test]
    fn test_length_trigger_ignores_non_ascii_digits() {
        assert!(interpret("longer than \u{0663}").is_err());
        assert!(interpret("shorter than \u{FF15}").is_err());

        let q = interpret("palindromes longer than \u{0663}").unwrap();
        assert_eq!(q.predicates.get("length__gt"), None);
        assert_eq!(q.predicates.len(), 1);
    }

    #[test]
    fn test_huge_threshold_saturates() {
        let q = interpret("longer than 999999999999999999999999999").unwrap();
        assert_eq!(q.predicates.get("length__gt"), Some(&Predicate::LongerThan(usize::MAX)));
    }

    #[test]
    fn test_triggers_compose() {
        let q = interpret("palindromes with multiple words longer than 5").unwrap();
        assert_eq!(q.predicates.len(), 3);
    }
}
