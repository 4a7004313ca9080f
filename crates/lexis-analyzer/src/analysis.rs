//! String analysis

use crate::AnalyzeError;
use lexis_domain::StringProperties;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

/// SHA-256 of the UTF-8 bytes of `value`, as 64 lowercase hex characters
///
/// # Examples
///
/// ```
/// use lexis_analyzer::content_hash;
///
/// assert_eq!(
///     content_hash("abc"),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn content_hash(value: &str) -> String {
    format!("{:x}", Sha256::digest(value.as_bytes()))
}

/// Derive the properties of a non-empty string
///
/// Palindrome detection lowercases the whole string and compares it with its
/// reverse, so whitespace and punctuation count.
///
/// # Examples
///
/// ```
/// use lexis_analyzer::analyze;
///
/// let props = analyze("Racecar").unwrap();
/// assert!(props.is_palindrome);
/// assert_eq!(props.length, 7);
/// ```
pub fn analyze(value: &str) -> Result<StringProperties, AnalyzeError> {
    if value.is_empty() {
        return Err(AnalyzeError::EmptyValue);
    }

    let lowered = value.to_lowercase();
    let is_palindrome = lowered.chars().eq(lowered.chars().rev());

    let mut character_frequency = BTreeMap::new();
    for c in value.chars() {
        *character_frequency.entry(c).or_insert(0) += 1;
    }

    Ok(StringProperties {
        length: value.chars().count(),
        is_palindrome,
        unique_characters: value.chars().collect::<HashSet<_>>().len(),
        word_count: value.split_whitespace().count(),
        content_hash: content_hash(value),
        character_frequency,
    })
}
