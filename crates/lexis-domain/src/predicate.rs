//! Predicate module - filter conditions over analyzed records
//!
//! A predicate set maps a field name, optionally suffixed with a comparison
//! operator (`length__gt`), to a comparison value. All predicates in a set
//! are ANDed. A set holds at most one predicate per key; inserting an
//! existing key replaces the earlier value in place.

use crate::AnalyzedRecord;
use std::fmt;

/// A single filter condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `is_palindrome = v`
    IsPalindrome(bool),

    /// `length >= n`
    MinLength(usize),

    /// `length <= n`
    MaxLength(usize),

    /// `length > n`
    LongerThan(usize),

    /// `length < n`
    ShorterThan(usize),

    /// `word_count = n`
    WordCount(usize),

    /// `word_count > n`
    MoreWordsThan(usize),

    /// Case-insensitive substring containment on the value
    Contains(String),
}

/// The comparison value carried by a predicate, for echoing back to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateValue {
    /// Boolean comparison value
    Bool(bool),
    /// Integer comparison value
    Int(usize),
    /// Text comparison value
    Text(String),
}

impl fmt::Display for PredicateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateValue::Bool(b) => write!(f, "{}", b),
            PredicateValue::Int(n) => write!(f, "{}", n),
            PredicateValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Predicate {
    /// Key identifying the field and operator this predicate constrains
    pub fn key(&self) -> &'static str {
        match self {
            Predicate::IsPalindrome(_) => "is_palindrome",
            Predicate::MinLength(_) => "length__gte",
            Predicate::MaxLength(_) => "length__lte",
            Predicate::LongerThan(_) => "length__gt",
            Predicate::ShorterThan(_) => "length__lt",
            Predicate::WordCount(_) => "word_count",
            Predicate::MoreWordsThan(_) => "word_count__gt",
            Predicate::Contains(_) => "value__icontains",
        }
    }

    /// Comparison value
    pub fn value(&self) -> PredicateValue {
        match self {
            Predicate::IsPalindrome(b) => PredicateValue::Bool(*b),
            Predicate::MinLength(n)
            | Predicate::MaxLength(n)
            | Predicate::LongerThan(n)
            | Predicate::ShorterThan(n)
            | Predicate::WordCount(n)
            | Predicate::MoreWordsThan(n) => PredicateValue::Int(*n),
            Predicate::Contains(s) => PredicateValue::Text(s.clone()),
        }
    }

    /// Evaluate this predicate against a record
    pub fn matches(&self, record: &AnalyzedRecord) -> bool {
        let props = &record.properties;
        match self {
            Predicate::IsPalindrome(b) => props.is_palindrome == *b,
            Predicate::MinLength(n) => props.length >= *n,
            Predicate::MaxLength(n) => props.length <= *n,
            Predicate::LongerThan(n) => props.length > *n,
            Predicate::ShorterThan(n) => props.length < *n,
            Predicate::WordCount(n) => props.word_count == *n,
            Predicate::MoreWordsThan(n) => props.word_count > *n,
            Predicate::Contains(s) => record.contains_ignore_case(s),
        }
    }
}

/// An ordered set of predicates, at most one per key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    /// Create an empty set (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a predicate, replacing any existing predicate with the same key
    ///
    /// Replacement keeps the original position so the echo order reflects
    /// the order in which keys were first set.
    pub fn insert(&mut self, predicate: Predicate) {
        match self.predicates.iter_mut().find(|p| p.key() == predicate.key()) {
            Some(existing) => *existing = predicate,
            None => self.predicates.push(predicate),
        }
    }

    /// Get the predicate for a key, if set
    pub fn get(&self, key: &str) -> Option<&Predicate> {
        self.predicates.iter().find(|p| p.key() == key)
    }

    /// Iterate predicates in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }

    /// Number of predicates
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// True iff every predicate matches the record
    pub fn matches(&self, record: &AnalyzedRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Key/value pairs in insertion order
    pub fn entries(&self) -> Vec<(&'static str, PredicateValue)> {
        self.predicates.iter().map(|p| (p.key(), p.value())).collect()
    }
}

impl FromIterator<Predicate> for PredicateSet {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        let mut set = PredicateSet::new();
        for predicate in iter {
            set.insert(predicate);
        }
        set
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_predicate() -> impl Strategy<Value = Predicate> {
        prop_oneof![
            any::<bool>().prop_map(Predicate::IsPalindrome),
            (0usize..100).prop_map(Predicate::MinLength),
            (0usize..100).prop_map(Predicate::MaxLength),
            (0usize..100).prop_map(Predicate::LongerThan),
            (0usize..100).prop_map(Predicate::ShorterThan),
            (0usize..10).prop_map(Predicate::WordCount),
            (0usize..10).prop_map(Predicate::MoreWordsThan),
            "[a-z]".prop_map(Predicate::Contains),
        ]
    }

    proptest! {
        /// Property: a set never holds two predicates with the same key
        #[test]
        fn test_keys_unique(predicates in prop::collection::vec(any_predicate(), 0..20)) {
            let set: PredicateSet = predicates.into_iter().collect();
            let mut keys: Vec<_> = set.iter().map(|p| p.key()).collect();
            let total = keys.len();
            keys.sort_unstable();
            keys.dedup();
            prop_assert_eq!(keys.len(), total);
        }

        /// Property: the last predicate inserted for a key wins
        #[test]
        fn test_last_write_wins(predicates in prop::collection::vec(any_predicate(), 1..20)) {
            let set: PredicateSet = predicates.clone().into_iter().collect();
            for predicate in &predicates {
                let last = predicates.iter().rev().find(|p| p.key() == predicate.key());
                prop_assert_eq!(set.get(predicate.key()), last);
            }
        }
    }
}
