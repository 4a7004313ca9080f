//! Structured query parameters to predicate set

use crate::QueryError;
use lexis_domain::{Predicate, PredicateSet, PredicateValue};
use std::collections::HashMap;
use tracing::debug;

/// Validated structured filter
///
/// Each field corresponds to one recognized query parameter. Absent
/// parameters stay `None`; an all-`None` filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredFilter {
    /// `is_palindrome` parameter
    pub is_palindrome: Option<bool>,
    /// `min_length` parameter (inclusive)
    pub min_length: Option<usize>,
    /// `max_length` parameter (inclusive)
    pub max_length: Option<usize>,
    /// `word_count` parameter (exact)
    pub word_count: Option<usize>,
    /// `contains_character` parameter (case-insensitive)
    pub contains_character: Option<char>,
}

impl StructuredFilter {
    /// Predicate set equivalent to this filter
    pub fn predicates(&self) -> PredicateSet {
        let mut set = PredicateSet::new();
        if let Some(b) = self.is_palindrome {
            set.insert(Predicate::IsPalindrome(b));
        }
        if let Some(n) = self.min_length {
            set.insert(Predicate::MinLength(n));
        }
        if let Some(n) = self.max_length {
            set.insert(Predicate::MaxLength(n));
        }
        if let Some(n) = self.word_count {
            set.insert(Predicate::WordCount(n));
        }
        if let Some(c) = self.contains_character {
            set.insert(Predicate::Contains(c.to_string()));
        }
        set
    }

    /// Applied filters keyed by parameter name, for echoing back to clients
    pub fn applied(&self) -> Vec<(&'static str, PredicateValue)> {
        let mut applied = Vec::new();
        if let Some(b) = self.is_palindrome {
            applied.push(("is_palindrome", PredicateValue::Bool(b)));
        }
        if let Some(n) = self.min_length {
            applied.push(("min_length", PredicateValue::Int(n)));
        }
        if let Some(n) = self.max_length {
            applied.push(("max_length", PredicateValue::Int(n)));
        }
        if let Some(n) = self.word_count {
            applied.push(("word_count", PredicateValue::Int(n)));
        }
        if let Some(c) = self.contains_character {
            applied.push(("contains_character", PredicateValue::Text(c.to_string())));
        }
        applied
    }
}

fn invalid(name: &str, value: &str) -> QueryError {
    QueryError::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Parse a non-negative integer literal (ASCII digits only, no sign)
fn parse_count(name: &str, raw: &str) -> Result<usize, QueryError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(name, raw));
    }
    raw.parse().map_err(|_| invalid(name, raw))
}

/// Validate query parameters into a [`StructuredFilter`]
///
/// Any invalid value aborts the whole build; unknown parameters are ignored.
///
/// # Examples
///
/// ```
/// use lexis_analyzer::build_structured_filter;
/// use std::collections::HashMap;
///
/// let params: HashMap<String, String> = [("min_length", "3"), ("is_palindrome", "TRUE")]
///     .into_iter()
///     .map(|(k, v)| (k.to_string(), v.to_string()))
///     .collect();
///
/// let filter = build_structured_filter(&params).unwrap();
/// assert_eq!(filter.min_length, Some(3));
/// assert_eq!(filter.is_palindrome, Some(true));
/// ```
pub fn build_structured_filter(
    params: &HashMap<String, String>,
) -> Result<StructuredFilter, QueryError> {
    let mut filter = StructuredFilter::default();

    if let Some(raw) = params.get("is_palindrome") {
        filter.is_palindrome = match raw.to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => return Err(invalid("is_palindrome", raw)),
        };
    }

    if let Some(raw) = params.get("min_length") {
        filter.min_length = Some(parse_count("min_length", raw)?);
    }

    if let Some(raw) = params.get("max_length") {
        filter.max_length = Some(parse_count("max_length", raw)?);
    }

    if let Some(raw) = params.get("word_count") {
        filter.word_count = Some(parse_count("word_count", raw)?);
    }

    if let Some(raw) = params.get("contains_character") {
        let mut chars = raw.chars();
        filter.contains_character = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => return Err(invalid("contains_character", raw)),
        };
    }

    debug!("Built structured filter: {:?}", filter);
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_params_matches_everything() {
        let filter = build_structured_filter(&params(&[])).unwrap();
        assert_eq!(filter, StructuredFilter::default());
        assert!(filter.predicates().is_empty());
        assert!(filter.applied().is_empty());
    }

    #[test]
    fn test_all_params() {
        let filter = build_structured_filter(&params(&[
            ("is_palindrome", "False"),
            ("min_length", "3"),
            ("max_length", "5"),
            ("word_count", "1"),
            ("contains_character", "Q"),
        ]))
        .unwrap();

        assert_eq!(filter.is_palindrome, Some(false));
        assert_eq!(filter.min_length, Some(3));
        assert_eq!(filter.max_length, Some(5));
        assert_eq!(filter.word_count, Some(1));
        assert_eq!(filter.contains_character, Some('Q'));

        let predicates = filter.predicates();
        assert_eq!(predicates.len(), 5);
        assert_eq!(predicates.get("length__gte"), Some(&Predicate::MinLength(3)));
        assert_eq!(predicates.get("length__lte"), Some(&Predicate::MaxLength(5)));
    }

    #[test]
    fn test_applied_uses_parameter_names() {
        let filter =
            build_structured_filter(&params(&[("min_length", "2"), ("contains_character", "x")]))
                .unwrap();
        assert_eq!(
            filter.applied(),
            vec![
                ("min_length", PredicateValue::Int(2)),
                ("contains_character", PredicateValue::Text("x".to_string())),
            ]
        );
    }

    #[test]
    fn test_invalid_boolean() {
        let err = build_structured_filter(&params(&[("is_palindrome", "yes")])).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidParameter {
                name: "is_palindrome".to_string(),
                value: "yes".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_integers() {
        for raw in ["-1", "3.5", "", "abc", "+4", " 3", "99999999999999999999999999"] {
            let result = build_structured_filter(&params(&[("min_length", raw)]));
            assert!(
                matches!(result, Err(QueryError::InvalidParameter { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_contains_character_must_be_single() {
        assert!(build_structured_filter(&params(&[("contains_character", "ab")])).is_err());
        assert!(build_structured_filter(&params(&[("contains_character", "")])).is_err());
        // One character, even if multi-byte
        let filter = build_structured_filter(&params(&[("contains_character", "é")])).unwrap();
        assert_eq!(filter.contains_character, Some('é'));
    }

    #[test]
    fn test_one_invalid_param_fails_whole_build() {
        let result = build_structured_filter(&params(&[
            ("min_length", "3"),
            ("word_count", "many"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_params_ignored() {
        let filter = build_structured_filter(&params(&[("colour", "blue")])).unwrap();
        assert!(filter.predicates().is_empty());
    }
}
