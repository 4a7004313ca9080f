//! Record module - one analyzed string and its derived properties

use std::collections::BTreeMap;

/// Properties derived from a string by the analyzer
///
/// Every field is a pure function of the input string, so two analyses of
/// the same string always produce equal properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringProperties {
    /// Number of characters (Unicode scalar values)
    pub length: usize,

    /// True iff the lowercased string reads the same reversed
    pub is_palindrome: bool,

    /// Number of distinct characters
    pub unique_characters: usize,

    /// Number of whitespace-delimited tokens
    pub word_count: usize,

    /// SHA-256 of the UTF-8 bytes, lowercase hex
    pub content_hash: String,

    /// Occurrence count per distinct character
    pub character_frequency: BTreeMap<char, usize>,
}

/// A persisted string - the single entity type of Lexis
///
/// Records are immutable once created; the only lifecycle transition after
/// creation is deletion. The content hash is the record's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedRecord {
    /// The original input string
    pub value: String,

    /// Derived properties
    pub properties: StringProperties,

    /// When this record was created (milliseconds since Unix epoch)
    pub created_at: u64,
}

impl AnalyzedRecord {
    /// Create a new record from a value and its analysis
    pub fn new(value: String, properties: StringProperties, created_at: u64) -> Self {
        Self {
            value,
            properties,
            created_at,
        }
    }

    /// The record identifier (its content hash)
    pub fn id(&self) -> &str {
        &self.properties.content_hash
    }

    /// Case-insensitive substring containment on the value
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.value
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}
