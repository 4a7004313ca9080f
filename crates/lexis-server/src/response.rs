//! JSON response bodies

use chrono::{DateTime, SecondsFormat, Utc};
use lexis_domain::{AnalyzedRecord, PredicateValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Derived properties of a record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertiesResponse {
    /// Character count
    pub length: usize,
    /// Case-insensitive palindrome flag
    pub is_palindrome: bool,
    /// Distinct character count
    pub unique_characters: usize,
    /// Whitespace-delimited token count
    pub word_count: usize,
    /// Content hash
    pub sha256_hash: String,
    /// Occurrence count per character
    pub character_frequency_map: BTreeMap<String, usize>,
}

/// A record as returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordResponse {
    /// Record identifier (the content hash)
    pub id: String,
    /// The analyzed string
    pub value: String,
    /// Derived properties
    pub properties: PropertiesResponse,
    /// Creation time, RFC 3339
    pub created_at: String,
}

impl From<AnalyzedRecord> for RecordResponse {
    fn from(record: AnalyzedRecord) -> Self {
        let created_at = i64::try_from(record.created_at)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_default();

        let props = record.properties;
        RecordResponse {
            id: props.content_hash.clone(),
            value: record.value,
            properties: PropertiesResponse {
                length: props.length,
                is_palindrome: props.is_palindrome,
                unique_characters: props.unique_characters,
                word_count: props.word_count,
                sha256_hash: props.content_hash,
                character_frequency_map: props
                    .character_frequency
                    .into_iter()
                    .map(|(c, n)| (c.to_string(), n))
                    .collect(),
            },
            created_at,
        }
    }
}

/// Response for the structured filter endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct FilteredResponse {
    /// Matching records
    pub data: Vec<RecordResponse>,
    /// Number of matching records
    pub count: usize,
    /// Validated filters, keyed by parameter name
    pub filters_applied: Map<String, Value>,
}

/// Echo of an interpreted natural-language query
#[derive(Debug, Serialize, Deserialize)]
pub struct InterpretedQueryResponse {
    /// Normalized query text
    pub original: String,
    /// Predicates, keyed by field and operator
    pub parsed_filters: Map<String, Value>,
}

/// Response for the natural-language filter endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct NaturalLanguageResponse {
    /// Matching records
    pub data: Vec<RecordResponse>,
    /// Number of matching records
    pub count: usize,
    /// How the query was understood
    pub interpreted_query: InterpretedQueryResponse,
}

/// Response for a successful delete
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" when the store answers
    pub status: String,
    /// Number of stored records
    pub records: usize,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Convert key/value filter pairs into a JSON object
pub fn filters_to_json(entries: Vec<(&'static str, PredicateValue)>) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                PredicateValue::Bool(b) => Value::Bool(b),
                PredicateValue::Int(n) => Value::from(n),
                PredicateValue::Text(s) => Value::String(s),
            };
            (key.to_string(), value)
        })
        .collect()
}
