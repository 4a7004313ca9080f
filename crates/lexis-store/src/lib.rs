//! Lexis Storage Layer
//!
//! Implements the RecordStore trait using SQLite, plus an in-memory store
//! for tests and ephemeral deployments.
//!
//! # Architecture
//!
//! - One table, `analyzed_strings`, with a UNIQUE constraint on `content_hash`
//! - Insert-if-absent is a single `INSERT ... ON CONFLICT DO NOTHING`
//! - Case-insensitive containment uses a registered deterministic SQL function
//!
//! # Examples
//!
//! ```no_run
//! use lexis_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

pub mod memory;

pub use memory::MemoryStore;

use lexis_domain::{
    AnalyzedRecord, InsertOutcome, Predicate, PredicateSet, RecordStore, StringProperties,
};
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Frequency map (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

const SELECT_COLUMNS: &str = "SELECT value, length, is_palindrome, unique_characters, word_count,
        content_hash, character_frequency, created_at
     FROM analyzed_strings";

/// SQLite-based implementation of RecordStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a SqliteStore across tasks
/// behind a mutex.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use lexis_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("lexis.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        store.register_functions()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Register `contains_ci(haystack, needle)`
    ///
    /// SQLite's built-in `lower()` only folds ASCII, so containment is
    /// evaluated with Rust's Unicode lowercasing instead.
    fn register_functions(&self) -> Result<(), StoreError> {
        self.conn.create_scalar_function(
            "contains_ci",
            2,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let haystack: String = ctx.get(0)?;
                let needle: String = ctx.get(1)?;
                Ok(haystack.to_lowercase().contains(&needle.to_lowercase()))
            },
        )?;
        Ok(())
    }

    /// Convert a count to an SQL integer, saturating at i64::MAX
    fn to_sql_int(n: usize) -> i64 {
        i64::try_from(n).unwrap_or(i64::MAX)
    }

    /// Encode the frequency map as a JSON object keyed by character
    fn frequency_to_json(frequency: &BTreeMap<char, usize>) -> Result<String, StoreError> {
        let keyed: BTreeMap<String, usize> = frequency
            .iter()
            .map(|(c, n)| (c.to_string(), *n))
            .collect();
        Ok(serde_json::to_string(&keyed)?)
    }

    /// Decode a JSON frequency map
    fn json_to_frequency(json: &str) -> Result<BTreeMap<char, usize>, StoreError> {
        let keyed: BTreeMap<String, usize> = serde_json::from_str(json)?;
        keyed
            .into_iter()
            .map(|(key, n)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok((c, n)),
                    _ => Err(StoreError::InvalidData(format!(
                        "Frequency key must be one character, got {:?}",
                        key
                    ))),
                }
            })
            .collect()
    }

    /// Read a non-negative integer column as usize
    fn count_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<usize> {
        let n: i64 = row.get(idx)?;
        usize::try_from(n).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Integer, Box::new(e))
        })
    }

    /// Read a non-negative epoch-millisecond column
    fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
        let n: i64 = row.get(idx)?;
        u64::try_from(n).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Integer, Box::new(e))
        })
    }

    /// Map a row selected with SELECT_COLUMNS to a record
    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<AnalyzedRecord> {
        let frequency_json: String = row.get(6)?;
        let character_frequency = Self::json_to_frequency(&frequency_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(AnalyzedRecord {
            value: row.get(0)?,
            properties: StringProperties {
                length: Self::count_column(row, 1)?,
                is_palindrome: row.get(2)?,
                unique_characters: Self::count_column(row, 3)?,
                word_count: Self::count_column(row, 4)?,
                content_hash: row.get(5)?,
                character_frequency,
            },
            created_at: Self::timestamp_column(row, 7)?,
        })
    }

    /// SQL condition for one predicate, with a single positional parameter
    fn predicate_clause(predicate: &Predicate) -> &'static str {
        match predicate {
            Predicate::IsPalindrome(_) => "is_palindrome = ?",
            Predicate::MinLength(_) => "length >= ?",
            Predicate::MaxLength(_) => "length <= ?",
            Predicate::LongerThan(_) => "length > ?",
            Predicate::ShorterThan(_) => "length < ?",
            Predicate::WordCount(_) => "word_count = ?",
            Predicate::MoreWordsThan(_) => "word_count > ?",
            Predicate::Contains(_) => "contains_ci(value, ?)",
        }
    }

    /// Bound parameter for one predicate
    fn predicate_param(predicate: &Predicate) -> Box<dyn rusqlite::ToSql> {
        match predicate {
            Predicate::IsPalindrome(b) => Box::new(*b),
            Predicate::MinLength(n)
            | Predicate::MaxLength(n)
            | Predicate::LongerThan(n)
            | Predicate::ShorterThan(n)
            | Predicate::WordCount(n)
            | Predicate::MoreWordsThan(n) => Box::new(Self::to_sql_int(*n)),
            Predicate::Contains(s) => Box::new(s.clone()),
        }
    }
}

impl RecordStore for SqliteStore {
    type Error = StoreError;

    fn insert_if_absent(&mut self, record: AnalyzedRecord) -> Result<InsertOutcome, Self::Error> {
        let props = &record.properties;
        let frequency_json = Self::frequency_to_json(&props.character_frequency)?;

        // The UNIQUE constraint decides; no read-then-write window
        let inserted = self.conn.execute(
            "INSERT INTO analyzed_strings (value, length, is_palindrome, unique_characters,
                word_count, content_hash, character_frequency, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(content_hash) DO NOTHING",
            params![
                &record.value,
                Self::to_sql_int(props.length),
                props.is_palindrome,
                Self::to_sql_int(props.unique_characters),
                Self::to_sql_int(props.word_count),
                &props.content_hash,
                &frequency_json,
                i64::try_from(record.created_at).unwrap_or(i64::MAX),
            ],
        )?;

        if inserted == 0 {
            debug!("Record {} already exists", props.content_hash);
            Ok(InsertOutcome::AlreadyExists)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }

    fn get_by_value(&self, value: &str) -> Result<Option<AnalyzedRecord>, Self::Error> {
        let sql = format!("{} WHERE value = ?1", SELECT_COLUMNS);
        let record = self
            .conn
            .query_row(&sql, params![value], Self::row_to_record)
            .optional()?;
        Ok(record)
    }

    fn filter(&self, predicates: &PredicateSet) -> Result<Vec<AnalyzedRecord>, Self::Error> {
        let mut sql = format!("{} WHERE 1=1", SELECT_COLUMNS);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        for predicate in predicates.iter() {
            sql.push_str(" AND ");
            sql.push_str(Self::predicate_clause(predicate));
            params.push(Self::predicate_param(predicate));
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let records = stmt
            .query_map(&param_refs[..], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn delete_by_value(&mut self, value: &str) -> Result<bool, Self::Error> {
        let deleted = self
            .conn
            .execute("DELETE FROM analyzed_strings WHERE value = ?1", params![value])?;
        Ok(deleted > 0)
    }

    fn count(&self) -> Result<usize, Self::Error> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM analyzed_strings", [], |row| row.get(0))?;
        usize::try_from(count).map_err(|_| StoreError::InvalidData(format!("Negative count: {}", count)))
    }
}
