//! Trait definitions for external interactions
//!
//! These traits define the boundary between domain logic and storage.
//! Implementations live in `lexis-store`.

use crate::{AnalyzedRecord, PredicateSet};

/// Outcome of an insert-if-absent operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was stored
    Inserted,
    /// A record with the same content hash already exists; nothing was written
    AlreadyExists,
}

/// Trait for storing and retrieving analyzed records
///
/// Implemented by the infrastructure layer (lexis-store).
///
/// Uniqueness by content hash must be enforced atomically by the
/// implementation: a concurrent duplicate insert must report
/// [`InsertOutcome::AlreadyExists`], never succeed silently.
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Store a record unless one with the same content hash exists
    fn insert_if_absent(&mut self, record: AnalyzedRecord) -> Result<InsertOutcome, Self::Error>;

    /// Get a record by exact value
    fn get_by_value(&self, value: &str) -> Result<Option<AnalyzedRecord>, Self::Error>;

    /// All records matching every predicate, in creation order
    fn filter(&self, predicates: &PredicateSet) -> Result<Vec<AnalyzedRecord>, Self::Error>;

    /// Delete a record by exact value; returns false if none existed
    fn delete_by_value(&mut self, value: &str) -> Result<bool, Self::Error>;

    /// Number of stored records
    fn count(&self) -> Result<usize, Self::Error>;

    /// All records, in creation order
    fn list_all(&self) -> Result<Vec<AnalyzedRecord>, Self::Error> {
        self.filter(&PredicateSet::new())
    }
}
