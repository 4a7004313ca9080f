//! In-memory RecordStore
//!
//! Records live in a Vec in creation order. Predicates are evaluated with
//! [`PredicateSet::matches`]. Nothing is persisted.

use crate::StoreError;
use lexis_domain::{AnalyzedRecord, InsertOutcome, PredicateSet, RecordStore};

/// Vec-backed implementation of RecordStore
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<AnalyzedRecord>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    type Error = StoreError;

    fn insert_if_absent(&mut self, record: AnalyzedRecord) -> Result<InsertOutcome, Self::Error> {
        // &mut self makes the check and the push a single step
        if self.records.iter().any(|r| r.id() == record.id()) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        self.records.push(record);
        Ok(InsertOutcome::Inserted)
    }

    fn get_by_value(&self, value: &str) -> Result<Option<AnalyzedRecord>, Self::Error> {
        Ok(self.records.iter().find(|r| r.value == value).cloned())
    }

    fn filter(&self, predicates: &PredicateSet) -> Result<Vec<AnalyzedRecord>, Self::Error> {
        Ok(self
            .records
            .iter()
            .filter(|r| predicates.matches(r))
            .cloned()
            .collect())
    }

    fn delete_by_value(&mut self, value: &str) -> Result<bool, Self::Error> {
        let before = self.records.len();
        self.records.retain(|r| r.value != value);
        Ok(self.records.len() < before)
    }

    fn count(&self) -> Result<usize, Self::Error> {
        Ok(self.records.len())
    }
}
