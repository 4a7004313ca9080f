//! Lexis Domain Layer
//!
//! This crate contains the data model and trait interfaces for Lexis.
//! It has ZERO external dependencies and defines the fundamental concepts
//! that the analyzer, store and server crates depend upon.
//!
//! ## Key Concepts
//!
//! - **AnalyzedRecord**: one persisted string together with its derived properties
//! - **Content hash**: SHA-256 hex digest of the string, its identity and duplicate key
//! - **Predicate set**: field/operator keyed comparisons, ANDed together
//! - **RecordStore**: the storage boundary, with atomic insert-if-absent
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and evaluation logic only
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod predicate;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use predicate::{Predicate, PredicateSet, PredicateValue};
pub use record::{AnalyzedRecord, StringProperties};
pub use traits::{InsertOutcome, RecordStore};
