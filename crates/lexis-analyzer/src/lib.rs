//! Lexis Analyzer
//!
//! Pure functions at the heart of Lexis:
//!
//! - [`analyze`] derives the properties of a string
//! - [`build_structured_filter`] validates query parameters into a predicate set
//! - [`interpret`] pattern-matches a free-text query into a predicate set
//!
//! Nothing here touches storage; callers hand the resulting predicates to a
//! [`lexis_domain::RecordStore`].

#![warn(missing_docs)]

pub mod analysis;
pub mod error;
pub mod filter;
pub mod interpreter;

pub use analysis::{analyze, content_hash};
pub use error::{AnalyzeError, QueryError};
pub use filter::{build_structured_filter, StructuredFilter};
pub use interpreter::{interpret, InterpretedQuery};
