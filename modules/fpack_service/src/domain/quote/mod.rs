//! Quote resolution engine
//!
//! Walks a template's ordered columns, expands equipment into products,
//! resolves group selections, sums quantities per distinct item and prices
//! the result for one client. Reads only; never writes.

pub mod aggregate;
pub mod engine;
pub mod expansion;
pub mod selection;
pub mod source;

pub use engine::QuoteEngine;
pub use source::{ColumnRef, ItemRef, QuoteSource, RepositoryQuoteSource};
