//! F-Pack Service Module
//!
//! Product configuration and quoting backend. Clients own F-Pack templates:
//! ordered columns pointing at products, equipment (bills of materials) or
//! selectable groups. Projects instantiate a template and record one choice
//! per group. The quote engine expands, aggregates and prices a project for
//! its client.

// Public exports
pub mod contract;
pub use contract::{client::FpackApi, error::FpackError, Quote, QuoteLine, QuoteRequest};

pub mod module;
pub use module::FpackServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

pub use config::Config;
