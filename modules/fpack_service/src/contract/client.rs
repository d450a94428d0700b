//! Native client trait for inter-module communication
//!
//! Exporters (spreadsheet, PDF) and other modules use this API to read
//! templates and compute quotes without going through HTTP.

use super::{
    error::FpackError,
    model::{ColumnView, Project, Selection, Template},
    quote::{GlobalQuote, Quote},
};
use async_trait::async_trait;

/// F-Pack service API for inter-module communication
#[async_trait]
pub trait FpackApi: Send + Sync {
    // ===== Quotes =====

    /// Quote a project with its own template, client and selections
    async fn quote_project(&self, project_id: i32) -> Result<Quote, FpackError>;

    /// Quote a bare template for a client; group columns contribute nothing
    async fn quote_template(&self, template_id: i32, client_id: i32) -> Result<Quote, FpackError>;

    /// Quote the member projects of a global project as one invoice
    async fn quote_global_project(&self, global_id: i32) -> Result<GlobalQuote, FpackError>;

    // ===== Templates and projects =====

    async fn get_template(&self, template_id: i32) -> Result<Template, FpackError>;

    /// Columns in template order, labelled for display
    async fn template_columns(&self, template_id: i32) -> Result<Vec<ColumnView>, FpackError>;

    async fn get_project(&self, project_id: i32) -> Result<Project, FpackError>;

    async fn list_selections(&self, project_id: i32) -> Result<Vec<Selection>, FpackError>;
}
