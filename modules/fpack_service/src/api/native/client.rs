//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    ColumnView, FpackApi, FpackError, GlobalQuote, Project, Quote, Selection, Template,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Used by exporters running in the same process; no HTTP round trip.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl FpackApi for NativeClient {
    async fn quote_project(&self, project_id: i32) -> Result<Quote, FpackError> {
        self.service.quote_project(project_id).await
    }

    async fn quote_template(&self, template_id: i32, client_id: i32) -> Result<Quote, FpackError> {
        self.service.quote_template(template_id, client_id).await
    }

    async fn quote_global_project(&self, global_id: i32) -> Result<GlobalQuote, FpackError> {
        self.service.quote_global_project(global_id).await
    }

    async fn get_template(&self, template_id: i32) -> Result<Template, FpackError> {
        self.service.get_template(template_id).await
    }

    async fn template_columns(&self, template_id: i32) -> Result<Vec<ColumnView>, FpackError> {
        self.service.column_views(template_id).await
    }

    async fn get_project(&self, project_id: i32) -> Result<Project, FpackError> {
        self.service.get_project(project_id).await
    }

    async fn list_selections(&self, project_id: i32) -> Result<Vec<Selection>, FpackError> {
        self.service.list_selections(project_id).await
    }
}
