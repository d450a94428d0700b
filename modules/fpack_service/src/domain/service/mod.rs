//! Domain service - business logic orchestration
//!
//! One `Service` owns every repository; its operations are split by concern
//! across the submodules.

mod catalog;
mod groups;
mod pricing;
mod projects;
mod quotes;
mod robot_incompatibilities;
mod templates;

use crate::config::Config;
use crate::contract::{
    Client, ColumnKind, Dependent, FpackError, Group, ItemKind, Product, Template,
};
use crate::domain::quote::{QuoteEngine, QuoteSource, RepositoryQuoteSource};
use crate::domain::repository::Repositories;

/// Domain service for catalog, template authoring and quoting
pub struct Service {
    repos: Repositories,
    source: RepositoryQuoteSource,
    engine: QuoteEngine,
    copy_suffix: String,
    validate_references: bool,
}

impl Service {
    /// Create a new service instance
    pub fn new(repos: Repositories, config: &Config) -> Self {
        Self {
            source: RepositoryQuoteSource::new(repos.clone()),
            repos,
            engine: QuoteEngine::new(config.price_scale),
            copy_suffix: config.copy_suffix.clone(),
            validate_references: config.validate_references,
        }
    }

    // ===== Helper Methods =====

    async fn require_client(&self, id: i32) -> Result<Client, FpackError> {
        self.repos
            .catalog
            .find_client(id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("client", id))
    }

    async fn require_product(&self, id: i32) -> Result<Product, FpackError> {
        self.repos
            .catalog
            .find_product(id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("product", id))
    }

    async fn require_group(&self, id: i32) -> Result<Group, FpackError> {
        self.repos
            .groups
            .find_group(id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("group", id))
    }

    async fn require_template(&self, id: i32) -> Result<Template, FpackError> {
        self.repos
            .templates
            .find_template(id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("template", id))
    }

    /// Check that a referenced catalog item exists, unless reference
    /// validation is switched off
    async fn ensure_item(&self, kind: ItemKind, ref_id: i32) -> Result<(), FpackError> {
        if !self.validate_references {
            return Ok(());
        }
        match self.source.item_name(kind, ref_id).await.map_err(storage)? {
            Some(_) => Ok(()),
            None => Err(FpackError::not_found(item_resource(kind), ref_id)),
        }
    }

    /// Same as [`Self::ensure_item`] for a column target
    async fn ensure_column_target(&self, kind: ColumnKind, ref_id: i32) -> Result<(), FpackError> {
        match kind {
            ColumnKind::Product => self.ensure_item(ItemKind::Product, ref_id).await,
            ColumnKind::Equipment => self.ensure_item(ItemKind::Equipment, ref_id).await,
            ColumnKind::Group if self.validate_references => {
                self.require_group(ref_id).await.map(|_| ())
            }
            ColumnKind::Group => Ok(()),
        }
    }

    /// Display label of a catalog item
    async fn item_label(&self, kind: ItemKind, ref_id: i32) -> Result<String, FpackError> {
        self.source
            .display_name(kind, ref_id)
            .await
            .map_err(storage)
    }

    fn copy_name(&self, name: &str) -> String {
        format!("{}{}", name, self.copy_suffix)
    }
}

fn item_resource(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Product => "product",
        ItemKind::Equipment => "equipment",
        ItemKind::Robot => "robot",
    }
}

/// Log a storage failure and hide its details from callers
fn storage(error: anyhow::Error) -> FpackError {
    tracing::error!(error = ?error, "storage operation failed");
    FpackError::Internal
}

/// Fail a deletion when any dependent relation is non-empty
fn ensure_unreferenced(
    resource: &str,
    id: i32,
    dependents: Vec<Dependent>,
) -> Result<(), FpackError> {
    let dependents: Vec<Dependent> = dependents.into_iter().filter(|d| d.count > 0).collect();
    if dependents.is_empty() {
        return Ok(());
    }

    tracing::info!(resource, id, blocked_by = dependents.len(), "deletion blocked");
    Err(FpackError::DependentsExist {
        resource: resource.to_string(),
        id: id.to_string(),
        dependents,
    })
}

/// Dependent entry listing the distinct names of the referencing rows
fn dependent_named<I>(relation: &str, count: usize, names: I) -> Dependent
where
    I: IntoIterator<Item = String>,
{
    let mut names: Vec<String> = names.into_iter().collect();
    names.sort();
    names.dedup();
    Dependent::new(relation, count, names)
}
