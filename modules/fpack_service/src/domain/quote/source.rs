//! Read contract of the quote engine
//!
//! The engine never touches storage directly; it reads through [`QuoteSource`].
//! [`RepositoryQuoteSource`] adapts the domain repositories to it.

use crate::contract::{ColumnKind, ItemKind, ItemStatus, Selection, UnitPrice};
use crate::domain::repository::Repositories;
use anyhow::Result;
use async_trait::async_trait;

/// Column as seen by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub kind: ColumnKind,
    pub ref_id: i32,
}

/// Group item as seen by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub ref_id: i32,
    pub status: ItemStatus,
}

/// Everything the engine reads while resolving one quote
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn template_exists(&self, template_id: i32) -> Result<bool>;

    async fn client_exists(&self, client_id: i32) -> Result<bool>;

    async fn equipment_exists(&self, equipment_id: i32) -> Result<bool>;

    async fn group_exists(&self, group_id: i32) -> Result<bool>;

    /// Columns in template order
    async fn template_columns(&self, template_id: i32) -> Result<Vec<ColumnRef>>;

    /// `(product_id, quantity)` rows of an equipment
    async fn equipment_composition(&self, equipment_id: i32) -> Result<Vec<(i32, u32)>>;

    async fn group_items(&self, group_id: i32) -> Result<Vec<ItemRef>>;

    async fn selection(&self, instance_id: i32, group_id: i32) -> Result<Option<Selection>>;

    async fn product_price(&self, product_id: i32, client_id: i32) -> Result<Option<UnitPrice>>;

    async fn robot_price(&self, robot_id: i32) -> Result<Option<UnitPrice>>;

    /// Label of a catalog item, `None` when the row does not exist
    async fn item_name(&self, kind: ItemKind, ref_id: i32) -> Result<Option<String>>;

    /// Label of a catalog item, falling back to `"{kind} {ref_id}"`
    async fn display_name(&self, kind: ItemKind, ref_id: i32) -> Result<String> {
        Ok(self
            .item_name(kind, ref_id)
            .await?
            .unwrap_or_else(|| format!("{} {}", kind, ref_id)))
    }
}

/// [`QuoteSource`] backed by the domain repositories
#[derive(Clone)]
pub struct RepositoryQuoteSource {
    repos: Repositories,
}

impl RepositoryQuoteSource {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl QuoteSource for RepositoryQuoteSource {
    async fn template_exists(&self, template_id: i32) -> Result<bool> {
        Ok(self.repos.templates.find_template(template_id).await?.is_some())
    }

    async fn client_exists(&self, client_id: i32) -> Result<bool> {
        Ok(self.repos.catalog.find_client(client_id).await?.is_some())
    }

    async fn equipment_exists(&self, equipment_id: i32) -> Result<bool> {
        Ok(self.repos.catalog.find_equipment(equipment_id).await?.is_some())
    }

    async fn group_exists(&self, group_id: i32) -> Result<bool> {
        Ok(self.repos.groups.find_group(group_id).await?.is_some())
    }

    async fn template_columns(&self, template_id: i32) -> Result<Vec<ColumnRef>> {
        let columns = self.repos.templates.list_columns(template_id).await?;
        Ok(columns
            .into_iter()
            .map(|c| ColumnRef {
                kind: c.kind,
                ref_id: c.ref_id,
            })
            .collect())
    }

    async fn equipment_composition(&self, equipment_id: i32) -> Result<Vec<(i32, u32)>> {
        let rows = self.repos.catalog.composition(equipment_id).await?;
        Ok(rows.into_iter().map(|r| (r.product_id, r.quantity)).collect())
    }

    async fn group_items(&self, group_id: i32) -> Result<Vec<ItemRef>> {
        let items = self.repos.groups.list_items(group_id).await?;
        Ok(items
            .into_iter()
            .map(|i| ItemRef {
                kind: i.kind,
                ref_id: i.ref_id,
                status: i.status,
            })
            .collect())
    }

    async fn selection(&self, instance_id: i32, group_id: i32) -> Result<Option<Selection>> {
        self.repos.projects.find_selection(instance_id, group_id).await
    }

    async fn product_price(&self, product_id: i32, client_id: i32) -> Result<Option<UnitPrice>> {
        Ok(self
            .repos
            .prices
            .find_price(product_id, client_id)
            .await?
            .map(UnitPrice::from))
    }

    async fn robot_price(&self, robot_id: i32) -> Result<Option<UnitPrice>> {
        Ok(self
            .repos
            .prices
            .find_robot_price(robot_id)
            .await?
            .map(UnitPrice::from))
    }

    async fn item_name(&self, kind: ItemKind, ref_id: i32) -> Result<Option<String>> {
        let name = match kind {
            ItemKind::Product => self
                .repos
                .catalog
                .find_product(ref_id)
                .await?
                .map(|p| p.name),
            ItemKind::Equipment => self
                .repos
                .catalog
                .find_equipment(ref_id)
                .await?
                .map(|e| e.name),
            ItemKind::Robot => self
                .repos
                .catalog
                .find_robot(ref_id)
                .await?
                .map(|r| format!("{} ({})", r.name, r.reference)),
        };
        Ok(name)
    }
}
