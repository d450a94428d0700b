//! F-Pack templates and their ordered columns

use super::{dependent_named, ensure_unreferenced, storage, Service};
use crate::contract::{
    ColumnKind, ColumnView, FpackError, ItemKind, NewColumn, NewTemplate, Template,
    TemplateColumn,
};
use crate::domain::validation::{
    duplicate_orders, validate_optional_text, validate_text, MAX_TEXT_LEN,
};
use std::collections::BTreeSet;

impl Service {
    // ===== Templates =====

    pub async fn create_template(&self, template: NewTemplate) -> Result<Template, FpackError> {
        let template = self.checked_template(template).await?;
        let created = self
            .repos
            .templates
            .create_template(&template)
            .await
            .map_err(storage)?;
        tracing::info!(template_id = created.id, client_id = created.client_id, "template created");
        Ok(created)
    }

    pub async fn get_template(&self, id: i32) -> Result<Template, FpackError> {
        self.require_template(id).await
    }

    pub async fn list_templates(&self) -> Result<Vec<Template>, FpackError> {
        self.repos.templates.list_templates().await.map_err(storage)
    }

    pub async fn update_template(
        &self,
        id: i32,
        template: NewTemplate,
    ) -> Result<Template, FpackError> {
        self.require_template(id).await?;
        let template = self.checked_template(template).await?;

        self.repos
            .templates
            .update_template(&Template {
                id,
                name: template.name,
                client_id: template.client_id,
                abbreviation: template.abbreviation,
            })
            .await
            .map_err(storage)
    }

    /// Delete a template no project instantiates; its columns go with it
    pub async fn delete_template(&self, id: i32) -> Result<(), FpackError> {
        self.require_template(id).await?;

        let projects = self
            .repos
            .projects
            .projects_by_template(id)
            .await
            .map_err(storage)?;
        ensure_unreferenced(
            "template",
            id,
            vec![dependent_named(
                "projects",
                projects.len(),
                projects.into_iter().map(|p| p.name),
            )],
        )?;

        self.repos.templates.delete_template(id).await.map_err(storage)?;
        tracing::info!(template_id = id, "template deleted");
        Ok(())
    }

    /// Copy a template and all of its columns in one transaction.
    /// Selections are not copied.
    pub async fn duplicate_template(&self, id: i32) -> Result<Template, FpackError> {
        let original = self.require_template(id).await?;
        let copy = self
            .repos
            .templates
            .duplicate_template(id, &self.copy_name(&original.name))
            .await
            .map_err(storage)?;

        tracing::info!(template_id = id, copy_id = copy.id, "template duplicated");
        Ok(copy)
    }

    async fn checked_template(&self, template: NewTemplate) -> Result<NewTemplate, FpackError> {
        self.require_client(template.client_id).await?;
        Ok(NewTemplate {
            name: validate_text("name", &template.name, MAX_TEXT_LEN)?,
            client_id: template.client_id,
            abbreviation: validate_optional_text(
                "abbreviation",
                template.abbreviation.as_deref(),
                MAX_TEXT_LEN,
            )?,
        })
    }

    // ===== Columns =====

    /// Columns of a template in ascending order
    pub async fn list_columns(&self, template_id: i32) -> Result<Vec<TemplateColumn>, FpackError> {
        self.require_template(template_id).await?;
        self.repos
            .templates
            .list_columns(template_id)
            .await
            .map_err(storage)
    }

    pub async fn get_column(&self, id: i32) -> Result<TemplateColumn, FpackError> {
        self.repos
            .templates
            .find_column(id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("template column", id))
    }

    /// Add one column; its order must be free within the template
    pub async fn add_column(
        &self,
        template_id: i32,
        order: i32,
        kind: ColumnKind,
        ref_id: i32,
    ) -> Result<TemplateColumn, FpackError> {
        self.require_template(template_id).await?;
        self.ensure_order_free(template_id, order, None).await?;
        self.ensure_column_target(kind, ref_id).await?;

        self.repos
            .templates
            .insert_column(&NewColumn {
                template_id,
                order,
                kind,
                ref_id,
            })
            .await
            .map_err(storage)
    }

    /// Add several columns at once. Orders must be unique within the batch
    /// and unused by the template.
    pub async fn add_columns(
        &self,
        template_id: i32,
        columns: Vec<NewColumn>,
    ) -> Result<Vec<TemplateColumn>, FpackError> {
        self.require_template(template_id).await?;
        if columns.is_empty() {
            return Ok(Vec::new());
        }

        let existing = self
            .repos
            .templates
            .list_columns(template_id)
            .await
            .map_err(storage)?;
        let taken: BTreeSet<i32> = existing.iter().map(|c| c.order).collect();

        let mut clashing: BTreeSet<i32> =
            duplicate_orders(columns.iter().map(|c| c.order)).into_iter().collect();
        clashing.extend(columns.iter().map(|c| c.order).filter(|o| taken.contains(o)));
        if !clashing.is_empty() {
            return Err(FpackError::Conflict {
                reason: format!(
                    "orders already used in template {}: {}",
                    template_id,
                    join_orders(&clashing)
                ),
            });
        }

        for column in &columns {
            self.ensure_column_target(column.kind, column.ref_id).await?;
        }

        let columns: Vec<NewColumn> = columns
            .into_iter()
            .map(|c| NewColumn { template_id, ..c })
            .collect();
        let created = self
            .repos
            .templates
            .insert_columns(&columns)
            .await
            .map_err(storage)?;
        tracing::debug!(template_id, count = created.len(), "columns added");
        Ok(created)
    }

    /// Change a column's order or target
    pub async fn update_column(
        &self,
        id: i32,
        order: i32,
        kind: ColumnKind,
        ref_id: i32,
    ) -> Result<TemplateColumn, FpackError> {
        let column = self.get_column(id).await?;
        if column.order != order {
            self.ensure_order_free(column.template_id, order, Some(id)).await?;
        }
        self.ensure_column_target(kind, ref_id).await?;

        self.repos
            .templates
            .update_column(&TemplateColumn {
                order,
                kind,
                ref_id,
                ..column
            })
            .await
            .map_err(storage)
    }

    pub async fn delete_column(&self, id: i32) -> Result<(), FpackError> {
        self.get_column(id).await?;
        self.repos.templates.delete_column(id).await.map_err(storage)
    }

    /// Apply new orders to every column of a template at once.
    ///
    /// `orders` holds `(column_id, order)` pairs and must name each column of
    /// the template exactly once.
    pub async fn reorder_columns(
        &self,
        template_id: i32,
        orders: Vec<(i32, i32)>,
    ) -> Result<Vec<TemplateColumn>, FpackError> {
        self.require_template(template_id).await?;

        let current: BTreeSet<i32> = self
            .repos
            .templates
            .list_columns(template_id)
            .await
            .map_err(storage)?
            .into_iter()
            .map(|c| c.id)
            .collect();
        let requested: BTreeSet<i32> = orders.iter().map(|(id, _)| *id).collect();
        if requested.len() != orders.len() || requested != current {
            return Err(FpackError::Validation {
                message: format!(
                    "reorder must list each column of template {} exactly once",
                    template_id
                ),
            });
        }

        let duplicates = duplicate_orders(orders.iter().map(|(_, order)| *order));
        if !duplicates.is_empty() {
            return Err(FpackError::Conflict {
                reason: format!(
                    "orders repeated in reorder: {}",
                    join_orders(&duplicates)
                ),
            });
        }

        self.repos
            .templates
            .reorder_columns(template_id, &orders)
            .await
            .map_err(storage)?;
        tracing::debug!(template_id, columns = orders.len(), "columns reordered");

        self.repos
            .templates
            .list_columns(template_id)
            .await
            .map_err(storage)
    }

    /// Remove every column of a template, returning how many were removed
    pub async fn clear_columns(&self, template_id: i32) -> Result<u64, FpackError> {
        self.require_template(template_id).await?;
        let removed = self
            .repos
            .templates
            .clear_columns(template_id)
            .await
            .map_err(storage)?;
        tracing::info!(template_id, removed, "template columns cleared");
        Ok(removed)
    }

    /// Columns in order with display names; group columns list their items
    pub async fn column_views(&self, template_id: i32) -> Result<Vec<ColumnView>, FpackError> {
        let columns = self.list_columns(template_id).await?;

        let mut views = Vec::with_capacity(columns.len());
        for column in columns {
            let (display_name, group_items) = match column.kind {
                ColumnKind::Product => (
                    self.item_label(ItemKind::Product, column.ref_id).await?,
                    Vec::new(),
                ),
                ColumnKind::Equipment => (
                    self.item_label(ItemKind::Equipment, column.ref_id).await?,
                    Vec::new(),
                ),
                ColumnKind::Group => {
                    match self
                        .repos
                        .groups
                        .find_group(column.ref_id)
                        .await
                        .map_err(storage)?
                    {
                        Some(group) => (group.name, self.labelled_items(group.id).await?),
                        None => (format!("{} {}", ColumnKind::Group, column.ref_id), Vec::new()),
                    }
                }
            };
            views.push(ColumnView {
                column,
                display_name,
                group_items,
            });
        }
        Ok(views)
    }

    async fn ensure_order_free(
        &self,
        template_id: i32,
        order: i32,
        except: Option<i32>,
    ) -> Result<(), FpackError> {
        let clash = self
            .repos
            .templates
            .find_column_by_order(template_id, order)
            .await
            .map_err(storage)?;

        match clash {
            Some(column) if Some(column.id) != except => Err(FpackError::Conflict {
                reason: format!(
                    "order {} is already used by column {} ({} {}) in template {}",
                    order, column.id, column.kind, column.ref_id, template_id
                ),
            }),
            _ => Ok(()),
        }
    }
}

fn join_orders<'a>(orders: impl IntoIterator<Item = &'a i32>) -> String {
    orders
        .into_iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
