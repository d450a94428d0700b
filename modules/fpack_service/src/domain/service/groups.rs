//! Selectable groups and their items

use super::{dependent_named, ensure_unreferenced, storage, Service};
use crate::contract::{
    ColumnKind, FpackError, Group, GroupItem, GroupItemView, ItemKind, ItemStatus, NewGroupItem,
};
use crate::domain::validation::{validate_text, MAX_TEXT_LEN};

impl Service {
    pub async fn create_group(&self, name: &str) -> Result<Group, FpackError> {
        let name = validate_text("name", name, MAX_TEXT_LEN)?;
        self.repos.groups.create_group(&name).await.map_err(storage)
    }

    pub async fn get_group(&self, id: i32) -> Result<Group, FpackError> {
        self.require_group(id).await
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, FpackError> {
        self.repos.groups.list_groups().await.map_err(storage)
    }

    pub async fn rename_group(&self, id: i32, name: &str) -> Result<Group, FpackError> {
        let mut group = self.require_group(id).await?;
        group.name = validate_text("name", name, MAX_TEXT_LEN)?;
        self.repos.groups.rename_group(&group).await.map_err(storage)
    }

    /// Delete a group no template column or project selection uses.
    /// Its items go with it.
    pub async fn delete_group(&self, id: i32) -> Result<(), FpackError> {
        self.require_group(id).await?;

        let columns = self
            .repos
            .templates
            .columns_referencing(ColumnKind::Group, id)
            .await
            .map_err(storage)?;
        let selections = self
            .repos
            .projects
            .selections_for_group(id)
            .await
            .map_err(storage)?;

        let mut project_names = Vec::with_capacity(selections.len());
        for selection in &selections {
            if let Some(project) = self
                .repos
                .projects
                .find_project(selection.project_id)
                .await
                .map_err(storage)?
            {
                project_names.push(project.name);
            }
        }

        ensure_unreferenced(
            "group",
            id,
            vec![
                self.template_dependent(&columns).await?,
                dependent_named("selections", selections.len(), project_names),
            ],
        )?;

        self.repos.groups.delete_group(id).await.map_err(storage)
    }

    /// Offer a catalog item in a group
    pub async fn add_group_item(
        &self,
        group_id: i32,
        kind: ItemKind,
        ref_id: i32,
        status: ItemStatus,
    ) -> Result<GroupItem, FpackError> {
        self.require_group(group_id).await?;
        self.ensure_item(kind, ref_id).await?;

        let existing = self
            .repos
            .groups
            .list_items(group_id)
            .await
            .map_err(storage)?;
        if existing.iter().any(|i| i.kind == kind && i.ref_id == ref_id) {
            return Err(FpackError::Conflict {
                reason: format!("group {} already offers {} {}", group_id, kind, ref_id),
            });
        }

        let item = self
            .repos
            .groups
            .add_item(&NewGroupItem {
                group_id,
                kind,
                ref_id,
                status,
            })
            .await
            .map_err(storage)?;
        tracing::debug!(group_id, item_id = item.id, %kind, ref_id, "group item added");
        Ok(item)
    }

    /// Items of a group with their display labels
    pub async fn group_items(&self, group_id: i32) -> Result<Vec<GroupItemView>, FpackError> {
        self.require_group(group_id).await?;
        self.labelled_items(group_id).await
    }

    pub async fn remove_group_item(&self, group_id: i32, item_id: i32) -> Result<(), FpackError> {
        self.group_item(group_id, item_id).await?;
        self.repos.groups.remove_item(item_id).await.map_err(storage)
    }

    pub(super) async fn labelled_items(
        &self,
        group_id: i32,
    ) -> Result<Vec<GroupItemView>, FpackError> {
        let items = self
            .repos
            .groups
            .list_items(group_id)
            .await
            .map_err(storage)?;

        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let label = self.item_label(item.kind, item.ref_id).await?;
            views.push(GroupItemView { item, label });
        }
        Ok(views)
    }

    async fn group_item(&self, group_id: i32, item_id: i32) -> Result<GroupItem, FpackError> {
        self.repos
            .groups
            .find_item(item_id)
            .await
            .map_err(storage)?
            .filter(|i| i.group_id == group_id)
            .ok_or_else(|| FpackError::not_found("group item", item_id))
    }
}
