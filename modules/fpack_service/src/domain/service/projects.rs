//! Projects (template instances), the global projects grouping them, and
//! their group selections

use super::{dependent_named, ensure_unreferenced, storage, Service};
use crate::contract::{
    ColumnKind, FpackError, GlobalProject, GlobalProjectStats, ItemKind, ItemStatus,
    NewGlobalProject, NewProject, Project, ProjectProgress, Selection,
};
use crate::domain::validation::{validate_optional_text, validate_text, MAX_TEXT_LEN};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeSet;

impl Service {
    // ===== Global projects =====

    pub async fn create_global_project(
        &self,
        project: NewGlobalProject,
    ) -> Result<GlobalProject, FpackError> {
        self.require_client(project.client_id).await?;
        let project = checked_global(project)?;
        let created = self
            .repos
            .projects
            .create_global_project(&project)
            .await
            .map_err(storage)?;
        tracing::info!(
            global_id = created.id,
            client_id = created.client_id,
            "global project created"
        );
        Ok(created)
    }

    pub async fn get_global_project(&self, id: i32) -> Result<GlobalProject, FpackError> {
        self.repos
            .projects
            .find_global_project(id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("global_project", id))
    }

    pub async fn list_global_projects(&self) -> Result<Vec<GlobalProject>, FpackError> {
        self.repos
            .projects
            .list_global_projects()
            .await
            .map_err(storage)
    }

    /// Member projects of a global project
    pub async fn list_global_members(&self, id: i32) -> Result<Vec<Project>, FpackError> {
        self.get_global_project(id).await?;
        self.repos
            .projects
            .projects_by_global(id)
            .await
            .map_err(storage)
    }

    /// Update a global project; moving it to another client is refused while
    /// member projects belong to a different client
    pub async fn update_global_project(
        &self,
        id: i32,
        project: NewGlobalProject,
    ) -> Result<GlobalProject, FpackError> {
        let existing = self.get_global_project(id).await?;
        let project = checked_global(project)?;

        if project.client_id != existing.client_id {
            self.require_client(project.client_id).await?;
            let members = self
                .repos
                .projects
                .projects_by_global(id)
                .await
                .map_err(storage)?;
            let conflicted: Vec<String> = members
                .into_iter()
                .filter(|p| p.client_id != project.client_id)
                .map(|p| p.name)
                .collect();
            if !conflicted.is_empty() {
                return Err(FpackError::Validation {
                    message: format!(
                        "cannot change client: projects belong to another client: {}",
                        conflicted.join(", ")
                    ),
                });
            }
        }

        self.repos
            .projects
            .update_global_project(&GlobalProject {
                id,
                name: project.name,
                sub_project: project.sub_project,
                client_id: project.client_id,
            })
            .await
            .map_err(storage)
    }

    /// Delete a global project; refused while it still groups projects
    pub async fn delete_global_project(&self, id: i32) -> Result<(), FpackError> {
        self.get_global_project(id).await?;
        let members = self
            .repos
            .projects
            .projects_by_global(id)
            .await
            .map_err(storage)?;
        ensure_unreferenced(
            "global_project",
            id,
            vec![dependent_named(
                "projects",
                members.len(),
                members.into_iter().map(|p| p.name),
            )],
        )?;

        self.repos
            .projects
            .delete_global_project(id)
            .await
            .map_err(storage)?;
        tracing::info!(global_id = id, "global project deleted");
        Ok(())
    }

    /// Selection progress of every member project
    pub async fn global_project_stats(&self, id: i32) -> Result<GlobalProjectStats, FpackError> {
        let members = self.list_global_members(id).await?;

        let mut projects = Vec::with_capacity(members.len());
        for project in members {
            projects.push(self.project_progress(project).await?);
        }

        let total_groups: usize = projects.iter().map(|p| p.expected_groups).sum();
        let total_selections: usize = projects.iter().map(|p| p.selection_count).sum();
        let complete_count = projects.iter().filter(|p| p.complete).count();

        Ok(GlobalProjectStats {
            project_count: projects.len(),
            complete_count,
            in_progress_count: projects.len() - complete_count,
            total_groups,
            total_selections,
            progress_percent: percent(total_selections, total_groups),
            projects,
        })
    }

    async fn project_progress(&self, project: Project) -> Result<ProjectProgress, FpackError> {
        let columns = self
            .repos
            .templates
            .list_columns(project.template_id)
            .await
            .map_err(storage)?;
        let expected: BTreeSet<i32> = columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Group)
            .map(|c| c.ref_id)
            .collect();

        let selections = self
            .repos
            .projects
            .list_selections(project.id)
            .await
            .map_err(storage)?;
        let selection_count = selections
            .iter()
            .filter(|s| expected.contains(&s.group_id))
            .count();

        Ok(ProjectProgress {
            project_id: project.id,
            name: project.name,
            template_id: project.template_id,
            selection_count,
            expected_groups: expected.len(),
            complete: !expected.is_empty() && selection_count >= expected.len(),
            progress_percent: percent(selection_count, expected.len()),
        })
    }

    // ===== Projects =====
    // ===== Projects =====

    pub async fn create_project(&self, project: NewProject) -> Result<Project, FpackError> {
        let project = self.checked_project(project).await?;
        let created = self
            .repos
            .projects
            .create_project(&project)
            .await
            .map_err(storage)?;
        tracing::info!(
            project_id = created.id,
            template_id = created.template_id,
            "project created"
        );
        Ok(created)
    }

    pub async fn get_project(&self, id: i32) -> Result<Project, FpackError> {
        self.repos
            .projects
            .find_project(id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("project", id))
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, FpackError> {
        self.repos.projects.list_projects().await.map_err(storage)
    }

    pub async fn update_project(&self, id: i32, project: NewProject) -> Result<Project, FpackError> {
        self.get_project(id).await?;
        let project = self.checked_project(project).await?;

        self.repos
            .projects
            .update_project(&Project {
                id,
                name: project.name,
                template_id: project.template_id,
                client_id: project.client_id,
                global_id: project.global_id,
            })
            .await
            .map_err(storage)
    }

    /// Delete a project together with its selections
    pub async fn delete_project(&self, id: i32) -> Result<(), FpackError> {
        self.get_project(id).await?;
        self.repos.projects.delete_project(id).await.map_err(storage)?;
        tracing::info!(project_id = id, "project deleted");
        Ok(())
    }

    async fn checked_project(&self, project: NewProject) -> Result<NewProject, FpackError> {
        self.require_template(project.template_id).await?;
        self.require_client(project.client_id).await?;
        if let Some(global_id) = project.global_id {
            let global = self.get_global_project(global_id).await?;
            if global.client_id != project.client_id {
                return Err(FpackError::Validation {
                    message: format!(
                        "global project {} belongs to client {}, not {}",
                        global_id, global.client_id, project.client_id
                    ),
                });
            }
        }
        Ok(NewProject {
            name: validate_text("name", &project.name, MAX_TEXT_LEN)?,
            ..project
        })
    }

    // ===== Selections =====

    pub async fn list_selections(&self, project_id: i32) -> Result<Vec<Selection>, FpackError> {
        self.get_project(project_id).await?;
        self.repos
            .projects
            .list_selections(project_id)
            .await
            .map_err(storage)
    }

    /// Record the item chosen for a group; one selection per group
    pub async fn create_selection(
        &self,
        project_id: i32,
        group_id: i32,
        kind: ItemKind,
        ref_id: i32,
    ) -> Result<Selection, FpackError> {
        self.get_project(project_id).await?;
        self.require_group(group_id).await?;
        self.ensure_item(kind, ref_id).await?;

        if let Some(existing) = self
            .repos
            .projects
            .find_selection(project_id, group_id)
            .await
            .map_err(storage)?
        {
            return Err(FpackError::Conflict {
                reason: format!(
                    "project {} already selected {} {} for group {}",
                    project_id, existing.kind, existing.ref_id, group_id
                ),
            });
        }

        self.repos
            .projects
            .insert_selection(&Selection {
                project_id,
                group_id,
                kind,
                ref_id,
            })
            .await
            .map_err(storage)
    }

    pub async fn update_selection(
        &self,
        project_id: i32,
        group_id: i32,
        kind: ItemKind,
        ref_id: i32,
    ) -> Result<Selection, FpackError> {
        self.get_selection(project_id, group_id).await?;
        self.ensure_item(kind, ref_id).await?;

        self.repos
            .projects
            .update_selection(&Selection {
                project_id,
                group_id,
                kind,
                ref_id,
            })
            .await
            .map_err(storage)
    }

    pub async fn delete_selection(&self, project_id: i32, group_id: i32) -> Result<(), FpackError> {
        self.get_selection(project_id, group_id).await?;
        self.repos
            .projects
            .delete_selection(project_id, group_id)
            .await
            .map_err(storage)
    }

    /// Select the first standard item of every unselected group column.
    ///
    /// Groups without a standard item stay unselected. Returns the selections
    /// recorded by this call.
    pub async fn apply_default_selections(
        &self,
        project_id: i32,
    ) -> Result<Vec<Selection>, FpackError> {
        let project = self.get_project(project_id).await?;
        let columns = self
            .repos
            .templates
            .list_columns(project.template_id)
            .await
            .map_err(storage)?;

        let mut recorded = Vec::new();
        for column in columns.iter().filter(|c| c.kind == ColumnKind::Group) {
            let group_id = column.ref_id;
            if recorded.iter().any(|s: &Selection| s.group_id == group_id)
                || self
                    .repos
                    .projects
                    .find_selection(project_id, group_id)
                    .await
                    .map_err(storage)?
                    .is_some()
            {
                continue;
            }

            let items = self
                .repos
                .groups
                .list_items(group_id)
                .await
                .map_err(storage)?;
            let Some(standard) = items
                .iter()
                .filter(|i| i.status == ItemStatus::Standard)
                .min_by_key(|i| i.id)
            else {
                tracing::debug!(project_id, group_id, "group has no standard item");
                continue;
            };

            let selection = self
                .repos
                .projects
                .insert_selection(&Selection {
                    project_id,
                    group_id,
                    kind: standard.kind,
                    ref_id: standard.ref_id,
                })
                .await
                .map_err(storage)?;
            recorded.push(selection);
        }

        tracing::info!(project_id, recorded = recorded.len(), "default selections applied");
        Ok(recorded)
    }

    async fn get_selection(&self, project_id: i32, group_id: i32) -> Result<Selection, FpackError> {
        self.repos
            .projects
            .find_selection(project_id, group_id)
            .await
            .map_err(storage)?
            .ok_or_else(|| {
                FpackError::not_found("selection", format!("{}/{}", project_id, group_id))
            })
    }
}

fn checked_global(project: NewGlobalProject) -> Result<NewGlobalProject, FpackError> {
    Ok(NewGlobalProject {
        name: validate_text("name", &project.name, MAX_TEXT_LEN)?,
        sub_project: validate_optional_text(
            "sub_project",
            project.sub_project.as_deref(),
            MAX_TEXT_LEN,
        )?,
        client_id: project.client_id,
    })
}

/// Share of `done` in `expected` as a percentage with one decimal place
fn percent(done: usize, expected: usize) -> Decimal {
    if expected == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(done as u64) * Decimal::ONE_HUNDRED / Decimal::from(expected as u64))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
