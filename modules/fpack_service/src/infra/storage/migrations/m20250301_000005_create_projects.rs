use super::*;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GlobalProjects::Table)
                    .if_not_exists()
                    .col(id_column(GlobalProjects::Id))
                    .col(ColumnDef::new(GlobalProjects::Name).string_len(255).not_null())
                    .col(ColumnDef::new(GlobalProjects::SubProject).string_len(255))
                    .col(ColumnDef::new(GlobalProjects::ClientId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_global_projects_client")
                            .from(GlobalProjects::Table, GlobalProjects::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(id_column(Projects::Id))
                    .col(ColumnDef::new(Projects::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Projects::TemplateId).integer().not_null())
                    .col(ColumnDef::new(Projects::ClientId).integer().not_null())
                    .col(ColumnDef::new(Projects::GlobalId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_template")
                            .from(Projects::Table, Projects::TemplateId)
                            .to(Templates::Table, Templates::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_client")
                            .from(Projects::Table, Projects::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_global")
                            .from(Projects::Table, Projects::GlobalId)
                            .to(GlobalProjects::Table, GlobalProjects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_global_id")
                    .table(Projects::Table)
                    .col(Projects::GlobalId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectSelections::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProjectSelections::ProjectId).integer().not_null())
                    .col(ColumnDef::new(ProjectSelections::GroupId).integer().not_null())
                    .col(ColumnDef::new(ProjectSelections::Kind).string_len(50).not_null())
                    .col(ColumnDef::new(ProjectSelections::RefId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ProjectSelections::ProjectId)
                            .col(ProjectSelections::GroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_selections_project")
                            .from(ProjectSelections::Table, ProjectSelections::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_selections_group")
                            .from(ProjectSelections::Table, ProjectSelections::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectSelections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GlobalProjects::Table).to_owned())
            .await
    }
}
