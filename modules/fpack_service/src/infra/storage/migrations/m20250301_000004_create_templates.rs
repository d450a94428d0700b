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
                    .table(Templates::Table)
                    .if_not_exists()
                    .col(id_column(Templates::Id))
                    .col(ColumnDef::new(Templates::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Templates::ClientId).integer().not_null())
                    .col(ColumnDef::new(Templates::Abbreviation).string_len(255))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_templates_client")
                            .from(Templates::Table, Templates::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TemplateColumns::Table)
                    .if_not_exists()
                    .col(id_column(TemplateColumns::Id))
                    .col(ColumnDef::new(TemplateColumns::TemplateId).integer().not_null())
                    .col(ColumnDef::new(TemplateColumns::Position).integer().not_null())
                    .col(ColumnDef::new(TemplateColumns::Kind).string_len(50).not_null())
                    .col(ColumnDef::new(TemplateColumns::RefId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_template_columns_template")
                            .from(TemplateColumns::Table, TemplateColumns::TemplateId)
                            .to(Templates::Table, Templates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_template_columns_position")
                    .table(TemplateColumns::Table)
                    .col(TemplateColumns::TemplateId)
                    .col(TemplateColumns::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_template_columns_ref")
                    .table(TemplateColumns::Table)
                    .col(TemplateColumns::Kind)
                    .col(TemplateColumns::RefId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TemplateColumns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Templates::Table).to_owned())
            .await
    }
}
