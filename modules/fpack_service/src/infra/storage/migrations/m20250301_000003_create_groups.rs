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
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(id_column(Groups::Id))
                    .col(ColumnDef::new(Groups::Name).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupItems::Table)
                    .if_not_exists()
                    .col(id_column(GroupItems::Id))
                    .col(ColumnDef::new(GroupItems::GroupId).integer().not_null())
                    .col(ColumnDef::new(GroupItems::Kind).string_len(50).not_null())
                    .col(ColumnDef::new(GroupItems::RefId).integer().not_null())
                    .col(
                        ColumnDef::new(GroupItems::Status)
                            .string_len(20)
                            .not_null()
                            .default("optionnel"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_items_group")
                            .from(GroupItems::Table, GroupItems::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_items_ref")
                    .table(GroupItems::Table)
                    .col(GroupItems::Kind)
                    .col(GroupItems::RefId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await
    }
}
