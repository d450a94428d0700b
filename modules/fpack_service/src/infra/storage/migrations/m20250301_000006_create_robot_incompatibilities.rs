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
                    .table(RobotIncompatibilities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RobotIncompatibilities::RobotId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RobotIncompatibilities::ProductId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RobotIncompatibilities::RobotId)
                            .col(RobotIncompatibilities::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_robot_incompatibilities_robot")
                            .from(RobotIncompatibilities::Table, RobotIncompatibilities::RobotId)
                            .to(Robots::Table, Robots::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_robot_incompatibilities_product")
                            .from(
                                RobotIncompatibilities::Table,
                                RobotIncompatibilities::ProductId,
                            )
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_robot_incompatibilities_product_id")
                    .table(RobotIncompatibilities::Table)
                    .col(RobotIncompatibilities::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RobotIncompatibilities::Table).to_owned())
            .await
    }
}
