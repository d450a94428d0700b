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
                    .table(Prices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Prices::ProductId).integer().not_null())
                    .col(ColumnDef::new(Prices::ClientId).integer().not_null())
                    .col(amount_column(Prices::UnitPrice))
                    .col(amount_column(Prices::UnitTransport))
                    .col(ColumnDef::new(Prices::Comment).string_len(255))
                    .primary_key(
                        Index::create()
                            .col(Prices::ProductId)
                            .col(Prices::ClientId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prices_product")
                            .from(Prices::Table, Prices::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prices_client")
                            .from(Prices::Table, Prices::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_prices_client_id")
                    .table(Prices::Table)
                    .col(Prices::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RobotPrices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RobotPrices::RobotId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RobotPrices::Reference).string_len(255).not_null())
                    .col(amount_column(RobotPrices::UnitPrice))
                    .col(amount_column(RobotPrices::UnitTransport))
                    .col(ColumnDef::new(RobotPrices::Comment).string_len(255))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_robot_prices_robot")
                            .from(RobotPrices::Table, RobotPrices::RobotId)
                            .to(Robots::Table, Robots::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RobotPrices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Prices::Table).to_owned())
            .await
    }
}
