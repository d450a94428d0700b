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
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(id_column(Suppliers::Id))
                    .col(
                        ColumnDef::new(Suppliers::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(id_column(Clients::Id))
                    .col(ColumnDef::new(Clients::Name).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(id_column(Products::Id))
                    .col(ColumnDef::new(Products::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Products::Reference).string_len(60).not_null())
                    .col(ColumnDef::new(Products::SupplierId).integer().not_null())
                    .col(ColumnDef::new(Products::Kind).string_len(255))
                    .col(ColumnDef::new(Products::Description).string_len(255))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_supplier")
                            .from(Products::Table, Products::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(id_column(Equipment::Id))
                    .col(ColumnDef::new(Equipment::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Equipment::Reference).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EquipmentProducts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EquipmentProducts::EquipmentId).integer().not_null())
                    .col(ColumnDef::new(EquipmentProducts::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(EquipmentProducts::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .primary_key(
                        Index::create()
                            .col(EquipmentProducts::EquipmentId)
                            .col(EquipmentProducts::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_products_equipment")
                            .from(EquipmentProducts::Table, EquipmentProducts::EquipmentId)
                            .to(Equipment::Table, Equipment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_products_product")
                            .from(EquipmentProducts::Table, EquipmentProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Robots::Table)
                    .if_not_exists()
                    .col(id_column(Robots::Id))
                    .col(ColumnDef::new(Robots::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Robots::Reference).string_len(255).not_null())
                    .col(ColumnDef::new(Robots::Generation).string_len(255).not_null())
                    .col(ColumnDef::new(Robots::ClientId).integer().not_null())
                    .col(ColumnDef::new(Robots::Payload).integer().not_null())
                    .col(ColumnDef::new(Robots::Range).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_robots_client")
                            .from(Robots::Table, Robots::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductIncompatibilities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductIncompatibilities::ProductA)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductIncompatibilities::ProductB)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProductIncompatibilities::ProductA)
                            .col(ProductIncompatibilities::ProductB),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_incompatibilities_product_a")
                            .from(
                                ProductIncompatibilities::Table,
                                ProductIncompatibilities::ProductA,
                            )
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_incompatibilities_product_b")
                            .from(
                                ProductIncompatibilities::Table,
                                ProductIncompatibilities::ProductB,
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
                    .name("idx_equipment_products_product_id")
                    .table(EquipmentProducts::Table)
                    .col(EquipmentProducts::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductIncompatibilities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Robots::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EquipmentProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Equipment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Suppliers::Table).to_owned())
            .await?;
        Ok(())
    }
}
