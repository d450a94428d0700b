//! Database migrations for the F-Pack service

use sea_orm_migration::prelude::*;

mod m20250301_000001_create_catalog;
mod m20250301_000002_create_prices;
mod m20250301_000003_create_groups;
mod m20250301_000004_create_templates;
mod m20250301_000005_create_projects;
mod m20250301_000006_create_robot_incompatibilities;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_catalog::Migration),
            Box::new(m20250301_000002_create_prices::Migration),
            Box::new(m20250301_000003_create_groups::Migration),
            Box::new(m20250301_000004_create_templates::Migration),
            Box::new(m20250301_000005_create_projects::Migration),
            Box::new(m20250301_000006_create_robot_incompatibilities::Migration),
        ]
    }
}

fn id_column<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn amount_column<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .decimal_len(12, 4)
        .not_null()
        .to_owned()
}

#[derive(DeriveIden)]
enum Suppliers {
    #[sea_orm(iden = "fpack_suppliers")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Clients {
    #[sea_orm(iden = "fpack_clients")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Products {
    #[sea_orm(iden = "fpack_products")]
    Table,
    Id,
    Name,
    Reference,
    SupplierId,
    Kind,
    Description,
}

#[derive(DeriveIden)]
enum Equipment {
    #[sea_orm(iden = "fpack_equipment")]
    Table,
    Id,
    Name,
    Reference,
}

#[derive(DeriveIden)]
enum EquipmentProducts {
    #[sea_orm(iden = "fpack_equipment_products")]
    Table,
    EquipmentId,
    ProductId,
    Quantity,
}

#[derive(DeriveIden)]
enum Robots {
    #[sea_orm(iden = "fpack_robots")]
    Table,
    Id,
    Name,
    Reference,
    Generation,
    ClientId,
    Payload,
    Range,
}

#[derive(DeriveIden)]
enum ProductIncompatibilities {
    #[sea_orm(iden = "fpack_product_incompatibilities")]
    Table,
    ProductA,
    ProductB,
}

/// Robots that must not be fitted with a product
#[derive(DeriveIden)]
enum RobotIncompatibilities {
    #[sea_orm(iden = "fpack_robot_incompatibilities")]
    Table,
    RobotId,
    ProductId,
}

#[derive(DeriveIden)]
enum Prices {
    #[sea_orm(iden = "fpack_prices")]
    Table,
    ProductId,
    ClientId,
    UnitPrice,
    UnitTransport,
    Comment,
}

#[derive(DeriveIden)]
enum RobotPrices {
    #[sea_orm(iden = "fpack_robot_prices")]
    Table,
    RobotId,
    Reference,
    UnitPrice,
    UnitTransport,
    Comment,
}

#[derive(DeriveIden)]
enum Groups {
    #[sea_orm(iden = "fpack_groups")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum GroupItems {
    #[sea_orm(iden = "fpack_group_items")]
    Table,
    Id,
    GroupId,
    Kind,
    RefId,
    Status,
}

#[derive(DeriveIden)]
enum Templates {
    #[sea_orm(iden = "fpack_templates")]
    Table,
    Id,
    Name,
    ClientId,
    Abbreviation,
}

#[derive(DeriveIden)]
enum TemplateColumns {
    #[sea_orm(iden = "fpack_template_columns")]
    Table,
    Id,
    TemplateId,
    Position,
    Kind,
    RefId,
}

#[derive(DeriveIden)]
enum GlobalProjects {
    #[sea_orm(iden = "fpack_global_projects")]
    Table,
    Id,
    Name,
    SubProject,
    ClientId,
}

#[derive(DeriveIden)]
enum Projects {
    #[sea_orm(iden = "fpack_projects")]
    Table,
    Id,
    Name,
    TemplateId,
    ClientId,
    GlobalId,
}

#[derive(DeriveIden)]
enum ProjectSelections {
    #[sea_orm(iden = "fpack_project_selections")]
    Table,
    ProjectId,
    GroupId,
    Kind,
    RefId,
}
