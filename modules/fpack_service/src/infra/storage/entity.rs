//! SeaORM entities for database tables
//!
//! One module per table. Kinds and statuses are stored as their wire names.

/// Product suppliers
pub mod supplier {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_suppliers")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(unique)]
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::product::Entity")]
        Products,
    }

    impl Related<super::product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Products.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod client {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_clients")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod product {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_products")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub reference: String,
        pub supplier_id: i32,
        /// Free-text product type
        pub kind: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::supplier::Entity",
            from = "Column::SupplierId",
            to = "super::supplier::Column::Id"
        )]
        Supplier,
    }

    impl Related<super::supplier::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Supplier.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod equipment {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_equipment")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub reference: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::composition::Entity")]
        Composition,
    }

    impl Related<super::composition::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Composition.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Bill-of-materials rows, one per (equipment, product)
pub mod composition {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_equipment_products")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub equipment_id: i32,
        #[sea_orm(primary_key, auto_increment = false)]
        pub product_id: i32,
        pub quantity: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::equipment::Entity",
            from = "Column::EquipmentId",
            to = "super::equipment::Column::Id"
        )]
        Equipment,
    }

    impl Related<super::equipment::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Equipment.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod robot {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_robots")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub reference: String,
        pub generation: String,
        pub client_id: i32,
        pub payload: i32,
        pub range: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Product prices, one per (product, client)
pub mod price {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_prices")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub product_id: i32,
        #[sea_orm(primary_key, auto_increment = false)]
        pub client_id: i32,
        #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
        pub unit_price: Decimal,
        #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
        pub unit_transport: Decimal,
        pub comment: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Robot prices, one per robot
pub mod robot_price {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_robot_prices")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub robot_id: i32,
        pub reference: String,
        #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
        pub unit_price: Decimal,
        #[sea_orm(column_type = "Decimal(Some((12, 4)))")]
        pub unit_transport: Decimal,
        pub comment: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Normalized incompatible product pairs
pub mod incompatibility {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_product_incompatibilities")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub product_a: i32,
        #[sea_orm(primary_key, auto_increment = false)]
        pub product_b: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Robots that must not be fitted with a product
pub mod robot_incompatibility {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_robot_incompatibilities")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub robot_id: i32,
        #[sea_orm(primary_key, auto_increment = false)]
        pub product_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod group {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_groups")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::group_item::Entity")]
        Items,
    }

    impl Related<super::group_item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Items.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod group_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_group_items")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub group_id: i32,
        /// `produit`, `equipement` or `robot`
        pub kind: String,
        pub ref_id: i32,
        /// `standard` or `optionnel`
        pub status: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::group::Entity",
            from = "Column::GroupId",
            to = "super::group::Column::Id"
        )]
        Group,
    }

    impl Related<super::group::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Group.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod template {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_templates")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub client_id: i32,
        pub abbreviation: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::template_column::Entity")]
        Columns,
    }

    impl Related<super::template_column::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Columns.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod template_column {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_template_columns")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub template_id: i32,
        /// Unique within a template
        pub position: i32,
        /// `produit`, `equipement` or `group`
        pub kind: String,
        pub ref_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::template::Entity",
            from = "Column::TemplateId",
            to = "super::template::Column::Id"
        )]
        Template,
    }

    impl Related<super::template::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Template.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Client projects grouping template instances
pub mod global_project {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_global_projects")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub sub_project: Option<String>,
        pub client_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::project::Entity")]
        Projects,
    }

    impl Related<super::project::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Projects.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod project {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_projects")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub template_id: i32,
        pub client_id: i32,
        pub global_id: Option<i32>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::selection::Entity")]
        Selections,
        #[sea_orm(
            belongs_to = "super::global_project::Entity",
            from = "Column::GlobalId",
            to = "super::global_project::Column::Id"
        )]
        GlobalProject,
    }

    impl Related<super::selection::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Selections.def()
        }
    }

    impl Related<super::global_project::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::GlobalProject.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Group choices, one per (project, group)
pub mod selection {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "fpack_project_selections")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub project_id: i32,
        #[sea_orm(primary_key, auto_increment = false)]
        pub group_id: i32,
        pub kind: String,
        pub ref_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::project::Entity",
            from = "Column::ProjectId",
            to = "super::project::Column::Id"
        )]
        Project,
    }

    impl Related<super::project::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Project.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
