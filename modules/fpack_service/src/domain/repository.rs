//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Client, ColumnKind, CompositionRow, Equipment, GlobalProject, Group, GroupItem,
    Incompatibility, ItemKind, NewColumn, NewEquipment, NewGlobalProject, NewGroupItem,
    NewProduct, NewProject, NewRobot, NewTemplate, Price, Product, Project, Robot,
    RobotIncompatibility, RobotPrice, Selection, Supplier, Template, TemplateColumn,
};
use anyhow::Result;
use async_trait::async_trait;

/// Repository for catalog reference data
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // ===== Suppliers =====

    async fn create_supplier(&self, name: &str) -> Result<Supplier>;

    async fn find_supplier(&self, id: i32) -> Result<Option<Supplier>>;

    async fn find_supplier_by_name(&self, name: &str) -> Result<Option<Supplier>>;

    async fn list_suppliers(&self) -> Result<Vec<Supplier>>;

    async fn delete_supplier(&self, id: i32) -> Result<()>;

    // ===== Clients =====

    async fn create_client(&self, name: &str) -> Result<Client>;

    async fn find_client(&self, id: i32) -> Result<Option<Client>>;

    async fn list_clients(&self) -> Result<Vec<Client>>;

    async fn update_client(&self, client: &Client) -> Result<Client>;

    async fn delete_client(&self, id: i32) -> Result<()>;

    // ===== Products =====

    async fn create_product(&self, product: &NewProduct) -> Result<Product>;

    async fn find_product(&self, id: i32) -> Result<Option<Product>>;

    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Products sold by a supplier
    async fn products_by_supplier(&self, supplier_id: i32) -> Result<Vec<Product>>;

    async fn update_product(&self, product: &Product) -> Result<Product>;

    async fn delete_product(&self, id: i32) -> Result<()>;

    // ===== Equipment =====

    async fn create_equipment(&self, equipment: &NewEquipment) -> Result<Equipment>;

    async fn find_equipment(&self, id: i32) -> Result<Option<Equipment>>;

    async fn list_equipment(&self) -> Result<Vec<Equipment>>;

    async fn update_equipment(&self, equipment: &Equipment) -> Result<Equipment>;

    /// Delete an equipment and its composition rows
    async fn delete_equipment(&self, id: i32) -> Result<()>;

    /// Insert or replace the quantity of one composition row
    async fn set_composition_row(&self, row: &CompositionRow) -> Result<CompositionRow>;

    async fn remove_composition_row(&self, equipment_id: i32, product_id: i32) -> Result<()>;

    /// Remove every composition row of an equipment, returning the count
    async fn clear_composition(&self, equipment_id: i32) -> Result<u64>;

    /// Composition rows of an equipment, ordered by product id
    async fn composition(&self, equipment_id: i32) -> Result<Vec<CompositionRow>>;

    /// Equipment whose composition contains a product
    async fn equipment_containing(&self, product_id: i32) -> Result<Vec<Equipment>>;

    // ===== Robots =====

    async fn create_robot(&self, robot: &NewRobot) -> Result<Robot>;

    async fn find_robot(&self, id: i32) -> Result<Option<Robot>>;

    async fn list_robots(&self) -> Result<Vec<Robot>>;

    async fn robots_by_client(&self, client_id: i32) -> Result<Vec<Robot>>;

    async fn update_robot(&self, robot: &Robot) -> Result<Robot>;

    async fn delete_robot(&self, id: i32) -> Result<()>;

    // ===== Incompatibilities =====

    /// Insert a pair; inserting an existing pair is a no-op
    async fn add_incompatibility(&self, pair: &Incompatibility) -> Result<()>;

    async fn remove_incompatibility(&self, pair: &Incompatibility) -> Result<()>;

    async fn list_incompatibilities(&self) -> Result<Vec<Incompatibility>>;

    /// Pairs involving a product
    async fn incompatibilities_of(&self, product_id: i32) -> Result<Vec<Incompatibility>>;

    // ===== Robot incompatibilities =====

    /// Insert new pairs in one transaction
    async fn add_robot_incompatibilities(&self, pairs: &[RobotIncompatibility]) -> Result<()>;

    async fn remove_robot_incompatibility(&self, pair: &RobotIncompatibility) -> Result<()>;

    /// Every pair, ordered by robot then product
    async fn list_robot_incompatibilities(&self) -> Result<Vec<RobotIncompatibility>>;

    async fn robot_incompatibilities_of_robot(
        &self,
        robot_id: i32,
    ) -> Result<Vec<RobotIncompatibility>>;

    async fn robot_incompatibilities_of_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<RobotIncompatibility>>;

    /// Remove every pair of a robot, returning the count
    async fn clear_robot_incompatibilities(&self, robot_id: i32) -> Result<u64>;
}

/// Repository for product and robot prices
#[async_trait]
pub trait PriceRepository: Send + Sync {
    async fn insert_price(&self, price: &Price) -> Result<Price>;

    async fn update_price(&self, price: &Price) -> Result<Price>;

    async fn find_price(&self, product_id: i32, client_id: i32) -> Result<Option<Price>>;

    async fn list_prices(&self) -> Result<Vec<Price>>;

    async fn prices_for_product(&self, product_id: i32) -> Result<Vec<Price>>;

    async fn prices_for_client(&self, client_id: i32) -> Result<Vec<Price>>;

    async fn delete_price(&self, product_id: i32, client_id: i32) -> Result<()>;

    async fn insert_robot_price(&self, price: &RobotPrice) -> Result<RobotPrice>;

    async fn update_robot_price(&self, price: &RobotPrice) -> Result<RobotPrice>;

    async fn find_robot_price(&self, robot_id: i32) -> Result<Option<RobotPrice>>;

    async fn list_robot_prices(&self) -> Result<Vec<RobotPrice>>;

    async fn delete_robot_price(&self, robot_id: i32) -> Result<()>;
}

/// Repository for selectable groups
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn create_group(&self, name: &str) -> Result<Group>;

    async fn find_group(&self, id: i32) -> Result<Option<Group>>;

    async fn list_groups(&self) -> Result<Vec<Group>>;

    async fn rename_group(&self, group: &Group) -> Result<Group>;

    /// Delete a group and its items
    async fn delete_group(&self, id: i32) -> Result<()>;

    async fn add_item(&self, item: &NewGroupItem) -> Result<GroupItem>;

    async fn find_item(&self, item_id: i32) -> Result<Option<GroupItem>>;

    /// Items of a group, ordered by item id
    async fn list_items(&self, group_id: i32) -> Result<Vec<GroupItem>>;

    async fn remove_item(&self, item_id: i32) -> Result<()>;

    /// Groups offering a given catalog item
    async fn groups_offering(&self, kind: ItemKind, ref_id: i32) -> Result<Vec<Group>>;
}

/// Repository for F-Pack templates and their columns
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn create_template(&self, template: &NewTemplate) -> Result<Template>;

    async fn find_template(&self, id: i32) -> Result<Option<Template>>;

    async fn list_templates(&self) -> Result<Vec<Template>>;

    async fn templates_by_client(&self, client_id: i32) -> Result<Vec<Template>>;

    async fn update_template(&self, template: &Template) -> Result<Template>;

    /// Delete a template and its columns
    async fn delete_template(&self, id: i32) -> Result<()>;

    /// Copy a template under a new name together with its columns, in one
    /// transaction
    async fn duplicate_template(&self, id: i32, name: &str) -> Result<Template>;

    async fn insert_column(&self, column: &NewColumn) -> Result<TemplateColumn>;

    /// Insert several columns in one transaction
    async fn insert_columns(&self, columns: &[NewColumn]) -> Result<Vec<TemplateColumn>>;

    async fn find_column(&self, id: i32) -> Result<Option<TemplateColumn>>;

    async fn find_column_by_order(
        &self,
        template_id: i32,
        order: i32,
    ) -> Result<Option<TemplateColumn>>;

    async fn update_column(&self, column: &TemplateColumn) -> Result<TemplateColumn>;

    async fn delete_column(&self, id: i32) -> Result<()>;

    /// Columns of a template in ascending order
    async fn list_columns(&self, template_id: i32) -> Result<Vec<TemplateColumn>>;

    /// Remove every column of a template, returning the count
    async fn clear_columns(&self, template_id: i32) -> Result<u64>;

    /// Apply `(column_id, order)` pairs in one transaction
    async fn reorder_columns(&self, template_id: i32, orders: &[(i32, i32)]) -> Result<()>;

    /// Columns pointing at a catalog row or group, across all templates
    async fn columns_referencing(&self, kind: ColumnKind, ref_id: i32)
        -> Result<Vec<TemplateColumn>>;
}

/// Repository for projects, global projects and selections
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    // ===== Global projects =====

    async fn create_global_project(&self, project: &NewGlobalProject) -> Result<GlobalProject>;

    async fn find_global_project(&self, id: i32) -> Result<Option<GlobalProject>>;

    async fn list_global_projects(&self) -> Result<Vec<GlobalProject>>;

    async fn global_projects_by_client(&self, client_id: i32) -> Result<Vec<GlobalProject>>;

    async fn update_global_project(&self, project: &GlobalProject) -> Result<GlobalProject>;

    async fn delete_global_project(&self, id: i32) -> Result<()>;

    /// Member projects of a global project, ordered by id
    async fn projects_by_global(&self, global_id: i32) -> Result<Vec<Project>>;

    // ===== Projects =====

    async fn create_project(&self, project: &NewProject) -> Result<Project>;

    async fn find_project(&self, id: i32) -> Result<Option<Project>>;

    async fn list_projects(&self) -> Result<Vec<Project>>;

    async fn projects_by_template(&self, template_id: i32) -> Result<Vec<Project>>;

    async fn projects_by_client(&self, client_id: i32) -> Result<Vec<Project>>;

    async fn update_project(&self, project: &Project) -> Result<Project>;

    /// Delete a project and its selections
    async fn delete_project(&self, id: i32) -> Result<()>;

    // ===== Selections =====

    async fn insert_selection(&self, selection: &Selection) -> Result<Selection>;

    async fn update_selection(&self, selection: &Selection) -> Result<Selection>;

    async fn find_selection(&self, project_id: i32, group_id: i32) -> Result<Option<Selection>>;

    /// Selections of a project, ordered by group id
    async fn list_selections(&self, project_id: i32) -> Result<Vec<Selection>>;

    /// Selections, across all projects, choosing a given item
    async fn selections_choosing(&self, kind: ItemKind, ref_id: i32) -> Result<Vec<Selection>>;

    /// Selections, across all projects, made for a group
    async fn selections_for_group(&self, group_id: i32) -> Result<Vec<Selection>>;

    async fn delete_selection(&self, project_id: i32, group_id: i32) -> Result<()>;
}

/// Bundle of every repository the service needs
#[derive(Clone)]
pub struct Repositories {
    pub catalog: std::sync::Arc<dyn CatalogRepository>,
    pub prices: std::sync::Arc<dyn PriceRepository>,
    pub groups: std::sync::Arc<dyn GroupRepository>,
    pub templates: std::sync::Arc<dyn TemplateRepository>,
    pub projects: std::sync::Arc<dyn ProjectRepository>,
}
