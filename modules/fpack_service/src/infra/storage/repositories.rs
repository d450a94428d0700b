//! SeaORM repository implementations

use crate::contract::{
    Client, ColumnKind, CompositionRow, Equipment, GlobalProject, Group, GroupItem,
    Incompatibility, ItemKind, NewColumn, NewEquipment, NewGlobalProject, NewGroupItem,
    NewProduct, NewProject, NewRobot, NewTemplate, Price, Product, Project, Robot,
    RobotIncompatibility, RobotPrice, Selection, Supplier, Template, TemplateColumn,
};
use crate::domain::repository::{
    CatalogRepository, GroupRepository, PriceRepository, ProjectRepository, TemplateRepository,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use std::sync::Arc;

use super::entity::{
    client, composition, equipment, global_project, group, group_item, incompatibility, price,
    product, project, robot, robot_incompatibility, robot_price, selection, supplier, template,
    template_column,
};

fn try_all<M, T>(models: Vec<M>) -> Result<Vec<T>>
where
    T: TryFrom<M, Error = anyhow::Error>,
{
    models.into_iter().map(T::try_from).collect()
}

// ===== Catalog Repository =====

pub struct SeaOrmCatalogRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    // ===== Suppliers =====

    async fn create_supplier(&self, name: &str) -> Result<Supplier> {
        let created = supplier::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(&*self.db)
        .await?;
        Ok(created.into())
    }

    async fn find_supplier(&self, id: i32) -> Result<Option<Supplier>> {
        let result = supplier::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn find_supplier_by_name(&self, name: &str) -> Result<Option<Supplier>> {
        let result = supplier::Entity::find()
            .filter(supplier::Column::Name.eq(name))
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        let results = supplier::Entity::find()
            .order_by_asc(supplier::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn delete_supplier(&self, id: i32) -> Result<()> {
        supplier::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }

    // ===== Clients =====

    async fn create_client(&self, name: &str) -> Result<Client> {
        let created = client::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(&*self.db)
        .await?;
        Ok(created.into())
    }

    async fn find_client(&self, id: i32) -> Result<Option<Client>> {
        let result = client::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn list_clients(&self) -> Result<Vec<Client>> {
        let results = client::Entity::find()
            .order_by_asc(client::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_client(&self, model: &Client) -> Result<Client> {
        let updated = client::ActiveModel {
            id: Set(model.id),
            name: Set(model.name.clone()),
        }
        .update(&*self.db)
        .await?;
        Ok(updated.into())
    }

    async fn delete_client(&self, id: i32) -> Result<()> {
        client::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }

    // ===== Products =====

    async fn create_product(&self, model: &NewProduct) -> Result<Product> {
        let active: product::ActiveModel = model.into();
        Ok(active.insert(&*self.db).await?.into())
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>> {
        let result = product::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let results = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn products_by_supplier(&self, supplier_id: i32) -> Result<Vec<Product>> {
        let results = product::Entity::find()
            .filter(product::Column::SupplierId.eq(supplier_id))
            .order_by_asc(product::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_product(&self, model: &Product) -> Result<Product> {
        let active: product::ActiveModel = model.into();
        Ok(active.update(&*self.db).await?.into())
    }

    async fn delete_product(&self, id: i32) -> Result<()> {
        product::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }

    // ===== Equipment =====

    async fn create_equipment(&self, model: &NewEquipment) -> Result<Equipment> {
        let active: equipment::ActiveModel = model.into();
        Ok(active.insert(&*self.db).await?.into())
    }

    async fn find_equipment(&self, id: i32) -> Result<Option<Equipment>> {
        let result = equipment::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn list_equipment(&self) -> Result<Vec<Equipment>> {
        let results = equipment::Entity::find()
            .order_by_asc(equipment::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_equipment(&self, model: &Equipment) -> Result<Equipment> {
        let active: equipment::ActiveModel = model.into();
        Ok(active.update(&*self.db).await?.into())
    }

    async fn delete_equipment(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        composition::Entity::delete_many()
            .filter(composition::Column::EquipmentId.eq(id))
            .exec(&txn)
            .await?;
        equipment::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn set_composition_row(&self, row: &CompositionRow) -> Result<CompositionRow> {
        let active = composition::ActiveModel::try_from(row)?;
        composition::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([
                    composition::Column::EquipmentId,
                    composition::Column::ProductId,
                ])
                .update_column(composition::Column::Quantity)
                .to_owned(),
            )
            .exec(&*self.db)
            .await?;
        Ok(*row)
    }

    async fn remove_composition_row(&self, equipment_id: i32, product_id: i32) -> Result<()> {
        composition::Entity::delete_by_id((equipment_id, product_id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn clear_composition(&self, equipment_id: i32) -> Result<u64> {
        let result = composition::Entity::delete_many()
            .filter(composition::Column::EquipmentId.eq(equipment_id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn composition(&self, equipment_id: i32) -> Result<Vec<CompositionRow>> {
        let results = composition::Entity::find()
            .filter(composition::Column::EquipmentId.eq(equipment_id))
            .order_by_asc(composition::Column::ProductId)
            .all(&*self.db)
            .await?;
        try_all(results)
    }

    async fn equipment_containing(&self, product_id: i32) -> Result<Vec<Equipment>> {
        let equipment_ids: Vec<i32> = composition::Entity::find()
            .filter(composition::Column::ProductId.eq(product_id))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|row| row.equipment_id)
            .collect();

        if equipment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = equipment::Entity::find()
            .filter(equipment::Column::Id.is_in(equipment_ids))
            .order_by_asc(equipment::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    // ===== Robots =====

    async fn create_robot(&self, model: &NewRobot) -> Result<Robot> {
        let active: robot::ActiveModel = model.into();
        Ok(active.insert(&*self.db).await?.into())
    }

    async fn find_robot(&self, id: i32) -> Result<Option<Robot>> {
        let result = robot::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn list_robots(&self) -> Result<Vec<Robot>> {
        let results = robot::Entity::find()
            .order_by_asc(robot::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn robots_by_client(&self, client_id: i32) -> Result<Vec<Robot>> {
        let results = robot::Entity::find()
            .filter(robot::Column::ClientId.eq(client_id))
            .order_by_asc(robot::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_robot(&self, model: &Robot) -> Result<Robot> {
        let active: robot::ActiveModel = model.into();
        Ok(active.update(&*self.db).await?.into())
    }

    async fn delete_robot(&self, id: i32) -> Result<()> {
        robot::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }

    // ===== Incompatibilities =====

    async fn add_incompatibility(&self, pair: &Incompatibility) -> Result<()> {
        let existing = incompatibility::Entity::find_by_id((pair.product_a, pair.product_b))
            .one(&*self.db)
            .await?;
        if existing.is_none() {
            let active: incompatibility::ActiveModel = pair.into();
            incompatibility::Entity::insert(active)
                .exec(&*self.db)
                .await?;
        }
        Ok(())
    }

    async fn remove_incompatibility(&self, pair: &Incompatibility) -> Result<()> {
        incompatibility::Entity::delete_by_id((pair.product_a, pair.product_b))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn list_incompatibilities(&self) -> Result<Vec<Incompatibility>> {
        let results = incompatibility::Entity::find()
            .order_by_asc(incompatibility::Column::ProductA)
            .order_by_asc(incompatibility::Column::ProductB)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn incompatibilities_of(&self, product_id: i32) -> Result<Vec<Incompatibility>> {
        let results = incompatibility::Entity::find()
            .filter(
                Condition::any()
                    .add(incompatibility::Column::ProductA.eq(product_id))
                    .add(incompatibility::Column::ProductB.eq(product_id)),
            )
            .order_by_asc(incompatibility::Column::ProductA)
            .order_by_asc(incompatibility::Column::ProductB)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    // ===== Robot incompatibilities =====

    async fn add_robot_incompatibilities(&self, pairs: &[RobotIncompatibility]) -> Result<()> {
        let txn = self.db.begin().await?;
        for pair in pairs {
            let active: robot_incompatibility::ActiveModel = pair.into();
            robot_incompatibility::Entity::insert(active)
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn remove_robot_incompatibility(&self, pair: &RobotIncompatibility) -> Result<()> {
        robot_incompatibility::Entity::delete_by_id((pair.robot_id, pair.product_id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn list_robot_incompatibilities(&self) -> Result<Vec<RobotIncompatibility>> {
        let results = robot_incompatibility::Entity::find()
            .order_by_asc(robot_incompatibility::Column::RobotId)
            .order_by_asc(robot_incompatibility::Column::ProductId)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn robot_incompatibilities_of_robot(
        &self,
        robot_id: i32,
    ) -> Result<Vec<RobotIncompatibility>> {
        let results = robot_incompatibility::Entity::find()
            .filter(robot_incompatibility::Column::RobotId.eq(robot_id))
            .order_by_asc(robot_incompatibility::Column::ProductId)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn robot_incompatibilities_of_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<RobotIncompatibility>> {
        let results = robot_incompatibility::Entity::find()
            .filter(robot_incompatibility::Column::ProductId.eq(product_id))
            .order_by_asc(robot_incompatibility::Column::RobotId)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn clear_robot_incompatibilities(&self, robot_id: i32) -> Result<u64> {
        let result = robot_incompatibility::Entity::delete_many()
            .filter(robot_incompatibility::Column::RobotId.eq(robot_id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

// ===== Price Repository =====

pub struct SeaOrmPriceRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPriceRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PriceRepository for SeaOrmPriceRepository {
    async fn insert_price(&self, model: &Price) -> Result<Price> {
        let active: price::ActiveModel = model.into();
        price::Entity::insert(active).exec(&*self.db).await?;
        Ok(model.clone())
    }

    async fn update_price(&self, model: &Price) -> Result<Price> {
        let active: price::ActiveModel = model.into();
        Ok(active.update(&*self.db).await?.into())
    }

    async fn find_price(&self, product_id: i32, client_id: i32) -> Result<Option<Price>> {
        let result = price::Entity::find_by_id((product_id, client_id))
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_prices(&self) -> Result<Vec<Price>> {
        let results = price::Entity::find()
            .order_by_asc(price::Column::ProductId)
            .order_by_asc(price::Column::ClientId)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn prices_for_product(&self, product_id: i32) -> Result<Vec<Price>> {
        let results = price::Entity::find()
            .filter(price::Column::ProductId.eq(product_id))
            .order_by_asc(price::Column::ClientId)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn prices_for_client(&self, client_id: i32) -> Result<Vec<Price>> {
        let results = price::Entity::find()
            .filter(price::Column::ClientId.eq(client_id))
            .order_by_asc(price::Column::ProductId)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn delete_price(&self, product_id: i32, client_id: i32) -> Result<()> {
        price::Entity::delete_by_id((product_id, client_id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn insert_robot_price(&self, model: &RobotPrice) -> Result<RobotPrice> {
        let active: robot_price::ActiveModel = model.into();
        robot_price::Entity::insert(active).exec(&*self.db).await?;
        Ok(model.clone())
    }

    async fn update_robot_price(&self, model: &RobotPrice) -> Result<RobotPrice> {
        let active: robot_price::ActiveModel = model.into();
        Ok(active.update(&*self.db).await?.into())
    }

    async fn find_robot_price(&self, robot_id: i32) -> Result<Option<RobotPrice>> {
        let result = robot_price::Entity::find_by_id(robot_id)
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_robot_prices(&self) -> Result<Vec<RobotPrice>> {
        let results = robot_price::Entity::find()
            .order_by_asc(robot_price::Column::RobotId)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn delete_robot_price(&self, robot_id: i32) -> Result<()> {
        robot_price::Entity::delete_by_id(robot_id)
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}

// ===== Group Repository =====

pub struct SeaOrmGroupRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmGroupRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for SeaOrmGroupRepository {
    async fn create_group(&self, name: &str) -> Result<Group> {
        let created = group::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(&*self.db)
        .await?;
        Ok(created.into())
    }

    async fn find_group(&self, id: i32) -> Result<Option<Group>> {
        let result = group::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn list_groups(&self) -> Result<Vec<Group>> {
        let results = group::Entity::find()
            .order_by_asc(group::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn rename_group(&self, model: &Group) -> Result<Group> {
        let updated = group::ActiveModel {
            id: Set(model.id),
            name: Set(model.name.clone()),
        }
        .update(&*self.db)
        .await?;
        Ok(updated.into())
    }

    async fn delete_group(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        group_item::Entity::delete_many()
            .filter(group_item::Column::GroupId.eq(id))
            .exec(&txn)
            .await?;
        group::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn add_item(&self, item: &NewGroupItem) -> Result<GroupItem> {
        let active: group_item::ActiveModel = item.into();
        active.insert(&*self.db).await?.try_into()
    }

    async fn find_item(&self, item_id: i32) -> Result<Option<GroupItem>> {
        group_item::Entity::find_by_id(item_id)
            .one(&*self.db)
            .await?
            .map(GroupItem::try_from)
            .transpose()
    }

    async fn list_items(&self, group_id: i32) -> Result<Vec<GroupItem>> {
        let results = group_item::Entity::find()
            .filter(group_item::Column::GroupId.eq(group_id))
            .order_by_asc(group_item::Column::Id)
            .all(&*self.db)
            .await?;
        try_all(results)
    }

    async fn remove_item(&self, item_id: i32) -> Result<()> {
        group_item::Entity::delete_by_id(item_id)
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn groups_offering(&self, kind: ItemKind, ref_id: i32) -> Result<Vec<Group>> {
        let group_ids: Vec<i32> = group_item::Entity::find()
            .filter(group_item::Column::Kind.eq(kind.as_str()))
            .filter(group_item::Column::RefId.eq(ref_id))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|item| item.group_id)
            .collect();

        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = group::Entity::find()
            .filter(group::Column::Id.is_in(group_ids))
            .order_by_asc(group::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }
}

// ===== Template Repository =====

pub struct SeaOrmTemplateRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmTemplateRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TemplateRepository for SeaOrmTemplateRepository {
    async fn create_template(&self, model: &NewTemplate) -> Result<Template> {
        let active: template::ActiveModel = model.into();
        Ok(active.insert(&*self.db).await?.into())
    }

    async fn find_template(&self, id: i32) -> Result<Option<Template>> {
        let result = template::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn list_templates(&self) -> Result<Vec<Template>> {
        let results = template::Entity::find()
            .order_by_asc(template::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn templates_by_client(&self, client_id: i32) -> Result<Vec<Template>> {
        let results = template::Entity::find()
            .filter(template::Column::ClientId.eq(client_id))
            .order_by_asc(template::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_template(&self, model: &Template) -> Result<Template> {
        let active: template::ActiveModel = model.into();
        Ok(active.update(&*self.db).await?.into())
    }

    async fn delete_template(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        template_column::Entity::delete_many()
            .filter(template_column::Column::TemplateId.eq(id))
            .exec(&txn)
            .await?;
        template::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn duplicate_template(&self, id: i32, name: &str) -> Result<Template> {
        let txn = self.db.begin().await?;

        let original = template::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .with_context(|| format!("template {} not found", id))?;

        let copy = template::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            client_id: Set(original.client_id),
            abbreviation: Set(original.abbreviation),
        }
        .insert(&txn)
        .await?;

        let columns = template_column::Entity::find()
            .filter(template_column::Column::TemplateId.eq(id))
            .order_by_asc(template_column::Column::Position)
            .all(&txn)
            .await?;
        for column in columns {
            template_column::ActiveModel {
                id: NotSet,
                template_id: Set(copy.id),
                position: Set(column.position),
                kind: Set(column.kind),
                ref_id: Set(column.ref_id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(copy.into())
    }

    async fn insert_column(&self, column: &NewColumn) -> Result<TemplateColumn> {
        let active: template_column::ActiveModel = column.into();
        active.insert(&*self.db).await?.try_into()
    }

    async fn insert_columns(&self, columns: &[NewColumn]) -> Result<Vec<TemplateColumn>> {
        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(columns.len());
        for column in columns {
            let active: template_column::ActiveModel = column.into();
            created.push(TemplateColumn::try_from(active.insert(&txn).await?)?);
        }
        txn.commit().await?;
        Ok(created)
    }

    async fn find_column(&self, id: i32) -> Result<Option<TemplateColumn>> {
        template_column::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(TemplateColumn::try_from)
            .transpose()
    }

    async fn find_column_by_order(
        &self,
        template_id: i32,
        order: i32,
    ) -> Result<Option<TemplateColumn>> {
        template_column::Entity::find()
            .filter(template_column::Column::TemplateId.eq(template_id))
            .filter(template_column::Column::Position.eq(order))
            .one(&*self.db)
            .await?
            .map(TemplateColumn::try_from)
            .transpose()
    }

    async fn update_column(&self, column: &TemplateColumn) -> Result<TemplateColumn> {
        let active: template_column::ActiveModel = column.into();
        active.update(&*self.db).await?.try_into()
    }

    async fn delete_column(&self, id: i32) -> Result<()> {
        template_column::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn list_columns(&self, template_id: i32) -> Result<Vec<TemplateColumn>> {
        let results = template_column::Entity::find()
            .filter(template_column::Column::TemplateId.eq(template_id))
            .order_by_asc(template_column::Column::Position)
            .all(&*self.db)
            .await?;
        try_all(results)
    }

    async fn clear_columns(&self, template_id: i32) -> Result<u64> {
        let result = template_column::Entity::delete_many()
            .filter(template_column::Column::TemplateId.eq(template_id))
            .exec(&*self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn reorder_columns(&self, template_id: i32, orders: &[(i32, i32)]) -> Result<()> {
        let txn = self.db.begin().await?;

        // Positions are unique per template: park every column first
        for (slot, (column_id, _)) in orders.iter().enumerate() {
            let parked = i32::try_from(slot)
                .ok()
                .and_then(|slot| i32::MIN.checked_add(slot))
                .context("too many columns to reorder")?;
            template_column::ActiveModel {
                id: Set(*column_id),
                template_id: Set(template_id),
                position: Set(parked),
                ..Default::default()
            }
            .update(&txn)
            .await?;
        }

        for (column_id, order) in orders {
            template_column::ActiveModel {
                id: Set(*column_id),
                template_id: Set(template_id),
                position: Set(*order),
                ..Default::default()
            }
            .update(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    async fn columns_referencing(
        &self,
        kind: ColumnKind,
        ref_id: i32,
    ) -> Result<Vec<TemplateColumn>> {
        let results = template_column::Entity::find()
            .filter(template_column::Column::Kind.eq(kind.as_str()))
            .filter(template_column::Column::RefId.eq(ref_id))
            .order_by_asc(template_column::Column::TemplateId)
            .order_by_asc(template_column::Column::Position)
            .all(&*self.db)
            .await?;
        try_all(results)
    }
}

// ===== Project Repository =====

pub struct SeaOrmProjectRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmProjectRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProjectRepository for SeaOrmProjectRepository {
    // ===== Global projects =====

    async fn create_global_project(&self, model: &NewGlobalProject) -> Result<GlobalProject> {
        let active: global_project::ActiveModel = model.into();
        Ok(active.insert(&*self.db).await?.into())
    }

    async fn find_global_project(&self, id: i32) -> Result<Option<GlobalProject>> {
        let result = global_project::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_global_projects(&self) -> Result<Vec<GlobalProject>> {
        let results = global_project::Entity::find()
            .order_by_asc(global_project::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn global_projects_by_client(&self, client_id: i32) -> Result<Vec<GlobalProject>> {
        let results = global_project::Entity::find()
            .filter(global_project::Column::ClientId.eq(client_id))
            .order_by_asc(global_project::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_global_project(&self, model: &GlobalProject) -> Result<GlobalProject> {
        let active: global_project::ActiveModel = model.into();
        Ok(active.update(&*self.db).await?.into())
    }

    async fn delete_global_project(&self, id: i32) -> Result<()> {
        global_project::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    async fn projects_by_global(&self, global_id: i32) -> Result<Vec<Project>> {
        let results = project::Entity::find()
            .filter(project::Column::GlobalId.eq(global_id))
            .order_by_asc(project::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    // ===== Projects =====

    async fn create_project(&self, model: &NewProject) -> Result<Project> {
        let active: project::ActiveModel = model.into();
        Ok(active.insert(&*self.db).await?.into())
    }

    async fn find_project(&self, id: i32) -> Result<Option<Project>> {
        let result = project::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Into::into))
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        let results = project::Entity::find()
            .order_by_asc(project::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn projects_by_template(&self, template_id: i32) -> Result<Vec<Project>> {
        let results = project::Entity::find()
            .filter(project::Column::TemplateId.eq(template_id))
            .order_by_asc(project::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn projects_by_client(&self, client_id: i32) -> Result<Vec<Project>> {
        let results = project::Entity::find()
            .filter(project::Column::ClientId.eq(client_id))
            .order_by_asc(project::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_project(&self, model: &Project) -> Result<Project> {
        let active: project::ActiveModel = model.into();
        Ok(active.update(&*self.db).await?.into())
    }

    async fn delete_project(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        selection::Entity::delete_many()
            .filter(selection::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?;
        project::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    // ===== Selections =====

    async fn insert_selection(&self, model: &Selection) -> Result<Selection> {
        let active: selection::ActiveModel = model.into();
        selection::Entity::insert(active).exec(&*self.db).await?;
        Ok(*model)
    }

    async fn update_selection(&self, model: &Selection) -> Result<Selection> {
        let active: selection::ActiveModel = model.into();
        active.update(&*self.db).await?.try_into()
    }

    async fn find_selection(&self, project_id: i32, group_id: i32) -> Result<Option<Selection>> {
        selection::Entity::find_by_id((project_id, group_id))
            .one(&*self.db)
            .await?
            .map(Selection::try_from)
            .transpose()
    }

    async fn list_selections(&self, project_id: i32) -> Result<Vec<Selection>> {
        let results = selection::Entity::find()
            .filter(selection::Column::ProjectId.eq(project_id))
            .order_by_asc(selection::Column::GroupId)
            .all(&*self.db)
            .await?;
        try_all(results)
    }

    async fn selections_choosing(&self, kind: ItemKind, ref_id: i32) -> Result<Vec<Selection>> {
        let results = selection::Entity::find()
            .filter(selection::Column::Kind.eq(kind.as_str()))
            .filter(selection::Column::RefId.eq(ref_id))
            .order_by_asc(selection::Column::ProjectId)
            .all(&*self.db)
            .await?;
        try_all(results)
    }

    async fn selections_for_group(&self, group_id: i32) -> Result<Vec<Selection>> {
        let results = selection::Entity::find()
            .filter(selection::Column::GroupId.eq(group_id))
            .order_by_asc(selection::Column::ProjectId)
            .all(&*self.db)
            .await?;
        try_all(results)
    }

    async fn delete_selection(&self, project_id: i32, group_id: i32) -> Result<()> {
        selection::Entity::delete_by_id((project_id, group_id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }
}
