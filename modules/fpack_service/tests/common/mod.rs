//! Common test utilities: in-memory repositories and catalog fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use fpack_service::contract::*;
use fpack_service::domain::repository::*;
use fpack_service::domain::Service;
use fpack_service::Config;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Default)]
struct State {
    next_id: i32,
    suppliers: BTreeMap<i32, Supplier>,
    clients: BTreeMap<i32, Client>,
    products: BTreeMap<i32, Product>,
    equipment: BTreeMap<i32, Equipment>,
    composition: BTreeMap<(i32, i32), u32>,
    robots: BTreeMap<i32, Robot>,
    incompatibilities: BTreeMap<(i32, i32), Incompatibility>,
    robot_incompatibilities: BTreeMap<(i32, i32), RobotIncompatibility>,
    prices: BTreeMap<(i32, i32), Price>,
    robot_prices: BTreeMap<i32, RobotPrice>,
    groups: BTreeMap<i32, Group>,
    group_items: BTreeMap<i32, GroupItem>,
    templates: BTreeMap<i32, Template>,
    columns: BTreeMap<i32, TemplateColumn>,
    global_projects: BTreeMap<i32, GlobalProject>,
    projects: BTreeMap<i32, Project>,
    selections: BTreeMap<(i32, i32), Selection>,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory implementation of every repository trait.
///
/// Ids come from one shared sequence so rows of different tables never
/// share an id, which keeps misrouted lookups visible in tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            catalog: Arc::new(self.clone()),
            prices: Arc::new(self.clone()),
            groups: Arc::new(self.clone()),
            templates: Arc::new(self.clone()),
            projects: Arc::new(self.clone()),
        }
    }

    /// Drop a product row without any reference check, as a concurrent
    /// writer or a manual database edit would
    pub fn force_delete_product(&self, id: i32) {
        self.state.write().products.remove(&id);
    }

    pub fn column_count(&self) -> usize {
        self.state.read().columns.len()
    }

    pub fn group_item_count(&self) -> usize {
        self.state.read().group_items.len()
    }

    pub fn selection_count(&self) -> usize {
        self.state.read().selections.len()
    }

    pub fn template_count(&self) -> usize {
        self.state.read().templates.len()
    }
}

fn missing(what: &str, id: impl std::fmt::Display) -> anyhow::Error {
    anyhow::anyhow!("{} {} does not exist", what, id)
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn create_supplier(&self, name: &str) -> anyhow::Result<Supplier> {
        let mut state = self.state.write();
        let supplier = Supplier {
            id: state.next_id(),
            name: name.to_string(),
        };
        state.suppliers.insert(supplier.id, supplier.clone());
        Ok(supplier)
    }

    async fn find_supplier(&self, id: i32) -> anyhow::Result<Option<Supplier>> {
        Ok(self.state.read().suppliers.get(&id).cloned())
    }

    async fn find_supplier_by_name(&self, name: &str) -> anyhow::Result<Option<Supplier>> {
        Ok(self
            .state
            .read()
            .suppliers
            .values()
            .find(|s| s.name == name)
            .cloned())
    }

    async fn list_suppliers(&self) -> anyhow::Result<Vec<Supplier>> {
        Ok(self.state.read().suppliers.values().cloned().collect())
    }

    async fn delete_supplier(&self, id: i32) -> anyhow::Result<()> {
        self.state.write().suppliers.remove(&id);
        Ok(())
    }

    async fn create_client(&self, name: &str) -> anyhow::Result<Client> {
        let mut state = self.state.write();
        let client = Client {
            id: state.next_id(),
            name: name.to_string(),
        };
        state.clients.insert(client.id, client.clone());
        Ok(client)
    }

    async fn find_client(&self, id: i32) -> anyhow::Result<Option<Client>> {
        Ok(self.state.read().clients.get(&id).cloned())
    }

    async fn list_clients(&self) -> anyhow::Result<Vec<Client>> {
        Ok(self.state.read().clients.values().cloned().collect())
    }

    async fn update_client(&self, client: &Client) -> anyhow::Result<Client> {
        let mut state = self.state.write();
        let slot = state
            .clients
            .get_mut(&client.id)
            .ok_or_else(|| missing("client", client.id))?;
        *slot = client.clone();
        Ok(client.clone())
    }

    async fn delete_client(&self, id: i32) -> anyhow::Result<()> {
        self.state.write().clients.remove(&id);
        Ok(())
    }

    async fn create_product(&self, product: &NewProduct) -> anyhow::Result<Product> {
        let mut state = self.state.write();
        let product = Product {
            id: state.next_id(),
            name: product.name.clone(),
            reference: product.reference.clone(),
            supplier_id: product.supplier_id,
            kind: product.kind.clone(),
            description: product.description.clone(),
        };
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn find_product(&self, id: i32) -> anyhow::Result<Option<Product>> {
        Ok(self.state.read().products.get(&id).cloned())
    }

    async fn list_products(&self) -> anyhow::Result<Vec<Product>> {
        Ok(self.state.read().products.values().cloned().collect())
    }

    async fn products_by_supplier(&self, supplier_id: i32) -> anyhow::Result<Vec<Product>> {
        Ok(self
            .state
            .read()
            .products
            .values()
            .filter(|p| p.supplier_id == supplier_id)
            .cloned()
            .collect())
    }

    async fn update_product(&self, product: &Product) -> anyhow::Result<Product> {
        let mut state = self.state.write();
        let slot = state
            .products
            .get_mut(&product.id)
            .ok_or_else(|| missing("product", product.id))?;
        *slot = product.clone();
        Ok(product.clone())
    }

    async fn delete_product(&self, id: i32) -> anyhow::Result<()> {
        self.state.write().products.remove(&id);
        Ok(())
    }

    async fn create_equipment(&self, equipment: &NewEquipment) -> anyhow::Result<Equipment> {
        let mut state = self.state.write();
        let equipment = Equipment {
            id: state.next_id(),
            name: equipment.name.clone(),
            reference: equipment.reference.clone(),
        };
        state.equipment.insert(equipment.id, equipment.clone());
        Ok(equipment)
    }

    async fn find_equipment(&self, id: i32) -> anyhow::Result<Option<Equipment>> {
        Ok(self.state.read().equipment.get(&id).cloned())
    }

    async fn list_equipment(&self) -> anyhow::Result<Vec<Equipment>> {
        Ok(self.state.read().equipment.values().cloned().collect())
    }

    async fn update_equipment(&self, equipment: &Equipment) -> anyhow::Result<Equipment> {
        let mut state = self.state.write();
        let slot = state
            .equipment
            .get_mut(&equipment.id)
            .ok_or_else(|| missing("equipment", equipment.id))?;
        *slot = equipment.clone();
        Ok(equipment.clone())
    }

    async fn delete_equipment(&self, id: i32) -> anyhow::Result<()> {
        let mut state = self.state.write();
        state.composition.retain(|(equipment_id, _), _| *equipment_id != id);
        state.equipment.remove(&id);
        Ok(())
    }

    async fn set_composition_row(&self, row: &CompositionRow) -> anyhow::Result<CompositionRow> {
        self.state
            .write()
            .composition
            .insert((row.equipment_id, row.product_id), row.quantity);
        Ok(*row)
    }

    async fn remove_composition_row(&self, equipment_id: i32, product_id: i32) -> anyhow::Result<()> {
        self.state
            .write()
            .composition
            .remove(&(equipment_id, product_id));
        Ok(())
    }

    async fn clear_composition(&self, equipment_id: i32) -> anyhow::Result<u64> {
        let mut state = self.state.write();
        let before = state.composition.len();
        state.composition.retain(|(id, _), _| *id != equipment_id);
        Ok((before - state.composition.len()) as u64)
    }

    async fn composition(&self, equipment_id: i32) -> anyhow::Result<Vec<CompositionRow>> {
        Ok(self
            .state
            .read()
            .composition
            .iter()
            .filter(|((id, _), _)| *id == equipment_id)
            .map(|(&(equipment_id, product_id), &quantity)| CompositionRow {
                equipment_id,
                product_id,
                quantity,
            })
            .collect())
    }

    async fn equipment_containing(&self, product_id: i32) -> anyhow::Result<Vec<Equipment>> {
        let state = self.state.read();
        Ok(state
            .composition
            .keys()
            .filter(|(_, p)| *p == product_id)
            .filter_map(|(e, _)| state.equipment.get(e).cloned())
            .collect())
    }

    async fn create_robot(&self, robot: &NewRobot) -> anyhow::Result<Robot> {
        let mut state = self.state.write();
        let robot = Robot {
            id: state.next_id(),
            name: robot.name.clone(),
            reference: robot.reference.clone(),
            generation: robot.generation.clone(),
            client_id: robot.client_id,
            payload: robot.payload,
            range: robot.range,
        };
        state.robots.insert(robot.id, robot.clone());
        Ok(robot)
    }

    async fn find_robot(&self, id: i32) -> anyhow::Result<Option<Robot>> {
        Ok(self.state.read().robots.get(&id).cloned())
    }

    async fn list_robots(&self) -> anyhow::Result<Vec<Robot>> {
        Ok(self.state.read().robots.values().cloned().collect())
    }

    async fn robots_by_client(&self, client_id: i32) -> anyhow::Result<Vec<Robot>> {
        Ok(self
            .state
            .read()
            .robots
            .values()
            .filter(|r| r.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn update_robot(&self, robot: &Robot) -> anyhow::Result<Robot> {
        let mut state = self.state.write();
        let slot = state
            .robots
            .get_mut(&robot.id)
            .ok_or_else(|| missing("robot", robot.id))?;
        *slot = robot.clone();
        Ok(robot.clone())
    }

    async fn delete_robot(&self, id: i32) -> anyhow::Result<()> {
        self.state.write().robots.remove(&id);
        Ok(())
    }

    async fn add_incompatibility(&self, pair: &Incompatibility) -> anyhow::Result<()> {
        self.state
            .write()
            .incompatibilities
            .insert((pair.product_a, pair.product_b), *pair);
        Ok(())
    }

    async fn remove_incompatibility(&self, pair: &Incompatibility) -> anyhow::Result<()> {
        self.state
            .write()
            .incompatibilities
            .remove(&(pair.product_a, pair.product_b));
        Ok(())
    }

    async fn list_incompatibilities(&self) -> anyhow::Result<Vec<Incompatibility>> {
        Ok(self.state.read().incompatibilities.values().copied().collect())
    }

    async fn incompatibilities_of(&self, product_id: i32) -> anyhow::Result<Vec<Incompatibility>> {
        Ok(self
            .state
            .read()
            .incompatibilities
            .values()
            .filter(|p| p.other(product_id).is_some())
            .copied()
            .collect())
    }

    async fn add_robot_incompatibilities(
        &self,
        pairs: &[RobotIncompatibility],
    ) -> anyhow::Result<()> {
        let mut state = self.state.write();
        if let Some(pair) = pairs
            .iter()
            .find(|p| state.robot_incompatibilities.contains_key(&(p.robot_id, p.product_id)))
        {
            anyhow::bail!("duplicate robot incompatibility {:?}", pair);
        }
        for pair in pairs {
            state
                .robot_incompatibilities
                .insert((pair.robot_id, pair.product_id), *pair);
        }
        Ok(())
    }

    async fn remove_robot_incompatibility(
        &self,
        pair: &RobotIncompatibility,
    ) -> anyhow::Result<()> {
        self.state
            .write()
            .robot_incompatibilities
            .remove(&(pair.robot_id, pair.product_id));
        Ok(())
    }

    async fn list_robot_incompatibilities(&self) -> anyhow::Result<Vec<RobotIncompatibility>> {
        Ok(self
            .state
            .read()
            .robot_incompatibilities
            .values()
            .copied()
            .collect())
    }

    async fn robot_incompatibilities_of_robot(
        &self,
        robot_id: i32,
    ) -> anyhow::Result<Vec<RobotIncompatibility>> {
        Ok(self
            .state
            .read()
            .robot_incompatibilities
            .values()
            .filter(|p| p.robot_id == robot_id)
            .copied()
            .collect())
    }

    async fn robot_incompatibilities_of_product(
        &self,
        product_id: i32,
    ) -> anyhow::Result<Vec<RobotIncompatibility>> {
        let mut pairs: Vec<RobotIncompatibility> = self
            .state
            .read()
            .robot_incompatibilities
            .values()
            .filter(|p| p.product_id == product_id)
            .copied()
            .collect();
        pairs.sort_by_key(|p| p.robot_id);
        Ok(pairs)
    }

    async fn clear_robot_incompatibilities(&self, robot_id: i32) -> anyhow::Result<u64> {
        let mut state = self.state.write();
        let before = state.robot_incompatibilities.len();
        state
            .robot_incompatibilities
            .retain(|(robot, _), _| *robot != robot_id);
        Ok((before - state.robot_incompatibilities.len()) as u64)
    }
}

#[async_trait]
impl PriceRepository for MemoryStore {
    async fn insert_price(&self, price: &Price) -> anyhow::Result<Price> {
        let mut state = self.state.write();
        let key = (price.product_id, price.client_id);
        if state.prices.contains_key(&key) {
            anyhow::bail!("duplicate price {:?}", key);
        }
        state.prices.insert(key, price.clone());
        Ok(price.clone())
    }

    async fn update_price(&self, price: &Price) -> anyhow::Result<Price> {
        let mut state = self.state.write();
        let slot = state
            .prices
            .get_mut(&(price.product_id, price.client_id))
            .ok_or_else(|| missing("price", price.product_id))?;
        *slot = price.clone();
        Ok(price.clone())
    }

    async fn find_price(&self, product_id: i32, client_id: i32) -> anyhow::Result<Option<Price>> {
        Ok(self
            .state
            .read()
            .prices
            .get(&(product_id, client_id))
            .cloned())
    }

    async fn list_prices(&self) -> anyhow::Result<Vec<Price>> {
        Ok(self.state.read().prices.values().cloned().collect())
    }

    async fn prices_for_product(&self, product_id: i32) -> anyhow::Result<Vec<Price>> {
        Ok(self
            .state
            .read()
            .prices
            .values()
            .filter(|p| p.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn prices_for_client(&self, client_id: i32) -> anyhow::Result<Vec<Price>> {
        Ok(self
            .state
            .read()
            .prices
            .values()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn delete_price(&self, product_id: i32, client_id: i32) -> anyhow::Result<()> {
        self.state.write().prices.remove(&(product_id, client_id));
        Ok(())
    }

    async fn insert_robot_price(&self, price: &RobotPrice) -> anyhow::Result<RobotPrice> {
        let mut state = self.state.write();
        if state.robot_prices.contains_key(&price.robot_id) {
            anyhow::bail!("duplicate robot price {}", price.robot_id);
        }
        state.robot_prices.insert(price.robot_id, price.clone());
        Ok(price.clone())
    }

    async fn update_robot_price(&self, price: &RobotPrice) -> anyhow::Result<RobotPrice> {
        let mut state = self.state.write();
        let slot = state
            .robot_prices
            .get_mut(&price.robot_id)
            .ok_or_else(|| missing("robot price", price.robot_id))?;
        *slot = price.clone();
        Ok(price.clone())
    }

    async fn find_robot_price(&self, robot_id: i32) -> anyhow::Result<Option<RobotPrice>> {
        Ok(self.state.read().robot_prices.get(&robot_id).cloned())
    }

    async fn list_robot_prices(&self) -> anyhow::Result<Vec<RobotPrice>> {
        Ok(self.state.read().robot_prices.values().cloned().collect())
    }

    async fn delete_robot_price(&self, robot_id: i32) -> anyhow::Result<()> {
        self.state.write().robot_prices.remove(&robot_id);
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn create_group(&self, name: &str) -> anyhow::Result<Group> {
        let mut state = self.state.write();
        let group = Group {
            id: state.next_id(),
            name: name.to_string(),
        };
        state.groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn find_group(&self, id: i32) -> anyhow::Result<Option<Group>> {
        Ok(self.state.read().groups.get(&id).cloned())
    }

    async fn list_groups(&self) -> anyhow::Result<Vec<Group>> {
        Ok(self.state.read().groups.values().cloned().collect())
    }

    async fn rename_group(&self, group: &Group) -> anyhow::Result<Group> {
        let mut state = self.state.write();
        let slot = state
            .groups
            .get_mut(&group.id)
            .ok_or_else(|| missing("group", group.id))?;
        *slot = group.clone();
        Ok(group.clone())
    }

    async fn delete_group(&self, id: i32) -> anyhow::Result<()> {
        let mut state = self.state.write();
        state.group_items.retain(|_, item| item.group_id != id);
        state.groups.remove(&id);
        Ok(())
    }

    async fn add_item(&self, item: &NewGroupItem) -> anyhow::Result<GroupItem> {
        let mut state = self.state.write();
        let item = GroupItem {
            id: state.next_id(),
            group_id: item.group_id,
            kind: item.kind,
            ref_id: item.ref_id,
            status: item.status,
        };
        state.group_items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_item(&self, item_id: i32) -> anyhow::Result<Option<GroupItem>> {
        Ok(self.state.read().group_items.get(&item_id).cloned())
    }

    async fn list_items(&self, group_id: i32) -> anyhow::Result<Vec<GroupItem>> {
        Ok(self
            .state
            .read()
            .group_items
            .values()
            .filter(|i| i.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn remove_item(&self, item_id: i32) -> anyhow::Result<()> {
        self.state.write().group_items.remove(&item_id);
        Ok(())
    }

    async fn groups_offering(&self, kind: ItemKind, ref_id: i32) -> anyhow::Result<Vec<Group>> {
        let state = self.state.read();
        let mut groups: Vec<Group> = state
            .group_items
            .values()
            .filter(|i| i.kind == kind && i.ref_id == ref_id)
            .filter_map(|i| state.groups.get(&i.group_id).cloned())
            .collect();
        groups.dedup_by_key(|g| g.id);
        Ok(groups)
    }
}

#[async_trait]
impl TemplateRepository for MemoryStore {
    async fn create_template(&self, template: &NewTemplate) -> anyhow::Result<Template> {
        let mut state = self.state.write();
        let template = Template {
            id: state.next_id(),
            name: template.name.clone(),
            client_id: template.client_id,
            abbreviation: template.abbreviation.clone(),
        };
        state.templates.insert(template.id, template.clone());
        Ok(template)
    }

    async fn find_template(&self, id: i32) -> anyhow::Result<Option<Template>> {
        Ok(self.state.read().templates.get(&id).cloned())
    }

    async fn list_templates(&self) -> anyhow::Result<Vec<Template>> {
        Ok(self.state.read().templates.values().cloned().collect())
    }

    async fn templates_by_client(&self, client_id: i32) -> anyhow::Result<Vec<Template>> {
        Ok(self
            .state
            .read()
            .templates
            .values()
            .filter(|t| t.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn update_template(&self, template: &Template) -> anyhow::Result<Template> {
        let mut state = self.state.write();
        let slot = state
            .templates
            .get_mut(&template.id)
            .ok_or_else(|| missing("template", template.id))?;
        *slot = template.clone();
        Ok(template.clone())
    }

    async fn delete_template(&self, id: i32) -> anyhow::Result<()> {
        let mut state = self.state.write();
        state.columns.retain(|_, c| c.template_id != id);
        state.templates.remove(&id);
        Ok(())
    }

    async fn duplicate_template(&self, id: i32, name: &str) -> anyhow::Result<Template> {
        let mut state = self.state.write();
        let original = state
            .templates
            .get(&id)
            .cloned()
            .ok_or_else(|| missing("template", id))?;
        let copy = Template {
            id: state.next_id(),
            name: name.to_string(),
            client_id: original.client_id,
            abbreviation: original.abbreviation,
        };
        let columns: Vec<TemplateColumn> = state
            .columns
            .values()
            .filter(|c| c.template_id == id)
            .cloned()
            .collect();
        for column in columns {
            let column = TemplateColumn {
                id: state.next_id(),
                template_id: copy.id,
                ..column
            };
            state.columns.insert(column.id, column);
        }
        state.templates.insert(copy.id, copy.clone());
        Ok(copy)
    }

    async fn insert_column(&self, column: &NewColumn) -> anyhow::Result<TemplateColumn> {
        let mut created = self.insert_columns(std::slice::from_ref(column)).await?;
        created.pop().ok_or_else(|| anyhow::anyhow!("no column inserted"))
    }

    async fn insert_columns(&self, columns: &[NewColumn]) -> anyhow::Result<Vec<TemplateColumn>> {
        let mut state = self.state.write();
        for column in columns {
            if state
                .columns
                .values()
                .any(|c| c.template_id == column.template_id && c.order == column.order)
            {
                anyhow::bail!("order {} already used", column.order);
            }
        }

        let mut created = Vec::with_capacity(columns.len());
        for column in columns {
            let column = TemplateColumn {
                id: state.next_id(),
                template_id: column.template_id,
                order: column.order,
                kind: column.kind,
                ref_id: column.ref_id,
            };
            state.columns.insert(column.id, column.clone());
            created.push(column);
        }
        Ok(created)
    }

    async fn find_column(&self, id: i32) -> anyhow::Result<Option<TemplateColumn>> {
        Ok(self.state.read().columns.get(&id).cloned())
    }

    async fn find_column_by_order(
        &self,
        template_id: i32,
        order: i32,
    ) -> anyhow::Result<Option<TemplateColumn>> {
        Ok(self
            .state
            .read()
            .columns
            .values()
            .find(|c| c.template_id == template_id && c.order == order)
            .cloned())
    }

    async fn update_column(&self, column: &TemplateColumn) -> anyhow::Result<TemplateColumn> {
        let mut state = self.state.write();
        let slot = state
            .columns
            .get_mut(&column.id)
            .ok_or_else(|| missing("column", column.id))?;
        *slot = column.clone();
        Ok(column.clone())
    }

    async fn delete_column(&self, id: i32) -> anyhow::Result<()> {
        self.state.write().columns.remove(&id);
        Ok(())
    }

    async fn list_columns(&self, template_id: i32) -> anyhow::Result<Vec<TemplateColumn>> {
        let mut columns: Vec<TemplateColumn> = self
            .state
            .read()
            .columns
            .values()
            .filter(|c| c.template_id == template_id)
            .cloned()
            .collect();
        columns.sort_by_key(|c| c.order);
        Ok(columns)
    }

    async fn clear_columns(&self, template_id: i32) -> anyhow::Result<u64> {
        let mut state = self.state.write();
        let before = state.columns.len();
        state.columns.retain(|_, c| c.template_id != template_id);
        Ok((before - state.columns.len()) as u64)
    }

    async fn reorder_columns(&self, template_id: i32, orders: &[(i32, i32)]) -> anyhow::Result<()> {
        let mut state = self.state.write();
        for &(id, order) in orders {
            match state.columns.get_mut(&id) {
                Some(column) if column.template_id == template_id => column.order = order,
                _ => anyhow::bail!("column {} is not part of template {}", id, template_id),
            }
        }
        Ok(())
    }

    async fn columns_referencing(
        &self,
        kind: ColumnKind,
        ref_id: i32,
    ) -> anyhow::Result<Vec<TemplateColumn>> {
        Ok(self
            .state
            .read()
            .columns
            .values()
            .filter(|c| c.kind == kind && c.ref_id == ref_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn create_global_project(
        &self,
        project: &NewGlobalProject,
    ) -> anyhow::Result<GlobalProject> {
        let mut state = self.state.write();
        let project = GlobalProject {
            id: state.next_id(),
            name: project.name.clone(),
            sub_project: project.sub_project.clone(),
            client_id: project.client_id,
        };
        state.global_projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_global_project(&self, id: i32) -> anyhow::Result<Option<GlobalProject>> {
        Ok(self.state.read().global_projects.get(&id).cloned())
    }

    async fn list_global_projects(&self) -> anyhow::Result<Vec<GlobalProject>> {
        Ok(self.state.read().global_projects.values().cloned().collect())
    }

    async fn global_projects_by_client(
        &self,
        client_id: i32,
    ) -> anyhow::Result<Vec<GlobalProject>> {
        Ok(self
            .state
            .read()
            .global_projects
            .values()
            .filter(|g| g.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn update_global_project(
        &self,
        project: &GlobalProject,
    ) -> anyhow::Result<GlobalProject> {
        let mut state = self.state.write();
        let slot = state
            .global_projects
            .get_mut(&project.id)
            .ok_or_else(|| missing("global project", project.id))?;
        *slot = project.clone();
        Ok(project.clone())
    }

    async fn delete_global_project(&self, id: i32) -> anyhow::Result<()> {
        self.state.write().global_projects.remove(&id);
        Ok(())
    }

    async fn projects_by_global(&self, global_id: i32) -> anyhow::Result<Vec<Project>> {
        Ok(self
            .state
            .read()
            .projects
            .values()
            .filter(|p| p.global_id == Some(global_id))
            .cloned()
            .collect())
    }

    async fn create_project(&self, project: &NewProject) -> anyhow::Result<Project> {
        let mut state = self.state.write();
        let project = Project {
            id: state.next_id(),
            name: project.name.clone(),
            template_id: project.template_id,
            client_id: project.client_id,
            global_id: project.global_id,
        };
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_project(&self, id: i32) -> anyhow::Result<Option<Project>> {
        Ok(self.state.read().projects.get(&id).cloned())
    }

    async fn list_projects(&self) -> anyhow::Result<Vec<Project>> {
        Ok(self.state.read().projects.values().cloned().collect())
    }

    async fn projects_by_template(&self, template_id: i32) -> anyhow::Result<Vec<Project>> {
        Ok(self
            .state
            .read()
            .projects
            .values()
            .filter(|p| p.template_id == template_id)
            .cloned()
            .collect())
    }

    async fn projects_by_client(&self, client_id: i32) -> anyhow::Result<Vec<Project>> {
        Ok(self
            .state
            .read()
            .projects
            .values()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn update_project(&self, project: &Project) -> anyhow::Result<Project> {
        let mut state = self.state.write();
        let slot = state
            .projects
            .get_mut(&project.id)
            .ok_or_else(|| missing("project", project.id))?;
        *slot = project.clone();
        Ok(project.clone())
    }

    async fn delete_project(&self, id: i32) -> anyhow::Result<()> {
        let mut state = self.state.write();
        state.selections.retain(|(project_id, _), _| *project_id != id);
        state.projects.remove(&id);
        Ok(())
    }

    async fn insert_selection(&self, selection: &Selection) -> anyhow::Result<Selection> {
        let mut state = self.state.write();
        let key = (selection.project_id, selection.group_id);
        if state.selections.contains_key(&key) {
            anyhow::bail!("duplicate selection {:?}", key);
        }
        state.selections.insert(key, *selection);
        Ok(*selection)
    }

    async fn update_selection(&self, selection: &Selection) -> anyhow::Result<Selection> {
        let mut state = self.state.write();
        let slot = state
            .selections
            .get_mut(&(selection.project_id, selection.group_id))
            .ok_or_else(|| missing("selection", selection.group_id))?;
        *slot = *selection;
        Ok(*selection)
    }

    async fn find_selection(
        &self,
        project_id: i32,
        group_id: i32,
    ) -> anyhow::Result<Option<Selection>> {
        Ok(self
            .state
            .read()
            .selections
            .get(&(project_id, group_id))
            .copied())
    }

    async fn list_selections(&self, project_id: i32) -> anyhow::Result<Vec<Selection>> {
        Ok(self
            .state
            .read()
            .selections
            .values()
            .filter(|s| s.project_id == project_id)
            .copied()
            .collect())
    }

    async fn selections_choosing(
        &self,
        kind: ItemKind,
        ref_id: i32,
    ) -> anyhow::Result<Vec<Selection>> {
        Ok(self
            .state
            .read()
            .selections
            .values()
            .filter(|s| s.kind == kind && s.ref_id == ref_id)
            .copied()
            .collect())
    }

    async fn selections_for_group(&self, group_id: i32) -> anyhow::Result<Vec<Selection>> {
        Ok(self
            .state
            .read()
            .selections
            .values()
            .filter(|s| s.group_id == group_id)
            .copied()
            .collect())
    }

    async fn delete_selection(&self, project_id: i32, group_id: i32) -> anyhow::Result<()> {
        self.state
            .write()
            .selections
            .remove(&(project_id, group_id));
        Ok(())
    }
}

// ===== Service construction =====

pub fn create_service() -> (Service, MemoryStore) {
    create_service_with(Config::default())
}

pub fn create_service_with(config: Config) -> (Service, MemoryStore) {
    let store = MemoryStore::new();
    (Service::new(store.repositories(), &config), store)
}

pub fn price(unit_price: Decimal, unit_transport: Decimal) -> UnitPrice {
    UnitPrice {
        unit_price,
        unit_transport,
        comment: None,
    }
}

pub fn new_product(name: &str, supplier_id: i32) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        reference: format!("REF-{}", name.to_uppercase().replace(' ', "-")),
        supplier_id,
        kind: None,
        description: None,
    }
}

pub fn new_equipment(name: &str) -> NewEquipment {
    NewEquipment {
        name: name.to_string(),
        reference: format!("EQ-{}", name.to_uppercase().replace(' ', "-")),
    }
}

pub fn new_robot(name: &str, client_id: i32) -> NewRobot {
    NewRobot {
        name: name.to_string(),
        reference: format!("R-{}", name.to_uppercase().replace(' ', "-")),
        generation: "G2".to_string(),
        client_id,
        payload: 25,
        range: 1800,
    }
}

/// Small packaging-line catalog shared by the integration tests
pub struct Catalog {
    pub supplier: Supplier,
    pub client: Client,
    pub other_client: Client,
    /// Gripper
    pub p1: Product,
    /// Vacuum cup
    pub p2: Product,
    /// Sensor
    pub p3: Product,
}

pub async fn seed_catalog(service: &Service) -> Catalog {
    let supplier = service.create_supplier("Schunk").await.unwrap();
    let client = service.create_client("Biscuiterie Nantaise").await.unwrap();
    let other_client = service.create_client("Fromagerie Alpine").await.unwrap();
    let p1 = service
        .create_product(new_product("Gripper", supplier.id))
        .await
        .unwrap();
    let p2 = service
        .create_product(new_product("Vacuum cup", supplier.id))
        .await
        .unwrap();
    let p3 = service
        .create_product(new_product("Sensor", supplier.id))
        .await
        .unwrap();

    Catalog {
        supplier,
        client,
        other_client,
        p1,
        p2,
        p3,
    }
}

pub fn template_for(name: &str, client_id: i32) -> NewTemplate {
    NewTemplate {
        name: name.to_string(),
        client_id,
        abbreviation: None,
    }
}

pub fn project_for(name: &str, template_id: i32, client_id: i32) -> NewProject {
    NewProject {
        name: name.to_string(),
        template_id,
        client_id,
        global_id: None,
    }
}

pub fn global_for(name: &str, client_id: i32) -> NewGlobalProject {
    NewGlobalProject {
        name: name.to_string(),
        sub_project: None,
        client_id,
    }
}
