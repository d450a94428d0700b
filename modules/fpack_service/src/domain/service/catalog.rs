//! Catalog operations: suppliers, clients, products, equipment, robots,
//! incompatibility rules

use super::{dependent_named, ensure_unreferenced, storage, Service};
use crate::contract::{
    Client, ColumnKind, CompositionRow, Dependent, Equipment, FpackError, Incompatibility,
    ItemKind, NewEquipment, NewProduct, NewRobot, Product, Robot, Supplier, TemplateColumn,
};
use crate::domain::validation::{
    validate_optional_text, validate_quantity, validate_text, MAX_PRODUCT_REFERENCE_LEN,
    MAX_TEXT_LEN,
};

impl Service {
    // ===== Suppliers =====

    pub async fn create_supplier(&self, name: &str) -> Result<Supplier, FpackError> {
        let name = validate_text("name", name, MAX_TEXT_LEN)?;

        if self
            .repos
            .catalog
            .find_supplier_by_name(&name)
            .await
            .map_err(storage)?
            .is_some()
        {
            return Err(FpackError::Conflict {
                reason: format!("supplier '{}' already exists", name),
            });
        }

        self.repos.catalog.create_supplier(&name).await.map_err(storage)
    }

    pub async fn get_supplier(&self, id: i32) -> Result<Supplier, FpackError> {
        self.repos
            .catalog
            .find_supplier(id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("supplier", id))
    }

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, FpackError> {
        self.repos.catalog.list_suppliers().await.map_err(storage)
    }

    /// Delete a supplier that no longer sells any product
    pub async fn delete_supplier(&self, id: i32) -> Result<(), FpackError> {
        self.get_supplier(id).await?;

        let products = self
            .repos
            .catalog
            .products_by_supplier(id)
            .await
            .map_err(storage)?;
        ensure_unreferenced(
            "supplier",
            id,
            vec![dependent_named(
                "products",
                products.len(),
                products.into_iter().map(|p| p.name),
            )],
        )?;

        self.repos.catalog.delete_supplier(id).await.map_err(storage)
    }

    // ===== Clients =====

    pub async fn create_client(&self, name: &str) -> Result<Client, FpackError> {
        let name = validate_text("name", name, MAX_TEXT_LEN)?;
        self.repos.catalog.create_client(&name).await.map_err(storage)
    }

    pub async fn get_client(&self, id: i32) -> Result<Client, FpackError> {
        self.require_client(id).await
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, FpackError> {
        self.repos.catalog.list_clients().await.map_err(storage)
    }

    pub async fn rename_client(&self, id: i32, name: &str) -> Result<Client, FpackError> {
        let mut client = self.require_client(id).await?;
        client.name = validate_text("name", name, MAX_TEXT_LEN)?;
        self.repos.catalog.update_client(&client).await.map_err(storage)
    }

    /// Delete a client that owns no robot, template, project, global project
    /// or price
    pub async fn delete_client(&self, id: i32) -> Result<(), FpackError> {
        self.require_client(id).await?;

        let robots = self.repos.catalog.robots_by_client(id).await.map_err(storage)?;
        let templates = self
            .repos
            .templates
            .templates_by_client(id)
            .await
            .map_err(storage)?;
        let projects = self
            .repos
            .projects
            .projects_by_client(id)
            .await
            .map_err(storage)?;
        let globals = self
            .repos
            .projects
            .global_projects_by_client(id)
            .await
            .map_err(storage)?;
        let prices = self.repos.prices.prices_for_client(id).await.map_err(storage)?;

        ensure_unreferenced(
            "client",
            id,
            vec![
                dependent_named("robots", robots.len(), robots.into_iter().map(|r| r.name)),
                dependent_named(
                    "templates",
                    templates.len(),
                    templates.into_iter().map(|t| t.name),
                ),
                dependent_named(
                    "projects",
                    projects.len(),
                    projects.into_iter().map(|p| p.name),
                ),
                dependent_named(
                    "global_projects",
                    globals.len(),
                    globals.into_iter().map(|g| g.name),
                ),
                Dependent::new("prices", prices.len(), Vec::new()),
            ],
        )?;

        self.repos.catalog.delete_client(id).await.map_err(storage)
    }

    // ===== Products =====

    pub async fn create_product(&self, product: NewProduct) -> Result<Product, FpackError> {
        let product = self.checked_product(product).await?;
        let created = self
            .repos
            .catalog
            .create_product(&product)
            .await
            .map_err(storage)?;
        tracing::debug!(product_id = created.id, "product created");
        Ok(created)
    }

    pub async fn get_product(&self, id: i32) -> Result<Product, FpackError> {
        self.require_product(id).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, FpackError> {
        self.repos.catalog.list_products().await.map_err(storage)
    }

    pub async fn update_product(&self, id: i32, product: NewProduct) -> Result<Product, FpackError> {
        self.require_product(id).await?;
        let product = self.checked_product(product).await?;

        self.repos
            .catalog
            .update_product(&Product {
                id,
                name: product.name,
                reference: product.reference,
                supplier_id: product.supplier_id,
                kind: product.kind,
                description: product.description,
            })
            .await
            .map_err(storage)
    }

    /// Copy a product under a suffixed name. Prices are not copied.
    pub async fn duplicate_product(&self, id: i32) -> Result<Product, FpackError> {
        let original = self.require_product(id).await?;

        self.repos
            .catalog
            .create_product(&NewProduct {
                name: self.copy_name(&original.name),
                reference: original.reference,
                supplier_id: original.supplier_id,
                kind: original.kind,
                description: original.description,
            })
            .await
            .map_err(storage)
    }

    /// Delete a product nothing references any more.
    ///
    /// Every referencing relation is checked and reported, not just the first.
    pub async fn delete_product(&self, id: i32) -> Result<(), FpackError> {
        self.require_product(id).await?;

        let equipment = self
            .repos
            .catalog
            .equipment_containing(id)
            .await
            .map_err(storage)?;
        let prices = self.repos.prices.prices_for_product(id).await.map_err(storage)?;
        let incompatibilities = self
            .repos
            .catalog
            .incompatibilities_of(id)
            .await
            .map_err(storage)?;
        let groups = self
            .repos
            .groups
            .groups_offering(ItemKind::Product, id)
            .await
            .map_err(storage)?;
        let columns = self
            .repos
            .templates
            .columns_referencing(ColumnKind::Product, id)
            .await
            .map_err(storage)?;
        let robot_pairs = self
            .repos
            .catalog
            .robot_incompatibilities_of_product(id)
            .await
            .map_err(storage)?;

        let mut robot_names = Vec::with_capacity(robot_pairs.len());
        for pair in &robot_pairs {
            robot_names.push(self.item_label(ItemKind::Robot, pair.robot_id).await?);
        }

        let mut incompatible_names = Vec::with_capacity(incompatibilities.len());
        for pair in &incompatibilities {
            if let Some(other) = pair.other(id) {
                incompatible_names.push(self.product_label(other).await?);
            }
        }

        ensure_unreferenced(
            "product",
            id,
            vec![
                dependent_named(
                    "equipment",
                    equipment.len(),
                    equipment.into_iter().map(|e| e.name),
                ),
                Dependent::new("prices", prices.len(), Vec::new()),
                dependent_named("incompatibilities", incompatibilities.len(), incompatible_names),
                dependent_named("robot_incompatibilities", robot_pairs.len(), robot_names),
                dependent_named("groups", groups.len(), groups.into_iter().map(|g| g.name)),
                self.template_dependent(&columns).await?,
            ],
        )?;

        self.repos.catalog.delete_product(id).await.map_err(storage)
    }

    async fn checked_product(&self, product: NewProduct) -> Result<NewProduct, FpackError> {
        let checked = NewProduct {
            name: validate_text("name", &product.name, MAX_TEXT_LEN)?,
            reference: validate_text("reference", &product.reference, MAX_PRODUCT_REFERENCE_LEN)?,
            supplier_id: product.supplier_id,
            kind: validate_optional_text("type", product.kind.as_deref(), MAX_TEXT_LEN)?,
            description: validate_optional_text(
                "description",
                product.description.as_deref(),
                MAX_TEXT_LEN,
            )?,
        };
        self.get_supplier(checked.supplier_id).await?;
        Ok(checked)
    }

    async fn product_label(&self, id: i32) -> Result<String, FpackError> {
        Ok(self
            .repos
            .catalog
            .find_product(id)
            .await
            .map_err(storage)?
            .map(|p| p.name)
            .unwrap_or_else(|| format!("{} {}", ItemKind::Product, id)))
    }

    // ===== Equipment =====

    pub async fn create_equipment(&self, equipment: NewEquipment) -> Result<Equipment, FpackError> {
        let equipment = NewEquipment {
            name: validate_text("name", &equipment.name, MAX_TEXT_LEN)?,
            reference: validate_text("reference", &equipment.reference, MAX_TEXT_LEN)?,
        };
        self.repos
            .catalog
            .create_equipment(&equipment)
            .await
            .map_err(storage)
    }

    pub async fn get_equipment(&self, id: i32) -> Result<Equipment, FpackError> {
        self.repos
            .catalog
            .find_equipment(id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("equipment", id))
    }

    pub async fn list_equipment(&self) -> Result<Vec<Equipment>, FpackError> {
        self.repos.catalog.list_equipment().await.map_err(storage)
    }

    pub async fn update_equipment(
        &self,
        id: i32,
        equipment: NewEquipment,
    ) -> Result<Equipment, FpackError> {
        self.get_equipment(id).await?;
        self.repos
            .catalog
            .update_equipment(&Equipment {
                id,
                name: validate_text("name", &equipment.name, MAX_TEXT_LEN)?,
                reference: validate_text("reference", &equipment.reference, MAX_TEXT_LEN)?,
            })
            .await
            .map_err(storage)
    }

    /// Delete an equipment not offered by groups nor used by templates.
    /// Its composition rows go with it.
    pub async fn delete_equipment(&self, id: i32) -> Result<(), FpackError> {
        self.get_equipment(id).await?;

        let groups = self
            .repos
            .groups
            .groups_offering(ItemKind::Equipment, id)
            .await
            .map_err(storage)?;
        let columns = self
            .repos
            .templates
            .columns_referencing(ColumnKind::Equipment, id)
            .await
            .map_err(storage)?;

        ensure_unreferenced(
            "equipment",
            id,
            vec![
                dependent_named("groups", groups.len(), groups.into_iter().map(|g| g.name)),
                self.template_dependent(&columns).await?,
            ],
        )?;

        self.repos.catalog.delete_equipment(id).await.map_err(storage)
    }

    /// Composition rows of an equipment
    pub async fn get_composition(&self, equipment_id: i32) -> Result<Vec<CompositionRow>, FpackError> {
        self.get_equipment(equipment_id).await?;
        self.repos
            .catalog
            .composition(equipment_id)
            .await
            .map_err(storage)
    }

    /// Insert a composition row, or replace the quantity of an existing one
    pub async fn set_composition_row(
        &self,
        equipment_id: i32,
        product_id: i32,
        quantity: i64,
    ) -> Result<CompositionRow, FpackError> {
        let quantity = validate_quantity(quantity)?;
        self.get_equipment(equipment_id).await?;
        self.require_product(product_id).await?;

        self.repos
            .catalog
            .set_composition_row(&CompositionRow {
                equipment_id,
                product_id,
                quantity,
            })
            .await
            .map_err(storage)
    }

    pub async fn remove_composition_row(
        &self,
        equipment_id: i32,
        product_id: i32,
    ) -> Result<(), FpackError> {
        let rows = self.get_composition(equipment_id).await?;
        if !rows.iter().any(|r| r.product_id == product_id) {
            return Err(FpackError::not_found(
                "composition row",
                format!("{}/{}", equipment_id, product_id),
            ));
        }

        self.repos
            .catalog
            .remove_composition_row(equipment_id, product_id)
            .await
            .map_err(storage)
    }

    /// Remove every composition row, returning how many were removed
    pub async fn clear_composition(&self, equipment_id: i32) -> Result<u64, FpackError> {
        self.get_equipment(equipment_id).await?;
        self.repos
            .catalog
            .clear_composition(equipment_id)
            .await
            .map_err(storage)
    }

    // ===== Robots =====

    pub async fn create_robot(&self, robot: NewRobot) -> Result<Robot, FpackError> {
        let robot = self.checked_robot(robot).await?;
        self.repos.catalog.create_robot(&robot).await.map_err(storage)
    }

    pub async fn get_robot(&self, id: i32) -> Result<Robot, FpackError> {
        self.repos
            .catalog
            .find_robot(id)
            .await
            .map_err(storage)?
            .ok_or_else(|| FpackError::not_found("robot", id))
    }

    pub async fn list_robots(&self) -> Result<Vec<Robot>, FpackError> {
        self.repos.catalog.list_robots().await.map_err(storage)
    }

    pub async fn update_robot(&self, id: i32, robot: NewRobot) -> Result<Robot, FpackError> {
        self.get_robot(id).await?;
        let robot = self.checked_robot(robot).await?;

        self.repos
            .catalog
            .update_robot(&Robot {
                id,
                name: robot.name,
                reference: robot.reference,
                generation: robot.generation,
                client_id: robot.client_id,
                payload: robot.payload,
                range: robot.range,
            })
            .await
            .map_err(storage)
    }

    /// Delete a robot no group offers, no project selected and no
    /// incompatibility names. Its price row goes with it.
    pub async fn delete_robot(&self, id: i32) -> Result<(), FpackError> {
        self.get_robot(id).await?;

        let groups = self
            .repos
            .groups
            .groups_offering(ItemKind::Robot, id)
            .await
            .map_err(storage)?;
        let selections = self
            .repos
            .projects
            .selections_choosing(ItemKind::Robot, id)
            .await
            .map_err(storage)?;

        let product_pairs = self
            .repos
            .catalog
            .robot_incompatibilities_of_robot(id)
            .await
            .map_err(storage)?;

        let mut product_names = Vec::with_capacity(product_pairs.len());
        for pair in &product_pairs {
            product_names.push(self.product_label(pair.product_id).await?);
        }

        let mut project_names = Vec::with_capacity(selections.len());
        for selection in &selections {
            if let Some(project) = self
                .repos
                .projects
                .find_project(selection.project_id)
                .await
                .map_err(storage)?
            {
                project_names.push(project.name);
            }
        }

        ensure_unreferenced(
            "robot",
            id,
            vec![
                dependent_named("groups", groups.len(), groups.into_iter().map(|g| g.name)),
                dependent_named("selections", selections.len(), project_names),
                dependent_named("robot_incompatibilities", product_pairs.len(), product_names),
            ],
        )?;

        if self
            .repos
            .prices
            .find_robot_price(id)
            .await
            .map_err(storage)?
            .is_some()
        {
            self.repos.prices.delete_robot_price(id).await.map_err(storage)?;
        }
        self.repos.catalog.delete_robot(id).await.map_err(storage)
    }

    async fn checked_robot(&self, robot: NewRobot) -> Result<NewRobot, FpackError> {
        if robot.payload < 0 || robot.range < 0 {
            return Err(FpackError::Validation {
                message: "payload and range cannot be negative".to_string(),
            });
        }
        self.require_client(robot.client_id).await?;

        Ok(NewRobot {
            name: validate_text("name", &robot.name, MAX_TEXT_LEN)?,
            reference: validate_text("reference", &robot.reference, MAX_TEXT_LEN)?,
            generation: validate_text("generation", &robot.generation, MAX_TEXT_LEN)?,
            ..robot
        })
    }

    // ===== Incompatibilities =====

    pub async fn add_incompatibility(
        &self,
        first: i32,
        second: i32,
    ) -> Result<Incompatibility, FpackError> {
        let pair = Incompatibility::new(first, second)?;
        self.require_product(pair.product_a).await?;
        self.require_product(pair.product_b).await?;

        self.repos
            .catalog
            .add_incompatibility(&pair)
            .await
            .map_err(storage)?;
        Ok(pair)
    }

    pub async fn remove_incompatibility(&self, first: i32, second: i32) -> Result<(), FpackError> {
        let pair = Incompatibility::new(first, second)?;
        self.repos
            .catalog
            .remove_incompatibility(&pair)
            .await
            .map_err(storage)
    }

    pub async fn list_incompatibilities(&self) -> Result<Vec<Incompatibility>, FpackError> {
        self.repos
            .catalog
            .list_incompatibilities()
            .await
            .map_err(storage)
    }

    /// Products declared incompatible with the given one
    pub async fn incompatible_products(&self, product_id: i32) -> Result<Vec<Product>, FpackError> {
        self.require_product(product_id).await?;

        let pairs = self
            .repos
            .catalog
            .incompatibilities_of(product_id)
            .await
            .map_err(storage)?;

        let mut products = Vec::with_capacity(pairs.len());
        for other in pairs.iter().filter_map(|p| p.other(product_id)) {
            if let Some(product) = self.repos.catalog.find_product(other).await.map_err(storage)? {
                products.push(product);
            }
        }
        Ok(products)
    }

    // ===== Shared =====

    /// Dependent entry naming the templates owning the given columns
    pub(super) async fn template_dependent(
        &self,
        columns: &[TemplateColumn],
    ) -> Result<Dependent, FpackError> {
        let mut names = Vec::with_capacity(columns.len());
        for column in columns {
            if let Some(template) = self
                .repos
                .templates
                .find_template(column.template_id)
                .await
                .map_err(storage)?
            {
                names.push(template.name);
            }
        }
        Ok(dependent_named("template_columns", columns.len(), names))
    }
}
