//! Mapper implementations for converting between DTOs and contract models
//!
//! Outbound conversions are infallible. Inbound ones parse wire names and
//! therefore return `FpackError::Validation` on unknown kinds.

use super::dto::*;
use crate::contract::{
    self, ColumnKind, FpackError, ItemKind, ItemStatus, NewColumn, NewEquipment,
    NewGlobalProject, NewProduct, NewProject, NewRobot, NewTemplate, UnitPrice,
};

// ===== Catalog conversions =====

impl From<contract::Supplier> for SupplierDto {
    fn from(supplier: contract::Supplier) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name,
        }
    }
}

impl From<contract::Client> for ClientDto {
    fn from(client: contract::Client) -> Self {
        Self {
            id: client.id,
            name: client.name,
        }
    }
}

impl From<contract::Product> for ProductDto {
    fn from(product: contract::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            reference: product.reference,
            supplier_id: product.supplier_id,
            kind: product.kind,
            description: product.description,
        }
    }
}

impl From<ProductRequest> for NewProduct {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            reference: req.reference,
            supplier_id: req.supplier_id,
            kind: req.kind,
            description: req.description,
        }
    }
}

impl From<contract::Equipment> for EquipmentDto {
    fn from(equipment: contract::Equipment) -> Self {
        Self {
            id: equipment.id,
            name: equipment.name,
            reference: equipment.reference,
        }
    }
}

impl From<EquipmentRequest> for NewEquipment {
    fn from(req: EquipmentRequest) -> Self {
        Self {
            name: req.name,
            reference: req.reference,
        }
    }
}

impl From<contract::CompositionRow> for CompositionRowDto {
    fn from(row: contract::CompositionRow) -> Self {
        Self {
            product_id: row.product_id,
            quantity: row.quantity,
        }
    }
}

impl From<contract::Robot> for RobotDto {
    fn from(robot: contract::Robot) -> Self {
        Self {
            id: robot.id,
            name: robot.name,
            reference: robot.reference,
            generation: robot.generation,
            client_id: robot.client_id,
            payload: robot.payload,
            range: robot.range,
        }
    }
}

impl From<RobotRequest> for NewRobot {
    fn from(req: RobotRequest) -> Self {
        Self {
            name: req.name,
            reference: req.reference,
            generation: req.generation,
            client_id: req.client_id,
            payload: req.payload,
            range: req.range,
        }
    }
}

impl From<contract::Incompatibility> for IncompatibilityDto {
    fn from(pair: contract::Incompatibility) -> Self {
        Self {
            product_a: pair.product_a,
            product_b: pair.product_b,
        }
    }
}

impl From<contract::RobotIncompatibility> for RobotIncompatibilityDto {
    fn from(pair: contract::RobotIncompatibility) -> Self {
        Self {
            robot_id: pair.robot_id,
            product_id: pair.product_id,
        }
    }
}

impl From<contract::BatchOutcome> for BatchOutcomeDto {
    fn from(outcome: contract::BatchOutcome) -> Self {
        Self {
            added: outcome.added,
            skipped: outcome.skipped,
            total: outcome.total,
        }
    }
}

// ===== Price conversions =====

impl From<contract::Price> for PriceDto {
    fn from(price: contract::Price) -> Self {
        Self {
            product_id: price.product_id,
            client_id: price.client_id,
            unit_price: price.unit_price,
            unit_transport: price.unit_transport,
            comment: price.comment,
        }
    }
}

impl From<contract::RobotPrice> for RobotPriceDto {
    fn from(price: contract::RobotPrice) -> Self {
        Self {
            robot_id: price.robot_id,
            reference: price.reference,
            unit_price: price.unit_price,
            unit_transport: price.unit_transport,
            comment: price.comment,
        }
    }
}

impl From<PriceRequest> for UnitPrice {
    fn from(req: PriceRequest) -> Self {
        Self {
            unit_price: req.unit_price,
            unit_transport: req.unit_transport,
            comment: req.comment,
        }
    }
}

// ===== Group conversions =====

impl From<contract::Group> for GroupDto {
    fn from(group: contract::Group) -> Self {
        Self {
            id: group.id,
            name: group.name,
        }
    }
}

impl From<contract::GroupItemView> for GroupItemDto {
    fn from(view: contract::GroupItemView) -> Self {
        Self {
            id: view.item.id,
            group_id: view.item.group_id,
            kind: view.item.kind.as_str().to_string(),
            ref_id: view.item.ref_id,
            status: view.item.status.as_str().to_string(),
            label: view.label,
        }
    }
}

/// Parse the kind and status of a group item request
pub fn parse_group_item(req: &GroupItemRequest) -> Result<(ItemKind, ItemStatus), FpackError> {
    let kind = req.kind.parse()?;
    let status = match req.status.as_deref() {
        Some(status) => status.parse()?,
        None => ItemStatus::default(),
    };
    Ok((kind, status))
}

// ===== Template conversions =====

impl From<contract::Template> for TemplateDto {
    fn from(template: contract::Template) -> Self {
        Self {
            id: template.id,
            name: template.name,
            client_id: template.client_id,
            abbreviation: template.abbreviation,
        }
    }
}

impl From<TemplateRequest> for NewTemplate {
    fn from(req: TemplateRequest) -> Self {
        Self {
            name: req.name,
            client_id: req.client_id,
            abbreviation: req.abbreviation,
        }
    }
}

impl From<contract::TemplateColumn> for ColumnDto {
    fn from(column: contract::TemplateColumn) -> Self {
        Self {
            id: column.id,
            template_id: column.template_id,
            order: column.order,
            kind: column.kind.as_str().to_string(),
            ref_id: column.ref_id,
        }
    }
}

impl From<contract::ColumnView> for ColumnViewDto {
    fn from(view: contract::ColumnView) -> Self {
        Self {
            id: view.column.id,
            order: view.column.order,
            kind: view.column.kind.as_str().to_string(),
            ref_id: view.column.ref_id,
            display_name: view.display_name,
            group_items: view.group_items.into_iter().map(Into::into).collect(),
        }
    }
}

impl ColumnRequest {
    /// Column kind parsed from its wire name
    pub fn column_kind(&self) -> Result<ColumnKind, FpackError> {
        self.kind.parse()
    }

    pub fn into_new_column(self, template_id: i32) -> Result<NewColumn, FpackError> {
        Ok(NewColumn {
            template_id,
            order: self.order,
            kind: self.column_kind()?,
            ref_id: self.ref_id,
        })
    }
}

// ===== Project conversions =====

impl From<contract::GlobalProject> for GlobalProjectDto {
    fn from(project: contract::GlobalProject) -> Self {
        Self {
            id: project.id,
            name: project.name,
            sub_project: project.sub_project,
            client_id: project.client_id,
        }
    }
}

impl From<GlobalProjectRequest> for NewGlobalProject {
    fn from(req: GlobalProjectRequest) -> Self {
        Self {
            name: req.name,
            sub_project: req.sub_project,
            client_id: req.client_id,
        }
    }
}

impl From<contract::ProjectProgress> for ProjectProgressDto {
    fn from(progress: contract::ProjectProgress) -> Self {
        Self {
            project_id: progress.project_id,
            name: progress.name,
            template_id: progress.template_id,
            selection_count: progress.selection_count,
            expected_groups: progress.expected_groups,
            complete: progress.complete,
            progress_percent: progress.progress_percent,
        }
    }
}

impl From<contract::GlobalProjectStats> for GlobalProjectStatsDto {
    fn from(stats: contract::GlobalProjectStats) -> Self {
        Self {
            project_count: stats.project_count,
            complete_count: stats.complete_count,
            in_progress_count: stats.in_progress_count,
            total_groups: stats.total_groups,
            total_selections: stats.total_selections,
            progress_percent: stats.progress_percent,
            projects: stats.projects.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::Project> for ProjectDto {
    fn from(project: contract::Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            template_id: project.template_id,
            client_id: project.client_id,
            global_id: project.global_id,
        }
    }
}

impl From<ProjectRequest> for NewProject {
    fn from(req: ProjectRequest) -> Self {
        Self {
            name: req.name,
            template_id: req.template_id,
            client_id: req.client_id,
            global_id: req.global_id,
        }
    }
}

impl From<contract::Selection> for SelectionDto {
    fn from(selection: contract::Selection) -> Self {
        Self {
            project_id: selection.project_id,
            group_id: selection.group_id,
            kind: selection.kind.as_str().to_string(),
            ref_id: selection.ref_id,
        }
    }
}

// ===== Error conversions =====

impl From<contract::Dependent> for DependentDto {
    fn from(dependent: contract::Dependent) -> Self {
        Self {
            relation: dependent.relation,
            count: dependent.count,
            names: dependent.names,
        }
    }
}
