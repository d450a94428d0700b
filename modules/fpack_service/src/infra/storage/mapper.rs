//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{
    client, composition, equipment, global_project, group, group_item, incompatibility, price,
    product, project, robot, robot_incompatibility, robot_price, selection, supplier, template,
    template_column,
};
use crate::contract::{
    Client, CompositionRow, Equipment, GlobalProject, Group, GroupItem, Incompatibility,
    NewColumn, NewEquipment, NewGlobalProject, NewGroupItem, NewProduct, NewProject, NewRobot,
    NewTemplate, Price, Product, Project, Robot, RobotIncompatibility, RobotPrice, Selection,
    Supplier, Template, TemplateColumn,
};
use sea_orm::ActiveValue::{NotSet, Set};

// ===== Catalog =====

impl From<supplier::Model> for Supplier {
    fn from(entity: supplier::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

impl From<client::Model> for Client {
    fn from(entity: client::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

impl From<product::Model> for Product {
    fn from(entity: product::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            reference: entity.reference,
            supplier_id: entity.supplier_id,
            kind: entity.kind,
            description: entity.description,
        }
    }
}

impl From<&NewProduct> for product::ActiveModel {
    fn from(model: &NewProduct) -> Self {
        Self {
            id: NotSet,
            name: Set(model.name.clone()),
            reference: Set(model.reference.clone()),
            supplier_id: Set(model.supplier_id),
            kind: Set(model.kind.clone()),
            description: Set(model.description.clone()),
        }
    }
}

impl From<&Product> for product::ActiveModel {
    fn from(model: &Product) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            reference: Set(model.reference.clone()),
            supplier_id: Set(model.supplier_id),
            kind: Set(model.kind.clone()),
            description: Set(model.description.clone()),
        }
    }
}

impl From<equipment::Model> for Equipment {
    fn from(entity: equipment::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            reference: entity.reference,
        }
    }
}

impl From<&NewEquipment> for equipment::ActiveModel {
    fn from(model: &NewEquipment) -> Self {
        Self {
            id: NotSet,
            name: Set(model.name.clone()),
            reference: Set(model.reference.clone()),
        }
    }
}

impl From<&Equipment> for equipment::ActiveModel {
    fn from(model: &Equipment) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            reference: Set(model.reference.clone()),
        }
    }
}

impl TryFrom<composition::Model> for CompositionRow {
    type Error = anyhow::Error;

    fn try_from(entity: composition::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            equipment_id: entity.equipment_id,
            product_id: entity.product_id,
            quantity: u32::try_from(entity.quantity)?,
        })
    }
}

impl TryFrom<&CompositionRow> for composition::ActiveModel {
    type Error = anyhow::Error;

    fn try_from(model: &CompositionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            equipment_id: Set(model.equipment_id),
            product_id: Set(model.product_id),
            quantity: Set(i32::try_from(model.quantity)?),
        })
    }
}

impl From<robot::Model> for Robot {
    fn from(entity: robot::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            reference: entity.reference,
            generation: entity.generation,
            client_id: entity.client_id,
            payload: entity.payload,
            range: entity.range,
        }
    }
}

impl From<&NewRobot> for robot::ActiveModel {
    fn from(model: &NewRobot) -> Self {
        Self {
            id: NotSet,
            name: Set(model.name.clone()),
            reference: Set(model.reference.clone()),
            generation: Set(model.generation.clone()),
            client_id: Set(model.client_id),
            payload: Set(model.payload),
            range: Set(model.range),
        }
    }
}

impl From<&Robot> for robot::ActiveModel {
    fn from(model: &Robot) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            reference: Set(model.reference.clone()),
            generation: Set(model.generation.clone()),
            client_id: Set(model.client_id),
            payload: Set(model.payload),
            range: Set(model.range),
        }
    }
}

impl From<incompatibility::Model> for Incompatibility {
    fn from(entity: incompatibility::Model) -> Self {
        Self {
            product_a: entity.product_a,
            product_b: entity.product_b,
        }
    }
}

impl From<&Incompatibility> for incompatibility::ActiveModel {
    fn from(model: &Incompatibility) -> Self {
        Self {
            product_a: Set(model.product_a),
            product_b: Set(model.product_b),
        }
    }
}

impl From<robot_incompatibility::Model> for RobotIncompatibility {
    fn from(entity: robot_incompatibility::Model) -> Self {
        Self {
            robot_id: entity.robot_id,
            product_id: entity.product_id,
        }
    }
}

impl From<&RobotIncompatibility> for robot_incompatibility::ActiveModel {
    fn from(model: &RobotIncompatibility) -> Self {
        Self {
            robot_id: Set(model.robot_id),
            product_id: Set(model.product_id),
        }
    }
}

// ===== Prices =====

impl From<price::Model> for Price {
    fn from(entity: price::Model) -> Self {
        Self {
            product_id: entity.product_id,
            client_id: entity.client_id,
            unit_price: entity.unit_price,
            unit_transport: entity.unit_transport,
            comment: entity.comment,
        }
    }
}

impl From<&Price> for price::ActiveModel {
    fn from(model: &Price) -> Self {
        Self {
            product_id: Set(model.product_id),
            client_id: Set(model.client_id),
            unit_price: Set(model.unit_price),
            unit_transport: Set(model.unit_transport),
            comment: Set(model.comment.clone()),
        }
    }
}

impl From<robot_price::Model> for RobotPrice {
    fn from(entity: robot_price::Model) -> Self {
        Self {
            robot_id: entity.robot_id,
            reference: entity.reference,
            unit_price: entity.unit_price,
            unit_transport: entity.unit_transport,
            comment: entity.comment,
        }
    }
}

impl From<&RobotPrice> for robot_price::ActiveModel {
    fn from(model: &RobotPrice) -> Self {
        Self {
            robot_id: Set(model.robot_id),
            reference: Set(model.reference.clone()),
            unit_price: Set(model.unit_price),
            unit_transport: Set(model.unit_transport),
            comment: Set(model.comment.clone()),
        }
    }
}

// ===== Groups =====

impl From<group::Model> for Group {
    fn from(entity: group::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

impl TryFrom<group_item::Model> for GroupItem {
    type Error = anyhow::Error;

    fn try_from(entity: group_item::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            group_id: entity.group_id,
            kind: entity.kind.parse()?,
            ref_id: entity.ref_id,
            status: entity.status.parse()?,
        })
    }
}

impl From<&NewGroupItem> for group_item::ActiveModel {
    fn from(model: &NewGroupItem) -> Self {
        Self {
            id: NotSet,
            group_id: Set(model.group_id),
            kind: Set(model.kind.as_str().to_string()),
            ref_id: Set(model.ref_id),
            status: Set(model.status.as_str().to_string()),
        }
    }
}

// ===== Templates and projects =====

impl From<template::Model> for Template {
    fn from(entity: template::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            client_id: entity.client_id,
            abbreviation: entity.abbreviation,
        }
    }
}

impl From<&NewTemplate> for template::ActiveModel {
    fn from(model: &NewTemplate) -> Self {
        Self {
            id: NotSet,
            name: Set(model.name.clone()),
            client_id: Set(model.client_id),
            abbreviation: Set(model.abbreviation.clone()),
        }
    }
}

impl From<&Template> for template::ActiveModel {
    fn from(model: &Template) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            client_id: Set(model.client_id),
            abbreviation: Set(model.abbreviation.clone()),
        }
    }
}

impl TryFrom<template_column::Model> for TemplateColumn {
    type Error = anyhow::Error;

    fn try_from(entity: template_column::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            template_id: entity.template_id,
            order: entity.position,
            kind: entity.kind.parse()?,
            ref_id: entity.ref_id,
        })
    }
}

impl From<&NewColumn> for template_column::ActiveModel {
    fn from(model: &NewColumn) -> Self {
        Self {
            id: NotSet,
            template_id: Set(model.template_id),
            position: Set(model.order),
            kind: Set(model.kind.as_str().to_string()),
            ref_id: Set(model.ref_id),
        }
    }
}

impl From<&TemplateColumn> for template_column::ActiveModel {
    fn from(model: &TemplateColumn) -> Self {
        Self {
            id: Set(model.id),
            template_id: Set(model.template_id),
            position: Set(model.order),
            kind: Set(model.kind.as_str().to_string()),
            ref_id: Set(model.ref_id),
        }
    }
}

impl From<global_project::Model> for GlobalProject {
    fn from(entity: global_project::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            sub_project: entity.sub_project,
            client_id: entity.client_id,
        }
    }
}

impl From<&NewGlobalProject> for global_project::ActiveModel {
    fn from(model: &NewGlobalProject) -> Self {
        Self {
            id: NotSet,
            name: Set(model.name.clone()),
            sub_project: Set(model.sub_project.clone()),
            client_id: Set(model.client_id),
        }
    }
}

impl From<&GlobalProject> for global_project::ActiveModel {
    fn from(model: &GlobalProject) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            sub_project: Set(model.sub_project.clone()),
            client_id: Set(model.client_id),
        }
    }
}

impl From<project::Model> for Project {
    fn from(entity: project::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            template_id: entity.template_id,
            client_id: entity.client_id,
            global_id: entity.global_id,
        }
    }
}

impl From<&NewProject> for project::ActiveModel {
    fn from(model: &NewProject) -> Self {
        Self {
            id: NotSet,
            name: Set(model.name.clone()),
            template_id: Set(model.template_id),
            client_id: Set(model.client_id),
            global_id: Set(model.global_id),
        }
    }
}

impl From<&Project> for project::ActiveModel {
    fn from(model: &Project) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
            template_id: Set(model.template_id),
            client_id: Set(model.client_id),
            global_id: Set(model.global_id),
        }
    }
}

impl TryFrom<selection::Model> for Selection {
    type Error = anyhow::Error;

    fn try_from(entity: selection::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: entity.project_id,
            group_id: entity.group_id,
            kind: entity.kind.parse()?,
            ref_id: entity.ref_id,
        })
    }
}

impl From<&Selection> for selection::ActiveModel {
    fn from(model: &Selection) -> Self {
        Self {
            project_id: Set(model.project_id),
            group_id: Set(model.group_id),
            kind: Set(model.kind.as_str().to_string()),
            ref_id: Set(model.ref_id),
        }
    }
}
