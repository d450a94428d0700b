//! Contract models for the F-Pack service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! Catalog and configuration records carry no serde derives; the REST layer
//! owns its own DTOs. Kinds serialize to their wire names because quotes
//! embed them.

use super::error::FpackError;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ===== Catalog =====

/// Product supplier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    pub id: i32,
    pub name: String,
}

/// Client owning robots, templates and a product price table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i32,
    pub name: String,
}

/// Leaf priceable unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub reference: String,
    pub supplier_id: i32,
    /// Free-text product type
    pub kind: Option<String>,
    pub description: Option<String>,
}

/// Product fields accepted on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub reference: String,
    pub supplier_id: i32,
    pub kind: Option<String>,
    pub description: Option<String>,
}

/// Equipment is priced only through its composition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEquipment {
    pub name: String,
    pub reference: String,
}

/// One bill-of-materials row of an equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionRow {
    pub equipment_id: i32,
    pub product_id: i32,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robot {
    pub id: i32,
    pub name: String,
    pub reference: String,
    pub generation: String,
    /// Owning client
    pub client_id: i32,
    pub payload: i32,
    pub range: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRobot {
    pub name: String,
    pub reference: String,
    pub generation: String,
    pub client_id: i32,
    pub payload: i32,
    pub range: i32,
}

/// Two products that must not be configured together.
///
/// Stored normalized: `product_a < product_b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Incompatibility {
    pub product_a: i32,
    pub product_b: i32,
}

impl Incompatibility {
    /// Build a normalized pair, rejecting a product paired with itself
    pub fn new(first: i32, second: i32) -> Result<Self, FpackError> {
        if first == second {
            return Err(FpackError::Validation {
                message: format!("product {} cannot be incompatible with itself", first),
            });
        }
        Ok(Self {
            product_a: first.min(second),
            product_b: first.max(second),
        })
    }

    /// The other side of the pair, if `product_id` is part of it
    pub fn other(&self, product_id: i32) -> Option<i32> {
        if self.product_a == product_id {
            Some(self.product_b)
        } else if self.product_b == product_id {
            Some(self.product_a)
        } else {
            None
        }
    }
}

/// Robot that must not be fitted with a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobotIncompatibility {
    pub robot_id: i32,
    pub product_id: i32,
}

/// Result of declaring several robot incompatibilities at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub added: usize,
    /// Pairs already declared
    pub skipped: usize,
    pub total: usize,
}

// ===== Prices =====

/// Price of a product for one client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    pub product_id: i32,
    pub client_id: i32,
    pub unit_price: Decimal,
    pub unit_transport: Decimal,
    pub comment: Option<String>,
}

/// Price of a robot. Keyed by robot only: the robot already belongs to one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotPrice {
    pub robot_id: i32,
    pub reference: String,
    pub unit_price: Decimal,
    pub unit_transport: Decimal,
    pub comment: Option<String>,
}

/// Price components shared by product and robot prices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPrice {
    pub unit_price: Decimal,
    pub unit_transport: Decimal,
    pub comment: Option<String>,
}

impl From<Price> for UnitPrice {
    fn from(price: Price) -> Self {
        Self {
            unit_price: price.unit_price,
            unit_transport: price.unit_transport,
            comment: price.comment,
        }
    }
}

impl From<RobotPrice> for UnitPrice {
    fn from(price: RobotPrice) -> Self {
        Self {
            unit_price: price.unit_price,
            unit_transport: price.unit_transport,
            comment: price.comment,
        }
    }
}

// ===== Groups =====

/// Named set of interchangeable items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupItem {
    pub id: i32,
    pub group_id: i32,
    pub kind: ItemKind,
    pub ref_id: i32,
    pub status: ItemStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroupItem {
    pub group_id: i32,
    pub kind: ItemKind,
    pub ref_id: i32,
    pub status: ItemStatus,
}

// ===== Templates and projects =====

/// F-Pack template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: i32,
    pub name: String,
    pub client_id: i32,
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTemplate {
    pub name: String,
    pub client_id: i32,
    pub abbreviation: Option<String>,
}

/// One slot of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateColumn {
    pub id: i32,
    pub template_id: i32,
    /// Position within the template, unique per template
    pub order: i32,
    pub kind: ColumnKind,
    pub ref_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewColumn {
    pub template_id: i32,
    pub order: i32,
    pub kind: ColumnKind,
    pub ref_id: i32,
}

/// Template column enriched for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub column: TemplateColumn,
    pub display_name: String,
    /// Items offered by a group column; empty for other kinds
    pub group_items: Vec<GroupItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupItemView {
    pub item: GroupItem,
    pub label: String,
}

/// Client project grouping several template instances
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalProject {
    pub id: i32,
    pub name: String,
    pub sub_project: Option<String>,
    pub client_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGlobalProject {
    pub name: String,
    pub sub_project: Option<String>,
    pub client_id: i32,
}

/// Template instantiated for a client project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub template_id: i32,
    pub client_id: i32,
    /// Global project this instance belongs to
    pub global_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub template_id: i32,
    pub client_id: i32,
    pub global_id: Option<i32>,
}

/// Selection progress of one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectProgress {
    pub project_id: i32,
    pub name: String,
    pub template_id: i32,
    /// Distinct groups of the template holding a selection
    pub selection_count: usize,
    /// Distinct groups the template asks a choice for
    pub expected_groups: usize,
    /// Every expected group is selected; a template without groups is never complete
    pub complete: bool,
    /// Percentage with one decimal place
    pub progress_percent: Decimal,
}

/// Completion statistics of a global project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalProjectStats {
    pub project_count: usize,
    pub complete_count: usize,
    pub in_progress_count: usize,
    pub total_groups: usize,
    pub total_selections: usize,
    pub progress_percent: Decimal,
    pub projects: Vec<ProjectProgress>,
}

/// Item chosen by a project for one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub project_id: i32,
    pub group_id: i32,
    pub kind: ItemKind,
    pub ref_id: i32,
}

// ===== Kinds =====

/// What a template column points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKind {
    Product,
    Equipment,
    Group,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "produit",
            Self::Equipment => "equipement",
            Self::Group => "group",
        }
    }
}

impl FromStr for ColumnKind {
    type Err = FpackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "produit" => Ok(Self::Product),
            "equipement" => Ok(Self::Equipment),
            "group" => Ok(Self::Group),
            other => Err(FpackError::Validation {
                message: format!("unknown column type '{}'", other),
            }),
        }
    }
}

impl Serialize for ColumnKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a group item or selection points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
    Product,
    Equipment,
    Robot,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "produit",
            Self::Equipment => "equipement",
            Self::Robot => "robot",
        }
    }
}

impl FromStr for ItemKind {
    type Err = FpackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "produit" => Ok(Self::Product),
            "equipement" => Ok(Self::Equipment),
            "robot" => Ok(Self::Robot),
            other => Err(FpackError::Validation {
                message: format!("unknown item type '{}'", other),
            }),
        }
    }
}

impl Serialize for ItemKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default-selection flag of a group item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemStatus {
    Standard,
    #[default]
    Optional,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Optional => "optionnel",
        }
    }
}

impl FromStr for ItemStatus {
    type Err = FpackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "optionnel" => Ok(Self::Optional),
            other => Err(FpackError::Validation {
                message: format!("unknown item status '{}'", other),
            }),
        }
    }
}
