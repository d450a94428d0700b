//! REST DTOs with serde derives for HTTP API
//!
//! Kinds travel as their wire names (`produit`, `equipement`, `group`,
//! `robot`) and statuses as `standard` / `optionnel`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Catalog DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierDto {
    pub id: i32,
    #[schema(example = "Schunk")]
    pub name: String,
}

/// Create or rename request for suppliers, clients and groups
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    #[schema(example = "GRP-200-A")]
    pub reference: String,
    pub supplier_id: i32,
    /// Free-text product type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub name: String,
    pub reference: String,
    pub supplier_id: i32,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentDto {
    pub id: i32,
    pub name: String,
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EquipmentRequest {
    pub name: String,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompositionRowDto {
    pub product_id: i32,
    pub quantity: u32,
}

/// Insert a composition row or replace its quantity
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CompositionRowRequest {
    pub product_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RobotDto {
    pub id: i32,
    pub name: String,
    pub reference: String,
    pub generation: String,
    pub client_id: i32,
    pub payload: i32,
    pub range: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RobotRequest {
    pub name: String,
    pub reference: String,
    pub generation: String,
    pub client_id: i32,
    pub payload: i32,
    pub range: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IncompatibilityDto {
    pub product_a: i32,
    pub product_b: i32,
}

/// Robot that must not be fitted with a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RobotIncompatibilityDto {
    pub robot_id: i32,
    pub product_id: i32,
}

/// Declare several products unfit for one robot
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RobotIncompatibilitiesRequest {
    pub product_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchOutcomeDto {
    pub added: usize,
    /// Pairs already declared
    pub skipped: usize,
    pub total: usize,
}

// ===== Price DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PriceDto {
    pub product_id: i32,
    pub client_id: i32,
    #[schema(value_type = String, example = "12.00")]
    pub unit_price: Decimal,
    #[schema(value_type = String, example = "1.50")]
    pub unit_transport: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RobotPriceDto {
    pub robot_id: i32,
    pub reference: String,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub unit_transport: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Price values shared by product and robot prices
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PriceRequest {
    #[schema(value_type = String, example = "12.00")]
    pub unit_price: Decimal,
    #[schema(value_type = String, example = "1.50")]
    #[serde(default)]
    pub unit_transport: Decimal,
    #[serde(default)]
    pub comment: Option<String>,
}

// ===== Group DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GroupItemDto {
    pub id: i32,
    pub group_id: i32,
    #[serde(rename = "type")]
    #[schema(example = "produit")]
    pub kind: String,
    pub ref_id: i32,
    #[schema(example = "standard")]
    pub status: String,
    /// Display label of the referenced item
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GroupItemRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub ref_id: i32,
    /// Defaults to `optionnel`
    #[serde(default)]
    pub status: Option<String>,
}

// ===== Template DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateDto {
    pub id: i32,
    pub name: String,
    pub client_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TemplateRequest {
    pub name: String,
    pub client_id: i32,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColumnDto {
    pub id: i32,
    pub template_id: i32,
    pub order: i32,
    #[serde(rename = "type")]
    #[schema(example = "equipement")]
    pub kind: String,
    pub ref_id: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ColumnRequest {
    pub order: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub ref_id: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkColumnsRequest {
    pub columns: Vec<ColumnRequest>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ColumnOrderDto {
    pub id: i32,
    pub order: i32,
}

/// New order of every column of a template
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReorderColumnsRequest {
    pub columns: Vec<ColumnOrderDto>,
}

/// Column labelled for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ColumnViewDto {
    pub id: i32,
    pub order: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub ref_id: i32,
    pub display_name: String,
    /// Items offered by a group column
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub group_items: Vec<GroupItemDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClearedResponse {
    pub removed: u64,
}

// ===== Project DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GlobalProjectDto {
    pub id: i32,
    #[schema(example = "Ligne biscuits 2025")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_project: Option<String>,
    pub client_id: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GlobalProjectRequest {
    pub name: String,
    #[serde(default)]
    pub sub_project: Option<String>,
    pub client_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectProgressDto {
    pub project_id: i32,
    pub name: String,
    pub template_id: i32,
    pub selection_count: usize,
    pub expected_groups: usize,
    pub complete: bool,
    #[schema(value_type = String, example = "66.7")]
    pub progress_percent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GlobalProjectStatsDto {
    pub project_count: usize,
    pub complete_count: usize,
    pub in_progress_count: usize,
    pub total_groups: usize,
    pub total_selections: usize,
    #[schema(value_type = String, example = "50.0")]
    pub progress_percent: Decimal,
    pub projects: Vec<ProjectProgressDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectDto {
    pub id: i32,
    pub name: String,
    pub template_id: i32,
    pub client_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProjectRequest {
    pub name: String,
    pub template_id: i32,
    pub client_id: i32,
    /// Global project grouping this one
    #[serde(default)]
    pub global_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectionDto {
    pub project_id: i32,
    pub group_id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub ref_id: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SelectionRequest {
    pub group_id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub ref_id: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateSelectionRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub ref_id: i32,
}

// ===== Error DTOs =====

/// Relation blocking a deletion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DependentDto {
    pub relation: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub names: Vec<String>,
}
