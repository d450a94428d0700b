//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
    mapper::parse_group_item,
};
use crate::contract::{FpackError, GlobalQuote, ItemKind, Quote};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

type Svc = Extension<Arc<Service>>;

fn created<T>(value: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(value))
}

fn item_kind(kind: &str) -> Result<ItemKind, Problem> {
    kind.parse().map_err(map_domain_error)
}

// ===== Supplier Handlers =====

pub async fn list_suppliers(Extension(service): Svc) -> Result<Json<Vec<SupplierDto>>, Problem> {
    let suppliers = service.list_suppliers().await.map_err(map_domain_error)?;
    Ok(Json(suppliers.into_iter().map(Into::into).collect()))
}

pub async fn create_supplier(
    Extension(service): Svc,
    Json(req): Json<NameRequest>,
) -> Result<(StatusCode, Json<SupplierDto>), Problem> {
    let supplier = service
        .create_supplier(&req.name)
        .await
        .map_err(map_domain_error)?;
    Ok(created(supplier.into()))
}

pub async fn get_supplier(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<SupplierDto>, Problem> {
    let supplier = service.get_supplier(id).await.map_err(map_domain_error)?;
    Ok(Json(supplier.into()))
}

pub async fn delete_supplier(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_supplier(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Client Handlers =====

pub async fn list_clients(Extension(service): Svc) -> Result<Json<Vec<ClientDto>>, Problem> {
    let clients = service.list_clients().await.map_err(map_domain_error)?;
    Ok(Json(clients.into_iter().map(Into::into).collect()))
}

pub async fn create_client(
    Extension(service): Svc,
    Json(req): Json<NameRequest>,
) -> Result<(StatusCode, Json<ClientDto>), Problem> {
    let client = service
        .create_client(&req.name)
        .await
        .map_err(map_domain_error)?;
    Ok(created(client.into()))
}

pub async fn get_client(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<ClientDto>, Problem> {
    let client = service.get_client(id).await.map_err(map_domain_error)?;
    Ok(Json(client.into()))
}

pub async fn rename_client(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<NameRequest>,
) -> Result<Json<ClientDto>, Problem> {
    let client = service
        .rename_client(id, &req.name)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(client.into()))
}

pub async fn delete_client(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_client(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn client_prices(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Vec<PriceDto>>, Problem> {
    let prices = service.client_prices(id).await.map_err(map_domain_error)?;
    Ok(Json(prices.into_iter().map(Into::into).collect()))
}

// ===== Product Handlers =====

pub async fn list_products(Extension(service): Svc) -> Result<Json<Vec<ProductDto>>, Problem> {
    let products = service.list_products().await.map_err(map_domain_error)?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

pub async fn create_product(
    Extension(service): Svc,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductDto>), Problem> {
    let product = service
        .create_product(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(created(product.into()))
}

pub async fn get_product(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<ProductDto>, Problem> {
    let product = service.get_product(id).await.map_err(map_domain_error)?;
    Ok(Json(product.into()))
}

pub async fn update_product(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<ProductDto>, Problem> {
    let product = service
        .update_product(id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(product.into()))
}

pub async fn duplicate_product(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<ProductDto>), Problem> {
    let product = service
        .duplicate_product(id)
        .await
        .map_err(map_domain_error)?;
    Ok(created(product.into()))
}

pub async fn delete_product(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_product(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn incompatible_products(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ProductDto>>, Problem> {
    let products = service
        .incompatible_products(id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

// ===== Equipment Handlers =====

pub async fn list_equipment(Extension(service): Svc) -> Result<Json<Vec<EquipmentDto>>, Problem> {
    let equipment = service.list_equipment().await.map_err(map_domain_error)?;
    Ok(Json(equipment.into_iter().map(Into::into).collect()))
}

pub async fn create_equipment(
    Extension(service): Svc,
    Json(req): Json<EquipmentRequest>,
) -> Result<(StatusCode, Json<EquipmentDto>), Problem> {
    let equipment = service
        .create_equipment(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(created(equipment.into()))
}

pub async fn get_equipment(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<EquipmentDto>, Problem> {
    let equipment = service.get_equipment(id).await.map_err(map_domain_error)?;
    Ok(Json(equipment.into()))
}

pub async fn update_equipment(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<EquipmentRequest>,
) -> Result<Json<EquipmentDto>, Problem> {
    let equipment = service
        .update_equipment(id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(equipment.into()))
}

pub async fn delete_equipment(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_equipment(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_composition(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Vec<CompositionRowDto>>, Problem> {
    let rows = service.get_composition(id).await.map_err(map_domain_error)?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

pub async fn set_composition_row(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<CompositionRowRequest>,
) -> Result<Json<CompositionRowDto>, Problem> {
    let row = service
        .set_composition_row(id, req.product_id, req.quantity)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(row.into()))
}

pub async fn remove_composition_row(
    Extension(service): Svc,
    Path((id, product_id)): Path<(i32, i32)>,
) -> Result<StatusCode, Problem> {
    service
        .remove_composition_row(id, product_id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_composition(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<ClearedResponse>, Problem> {
    let removed = service
        .clear_composition(id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(ClearedResponse { removed }))
}

// ===== Robot Handlers =====

pub async fn list_robots(Extension(service): Svc) -> Result<Json<Vec<RobotDto>>, Problem> {
    let robots = service.list_robots().await.map_err(map_domain_error)?;
    Ok(Json(robots.into_iter().map(Into::into).collect()))
}

pub async fn create_robot(
    Extension(service): Svc,
    Json(req): Json<RobotRequest>,
) -> Result<(StatusCode, Json<RobotDto>), Problem> {
    let robot = service
        .create_robot(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(created(robot.into()))
}

pub async fn get_robot(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<RobotDto>, Problem> {
    let robot = service.get_robot(id).await.map_err(map_domain_error)?;
    Ok(Json(robot.into()))
}

pub async fn update_robot(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<RobotRequest>,
) -> Result<Json<RobotDto>, Problem> {
    let robot = service
        .update_robot(id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(robot.into()))
}

pub async fn delete_robot(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_robot(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Incompatibility Handlers =====

pub async fn list_incompatibilities(
    Extension(service): Svc,
) -> Result<Json<Vec<IncompatibilityDto>>, Problem> {
    let pairs = service
        .list_incompatibilities()
        .await
        .map_err(map_domain_error)?;
    Ok(Json(pairs.into_iter().map(Into::into).collect()))
}

pub async fn add_incompatibility(
    Extension(service): Svc,
    Json(req): Json<IncompatibilityDto>,
) -> Result<(StatusCode, Json<IncompatibilityDto>), Problem> {
    let pair = service
        .add_incompatibility(req.product_a, req.product_b)
        .await
        .map_err(map_domain_error)?;
    Ok(created(pair.into()))
}

pub async fn remove_incompatibility(
    Extension(service): Svc,
    Path((product_a, product_b)): Path<(i32, i32)>,
) -> Result<StatusCode, Problem> {
    service
        .remove_incompatibility(product_a, product_b)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Robot Incompatibility Handlers =====

pub async fn list_robot_incompatibilities(
    Extension(service): Svc,
) -> Result<Json<Vec<RobotIncompatibilityDto>>, Problem> {
    let pairs = service
        .list_robot_incompatibilities()
        .await
        .map_err(map_domain_error)?;
    Ok(Json(pairs.into_iter().map(Into::into).collect()))
}

pub async fn add_robot_incompatibility(
    Extension(service): Svc,
    Json(req): Json<RobotIncompatibilityDto>,
) -> Result<(StatusCode, Json<RobotIncompatibilityDto>), Problem> {
    let pair = service
        .add_robot_incompatibility(req.robot_id, req.product_id)
        .await
        .map_err(map_domain_error)?;
    Ok(created(pair.into()))
}

pub async fn remove_robot_incompatibility(
    Extension(service): Svc,
    Path((robot_id, product_id)): Path<(i32, i32)>,
) -> Result<StatusCode, Problem> {
    service
        .remove_robot_incompatibility(robot_id, product_id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn robot_incompatible_products(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ProductDto>>, Problem> {
    let products = service
        .robot_incompatible_products(id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

pub async fn add_robot_incompatibilities(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<RobotIncompatibilitiesRequest>,
) -> Result<(StatusCode, Json<BatchOutcomeDto>), Problem> {
    let outcome = service
        .add_robot_incompatibilities(id, &req.product_ids)
        .await
        .map_err(map_domain_error)?;
    Ok(created(outcome.into()))
}

pub async fn clear_robot_incompatibilities(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<ClearedResponse>, Problem> {
    let removed = service
        .clear_robot_incompatibilities(id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(ClearedResponse { removed }))
}

pub async fn product_incompatible_robots(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Vec<RobotDto>>, Problem> {
    let robots = service
        .product_incompatible_robots(id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(robots.into_iter().map(Into::into).collect()))
}

// ===== Price Handlers =====

pub async fn list_prices(Extension(service): Svc) -> Result<Json<Vec<PriceDto>>, Problem> {
    let prices = service.list_prices().await.map_err(map_domain_error)?;
    Ok(Json(prices.into_iter().map(Into::into).collect()))
}

pub async fn get_price(
    Extension(service): Svc,
    Path((product_id, client_id)): Path<(i32, i32)>,
) -> Result<Json<PriceDto>, Problem> {
    let price = service
        .get_price(product_id, client_id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(price.into()))
}

pub async fn create_price(
    Extension(service): Svc,
    Path((product_id, client_id)): Path<(i32, i32)>,
    Json(req): Json<PriceRequest>,
) -> Result<(StatusCode, Json<PriceDto>), Problem> {
    let price = service
        .create_price(product_id, client_id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(created(price.into()))
}

pub async fn update_price(
    Extension(service): Svc,
    Path((product_id, client_id)): Path<(i32, i32)>,
    Json(req): Json<PriceRequest>,
) -> Result<Json<PriceDto>, Problem> {
    let price = service
        .update_price(product_id, client_id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(price.into()))
}

pub async fn delete_price(
    Extension(service): Svc,
    Path((product_id, client_id)): Path<(i32, i32)>,
) -> Result<StatusCode, Problem> {
    service
        .delete_price(product_id, client_id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_robot_prices(
    Extension(service): Svc,
) -> Result<Json<Vec<RobotPriceDto>>, Problem> {
    let prices = service.list_robot_prices().await.map_err(map_domain_error)?;
    Ok(Json(prices.into_iter().map(Into::into).collect()))
}

pub async fn get_robot_price(
    Extension(service): Svc,
    Path(robot_id): Path<i32>,
) -> Result<Json<RobotPriceDto>, Problem> {
    let price = service
        .get_robot_price(robot_id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(price.into()))
}

pub async fn create_robot_price(
    Extension(service): Svc,
    Path(robot_id): Path<i32>,
    Json(req): Json<PriceRequest>,
) -> Result<(StatusCode, Json<RobotPriceDto>), Problem> {
    let price = service
        .create_robot_price(robot_id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(created(price.into()))
}

pub async fn update_robot_price(
    Extension(service): Svc,
    Path(robot_id): Path<i32>,
    Json(req): Json<PriceRequest>,
) -> Result<Json<RobotPriceDto>, Problem> {
    let price = service
        .update_robot_price(robot_id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(price.into()))
}

pub async fn delete_robot_price(
    Extension(service): Svc,
    Path(robot_id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service
        .delete_robot_price(robot_id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Group Handlers =====

pub async fn list_groups(Extension(service): Svc) -> Result<Json<Vec<GroupDto>>, Problem> {
    let groups = service.list_groups().await.map_err(map_domain_error)?;
    Ok(Json(groups.into_iter().map(Into::into).collect()))
}

pub async fn create_group(
    Extension(service): Svc,
    Json(req): Json<NameRequest>,
) -> Result<(StatusCode, Json<GroupDto>), Problem> {
    let group = service
        .create_group(&req.name)
        .await
        .map_err(map_domain_error)?;
    Ok(created(group.into()))
}

pub async fn get_group(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<GroupDto>, Problem> {
    let group = service.get_group(id).await.map_err(map_domain_error)?;
    Ok(Json(group.into()))
}

pub async fn rename_group(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<NameRequest>,
) -> Result<Json<GroupDto>, Problem> {
    let group = service
        .rename_group(id, &req.name)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(group.into()))
}

pub async fn delete_group(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_group(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_group_items(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Vec<GroupItemDto>>, Problem> {
    let items = service.group_items(id).await.map_err(map_domain_error)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub async fn add_group_item(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<GroupItemRequest>,
) -> Result<(StatusCode, Json<GroupItemDto>), Problem> {
    let (kind, status) = parse_group_item(&req).map_err(map_domain_error)?;
    let item = service
        .add_group_item(id, kind, req.ref_id, status)
        .await
        .map_err(map_domain_error)?;

    // Respond with the labelled view of the new item
    let view = service
        .group_items(id)
        .await
        .map_err(map_domain_error)?
        .into_iter()
        .find(|v| v.item.id == item.id)
        .ok_or_else(|| map_domain_error(FpackError::not_found("group item", item.id)))?;
    Ok(created(view.into()))
}

pub async fn remove_group_item(
    Extension(service): Svc,
    Path((id, item_id)): Path<(i32, i32)>,
) -> Result<StatusCode, Problem> {
    service
        .remove_group_item(id, item_id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Template Handlers =====

pub async fn list_templates(Extension(service): Svc) -> Result<Json<Vec<TemplateDto>>, Problem> {
    let templates = service.list_templates().await.map_err(map_domain_error)?;
    Ok(Json(templates.into_iter().map(Into::into).collect()))
}

pub async fn create_template(
    Extension(service): Svc,
    Json(req): Json<TemplateRequest>,
) -> Result<(StatusCode, Json<TemplateDto>), Problem> {
    let template = service
        .create_template(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(created(template.into()))
}

pub async fn get_template(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<TemplateDto>, Problem> {
    let template = service.get_template(id).await.map_err(map_domain_error)?;
    Ok(Json(template.into()))
}

pub async fn update_template(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<TemplateDto>, Problem> {
    let template = service
        .update_template(id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(template.into()))
}

pub async fn delete_template(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_template(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn duplicate_template(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<TemplateDto>), Problem> {
    let template = service
        .duplicate_template(id)
        .await
        .map_err(map_domain_error)?;
    Ok(created(template.into()))
}

/// Query parameters of a template-level quote
#[derive(Debug, Deserialize)]
pub struct TemplateQuoteQuery {
    pub client_id: i32,
}

pub async fn quote_template(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Query(query): Query<TemplateQuoteQuery>,
) -> Result<Json<Quote>, Problem> {
    let quote = service
        .quote_template(id, query.client_id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(quote))
}

// ===== Column Handlers =====

pub async fn list_columns(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ColumnDto>>, Problem> {
    let columns = service.list_columns(id).await.map_err(map_domain_error)?;
    Ok(Json(columns.into_iter().map(Into::into).collect()))
}

pub async fn column_views(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ColumnViewDto>>, Problem> {
    let views = service.column_views(id).await.map_err(map_domain_error)?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}

pub async fn add_column(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<ColumnRequest>,
) -> Result<(StatusCode, Json<ColumnDto>), Problem> {
    let kind = req.column_kind().map_err(map_domain_error)?;
    let column = service
        .add_column(id, req.order, kind, req.ref_id)
        .await
        .map_err(map_domain_error)?;
    Ok(created(column.into()))
}

pub async fn add_columns(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<BulkColumnsRequest>,
) -> Result<(StatusCode, Json<Vec<ColumnDto>>), Problem> {
    let columns = req
        .columns
        .into_iter()
        .map(|c| c.into_new_column(id))
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_domain_error)?;
    let created_columns = service
        .add_columns(id, columns)
        .await
        .map_err(map_domain_error)?;
    Ok(created(created_columns.into_iter().map(Into::into).collect()))
}

pub async fn reorder_columns(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<ReorderColumnsRequest>,
) -> Result<Json<Vec<ColumnDto>>, Problem> {
    let orders = req.columns.iter().map(|c| (c.id, c.order)).collect();
    let columns = service
        .reorder_columns(id, orders)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(columns.into_iter().map(Into::into).collect()))
}

pub async fn clear_columns(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<ClearedResponse>, Problem> {
    let removed = service.clear_columns(id).await.map_err(map_domain_error)?;
    Ok(Json(ClearedResponse { removed }))
}

pub async fn get_column(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<ColumnDto>, Problem> {
    let column = service.get_column(id).await.map_err(map_domain_error)?;
    Ok(Json(column.into()))
}

pub async fn update_column(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<ColumnRequest>,
) -> Result<Json<ColumnDto>, Problem> {
    let kind = req.column_kind().map_err(map_domain_error)?;
    let column = service
        .update_column(id, req.order, kind, req.ref_id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(column.into()))
}

pub async fn delete_column(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_column(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Global Project Handlers =====

pub async fn list_global_projects(
    Extension(service): Svc,
) -> Result<Json<Vec<GlobalProjectDto>>, Problem> {
    let projects = service
        .list_global_projects()
        .await
        .map_err(map_domain_error)?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

pub async fn create_global_project(
    Extension(service): Svc,
    Json(req): Json<GlobalProjectRequest>,
) -> Result<(StatusCode, Json<GlobalProjectDto>), Problem> {
    let project = service
        .create_global_project(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(created(project.into()))
}

pub async fn get_global_project(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<GlobalProjectDto>, Problem> {
    let project = service
        .get_global_project(id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(project.into()))
}

pub async fn update_global_project(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<GlobalProjectRequest>,
) -> Result<Json<GlobalProjectDto>, Problem> {
    let project = service
        .update_global_project(id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(project.into()))
}

pub async fn delete_global_project(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service
        .delete_global_project(id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_global_members(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ProjectDto>>, Problem> {
    let projects = service
        .list_global_members(id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

pub async fn global_project_stats(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<GlobalProjectStatsDto>, Problem> {
    let stats = service
        .global_project_stats(id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(stats.into()))
}

pub async fn quote_global_project(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<GlobalQuote>, Problem> {
    let quote = service
        .quote_global_project(id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(quote))
}

// ===== Project Handlers =====

pub async fn list_projects(Extension(service): Svc) -> Result<Json<Vec<ProjectDto>>, Problem> {
    let projects = service.list_projects().await.map_err(map_domain_error)?;
    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

pub async fn create_project(
    Extension(service): Svc,
    Json(req): Json<ProjectRequest>,
) -> Result<(StatusCode, Json<ProjectDto>), Problem> {
    let project = service
        .create_project(req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(created(project.into()))
}

pub async fn get_project(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<ProjectDto>, Problem> {
    let project = service.get_project(id).await.map_err(map_domain_error)?;
    Ok(Json(project.into()))
}

pub async fn update_project(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<ProjectDto>, Problem> {
    let project = service
        .update_project(id, req.into())
        .await
        .map_err(map_domain_error)?;
    Ok(Json(project.into()))
}

pub async fn delete_project(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<StatusCode, Problem> {
    service.delete_project(id).await.map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn quote_project(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Quote>, Problem> {
    let quote = service.quote_project(id).await.map_err(map_domain_error)?;
    Ok(Json(quote))
}

// ===== Selection Handlers =====

pub async fn list_selections(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Vec<SelectionDto>>, Problem> {
    let selections = service.list_selections(id).await.map_err(map_domain_error)?;
    Ok(Json(selections.into_iter().map(Into::into).collect()))
}

pub async fn create_selection(
    Extension(service): Svc,
    Path(id): Path<i32>,
    Json(req): Json<SelectionRequest>,
) -> Result<(StatusCode, Json<SelectionDto>), Problem> {
    let kind = item_kind(&req.kind)?;
    let selection = service
        .create_selection(id, req.group_id, kind, req.ref_id)
        .await
        .map_err(map_domain_error)?;
    Ok(created(selection.into()))
}

pub async fn update_selection(
    Extension(service): Svc,
    Path((id, group_id)): Path<(i32, i32)>,
    Json(req): Json<UpdateSelectionRequest>,
) -> Result<Json<SelectionDto>, Problem> {
    let kind = item_kind(&req.kind)?;
    let selection = service
        .update_selection(id, group_id, kind, req.ref_id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(selection.into()))
}

pub async fn delete_selection(
    Extension(service): Svc,
    Path((id, group_id)): Path<(i32, i32)>,
) -> Result<StatusCode, Problem> {
    service
        .delete_selection(id, group_id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn apply_default_selections(
    Extension(service): Svc,
    Path(id): Path<i32>,
) -> Result<Json<Vec<SelectionDto>>, Problem> {
    let selections = service
        .apply_default_selections(id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(selections.into_iter().map(Into::into).collect()))
}
