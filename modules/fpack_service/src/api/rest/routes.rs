//! Route registration and OpenAPI document

use super::{dto::*, handlers::*};
use crate::domain::Service;
use axum::{
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// Schemas published under `/openapi.json`
#[derive(OpenApi)]
#[openapi(
    info(title = "F-Pack API", description = "Catalog, template authoring and quoting"),
    components(schemas(
        SupplierDto,
        NameRequest,
        ClientDto,
        ProductDto,
        ProductRequest,
        EquipmentDto,
        EquipmentRequest,
        CompositionRowDto,
        CompositionRowRequest,
        RobotDto,
        RobotRequest,
        IncompatibilityDto,
        RobotIncompatibilityDto,
        RobotIncompatibilitiesRequest,
        BatchOutcomeDto,
        PriceDto,
        RobotPriceDto,
        PriceRequest,
        GroupDto,
        GroupItemDto,
        GroupItemRequest,
        TemplateDto,
        TemplateRequest,
        ColumnDto,
        ColumnRequest,
        BulkColumnsRequest,
        ColumnOrderDto,
        ReorderColumnsRequest,
        ColumnViewDto,
        ClearedResponse,
        GlobalProjectDto,
        GlobalProjectRequest,
        ProjectProgressDto,
        GlobalProjectStatsDto,
        ProjectDto,
        ProjectRequest,
        SelectionDto,
        SelectionRequest,
        UpdateSelectionRequest,
        DependentDto,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Register all REST routes
pub fn register_routes(service: Arc<Service>) -> Router {
    Router::new()
        // Catalog endpoints
        .route("/suppliers", get(list_suppliers).post(create_supplier))
        .route("/suppliers/{id}", get(get_supplier).delete(delete_supplier))
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/{id}",
            get(get_client).put(rename_client).delete(delete_client),
        )
        .route("/clients/{id}/prices", get(client_prices))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{id}/duplicate", post(duplicate_product))
        .route("/products/{id}/incompatible", get(incompatible_products))
        .route(
            "/products/{id}/incompatible-robots",
            get(product_incompatible_robots),
        )
        .route("/equipment", get(list_equipment).post(create_equipment))
        .route(
            "/equipment/{id}",
            get(get_equipment)
                .put(update_equipment)
                .delete(delete_equipment),
        )
        .route(
            "/equipment/{id}/composition",
            get(get_composition)
                .put(set_composition_row)
                .delete(clear_composition),
        )
        .route(
            "/equipment/{id}/composition/{product_id}",
            delete(remove_composition_row),
        )
        .route("/robots", get(list_robots).post(create_robot))
        .route(
            "/robots/{id}",
            get(get_robot).put(update_robot).delete(delete_robot),
        )
        .route(
            "/robots/{id}/incompatibilities",
            get(robot_incompatible_products)
                .post(add_robot_incompatibilities)
                .delete(clear_robot_incompatibilities),
        )
        .route(
            "/incompatibilities",
            get(list_incompatibilities).post(add_incompatibility),
        )
        .route(
            "/incompatibilities/{product_a}/{product_b}",
            delete(remove_incompatibility),
        )
        .route(
            "/robot-incompatibilities",
            get(list_robot_incompatibilities).post(add_robot_incompatibility),
        )
        .route(
            "/robot-incompatibilities/{robot_id}/{product_id}",
            delete(remove_robot_incompatibility),
        )
        // Price endpoints
        .route("/prices", get(list_prices))
        .route(
            "/prices/{product_id}/{client_id}",
            get(get_price)
                .post(create_price)
                .put(update_price)
                .delete(delete_price),
        )
        .route("/robot-prices", get(list_robot_prices))
        .route(
            "/robot-prices/{robot_id}",
            get(get_robot_price)
                .post(create_robot_price)
                .put(update_robot_price)
                .delete(delete_robot_price),
        )
        // Group endpoints
        .route("/groups", get(list_groups).post(create_group))
        .route(
            "/groups/{id}",
            get(get_group).put(rename_group).delete(delete_group),
        )
        .route(
            "/groups/{id}/items",
            get(list_group_items).post(add_group_item),
        )
        .route("/groups/{id}/items/{item_id}", delete(remove_group_item))
        // Template endpoints
        .route("/templates", get(list_templates).post(create_template))
        .route(
            "/templates/{id}",
            get(get_template)
                .put(update_template)
                .delete(delete_template),
        )
        .route("/templates/{id}/duplicate", post(duplicate_template))
        .route("/templates/{id}/quote", get(quote_template))
        .route(
            "/templates/{id}/columns",
            get(list_columns).post(add_column).delete(clear_columns),
        )
        .route("/templates/{id}/columns/bulk", post(add_columns))
        .route("/templates/{id}/columns/reorder", put(reorder_columns))
        .route("/templates/{id}/columns/view", get(column_views))
        .route(
            "/columns/{id}",
            get(get_column).put(update_column).delete(delete_column),
        )
        // Global project endpoints
        .route(
            "/global-projects",
            get(list_global_projects).post(create_global_project),
        )
        .route(
            "/global-projects/{id}",
            get(get_global_project)
                .put(update_global_project)
                .delete(delete_global_project),
        )
        .route("/global-projects/{id}/projects", get(list_global_members))
        .route("/global-projects/{id}/stats", get(global_project_stats))
        .route("/global-projects/{id}/quote", get(quote_global_project))
        // Project endpoints
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/projects/{id}/quote", get(quote_project))
        .route(
            "/projects/{id}/selections",
            get(list_selections).post(create_selection),
        )
        .route(
            "/projects/{id}/selections/defaults",
            post(apply_default_selections),
        )
        .route(
            "/projects/{id}/selections/{group_id}",
            put(update_selection).delete(delete_selection),
        )
        .route("/openapi.json", get(openapi_json))
        // Add service as extension for handlers
        .layer(Extension(service))
}
