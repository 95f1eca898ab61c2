//! Catalog item handlers for the REST API.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use versus_types::id::{ExternalId, ItemId};
use versus_types::item::Item;

use crate::http::error::AppError;
use crate::http::extractors::query::ItemListQuery;
use crate::http::handlers::parse_id;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Body of `POST /api/v1/items`.
#[derive(Debug, Deserialize)]
pub struct ImportItemBody {
    pub external_id: ExternalId,
}

/// GET /api/v1/items - List catalog items by name.
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> Result<Json<ApiResponse<Vec<Item>>>, AppError> {
    let timer = RequestTimer::start();
    let items = state.catalog_service.list_items(query.into_filter()?).await?;
    Ok(Json(timer.finish(items).with_link("self", "/api/v1/items")))
}

/// GET /api/v1/items/{id} - Get one catalog item.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Item>>, AppError> {
    let timer = RequestTimer::start();
    let id: ItemId = parse_id(&id)?;
    let item = state.catalog_service.get_item(&id).await?;
    Ok(Json(
        timer
            .finish(item)
            .with_link("self", &format!("/api/v1/items/{id}")),
    ))
}

/// POST /api/v1/items - Import an item from the content provider.
pub async fn import_item(
    State(state): State<AppState>,
    Json(body): Json<ImportItemBody>,
) -> Result<Json<ApiResponse<Item>>, AppError> {
    let timer = RequestTimer::start();
    let item = state.catalog_service.import_item(body.external_id).await?;
    let href = format!("/api/v1/items/{}", item.id);
    Ok(Json(timer.finish(item).with_link("self", &href)))
}
