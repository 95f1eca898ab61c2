//! Battle pair handler: two random catalog items for the next vote.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use versus_types::item::Item;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BattlePair {
    pub item_one: Item,
    pub item_two: Item,
}

/// GET /api/v1/battle - Draw two distinct items to vote between.
pub async fn battle_pair(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BattlePair>>, AppError> {
    let timer = RequestTimer::start();
    let (item_one, item_two) = state.vote_service.battle_pair().await?;
    Ok(Json(timer.finish(BattlePair { item_one, item_two })))
}
