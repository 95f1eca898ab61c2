//! User handlers: registration, leaderboard, exclusions, wishlist, about-me.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use versus_types::id::{ExternalId, UserId};
use versus_types::item::Item;
use versus_types::taste::LeaderboardEntry;
use versus_types::user::{CreateUserRequest, User};

use crate::http::error::AppError;
use crate::http::handlers::parse_id;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Body of the exclusion and wishlist endpoints.
#[derive(Debug, Deserialize)]
pub struct ExternalIdBody {
    pub external_id: ExternalId,
}

/// Result of an idempotent set insertion.
#[derive(Debug, Serialize)]
pub struct SetUpdate {
    pub external_id: ExternalId,
    /// False when the id was already present.
    pub added: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AboutMe {
    pub about_me: Option<String>,
}

/// POST /api/v1/users - Register a user.
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let timer = RequestTimer::start();
    let user = state.user_service.create_user(body).await?;
    let top = format!("/api/v1/users/{}/top-choices", user.id);
    Ok(Json(timer.finish(user).with_link("top_choices", &top)))
}

/// GET /api/v1/users/leaderboard - Users by engagement, most engaged first.
pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntry>>>, AppError> {
    let timer = RequestTimer::start();
    let entries = state.taste_service.leaderboard().await?;
    Ok(Json(timer.finish(entries)))
}

/// PUT /api/v1/users/{id}/excluded - Never recommend an item again.
pub async fn exclude_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ExternalIdBody>,
) -> Result<Json<ApiResponse<SetUpdate>>, AppError> {
    let timer = RequestTimer::start();
    let user_id: UserId = parse_id(&id)?;
    let added = state
        .user_service
        .exclude_item(&user_id, body.external_id)
        .await?;
    Ok(Json(timer.finish(SetUpdate {
        external_id: body.external_id,
        added,
    })))
}

/// PUT /api/v1/users/{id}/wishlist - Add an item to the wishlist.
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ExternalIdBody>,
) -> Result<Json<ApiResponse<SetUpdate>>, AppError> {
    let timer = RequestTimer::start();
    let user_id: UserId = parse_id(&id)?;
    let added = state
        .user_service
        .add_to_wishlist(&user_id, body.external_id)
        .await?;
    Ok(Json(timer.finish(SetUpdate {
        external_id: body.external_id,
        added,
    })))
}

/// GET /api/v1/users/by-name/{username}/wishlist - Wishlisted catalog items.
pub async fn wishlist(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<Vec<Item>>>, AppError> {
    let timer = RequestTimer::start();
    let items = state.user_service.wishlist(&username).await?;
    Ok(Json(timer.finish(items)))
}

/// GET /api/v1/users/{id}/about
pub async fn get_about(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AboutMe>>, AppError> {
    let timer = RequestTimer::start();
    let user_id: UserId = parse_id(&id)?;
    let about_me = state.user_service.about_me(&user_id).await?;
    Ok(Json(timer.finish(AboutMe { about_me })))
}

/// PUT /api/v1/users/{id}/about - Blank text clears the blurb.
pub async fn set_about(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AboutMe>,
) -> Result<Json<ApiResponse<AboutMe>>, AppError> {
    let timer = RequestTimer::start();
    let user_id: UserId = parse_id(&id)?;
    let about_me = state
        .user_service
        .set_about_me(&user_id, body.about_me)
        .await?;
    Ok(Json(timer.finish(AboutMe { about_me })))
}
