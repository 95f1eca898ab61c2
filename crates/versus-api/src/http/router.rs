//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use versus_observe::taste_attrs::{HTTP_METHOD, HTTP_ROUTE};

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        tracing::info_span!(
            "versus.http",
            { HTTP_METHOD } = %req.method(),
            { HTTP_ROUTE } = %req.uri().path(),
        )
    });

    let api_routes = Router::new()
        // Catalog
        .route(
            "/items",
            get(handlers::item::list_items).post(handlers::item::import_item),
        )
        .route("/items/{id}", get(handlers::item::get_item))
        .route("/battle", get(handlers::battle::battle_pair))
        // Users
        .route("/users", post(handlers::user::create_user))
        .route("/users/leaderboard", get(handlers::user::leaderboard))
        .route(
            "/users/by-name/{username}/wishlist",
            get(handlers::user::wishlist),
        )
        .route("/users/{id}/excluded", put(handlers::user::exclude_item))
        .route("/users/{id}/wishlist", put(handlers::user::add_to_wishlist))
        .route(
            "/users/{id}/about",
            get(handlers::user::get_about).put(handlers::user::set_about),
        )
        // Taste views
        .route("/users/{id}/history", get(handlers::taste::history))
        .route("/users/{id}/top-choices", get(handlers::taste::top_choices))
        .route(
            "/users/{id}/recommendations",
            get(handlers::taste::recommendations),
        )
        .route("/users/{id}/motivations", get(handlers::taste::motivations))
        .route(
            "/users/{id}/submotivations",
            get(handlers::taste::submotivations),
        )
        .route("/users/{id}/candidates", get(handlers::taste::candidates))
        .route("/users/{id}/votes", post(handlers::taste::record_vote));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use versus_core::repository::item::ItemRepository;
    use versus_infra::sqlite::item::SqliteItemRepository;
    use versus_types::id::{ExternalId, ItemId};
    use versus_types::item::{Item, Motivation};

    use crate::state::test_support::test_state_with_pool;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn create_user(app: &Router, username: &str) -> String {
        let response = send(
            app,
            "POST",
            "/api/v1/users",
            Some(json!({
                "username": username,
                "first_name": "Test",
                "last_name": "User",
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    fn catalog_item(external: u64, name: &str, tags: &[&str], related: &[u64]) -> Item {
        let now = chrono::Utc::now();
        Item {
            id: ItemId::new(),
            external_id: ExternalId::new(external).unwrap(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            summary: None,
            tags: tags.iter().map(|t| Motivation::new(t).unwrap()).collect(),
            sub_tags: Vec::new(),
            related_ids: related
                .iter()
                .map(|id| ExternalId::new(*id).unwrap())
                .collect(),
            cover_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let (state, _) = test_state_with_pool().await;
        let app = build_router(state);

        let response = send(&app, "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let (state, _) = test_state_with_pool().await;
        let app = build_router(state);
        create_user(&app, "ada").await;

        let response = send(
            &app,
            "POST",
            "/api/v1/users",
            Some(json!({ "username": "ada", "first_name": "A", "last_name": "B" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["errors"][0]["code"], "CONFLICT");
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_malformed_and_unknown_user_ids() {
        let (state, _) = test_state_with_pool().await;
        let app = build_router(state);

        let response = send(&app, "GET", "/api/v1/users/not-a-uuid/top-choices", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let unknown = uuid::Uuid::now_v7();
        let response = send(
            &app,
            "GET",
            &format!("/api/v1/users/{unknown}/recommendations"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["errors"][0]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_zero_limit_is_rejected() {
        let (state, _) = test_state_with_pool().await;
        let app = build_router(state);
        let user_id = create_user(&app, "ada").await;

        let response = send(
            &app,
            "GET",
            &format!("/api/v1/users/{user_id}/top-choices?limit=0"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_vote_then_read_taste_views() {
        let (state, pool) = test_state_with_pool().await;
        let items = SqliteItemRepository::new(pool);
        let portal = items
            .create(&catalog_item(1, "Portal", &["puzzle"], &[3]))
            .await
            .unwrap();
        let doom = items
            .create(&catalog_item(2, "Doom", &["action"], &[]))
            .await
            .unwrap();
        items
            .create(&catalog_item(3, "Portal 2", &["puzzle"], &[]))
            .await
            .unwrap();

        let app = build_router(state);
        let user_id = create_user(&app, "ada").await;

        for _ in 0..2 {
            let response = send(
                &app,
                "POST",
                &format!("/api/v1/users/{user_id}/votes"),
                Some(json!({
                    "item_one_id": portal.id,
                    "item_two_id": doom.id,
                    "chosen_id": portal.id,
                })),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let top = body_json(
            send(&app, "GET", &format!("/api/v1/users/{user_id}/top-choices"), None).await,
        )
        .await;
        assert_eq!(top["data"][0]["name"], "Portal");
        assert_eq!(top["data"][0]["count"], 2);

        let history = body_json(
            send(
                &app,
                "GET",
                &format!("/api/v1/users/{user_id}/history?limit=1"),
                None,
            )
            .await,
        )
        .await;
        assert_eq!(history["data"].as_array().unwrap().len(), 1);

        let recs = body_json(
            send(
                &app,
                "GET",
                &format!("/api/v1/users/{user_id}/recommendations"),
                None,
            )
            .await,
        )
        .await;
        assert_eq!(recs["data"]["items"][0]["name"], "Portal 2");

        let motivations = body_json(
            send(&app, "GET", &format!("/api/v1/users/{user_id}/motivations"), None).await,
        )
        .await;
        assert_eq!(motivations["data"]["percentages"][0]["tag"], "puzzle");
        assert_eq!(motivations["data"]["percentages"][0]["percentage"], 100);

        let board = body_json(send(&app, "GET", "/api/v1/users/leaderboard", None).await).await;
        assert_eq!(board["data"][0]["username"], "ada");
        assert_eq!(board["data"][0]["engagement_count"], 2);

        let battle = body_json(send(&app, "GET", "/api/v1/battle", None).await).await;
        assert_ne!(battle["data"]["item_one"]["id"], battle["data"]["item_two"]["id"]);
    }

    #[tokio::test]
    async fn test_vote_for_item_not_shown_is_rejected() {
        let (state, pool) = test_state_with_pool().await;
        let items = SqliteItemRepository::new(pool);
        let one = items.create(&catalog_item(1, "One", &[], &[])).await.unwrap();
        let two = items.create(&catalog_item(2, "Two", &[], &[])).await.unwrap();

        let app = build_router(state);
        let user_id = create_user(&app, "ada").await;

        let response = send(
            &app,
            "POST",
            &format!("/api/v1/users/{user_id}/votes"),
            Some(json!({
                "item_one_id": one.id,
                "item_two_id": two.id,
                "chosen_id": ItemId::new(),
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_exclusion_is_idempotent() {
        let (state, _) = test_state_with_pool().await;
        let app = build_router(state);
        let user_id = create_user(&app, "ada").await;
        let uri = format!("/api/v1/users/{user_id}/excluded");

        let first = body_json(send(&app, "PUT", &uri, Some(json!({ "external_id": "42" }))).await)
            .await;
        assert_eq!(first["data"]["added"], true);
        assert_eq!(first["data"]["external_id"], 42);

        let second =
            body_json(send(&app, "PUT", &uri, Some(json!({ "external_id": 42 }))).await).await;
        assert_eq!(second["data"]["added"], false);
    }

    #[tokio::test]
    async fn test_about_me_round_trip() {
        let (state, _) = test_state_with_pool().await;
        let app = build_router(state);
        let user_id = create_user(&app, "ada").await;
        let uri = format!("/api/v1/users/{user_id}/about");

        let saved = body_json(
            send(&app, "PUT", &uri, Some(json!({ "about_me": " likes puzzles " }))).await,
        )
        .await;
        assert_eq!(saved["data"]["about_me"], "likes puzzles");

        let read = body_json(send(&app, "GET", &uri, None).await).await;
        assert_eq!(read["data"]["about_me"], "likes puzzles");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_bad_gateway() {
        let (state, _) = test_state_with_pool().await;
        let app = build_router(state);

        let response = send(
            &app,
            "POST",
            "/api/v1/items",
            Some(json!({ "external_id": 1942 })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["errors"][0]["code"], "UPSTREAM_ERROR");
    }
}
