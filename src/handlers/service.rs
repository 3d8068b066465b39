// Public service endpoints: / and /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

use crate::auth::Role;
use crate::database::{
    Article, Entity, HelpRequest, MenuItem, MenuItemReview, Organization, RecommendationRequest,
    Repositories,
};
use crate::types::Operation;

/// One row of the route table
#[derive(Debug, Clone, Serialize)]
pub struct RouteInfo {
    pub entity: &'static str,
    pub method: &'static str,
    pub path: String,
    pub requires: Role,
}

fn entity_routes<E: Entity>() -> Vec<RouteInfo> {
    let meta = E::META;
    Operation::ALL
        .iter()
        .map(|&op| {
            let (method, path) = match op {
                Operation::List => ("GET", format!("{}/all", meta.route)),
                Operation::Get => ("GET", format!("{}?{}=", meta.route, meta.key_param)),
                Operation::Create => ("POST", format!("{}/post", meta.route)),
                Operation::Update => ("PUT", format!("{}?{}=", meta.route, meta.key_param)),
                Operation::Delete => ("DELETE", format!("{}?{}=", meta.route, meta.key_param)),
            };
            RouteInfo {
                entity: meta.name,
                method,
                path,
                requires: E::POLICY.required(op),
            }
        })
        .collect()
}

/// Every resource route with the role it requires
pub fn route_table() -> Vec<RouteInfo> {
    let mut routes = Vec::new();
    routes.extend(entity_routes::<Article>());
    routes.extend(entity_routes::<RecommendationRequest>());
    routes.extend(entity_routes::<MenuItem>());
    routes.extend(entity_routes::<Organization>());
    routes.extend(entity_routes::<MenuItemReview>());
    routes.extend(entity_routes::<HelpRequest>());
    routes
}

/// GET /
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "routes": route_table(),
    }))
}

/// GET /health
pub async fn health(State(repos): State<Repositories>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match repos.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
