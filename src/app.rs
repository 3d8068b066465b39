use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::auth::JwtKeys;
use crate::config::SecurityConfig;
use crate::database::Repositories;
use crate::handlers::{current_user, resource, service, system_info};
use crate::middleware::jwt_auth_middleware;

/// Full API router: public service endpoints plus one resource per entity,
/// all behind the JWT caller-extraction layer.
pub fn app(repos: Repositories, keys: Arc<JwtKeys>) -> Router {
    Router::new()
        // Public
        .route("/", get(service::root))
        .route("/api/systemInfo", get(system_info::get))
        .merge(health_routes(repos.clone()))
        // Authenticated
        .route("/api/currentUser", get(current_user::get))
        .merge(resource_routes(repos))
        .layer(from_fn_with_state(keys, jwt_auth_middleware))
}

fn health_routes(repos: Repositories) -> Router {
    Router::new()
        .route("/health", get(service::health))
        .with_state(repos)
}

fn resource_routes(repos: Repositories) -> Router {
    Router::new()
        .merge(resource::routes(repos.articles))
        .merge(resource::routes(repos.recommendation_requests))
        .merge(resource::routes(repos.menu_items))
        .merge(resource::routes(repos.organizations))
        .merge(resource::routes(repos.menu_item_reviews))
        .merge(resource::routes(repos.help_requests))
}

/// CORS from the security config; permissive origins only when none are listed
pub fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        layer.allow_origin(AllowOrigin::any())
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
