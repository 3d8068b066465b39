// handlers/resource.rs - generic CRUD handler, instantiated once per entity
//
// Routes for an entity with base route `/api/<entity>`:
//   GET    /api/<entity>/all           list
//   GET    /api/<entity>?<key>=<id>    get by id
//   POST   /api/<entity>/post?...      create from query parameters
//   PUT    /api/<entity>?<key>=<id>    update from JSON body
//   DELETE /api/<entity>?<key>=<id>    delete
//
// Extractors that can reject (query parsing, JSON) run inside the handler,
// after authorization, so unauthorized callers always see 403.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::Uri,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info};

use crate::auth::policy::authorize;
use crate::database::{Entity, EntityId, Repository};
use crate::error::ApiError;
use crate::middleware::{Caller, GenericMessage};
use crate::types::Operation;

/// Per-entity handler state
pub struct Resource<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for Resource<E> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

/// Build the five routes for `E` on top of its repository
pub fn routes<E: Entity>(repo: Arc<dyn Repository<E>>) -> Router {
    let base = E::META.route;

    Router::new()
        .route(&format!("{}/all", base), get(list::<E>))
        .route(&format!("{}/post", base), post(create::<E>))
        .route(base, get(get_by_id::<E>).put(update::<E>).delete(delete::<E>))
        .with_state(Resource { repo })
}

/// GET /api/<entity>/all
pub async fn list<E: Entity>(
    State(resource): State<Resource<E>>,
    caller: Caller,
) -> Result<Json<Vec<E>>, ApiError> {
    authorize(&caller, &E::POLICY, Operation::List, E::META.name)?;

    let rows = resource.repo.find_all().await?;
    debug!("Listed {} {} rows", rows.len(), E::META.name);
    Ok(Json(rows))
}

/// GET /api/<entity>?<key>=<id>
pub async fn get_by_id<E: Entity>(
    State(resource): State<Resource<E>>,
    caller: Caller,
    uri: Uri,
) -> Result<Json<E>, ApiError> {
    authorize(&caller, &E::POLICY, Operation::Get, E::META.name)?;
    let id = key_from_uri::<E>(&uri)?;

    let row = find_or_404(&resource, &id).await?;
    Ok(Json(row))
}

/// POST /api/<entity>/post?<field>=<value>&...
pub async fn create<E: Entity>(
    State(resource): State<Resource<E>>,
    caller: Caller,
    uri: Uri,
) -> Result<Json<E>, ApiError> {
    let user = authorize(&caller, &E::POLICY, Operation::Create, E::META.name)?;
    let Query(params) = Query::<E::Create>::try_from_uri(&uri)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let saved = resource.repo.save(E::from_create(params)).await?;
    info!("{} created {} with id {}", user.email, E::META.name, saved.id());
    Ok(Json(saved))
}

/// PUT /api/<entity>?<key>=<id> with the full entity as JSON body
pub async fn update<E: Entity>(
    State(resource): State<Resource<E>>,
    caller: Caller,
    uri: Uri,
    body: Bytes,
) -> Result<Json<E>, ApiError> {
    let user = authorize(&caller, &E::POLICY, Operation::Update, E::META.name)?;
    let id = key_from_uri::<E>(&uri)?;
    let Json(incoming) =
        Json::<E>::from_bytes(&body).map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let mut row = find_or_404(&resource, &id).await?;
    row.overwrite(incoming);

    let saved = resource.repo.save(row).await?;
    let new_id = saved.id();
    if new_id != id {
        // natural key changed: the row now lives under the payload's key
        resource.repo.delete(&id).await?;
        info!("{} re-keyed {} from {} to {}", user.email, E::META.name, id, new_id);
    } else {
        info!("{} updated {} with id {}", user.email, E::META.name, id);
    }
    Ok(Json(saved))
}

/// DELETE /api/<entity>?<key>=<id>
pub async fn delete<E: Entity>(
    State(resource): State<Resource<E>>,
    caller: Caller,
    uri: Uri,
) -> Result<Json<GenericMessage>, ApiError> {
    let user = authorize(&caller, &E::POLICY, Operation::Delete, E::META.name)?;
    let id = key_from_uri::<E>(&uri)?;

    let row = find_or_404(&resource, &id).await?;
    resource.repo.delete(&row.id()).await?;
    info!("{} deleted {} with id {}", user.email, E::META.name, id);
    Ok(Json(GenericMessage::deleted(&E::META, &id)))
}

async fn find_or_404<E: Entity>(resource: &Resource<E>, id: &EntityId) -> Result<E, ApiError> {
    resource
        .repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(E::META.name, id.clone()))
}

/// Read the entity's key parameter (`id`, `orgCode`, ...) from the query string
fn key_from_uri<E: Entity>(uri: &Uri) -> Result<EntityId, ApiError> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let raw = params.get(E::META.key_param).ok_or_else(|| {
        ApiError::bad_request(format!(
            "Required parameter '{}' is not present",
            E::META.key_param
        ))
    })?;

    E::META.key.parse(raw).map_err(ApiError::bad_request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Article, Organization};

    #[test]
    fn reads_numeric_key() {
        let uri: Uri = "/api/articles?id=7".parse().unwrap();
        assert_eq!(key_from_uri::<Article>(&uri).unwrap(), EntityId::Generated(7));
    }

    #[test]
    fn reads_natural_key_param() {
        let uri: Uri = "/api/ucsborganization?orgCode=ZPR".parse().unwrap();
        assert_eq!(key_from_uri::<Organization>(&uri).unwrap(), EntityId::from("ZPR"));

        // organizations are not looked up by `id`
        let uri: Uri = "/api/ucsborganization?id=ZPR".parse().unwrap();
        assert!(key_from_uri::<Organization>(&uri).is_err());
    }

    #[test]
    fn rejects_missing_or_malformed_key() {
        let uri: Uri = "/api/articles".parse().unwrap();
        let err = key_from_uri::<Article>(&uri).unwrap_err();
        assert_eq!(err.message(), "Required parameter 'id' is not present");

        let uri: Uri = "/api/articles?id=seven".parse().unwrap();
        assert_eq!(
            key_from_uri::<Article>(&uri).unwrap_err().status_code(),
            axum::http::StatusCode::BAD_REQUEST
        );
    }
}
