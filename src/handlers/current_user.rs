use axum::Json;
use serde::Serialize;

use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::Caller;

#[derive(Debug, Serialize)]
pub struct CurrentUser {
    pub email: String,
    pub roles: Vec<Role>,
}

/// GET /api/currentUser - who the bearer token says you are
pub async fn get(caller: Caller) -> Result<Json<CurrentUser>, ApiError> {
    let user = caller.require(Role::User)?;

    Ok(Json(CurrentUser {
        email: user.email.clone(),
        roles: user.roles.clone(),
    }))
}
