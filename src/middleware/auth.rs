use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use tracing::debug;

use crate::auth::{Claims, JwtKeys, Role};
use crate::error::ApiError;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthUser {
    pub email: String,
    pub roles: Vec<Role>,
}

impl AuthUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            roles: claims.parsed_roles(),
            email: claims.sub,
        }
    }
}

/// Whoever sent the request. Requests without a valid token are anonymous.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Caller {
    #[default]
    Anonymous,
    Authenticated(AuthUser),
}

impl Caller {
    /// The user behind the request if they hold `role`; 403 otherwise
    pub fn require(&self, role: Role) -> Result<&AuthUser, ApiError> {
        match self {
            Caller::Anonymous => Err(ApiError::forbidden("Access Denied")),
            Caller::Authenticated(user) if user.has_role(role) => Ok(user),
            Caller::Authenticated(_) => Err(ApiError::forbidden("Access Denied")),
        }
    }

    pub fn describe(&self) -> &str {
        match self {
            Caller::Anonymous => "anonymous caller",
            Caller::Authenticated(user) => &user.email,
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Caller>().cloned().unwrap_or_default())
    }
}

/// JWT authentication middleware: decodes the bearer token, if any, and
/// attaches the resulting `Caller` to the request. Never rejects on its own;
/// the access policy decides.
pub async fn jwt_auth_middleware(
    State(keys): State<Arc<JwtKeys>>,
    mut request: Request,
    next: Next,
) -> Response {
    let caller = match extract_jwt_from_headers(request.headers()) {
        Ok(Some(token)) => match keys.verify(&token) {
            Ok(claims) => Caller::Authenticated(AuthUser::from(claims)),
            Err(e) => {
                debug!("Ignoring bearer token: {}", e);
                Caller::Anonymous
            }
        },
        Ok(None) => Caller::Anonymous,
        Err(msg) => {
            debug!("Ignoring authorization header: {}", msg);
            Caller::Anonymous
        }
    };

    request.extensions_mut().insert(caller);
    next.run(request).await
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<Option<String>, String> {
    let Some(auth_header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(Some(token.trim().to_string()))
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
