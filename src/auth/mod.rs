pub mod policy;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// Caller capability levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn authority(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    pub fn from_authority(value: &str) -> Option<Self> {
        match value {
            "ROLE_USER" => Some(Role::User),
            "ROLE_ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Roles granted to a freshly minted token. Admins are users too.
    pub fn grants(&self) -> Vec<Role> {
        match self {
            Role::User => vec![Role::User],
            Role::Admin => vec![Role::Admin, Role::User],
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.authority())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Caller email
    pub sub: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(email: impl Into<String>, roles: &[Role], expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: email.into(),
            roles: roles.iter().map(|r| r.authority().to_string()).collect(),
            exp,
            iat: now.timestamp(),
        }
    }

    /// Known roles only; unknown authorities are dropped
    pub fn parsed_roles(&self) -> Vec<Role> {
        self.roles.iter().filter_map(|r| Role::from_authority(r)).collect()
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidToken(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

/// HS256 signing and verification keys derived from the shared secret
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: u64,
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys")
            .field("expiry_hours", &self.expiry_hours)
            .finish_non_exhaustive()
    }
}

impl JwtKeys {
    pub fn from_secret(secret: &str, expiry_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, JwtError> {
        Self::from_secret(&security.jwt_secret, security.jwt_expiry_hours)
    }

    /// Mint a token for `email` carrying everything `role` grants
    pub fn issue(&self, email: &str, role: Role) -> Result<String, JwtError> {
        self.sign(&Claims::new(email, &role.grants(), self.expiry_hours))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Validate signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(JwtKeys::from_secret("", 1), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn issued_admin_token_carries_both_roles() {
        let keys = JwtKeys::from_secret("test-secret", 1).unwrap();
        let token = keys.issue("admin@ucsb.edu", Role::Admin).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "admin@ucsb.edu");
        assert_eq!(claims.parsed_roles(), vec![Role::Admin, Role::User]);
    }

    #[test]
    fn token_from_other_secret_fails() {
        let keys = JwtKeys::from_secret("one", 1).unwrap();
        let other = JwtKeys::from_secret("two", 1).unwrap();
        let token = other.issue("user@ucsb.edu", Role::User).unwrap();
        assert!(matches!(keys.verify(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_fails() {
        let keys = JwtKeys::from_secret("test-secret", 1).unwrap();
        let mut claims = Claims::new("user@ucsb.edu", &[Role::User], 1);
        claims.exp = Utc::now().timestamp() - 3600;
        let token = keys.sign(&claims).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn unknown_authorities_are_dropped() {
        let claims = Claims {
            sub: "x".into(),
            roles: vec!["ROLE_USER".into(), "ROLE_DRIVER".into()],
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.parsed_roles(), vec![Role::User]);
    }
}
