use tracing::warn;

use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::auth::{AuthUser, Caller};
use crate::types::Operation;

/// Minimum role required for each resource operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    pub list: Role,
    pub get: Role,
    pub create: Role,
    pub update: Role,
    pub delete: Role,
}

impl AccessPolicy {
    /// Users read, admins write
    pub const STANDARD: AccessPolicy = AccessPolicy {
        list: Role::User,
        get: Role::User,
        create: Role::Admin,
        update: Role::Admin,
        delete: Role::Admin,
    };

    pub const fn required(&self, op: Operation) -> Role {
        match op {
            Operation::List => self.list,
            Operation::Get => self.get,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }
}

/// Gate every resource operation. Runs before any repository access.
pub fn authorize<'a>(
    caller: &'a Caller,
    policy: &AccessPolicy,
    op: Operation,
    entity: &str,
) -> Result<&'a AuthUser, ApiError> {
    let required = policy.required(op);
    caller.require(required).map_err(|err| {
        warn!(
            "Denied {} on {} to {} (requires {})",
            op,
            entity,
            caller.describe(),
            required
        );
        err
    })
}
