use serde::{de::DeserializeOwned, Serialize};
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, Postgres,
};

use crate::auth::policy::AccessPolicy;

pub type PgQueryAs<'q, E> = QueryAs<'q, Postgres, E, PgArguments>;

/// Row identifier: store-assigned numeric ids or caller-supplied business keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityId {
    Generated(i64),
    Natural(String),
}

impl EntityId {
    pub fn kind(&self) -> KeyKind {
        match self {
            EntityId::Generated(_) => KeyKind::Generated,
            EntityId::Natural(_) => KeyKind::Natural,
        }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityId::Generated(id) => write!(f, "{}", id),
            EntityId::Natural(key) => f.write_str(key),
        }
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        EntityId::Generated(id)
    }
}

impl From<&str> for EntityId {
    fn from(key: &str) -> Self {
        EntityId::Natural(key.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Generated,
    Natural,
}

impl KeyKind {
    /// Parse a raw query-string value into an identifier of this kind
    pub fn parse(&self, raw: &str) -> Result<EntityId, String> {
        match self {
            KeyKind::Generated => raw
                .trim()
                .parse::<i64>()
                .map(EntityId::Generated)
                .map_err(|_| format!("Invalid numeric id: '{}'", raw)),
            KeyKind::Natural => Ok(EntityId::Natural(raw.to_string())),
        }
    }
}

/// Static description of an entity: naming, routing and storage layout.
#[derive(Debug, Clone, Copy)]
pub struct EntityMeta {
    /// Name used in not-found errors
    pub name: &'static str,
    /// Name used in delete confirmations
    pub label: &'static str,
    /// Base route, e.g. `/api/articles`
    pub route: &'static str,
    /// Query parameter carrying the identifier
    pub key_param: &'static str,
    pub key: KeyKind,
    pub table: &'static str,
    pub key_column: &'static str,
    /// Non-key columns, in the order `Entity::bind_columns` binds them
    pub columns: &'static [&'static str],
}

/// A flat, identifier-keyed record served by the generic resource handler.
pub trait Entity:
    Clone + Send + Sync + Unpin + Serialize + DeserializeOwned + for<'r> FromRow<'r, PgRow> + 'static
{
    /// Query parameters accepted by the create endpoint
    type Create: DeserializeOwned + Send + 'static;

    const META: EntityMeta;
    const POLICY: AccessPolicy;

    fn id(&self) -> EntityId;

    /// Record the store-assigned id. Natural-key entities ignore this.
    fn assign_id(&mut self, _id: i64) {}

    fn from_create(params: Self::Create) -> Self;

    /// Overwrite every mutable field from `incoming`. Generated ids are kept;
    /// natural keys may be replaced, which moves the row to the new key.
    fn overwrite(&mut self, incoming: Self);

    fn bind_columns<'q>(&self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self>;

    /// Unsaved generated-key rows carry id 0
    fn is_new(&self) -> bool {
        matches!(self.id(), EntityId::Generated(0))
    }
}
