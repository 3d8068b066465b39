use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::entity::{Entity, EntityId, PgQueryAs};
use crate::database::manager::{DatabaseError, DatabaseManager};

/// Persistence primitives the resource handler relies on.
///
/// Each call is atomic on its own; a lookup followed by a save is two calls.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Every stored row, in repository order
    async fn find_all(&self) -> Result<Vec<E>, DatabaseError>;

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<E>, DatabaseError>;

    /// Insert an unsaved row (assigning its id) or replace the row with the same key
    async fn save(&self, entity: E) -> Result<E, DatabaseError>;

    async fn delete(&self, id: &EntityId) -> Result<(), DatabaseError>;
}

/// Repository backed by a Postgres table described by `E::META`
pub struct PgRepository<E> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<E>,
}

impl<E: Entity> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    fn table() -> String {
        DatabaseManager::quote_identifier(E::META.table)
    }

    fn key_column() -> String {
        DatabaseManager::quote_identifier(E::META.key_column)
    }

    fn columns() -> Vec<String> {
        E::META
            .columns
            .iter()
            .map(|c| DatabaseManager::quote_identifier(c))
            .collect()
    }

    fn select_all_sql() -> String {
        format!("SELECT * FROM {} ORDER BY {}", Self::table(), Self::key_column())
    }

    fn select_one_sql() -> String {
        format!("SELECT * FROM {} WHERE {} = $1", Self::table(), Self::key_column())
    }

    fn insert_sql() -> String {
        let columns = Self::columns();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
            Self::table(),
            columns.join(", "),
            placeholders.join(", ")
        )
    }

    /// Key is bound first, then the columns
    fn upsert_sql() -> String {
        let columns = Self::columns();
        let placeholders: Vec<String> = (1..=columns.len() + 1).map(|i| format!("${}", i)).collect();
        let assignments: Vec<String> = columns
            .iter()
            .map(|c| format!("{} = EXCLUDED.{}", c, c))
            .collect();
        format!(
            "INSERT INTO {table} ({key}, {columns}) VALUES ({values}) \
             ON CONFLICT ({key}) DO UPDATE SET {assignments} RETURNING *",
            table = Self::table(),
            key = Self::key_column(),
            columns = columns.join(", "),
            values = placeholders.join(", "),
            assignments = assignments.join(", ")
        )
    }

    fn delete_sql() -> String {
        format!("DELETE FROM {} WHERE {} = $1", Self::table(), Self::key_column())
    }
}

fn bind_id<'q, E: Entity>(query: PgQueryAs<'q, E>, id: &EntityId) -> PgQueryAs<'q, E> {
    match id {
        EntityId::Generated(n) => query.bind(*n),
        EntityId::Natural(key) => query.bind(key.clone()),
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PgRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, DatabaseError> {
        let sql = Self::select_all_sql();
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<E>, DatabaseError> {
        let sql = Self::select_one_sql();
        let row = bind_id(sqlx::query_as::<_, E>(&sql), id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, entity: E) -> Result<E, DatabaseError> {
        let saved = if entity.is_new() {
            let sql = Self::insert_sql();
            entity
                .bind_columns(sqlx::query_as::<_, E>(&sql))
                .fetch_one(&self.pool)
                .await?
        } else {
            let sql = Self::upsert_sql();
            let query = bind_id(sqlx::query_as::<_, E>(&sql), &entity.id());
            entity.bind_columns(query).fetch_one(&self.pool).await?
        };
        Ok(saved)
    }

    async fn delete(&self, id: &EntityId) -> Result<(), DatabaseError> {
        let sql = Self::delete_sql();
        let query = sqlx::query(&sql);
        let query = match id {
            EntityId::Generated(n) => query.bind(*n),
            EntityId::Natural(key) => query.bind(key.clone()),
        };
        query.execute(&self.pool).await?;
        Ok(())
    }
}
