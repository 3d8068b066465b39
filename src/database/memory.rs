use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::database::entity::{Entity, EntityId};
use crate::database::manager::DatabaseError;
use crate::database::repository::Repository;

/// Process-local repository. Rows are kept in insertion order.
pub struct MemoryRepository<E> {
    rows: RwLock<Vec<E>>,
    next_id: AtomicI64,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, DatabaseError> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<E>, DatabaseError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| &row.id() == id).cloned())
    }

    async fn save(&self, mut entity: E) -> Result<E, DatabaseError> {
        let mut rows = self.rows.write().await;

        if entity.is_new() {
            entity.assign_id(self.next_id.fetch_add(1, Ordering::SeqCst));
            rows.push(entity.clone());
            return Ok(entity);
        }

        let id = entity.id();
        match rows.iter_mut().find(|row| row.id() == id) {
            Some(slot) => *slot = entity.clone(),
            None => {
                // keep the counter ahead of explicitly keyed rows
                if let EntityId::Generated(n) = id {
                    self.next_id.fetch_max(n + 1, Ordering::SeqCst);
                }
                rows.push(entity.clone());
            }
        }
        Ok(entity)
    }

    async fn delete(&self, id: &EntityId) -> Result<(), DatabaseError> {
        self.rows.write().await.retain(|row| &row.id() != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{MenuItem, Organization};

    fn menu_item(name: &str) -> MenuItem {
        MenuItem {
            id: 0,
            dining_commons_code: "ortega".to_string(),
            name: name.to_string(),
            station: "Entrees".to_string(),
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids_in_insertion_order() {
        let repo = MemoryRepository::<MenuItem>::new();
        let a = repo.save(menu_item("Baked Pesto Pasta")).await.unwrap();
        let b = repo.save(menu_item("Tofu Banh Mi")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        let all = repo.find_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Baked Pesto Pasta", "Tofu Banh Mi"]);
    }

    #[tokio::test]
    async fn save_replaces_existing_row_in_place() {
        let repo = MemoryRepository::<MenuItem>::new();
        let mut first = repo.save(menu_item("Chicken")).await.unwrap();
        repo.save(menu_item("Rice")).await.unwrap();

        first.station = "Grill".to_string();
        repo.save(first).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].station, "Grill");
        assert_eq!(repo.find_by_id(&EntityId::Generated(1)).await.unwrap().unwrap().station, "Grill");
    }

    #[tokio::test]
    async fn natural_keys_match_exactly() {
        let repo = MemoryRepository::<Organization>::new();
        repo.save(Organization {
            org_code: "ZPR".to_string(),
            org_translation_short: "ZETA PHI RHO".to_string(),
            org_translation: "ZETA PHI RHO".to_string(),
            inactive: false,
        })
        .await
        .unwrap();

        assert!(repo.find_by_id(&EntityId::from("ZPR")).await.unwrap().is_some());
        assert!(repo.find_by_id(&EntityId::from("zpr")).await.unwrap().is_none());
        assert!(repo.find_by_id(&EntityId::from("ZP")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_only_matching_row() {
        let repo = MemoryRepository::<MenuItem>::new();
        repo.save(menu_item("One")).await.unwrap();
        repo.save(menu_item("Two")).await.unwrap();

        repo.delete(&EntityId::Generated(1)).await.unwrap();
        assert_eq!(repo.len().await, 1);
        assert!(repo.find_by_id(&EntityId::Generated(1)).await.unwrap().is_none());

        // deleting an absent id is a no-op
        repo.delete(&EntityId::Generated(42)).await.unwrap();
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = MemoryRepository::<MenuItem>::new();
        repo.save(menu_item("One")).await.unwrap();
        repo.delete(&EntityId::Generated(1)).await.unwrap();
        let next = repo.save(menu_item("Two")).await.unwrap();
        assert_eq!(next.id, 2);
    }
}
