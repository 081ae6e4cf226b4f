use async_trait::async_trait;
use shared::ValidatedDrink;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::models::{DrinkRow, InventoryItem};
use crate::store::{InventoryStore, StoreError};

/// Process-local store for development runs and tests. Ids are never reused,
/// matching a `SERIAL` column.
#[derive(Default)]
pub struct MemoryInventoryStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    rows: BTreeMap<i32, InventoryItem>,
    last_id: i32,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn list(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let state = self.state.read().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<InventoryItem>, StoreError> {
        let state = self.state.read().await;
        Ok(state.rows.get(&id).cloned())
    }

    async fn insert(&self, drink: &ValidatedDrink) -> Result<InventoryItem, StoreError> {
        let mut state = self.state.write().await;
        state.last_id += 1;

        let item = InventoryItem::from_row(state.last_id, DrinkRow::from(drink));
        state.rows.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        id: i32,
        drink: &ValidatedDrink,
    ) -> Result<Option<InventoryItem>, StoreError> {
        let mut state = self.state.write().await;

        Ok(state.rows.get_mut(&id).map(|slot| {
            *slot = InventoryItem::from_row(id, DrinkRow::from(drink));
            slot.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<usize, StoreError> {
        let mut state = self.state.write().await;
        Ok(usize::from(state.rows.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DrinkForm;

    fn drink(name: &str) -> ValidatedDrink {
        DrinkForm {
            name_of_drink: name.to_string(),
            price: "2.00".to_string(),
            quantity: "4".to_string(),
            expiry_date: "2026-01-01".to_string(),
            batch_no: "B7".to_string(),
            drink_subtype: "Juice".to_string(),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryInventoryStore::new();

        let first = store.insert(&drink("Apple")).await.unwrap();
        assert_eq!(store.delete(first.id).await.unwrap(), 1);

        let second = store.insert(&drink("Orange")).await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(store.list().await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let store = MemoryInventoryStore::new();
        for name in ["A", "B", "C"] {
            store.insert(&drink(name)).await.unwrap();
        }

        let ids: Vec<i32> = store.list().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_rows() {
        let store = MemoryInventoryStore::new();

        assert_eq!(store.update(42, &drink("Ghost")).await.unwrap(), None);
        assert_eq!(store.delete(42).await.unwrap(), 0);
        assert!(store.list().await.unwrap().is_empty());
    }
}
