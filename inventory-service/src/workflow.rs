use shared::{DrinkForm, ValidationError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::models::InventoryItem;
use crate::store::{InventoryStore, StoreError};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Drink {0} not found.")]
    NotFound(i32),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validates submitted drink forms and applies them to the record store.
/// Nothing reaches the store until the whole form has been validated.
#[derive(Clone)]
pub struct InventoryWorkflow {
    store: Arc<dyn InventoryStore>,
}

impl InventoryWorkflow {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub async fn validate_and_create(&self, form: &DrinkForm) -> Result<InventoryItem, WorkflowError> {
        let drink = form.validate().map_err(|e| {
            debug!("Rejected new drink: {:?}", e);
            e
        })?;

        match self.store.insert(&drink).await {
            Ok(item) => {
                info!("Created drink {} ({})", item.id, item.name_of_drink);
                Ok(item)
            }
            Err(e) => {
                error!("Failed to insert drink: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn validate_and_update(
        &self,
        id: i32,
        form: &DrinkForm,
    ) -> Result<InventoryItem, WorkflowError> {
        let drink = form.validate().map_err(|e| {
            debug!("Rejected update of drink {}: {:?}", id, e);
            e
        })?;

        match self.store.update(id, &drink).await {
            Ok(Some(item)) => {
                info!("Updated drink {}", id);
                Ok(item)
            }
            Ok(None) => Err(WorkflowError::NotFound(id)),
            Err(e) => {
                error!("Failed to update drink {}: {}", id, e);
                Err(e.into())
            }
        }
    }

    /// Deleting an id that does not exist is a no-op.
    pub async fn delete(&self, id: i32) -> Result<(), WorkflowError> {
        let removed = self.store.delete(id).await?;
        if removed == 0 {
            debug!("Delete of drink {} matched no row", id);
        } else {
            info!("Deleted drink {}", id);
        }
        Ok(())
    }

    /// Degrades to an empty listing when the store cannot be read.
    pub async fn list_all(&self) -> Vec<InventoryItem> {
        match self.store.list().await {
            Ok(items) => items,
            Err(e) => {
                warn!("Error fetching data: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn fetch(&self, id: i32) -> Result<InventoryItem, WorkflowError> {
        self.store.find(id).await?.ok_or(WorkflowError::NotFound(id))
    }
}
