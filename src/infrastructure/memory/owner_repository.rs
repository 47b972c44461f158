use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::owner::model::OwnerRecord;
use crate::domain::owner::repository::OwnerRepository;
use crate::utils::errors::ApiError;

/// Keeps owners in process memory, ordered by `ownerid`. Used for local runs and tests.
#[derive(Default)]
pub struct InMemoryOwnerRepository {
    owners: RwLock<BTreeMap<String, OwnerRecord>>
}

impl InMemoryOwnerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OwnerRepository for InMemoryOwnerRepository {

    async fn get_owner(&self, owner_id: &str) -> Result<Option<OwnerRecord>, ApiError> {
        Ok(self.owners.read().await.get(owner_id).cloned())
    }

    async fn get_all_owners(&self) -> Result<Vec<OwnerRecord>, ApiError> {
        Ok(self.owners.read().await.values().cloned().collect())
    }

    async fn save_owner(&self, owner: OwnerRecord) -> Result<(), ApiError> {
        if owner.ownerid.is_empty() {
            return Err(ApiError::InvalidData("ownerid cannot be empty".to_string()));
        }
        self.owners.write().await.insert(owner.ownerid.clone(), owner);
        Ok(())
    }

    async fn update_owner_attribute(&self, owner_id: &str, key: &str, value: Value) -> Result<(), ApiError> {
        let mut owners = self.owners.write().await;
        owners
            .entry(owner_id.to_string())
            .or_insert_with(|| OwnerRecord::new(owner_id))
            .set_attribute(key, value);
        Ok(())
    }

    async fn delete_owner(&self, owner_id: &str) -> Result<Option<OwnerRecord>, ApiError> {
        Ok(self.owners.write().await.remove(owner_id))
    }
}
