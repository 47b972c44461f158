use async_trait::async_trait;
use serde_json::Value;

use crate::{domain::owner::model::OwnerRecord, utils::errors::ApiError};

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    async fn get_owner(&self, owner_id: &str) -> Result<Option<OwnerRecord>, ApiError>;
    async fn get_all_owners(&self) -> Result<Vec<OwnerRecord>, ApiError>;
    /// Inserts the record, replacing any existing one with the same `ownerid`.
    async fn save_owner(&self, owner: OwnerRecord) -> Result<(), ApiError>;
    /// Sets one attribute, creating the record if it does not exist yet.
    async fn update_owner_attribute(&self, owner_id: &str, key: &str, value: Value) -> Result<(), ApiError>;
    async fn delete_owner(&self, owner_id: &str) -> Result<Option<OwnerRecord>, ApiError>;
}
