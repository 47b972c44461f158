use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::{self, doc, Document};
use serde_json::Value;

use crate::infrastructure::database::mongo_context::MongoContext;
use crate::domain::owner::repository::OwnerRepository;
use crate::domain::owner::model::{stored_attribute, OwnerRecord};
use crate::utils::errors::ApiError;

pub struct MongoOwnerRepository {
    owners: mongodb::Collection<OwnerRecord>
}

impl MongoOwnerRepository {
    pub fn new(context: &MongoContext, collection: &str) -> Self {
        Self {
            owners: context.collection(collection)
        }
    }

    // Mongo's own `_id` never reaches the record's free-form attributes.
    fn projection() -> Document {
        doc! { "_id": 0 }
    }
}

#[async_trait]
impl OwnerRepository for MongoOwnerRepository {

    async fn get_owner(&self, owner_id: &str) -> Result<Option<OwnerRecord>, ApiError> {
        match self.owners.find_one(doc! { "ownerid": owner_id }).projection(Self::projection()).await {
            Ok(owner) => Ok(owner),
            Err(e) => Err(ApiError::MongoError(e))
        }
    }

    async fn get_all_owners(&self) -> Result<Vec<OwnerRecord>, ApiError> {
        let mut cursor = self.owners.find(doc! {}).projection(Self::projection()).await?;
        let mut owners = Vec::new();

        while let Some(doc) = cursor.next().await {
            match doc {
                Ok(owner) => owners.push(owner),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(owners)
    }

    async fn save_owner(&self, owner: OwnerRecord) -> Result<(), ApiError> {
        if owner.ownerid.is_empty() {
            return Err(ApiError::InvalidData("ownerid cannot be empty".to_string()));
        }

        self.owners
            .replace_one(doc! { "ownerid": &owner.ownerid }, &owner)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn update_owner_attribute(&self, owner_id: &str, key: &str, value: Value) -> Result<(), ApiError> {
        let value = bson::to_bson(&stored_attribute(key, value))?;
        let mut fields = Document::new();
        fields.insert(key, value);

        self.owners
            .update_one(doc! { "ownerid": owner_id }, doc! { "$set": fields })
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn delete_owner(&self, owner_id: &str) -> Result<Option<OwnerRecord>, ApiError> {
        let removed = self.owners
            .find_one_and_delete(doc! { "ownerid": owner_id })
            .projection(Self::projection())
            .await?;
        Ok(removed)
    }
}
