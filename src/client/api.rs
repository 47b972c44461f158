//! The owner API as seen from the registration form.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{config::ClientConfig, error::ClientError, file::SelectedFile};

/// Outcome of listing owners. A non-success status is an answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerListing {
    Listed(usize),
    Unavailable(u16),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SaveOwnerRequest {
    pub ownerid: String,
    pub ownername: String,
    pub petname: String,
    pub age: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "fileType")]
    pub file_type: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PresignedUpload {
    #[serde(rename = "uploadUrl")]
    pub upload_url: String,
    #[serde(rename = "fileUrl")]
    pub file_url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UpdateOwnerRequest {
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    #[serde(rename = "updateKey")]
    pub update_key: String,
    #[serde(rename = "updateValue")]
    pub update_value: String,
}

#[async_trait]
pub trait OwnerApi: Send + Sync {
    async fn list_owners(&self) -> Result<OwnerListing, ClientError>;
    async fn save_owner(&self, request: &SaveOwnerRequest) -> Result<PresignedUpload, ClientError>;
    async fn upload_file(&self, upload_url: &str, file: &SelectedFile) -> Result<(), ClientError>;
    async fn update_owner(&self, request: &UpdateOwnerRequest) -> Result<(), ClientError>;
}

pub struct HttpOwnerApi {
    client: Client,
    config: ClientConfig,
}

impl HttpOwnerApi {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        HttpOwnerApi { client, config }
    }
}

#[async_trait]
impl OwnerApi for HttpOwnerApi {
    async fn list_owners(&self) -> Result<OwnerListing, ClientError> {
        let response = self.client.get(self.config.endpoint("owners")).send().await?;
        let status = response.status();
        // The body is decoded before the status is looked at; an unparsable
        // body fails the whole registration even on error statuses.
        let body: Value = serde_json::from_slice(&response.bytes().await?)?;

        if !status.is_success() {
            log::warn!("Owner list unavailable: HTTP {}", status);
            return Ok(OwnerListing::Unavailable(status.as_u16()));
        }
        let count = body.get("owners").and_then(Value::as_array).map_or(0, Vec::len);
        Ok(OwnerListing::Listed(count))
    }

    async fn save_owner(&self, request: &SaveOwnerRequest) -> Result<PresignedUpload, ClientError> {
        let response = self.client
            .post(self.config.endpoint("owner"))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            log::error!("Saving owner {} failed: HTTP {}", request.ownerid, response.status());
            return Err(ClientError::PresignFailed);
        }
        Ok(serde_json::from_slice(&response.bytes().await?)?)
    }

    async fn upload_file(&self, upload_url: &str, file: &SelectedFile) -> Result<(), ClientError> {
        let bytes = file.read().await?;
        let response = self.client
            .put(upload_url)
            .header(CONTENT_TYPE, file.content_type.as_str())
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            log::error!("Uploading {} failed: HTTP {}", file.name, response.status());
            return Err(ClientError::UploadFailed);
        }
        Ok(())
    }

    async fn update_owner(&self, request: &UpdateOwnerRequest) -> Result<(), ClientError> {
        let response = self.client
            .patch(self.config.endpoint("owner"))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            log::error!("Updating owner {} failed: HTTP {}", request.owner_id, response.status());
            return Err(ClientError::UpdateFailed);
        }
        Ok(())
    }
}
