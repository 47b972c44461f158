use crate::utils::errors::ApiError;

/// Seconds a signed URL stays valid.
pub const PRESIGNED_URL_EXPIRY_SECS: u64 = 3600;

pub trait UrlSigner: Send + Sync {
    /// URL the client PUTs the object bytes to. The upload must send `content_type`.
    fn presign_put(&self, key: &str, content_type: &str) -> Result<String, ApiError>;
    fn presign_get(&self, key: &str) -> Result<String, ApiError>;
}
