use thiserror::Error;

/// Everything that can abort a registration once it has started.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to get pre-signed URL")]
    PresignFailed,

    #[error("Upload to S3 failed")]
    UploadFailed,

    #[error("Failed to update image URL in DB")]
    UpdateFailed,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Could not read selected file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Preference store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference store is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
}
