use std::path::{Path, PathBuf};

use base64::Engine;

#[derive(Debug, Clone, PartialEq)]
enum FileSource {
    Memory(Vec<u8>),
    /// Read lazily, like a browser `File` handle.
    Disk(PathBuf),
}

/// A file picked in the form's image input.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    source: FileSource,
}

impl SelectedFile {
    pub fn from_bytes(name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        SelectedFile {
            name: name.to_string(),
            content_type: content_type.to_string(),
            source: FileSource::Memory(bytes),
        }
    }

    /// Name and type come from the path; contents are read when needed.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        SelectedFile {
            content_type: content_type_for(path).to_string(),
            name,
            source: FileSource::Disk(path.to_path_buf()),
        }
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            FileSource::Disk(path) => tokio::fs::read(path).await,
        }
    }

    pub async fn read_as_data_url(&self) -> std::io::Result<String> {
        let bytes = self.read().await?;
        Ok(format!(
            "data:{};base64,{}",
            self.content_type,
            base64::engine::general_purpose::STANDARD.encode(bytes)
        ))
    }
}

pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
