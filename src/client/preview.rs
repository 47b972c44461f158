use crate::client::file::SelectedFile;

/// The `<img>` element showing the picked image before upload.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImagePreview {
    src: Option<String>,
    visible: bool,
}

impl ImagePreview {
    /// File input change handler. An empty selection changes nothing and a
    /// read failure leaves the preview as it was.
    pub async fn show(&mut self, file: Option<&SelectedFile>) {
        let Some(file) = file else {
            return;
        };
        match file.read_as_data_url().await {
            Ok(data_url) => {
                self.src = Some(data_url);
                self.visible = true;
            }
            Err(e) => log::debug!("No preview for {}: {}", file.name, e),
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
