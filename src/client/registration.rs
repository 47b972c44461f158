//! The upload form's submit flow.
//!
//! Four calls run strictly in order, each only after the previous one
//! succeeded: list owners, save the record and get signed URLs, upload the
//! image, store the image URL on the record. Nothing is retried and nothing
//! already written is rolled back.

use crate::client::api::{HttpOwnerApi, OwnerApi, OwnerListing, SaveOwnerRequest, UpdateOwnerRequest};
use crate::client::config::ClientConfig;
use crate::client::error::ClientError;
use crate::client::file::SelectedFile;
use crate::client::form::{RegistrationForm, Submission};
use crate::client::gallery::{Gallery, GalleryCard};
use crate::client::notifier::{LogNotifier, Notifier};
use crate::client::preview::ImagePreview;

pub const OWNER_ID_BASE: usize = 100;
/// Used when the owner list cannot be fetched.
pub const FALLBACK_OWNER_ID: &str = "101";

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill all fields and select an image.";
pub const SUCCESS_MESSAGE: &str = "Pet registered successfully!";
pub const FAILURE_MESSAGE: &str = "An error occurred. Check console for details.";

// Count-based ids collide when two clients register at the same time.
pub fn derive_owner_id(listing: OwnerListing) -> String {
    match listing {
        OwnerListing::Listed(count) => (OWNER_ID_BASE + count).to_string(),
        OwnerListing::Unavailable(_) => FALLBACK_OWNER_ID.to_string(),
    }
}

/// Runs the four calls and returns the card to show.
pub async fn register_pet<A>(api: &A, submission: &Submission) -> Result<GalleryCard, ClientError>
where
    A: OwnerApi + ?Sized,
{
    let ownerid = derive_owner_id(api.list_owners().await?);
    log::debug!("Registering {} as owner {}", submission.pet_name, ownerid);

    let upload = api
        .save_owner(&SaveOwnerRequest {
            ownerid: ownerid.clone(),
            ownername: submission.owner_name.clone(),
            petname: submission.pet_name.clone(),
            age: submission.pet_age.clone(),
            file_name: submission.file.name.clone(),
            file_type: submission.file.content_type.clone(),
        })
        .await?;

    api.upload_file(&upload.upload_url, &submission.file).await?;

    api.update_owner(&UpdateOwnerRequest {
        owner_id: ownerid,
        update_key: "imageUrl".to_string(),
        update_value: upload.file_url.clone(),
    })
    .await?;

    Ok(GalleryCard {
        image_url: upload.file_url,
        owner_name: submission.owner_name.clone(),
        pet_name: submission.pet_name.clone(),
        age: submission.pet_age.clone(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; no request was made.
    Incomplete,
    Registered(GalleryCard),
    /// Some step failed; earlier steps stay applied on the server.
    Failed,
}

/// The registration page: form, preview, gallery and the API behind them.
pub struct RegistrationPage<A: OwnerApi, N: Notifier> {
    api: A,
    notifier: N,
    pub form: RegistrationForm,
    pub preview: ImagePreview,
    pub gallery: Gallery,
}

impl<A: OwnerApi, N: Notifier> RegistrationPage<A, N> {
    pub fn new(api: A, notifier: N) -> Self {
        RegistrationPage {
            api,
            notifier,
            form: RegistrationForm::default(),
            preview: ImagePreview::default(),
            gallery: Gallery::default(),
        }
    }

    /// File input change: remember the file and preview it.
    pub async fn select_image(&mut self, file: Option<SelectedFile>) {
        self.form.file = file;
        self.preview.show(self.form.file.as_ref()).await;
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(submission) = self.form.submission() else {
            self.notifier.alert(MISSING_FIELDS_MESSAGE);
            return SubmitOutcome::Incomplete;
        };

        match register_pet(&self.api, &submission).await {
            Ok(card) => {
                self.notifier.alert(SUCCESS_MESSAGE);
                self.form.reset();
                self.preview.hide();
                self.gallery.prepend(card.clone());
                SubmitOutcome::Registered(card)
            }
            Err(e) => {
                log::error!("Error: {:?}", e);
                self.notifier.alert(FAILURE_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

impl RegistrationPage<HttpOwnerApi, LogNotifier> {
    /// The page wired to the API named by `PETS_API_BASE_URL`, with alerts
    /// going to the log.
    pub fn from_env() -> Self {
        Self::new(HttpOwnerApi::new(ClientConfig::from_env()), LogNotifier)
    }
}
