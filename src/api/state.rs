use std::sync::Arc;

use crate::domain::{owner::repository::OwnerRepository, storage::service::UrlSigner};

#[derive(Clone)]
pub struct AppState {
    pub owners: Arc<dyn OwnerRepository>,
    pub storage: Arc<dyn UrlSigner>
}

impl AppState {
    pub fn new(owners: Arc<dyn OwnerRepository>, storage: Arc<dyn UrlSigner>) -> Self {
        AppState { owners, storage }
    }
}
