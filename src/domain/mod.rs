pub mod owner;
pub mod storage;

pub use owner::model::OwnerRecord;
pub use owner::repository::OwnerRepository;
pub use storage::service::UrlSigner;
