pub mod database;
pub mod memory;
pub mod mongodb;
pub mod storage;

pub use database::mongo_context;
pub use memory::owner_repository::InMemoryOwnerRepository;
pub use mongodb::owner_repository::MongoOwnerRepository;
pub use storage::s3_presigner::S3Presigner;
