pub mod owner_repository;
