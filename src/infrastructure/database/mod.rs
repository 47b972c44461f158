pub mod mongo_context;
