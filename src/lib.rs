//! Pet registration: the owner API service and the browser-side form client
//! that talks to it.

pub mod api;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod routes;
pub mod utils;
