pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod server;
pub mod store;
