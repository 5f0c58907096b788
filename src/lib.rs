pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod server;
pub mod store;
