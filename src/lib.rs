pub mod config;
pub mod error;
pub mod handlers;
pub mod linkmeta;
pub mod models;
pub mod state;
pub mod store;
