pub mod api_client;
pub mod auth;
pub mod error;
pub mod session;
pub mod settings;
pub mod utils;
pub mod views;
