pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod render;
pub mod view;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use dashboard::{Dashboard, SearchForm};
pub use error::{ApiError, ValidationError};
