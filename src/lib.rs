//! Cake booking server
//!
//! REST JSON API for a bakery storefront: pickup slot provisioning,
//! cake reservations and monthly sales summaries for the admin view.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
