//! Bookshelf record-keeping server
//!
//! A small REST JSON API for keeping track of books: create, list with
//! filters, retrieve, update and delete records held in a process-local
//! store. Nothing survives a restart.

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
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
