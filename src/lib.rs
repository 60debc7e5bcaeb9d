//! Biblos Library Catalog Server
//!
//! A Rust implementation of the Biblos library catalog, serving list/detail
//! pages and CRUD forms for authors, books and physical copies, plus the
//! permission-gated loan-renewal workflow. Page rendering is delegated to the
//! front end: views return the template identifier and its context.

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
