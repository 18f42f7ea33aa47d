//! Minimal user-management REST service: CRUD over a single `User` entity
//! with email uniqueness enforced.

pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod seed;
pub mod state;
pub mod users;

pub use app::{build_app, serve};
pub use config::AppConfig;
pub use state::AppState;
