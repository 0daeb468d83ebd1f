//! Stock Management Platform - Backend Service Layer
//!
//! Records purchases, sales, and manual adjustments against product stock,
//! enforces the non-negative stock invariant, computes monetary totals, and
//! supports reversible deletes. Consumed by a transport layer that resolves
//! the acting user and maps typed errors to responses.

pub mod config;
pub mod db;
pub mod error;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
