//! Shared types and models for the Stock Management Platform
//!
//! This crate contains the domain models, enums, and ledger arithmetic
//! shared between the backend service layer and any other components of
//! the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
