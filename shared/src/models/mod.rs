//! Domain models for the Stock Management Platform

mod product;
mod transaction;
mod user;

pub use product::*;
pub use transaction::*;
pub use user::*;
