//! Business logic services for the Stock Management Platform

pub mod ledger;
pub mod reporting;
pub mod stock;

pub use ledger::LedgerService;
pub use reporting::ReportingService;
pub use stock::StockService;
