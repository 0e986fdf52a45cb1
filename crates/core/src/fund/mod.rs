//! Fund token supply accounting.

pub mod fund_errors;
pub mod fund_model;
pub mod fund_service;

pub use fund_errors::FundError;
pub use fund_model::FundMetadata;
pub use fund_service::FundService;
