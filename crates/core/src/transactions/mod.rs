//! Append-only transaction log.

pub mod transactions_model;
pub mod transactions_repository;
pub mod transactions_service;
pub mod transactions_traits;

pub use transactions_model::{NewTransaction, Transaction, TransactionKind, TransactionStatus};
pub use transactions_repository::InMemoryTransactionLog;
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
