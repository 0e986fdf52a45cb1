//! Fund positions ledger.

pub mod positions_model;
pub mod positions_repository;
pub mod positions_service;
pub mod positions_traits;

pub use positions_model::{NewPosition, Position, PositionStatus, PositionType};
pub use positions_repository::InMemoryPositionRepository;
pub use positions_service::PositionService;
pub use positions_traits::{PositionRepositoryTrait, PositionServiceTrait};

#[cfg(test)]
mod positions_service_tests;
