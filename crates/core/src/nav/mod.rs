//! Net Asset Value aggregation and polling.

pub mod nav_model;
pub mod nav_service;
pub mod nav_tracker;

pub use nav_model::NavSnapshot;
pub use nav_service::{NavService, NavServiceTrait};
pub use nav_tracker::NavTracker;

#[cfg(test)]
mod nav_service_tests;
