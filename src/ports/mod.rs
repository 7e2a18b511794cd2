//! Ports (trait boundaries) for external collaborators.
//!
//! This module defines the interfaces between the learning core and the
//! simulation infrastructure. Following hexagonal architecture, these
//! traits are owned by the domain and implemented by adapters (or test
//! doubles) on the outside.

pub mod environment;
pub mod observer;
pub mod planner;

pub use environment::{Environment, GOAL_REWARD};
pub use observer::TrialObserver;
pub use planner::RoutePlanner;
