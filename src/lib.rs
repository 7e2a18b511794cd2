//! smartcab - tabular Q-learning for a grid-world driving task
//!
//! This crate provides:
//! - A sparse Q-table with the exact greedy scan and TD update the task
//!   depends on (canonical action order, later-action tie-break)
//! - An ε-greedy learning agent with a two-phase, compounding exploration
//!   schedule and per-trial lifecycle
//! - Port traits for the environment and route-planner collaborators,
//!   each implementable by a test double
//! - A trial runner with composable observers (progress, metrics, JSONL)
//! - A small synthetic grid world and a CLI for driving training runs

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use app::AgentConfig;
pub use error::{Error, Result};
pub use q_learning::{QLearningDriver, QTable};
pub use types::{Action, Direction, Percept, State, TrafficLight, TrialOutcome};
