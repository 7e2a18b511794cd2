//! Tabular Q-learning for the grid-world driving task
//!
//! This module implements one-step temporal difference control: the agent
//! bootstraps each value estimate from the best achievable value of the
//! state it reached, which converges much faster than waiting for whole
//! trials to finish.
//!
//! ## Update rule
//!
//! After an action earns a reward `r` and the world is re-sensed as `s'`:
//!
//! ```text
//! Q(s,a) ← (1−α)·Q(s,a) + α·[r + γ·max_a' Q(s',a')]
//! ```
//!
//! ## Exploration schedule
//!
//! Two phases: the rate stays at 1.0 (pure random exploration) for the
//! first `eps_cutoff_fraction · total_trials` trials so the table is
//! seeded broadly, then compounds down by `1/trial` at every trial
//! transition.
//!
//! ## Usage Example
//!
//! ```
//! use smartcab::app::AgentConfig;
//! use smartcab::q_learning::QLearningDriver;
//!
//! let config = AgentConfig::new(100) // trials in the run
//!     .with_learning_rate(0.5)
//!     .with_discount_factor(0.25)
//!     .with_eps_cutoff_fraction(0.25);
//!
//! let mut agent = QLearningDriver::new(&config).with_seed(42);
//! agent.new_trial();
//! ```

pub mod agent;
pub mod q_table;

// Public re-exports
pub use agent::QLearningDriver;
pub use q_table::QTable;
