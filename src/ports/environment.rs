//! Environment port - the world the agent drives in
//!
//! The grid-world physics, traffic rules, and deadline clock live behind
//! this boundary. The learner only consumes the percept/reward contract.

use crate::types::{Action, Percept};

/// Reward at or above this value signals arrival at the destination.
pub const GOAL_REWARD: f64 = 9.0;

/// Environment trait - sensing and acting in the world
///
/// # Design Philosophy
///
/// This trait represents a **port** in hexagonal architecture - a boundary
/// between the learning core and the simulation it runs inside. The crate
/// ships one synthetic adapter ([`crate::adapters::GridWorld`]); tests
/// provide scripted doubles.
///
/// # Contract
///
/// - `sense` is queried twice per step: once before acting to build the
///   decision state, once after to build the bootstrap state.
/// - `act` returns the reward signal. A reward `>= GOAL_REWARD` means the
///   destination was reached; a negative reward is a rule-violation
///   penalty. Neither is an error in the programming sense - both are
///   ordinary signals the learner absorbs.
/// - `deadline` is the count of steps remaining before the trial fails.
pub trait Environment {
    /// Sense the categorical conditions at the agent's position.
    fn sense(&self) -> Percept;

    /// Steps remaining before the trial fails.
    fn deadline(&self) -> i32;

    /// Execute an action and return the reward signal.
    fn act(&mut self, action: Action) -> f64;
}
