//! Core domain types for the grid-world driving task
//!
//! States are small categorical tuples assembled from the environment's
//! percept plus the route planner's recommended heading. They are never
//! enumerated in advance; the Q-table discovers them as they occur.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Traffic light color at the agent's intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficLight {
    Red,
    Green,
}

impl fmt::Display for TrafficLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrafficLight::Red => write!(f, "red"),
            TrafficLight::Green => write!(f, "green"),
        }
    }
}

/// A heading relative to the agent's current orientation
///
/// Used both for the planner's recommended waypoint and for the heading
/// of other traffic at the intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// One of the four moves the agent can submit each step
///
/// `Action::ALL` lists the actions in canonical order. The greedy scan in
/// the Q-table iterates this order and resolves ties toward the later
/// action, so the order is part of the learning semantics, not a detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Remain stationary for this step
    Stay,
    Forward,
    Left,
    Right,
}

impl Action {
    /// All actions in canonical order
    pub const ALL: [Action; 4] = [Action::Stay, Action::Forward, Action::Left, Action::Right];
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => Action::Forward,
            Direction::Left => Action::Left,
            Direction::Right => Action::Right,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Stay => write!(f, "stay"),
            Action::Forward => write!(f, "forward"),
            Action::Left => write!(f, "left"),
            Action::Right => write!(f, "right"),
        }
    }
}

/// Categorical sensor reading at the agent's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Percept {
    /// Light color at the intersection
    pub light: TrafficLight,
    /// Heading of oncoming traffic, if any
    pub oncoming: Option<Direction>,
    /// Heading of traffic approaching from the left, if any
    pub left: Option<Direction>,
}

/// Decision state: the percept plus the planner's recommended heading
///
/// Two states are equal iff all four fields are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub light: TrafficLight,
    pub oncoming: Option<Direction>,
    pub left: Option<Direction>,
    /// Recommended next move toward the destination, `None` once arrived
    pub waypoint: Option<Direction>,
}

impl State {
    /// Assemble a state from a percept and the planner's waypoint
    pub fn new(percept: Percept, waypoint: Option<Direction>) -> Self {
        Self {
            light: percept.light,
            oncoming: percept.oncoming,
            left: percept.left,
            waypoint,
        }
    }
}

/// How a trial ended
///
/// The learner observes trial completion passively through the reward
/// and deadline values the environment hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialOutcome {
    /// Destination reached before the deadline expired
    ReachedDestination {
        /// Steps that were still remaining when the agent arrived
        steps_remaining: i32,
    },
    /// Deadline exhausted before reaching the destination
    DeadlineExceeded,
}

impl TrialOutcome {
    /// Whether the trial counts as a success
    pub fn is_success(&self) -> bool {
        matches!(self, TrialOutcome::ReachedDestination { .. })
    }
}
