//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use crate::types::{Action, State};

/// Q-table mapping (state, action) pairs to Q-values
///
/// The table is sparse: pairs that were never updated read as 0.0, which
/// is a valid default rather than an error. Entries are never deleted, so
/// growth is bounded by distinct states visited times four actions.
#[derive(Debug, Clone)]
pub struct QTable {
    /// Q-values: (state, action) -> estimated discounted return
    q_values: HashMap<(State, Action), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a new, empty Q-table
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
        }
    }

    /// Get the Q-value for a state-action pair, 0.0 if never updated
    pub fn get(&self, state: State, action: Action) -> f64 {
        self.q_values.get(&(state, action)).copied().unwrap_or(0.0)
    }

    /// Set the Q-value for a state-action pair
    pub fn set(&mut self, state: State, action: Action, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Greedy action: the highest-valued action in canonical order
    ///
    /// Scans `Action::ALL` with a running maximum seeded from the first
    /// action's value; a later action whose value is greater than *or
    /// equal to* the maximum replaces it. Ties therefore resolve to the
    /// last tied action in canonical order. This tie-break is load-bearing
    /// for the learned policy and must not be changed.
    pub fn best_action(&self, state: State) -> Action {
        self.scan(state).0
    }

    /// Maximum Q-value over all actions in a state
    ///
    /// Used as the bootstrap term of the update rule.
    pub fn best_value(&self, state: State) -> f64 {
        self.scan(state).1
    }

    fn scan(&self, state: State) -> (Action, f64) {
        let mut best_action = Action::ALL[0];
        let mut best_value = self.get(state, best_action);
        for action in Action::ALL {
            let q = self.get(state, action);
            if q >= best_value {
                best_value = q;
                best_action = action;
            }
        }
        (best_action, best_value)
    }

    /// One-step TD control update
    ///
    /// Q(s,a) ← (1−α)·Q(s,a) + α·[r + γ·max_a' Q(s',a')]
    ///
    /// `resulting_state` is the state re-sensed after the action executed.
    pub fn update(&mut self, state: State, action: Action, reward: f64, resulting_state: State) {
        let current = self.get(state, action);
        let target = reward + self.discount_factor * self.best_value(resulting_state);
        let updated = (1.0 - self.learning_rate) * current + self.learning_rate * target;
        self.set(state, action, updated);
    }

    /// Number of state-action pairs stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    /// Whether any pair has been stored
    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}
