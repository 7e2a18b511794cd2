//! Q-learning driving agent
//!
//! The agent owns its Q-table, exploration rate, and trial bookkeeping for
//! the whole run. Independent agents carry independent tables, so tests
//! can instantiate as many as they need.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    app::AgentConfig,
    q_learning::q_table::QTable,
    types::{Action, State},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent for the driving task
///
/// Decisions are ε-greedy over the Q-table. The exploration rate follows a
/// two-phase schedule: pure random exploration for the warm-up trials, then
/// a compounding `(1/trial)` decay applied once per trial transition. The
/// decay multiplies the previous rate rather than replacing it, so the
/// shift from exploration to exploitation is much faster than harmonic.
#[derive(Debug)]
pub struct QLearningDriver {
    q_table: QTable,
    exploration_rate: f64,
    warmup_trials: usize,
    trial: usize,
    prev_pair: Option<(State, Action)>,
    trial_penalties: usize,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl QLearningDriver {
    /// Create a new agent from a validated configuration
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            q_table: QTable::new(config.learning_rate, config.discount_factor),
            exploration_rate: 1.0,
            warmup_trials: config.warmup_trials(),
            trial: 0,
            prev_pair: None,
            trial_penalties: 0,
            rng: build_rng(config.seed),
            rng_seed: config.seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    /// Reseed the internal generator for a reproducible run
    ///
    /// The trial runner calls this when its configuration carries a seed.
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    /// ε-greedy action selection
    ///
    /// A uniform draw below the current exploration rate picks uniformly
    /// among all four actions (including `Stay`); otherwise the greedy
    /// action from the Q-table. The chosen (state, action) pair is
    /// remembered so the next `learn` call can key its update to it.
    pub fn choose_action(&mut self, state: State) -> Action {
        let action = if self.rng.random::<f64>() < self.exploration_rate {
            *Action::ALL.choose(&mut self.rng).unwrap()
        } else {
            self.q_table.best_action(state)
        };
        self.prev_pair = Some((state, action));
        action
    }

    /// Apply the TD update for the most recent decision
    ///
    /// `resulting_state` must be freshly re-sensed from the collaborators
    /// after the action executed; it approximates the next decision point
    /// even though the next step will re-sense its own state. With no
    /// recorded pair (start of a trial) this is a no-op.
    pub fn learn(&mut self, reward: f64, resulting_state: State) {
        // A penalty is a penalty whether or not an update can be keyed.
        if reward < 0.0 && self.is_exploiting() {
            self.trial_penalties += 1;
        }
        let Some((state, action)) = self.prev_pair else {
            return;
        };
        self.q_table.update(state, action, reward, resulting_state);
    }

    /// Start a new trial
    ///
    /// Advances the trial counter and the exploration schedule, and clears
    /// the per-trial bookkeeping. Only the Q-table and exploration rate
    /// survive the transition.
    pub fn new_trial(&mut self) {
        self.trial += 1;
        if self.trial > self.warmup_trials {
            self.exploration_rate = (1.0 / self.trial as f64) * self.exploration_rate;
        }
        self.prev_pair = None;
        self.trial_penalties = 0;
    }

    /// Current exploration rate
    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    /// Current trial number (1-based once the first trial starts)
    pub fn trial(&self) -> usize {
        self.trial
    }

    /// Whether the warm-up phase is over
    pub fn is_exploiting(&self) -> bool {
        self.trial > self.warmup_trials
    }

    /// Penalties absorbed so far in the current trial
    ///
    /// Only counted once the warm-up is over; random-phase violations are
    /// expected and not tracked.
    pub fn trial_penalties(&self) -> usize {
        self.trial_penalties
    }

    /// Read access to the learned table
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Percept, TrafficLight};

    fn green_state(waypoint: Direction) -> State {
        State::new(
            Percept {
                light: TrafficLight::Green,
                oncoming: None,
                left: None,
            },
            Some(waypoint),
        )
    }

    #[test]
    fn learn_without_decision_is_a_no_op() {
        let mut agent = QLearningDriver::new(&AgentConfig::new(100));
        agent.new_trial();
        agent.learn(10.0, green_state(Direction::Forward));
        assert!(agent.q_table().is_empty());
    }

    #[test]
    fn learn_updates_the_pair_from_the_preceding_decision() {
        let mut agent = QLearningDriver::new(&AgentConfig::new(100)).with_seed(7);
        agent.new_trial();
        let state = green_state(Direction::Forward);
        let action = agent.choose_action(state);
        agent.learn(10.0, green_state(Direction::Left));

        // (1 - 0.5) * 0 + 0.5 * (10 + 0.25 * 0) = 5.0
        assert_eq!(agent.q_table().get(state, action), 5.0);
        assert_eq!(agent.q_table().len(), 1);
    }

    #[test]
    fn new_trial_clears_the_previous_pair() {
        let mut agent = QLearningDriver::new(&AgentConfig::new(100)).with_seed(7);
        agent.new_trial();
        agent.choose_action(green_state(Direction::Forward));
        agent.new_trial();
        agent.learn(10.0, green_state(Direction::Forward));
        assert!(agent.q_table().is_empty());
    }

    #[test]
    fn warmup_holds_the_rate_then_decay_compounds() {
        let mut agent = QLearningDriver::new(&AgentConfig::new(100));
        for _ in 0..25 {
            agent.new_trial();
            assert_eq!(agent.exploration_rate(), 1.0);
            assert!(!agent.is_exploiting());
        }

        let mut previous = agent.exploration_rate();
        for trial in 26..=100usize {
            agent.new_trial();
            assert!(agent.is_exploiting());
            let expected = previous / trial as f64;
            assert!((agent.exploration_rate() - expected).abs() < 1e-15);
            assert!(agent.exploration_rate() < previous);
            previous = agent.exploration_rate();
        }
    }

    #[test]
    fn penalties_only_count_after_warmup() {
        let mut agent = QLearningDriver::new(&AgentConfig::new(4).with_eps_cutoff_fraction(0.5));
        let state = green_state(Direction::Forward);

        // Trials 1-2 are warm-up: negative rewards are not penalties.
        agent.new_trial();
        agent.choose_action(state);
        agent.learn(-1.0, state);
        assert_eq!(agent.trial_penalties(), 0);

        agent.new_trial();
        agent.new_trial();
        agent.choose_action(state);
        agent.learn(-1.0, state);
        agent.choose_action(state);
        agent.learn(-0.5, state);
        assert_eq!(agent.trial_penalties(), 2);

        agent.new_trial();
        assert_eq!(agent.trial_penalties(), 0);
    }

    #[test]
    fn penalties_count_even_without_a_recorded_pair() {
        let mut agent = QLearningDriver::new(&AgentConfig::new(2).with_eps_cutoff_fraction(0.5));
        agent.new_trial();
        agent.new_trial();
        assert!(agent.is_exploiting());

        // No decision yet: the update is skipped but the negative reward
        // was still observed.
        agent.learn(-1.0, green_state(Direction::Forward));
        assert!(agent.q_table().is_empty());
        assert_eq!(agent.trial_penalties(), 1);
    }

    #[test]
    fn exploitation_follows_the_greedy_scan() {
        let config = AgentConfig::new(1).with_eps_cutoff_fraction(0.0);
        let mut agent = QLearningDriver::new(&config).with_seed(3);
        // Trial 1 with no warm-up: rate becomes (1/1) * 1.0 = 1.0, so force
        // a couple more transitions to push the rate to effectively zero.
        for _ in 0..40 {
            agent.new_trial();
        }
        assert!(agent.exploration_rate() < 1e-40);

        let state = green_state(Direction::Right);
        let action = agent.choose_action(state);
        assert_eq!(action, Action::Right);

        // All-zero table ties resolve to the last canonical action.
        assert_eq!(agent.q_table().best_action(state), Action::Right);
    }
}
