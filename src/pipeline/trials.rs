//! Trial runner for simulation runs

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Environment, GOAL_REWARD, RoutePlanner, TrialObserver},
    q_learning::QLearningDriver,
    types::{State, TrialOutcome},
};

/// Simulation run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of trials in the run
    pub trials: usize,

    /// Random seed, applied to the agent when the run starts
    ///
    /// Adapters seed their own generators at construction; see
    /// [`crate::adapters::GridWorld::new`].
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            seed: None,
        }
    }
}

/// Result of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Total trials driven
    pub total_trials: usize,

    /// Trials that reached the destination before the deadline
    pub successes: usize,

    /// Overall success rate
    pub success_rate: f64,

    /// Trials driven after the exploration warm-up ended
    pub exploit_trials: usize,

    /// Post-warm-up trials that reached the destination
    pub exploit_successes: usize,

    /// Post-warm-up success ratio
    pub exploit_success_ratio: f64,

    /// Rule-violation penalties absorbed after the warm-up
    pub exploit_penalties: usize,
}

impl RunResult {
    /// Create a new run result
    pub fn new(
        total_trials: usize,
        successes: usize,
        exploit_trials: usize,
        exploit_successes: usize,
        exploit_penalties: usize,
    ) -> Self {
        let success_rate = if total_trials > 0 {
            successes as f64 / total_trials as f64
        } else {
            0.0
        };
        let exploit_success_ratio = if exploit_trials > 0 {
            exploit_successes as f64 / exploit_trials as f64
        } else {
            0.0
        };

        Self {
            total_trials,
            successes,
            success_rate,
            exploit_trials,
            exploit_successes,
            exploit_success_ratio,
            exploit_penalties,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Drives an agent through a run of trials
///
/// One step is one atomic decision-update cycle: query the waypoint and
/// percept, assemble the state, choose an action, submit it for a reward,
/// re-sense for the bootstrap state, feed the update. The runner observes
/// trial completion passively through the reward and deadline the
/// environment hands back.
pub struct TrialRunner {
    config: SimulationConfig,
    observers: Vec<Box<dyn TrialObserver>>,
}

impl TrialRunner {
    /// Create a new trial runner
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the runner
    pub fn with_observer(mut self, observer: Box<dyn TrialObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of trials
    ///
    /// The world implements both collaborator ports; the planner needs the
    /// world's geometry, so the synthetic adapter and most doubles carry
    /// both.
    pub fn run<W>(&mut self, agent: &mut QLearningDriver, world: &mut W) -> Result<RunResult>
    where
        W: Environment + RoutePlanner,
    {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
        }

        for observer in &mut self.observers {
            observer.on_run_start(self.config.trials)?;
        }

        let mut successes = 0;
        let mut exploit_trials = 0;
        let mut exploit_successes = 0;
        let mut exploit_penalties = 0;

        for _ in 0..self.config.trials {
            world.route_to_new_destination();
            agent.new_trial();
            let trial = agent.trial();

            for observer in &mut self.observers {
                observer.on_trial_start(trial)?;
            }

            let outcome = self.run_trial(agent, world, trial)?;

            if outcome.is_success() {
                successes += 1;
            }
            if agent.is_exploiting() {
                exploit_trials += 1;
                exploit_penalties += agent.trial_penalties();
                if outcome.is_success() {
                    exploit_successes += 1;
                }
            }

            for observer in &mut self.observers {
                observer.on_trial_end(trial, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        Ok(RunResult::new(
            self.config.trials,
            successes,
            exploit_trials,
            exploit_successes,
            exploit_penalties,
        ))
    }

    fn run_trial<W>(
        &mut self,
        agent: &mut QLearningDriver,
        world: &mut W,
        trial: usize,
    ) -> Result<TrialOutcome>
    where
        W: Environment + RoutePlanner,
    {
        let mut step = 0;
        loop {
            let deadline = world.deadline();
            if deadline <= 0 {
                return Ok(TrialOutcome::DeadlineExceeded);
            }

            let waypoint = world.next_waypoint();
            let state = State::new(world.sense(), waypoint);
            let action = agent.choose_action(state);
            let reward = world.act(action);

            // Re-sense after acting: the bootstrap state approximates the
            // next decision point, which is otherwise unobservable here.
            // The next iteration still assembles its own state from
            // scratch.
            let resulting_state = State::new(world.sense(), world.next_waypoint());
            agent.learn(reward, resulting_state);

            for observer in &mut self.observers {
                observer.on_step(trial, step, &state, action, reward, deadline)?;
            }

            if reward >= GOAL_REWARD {
                return Ok(TrialOutcome::ReachedDestination {
                    steps_remaining: deadline,
                });
            }
            step += 1;
        }
    }
}
