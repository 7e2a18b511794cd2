//! Observer port - abstraction for run observation and data collection
//!
//! This port defines the interface for observing simulation events,
//! allowing composable data collection without coupling the trial runner
//! to specific output formats or metrics.

use crate::{
    Result,
    types::{Action, State, TrialOutcome},
};

/// Observer trait for monitoring a simulation run
///
/// Observers can be composed to collect different kinds of data during a
/// run: progress bars for user feedback, JSONL export for analysis,
/// metrics tracking for evaluation.
///
/// # Event Sequence
///
/// 1. `on_run_start(total_trials)` - once at the beginning
/// 2. For each trial:
///    - `on_trial_start(trial)`
///    - `on_step(...)` - for each decision-update cycle
///    - `on_trial_end(trial, outcome)`
/// 3. `on_run_end()` - once at the end
///
/// All methods default to no-ops so observers only implement the hooks
/// they care about.
pub trait TrialObserver: Send {
    /// Called once when the run starts.
    fn on_run_start(&mut self, _total_trials: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a trial starts.
    ///
    /// `trial` is the 1-based trial number.
    fn on_trial_start(&mut self, _trial: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each decision-update cycle.
    ///
    /// # Parameters
    ///
    /// * `trial` - current trial number (1-based)
    /// * `step` - step number within the trial (0-based)
    /// * `state` - decision state the action was chosen from
    /// * `action` - action submitted to the environment
    /// * `reward` - reward signal the environment returned
    /// * `deadline` - steps that were remaining when the action was chosen
    fn on_step(
        &mut self,
        _trial: usize,
        _step: usize,
        _state: &State,
        _action: Action,
        _reward: f64,
        _deadline: i32,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a trial ends.
    fn on_trial_end(&mut self, _trial: usize, _outcome: TrialOutcome) -> Result<()> {
        Ok(())
    }

    /// Called once when the run completes.
    ///
    /// Use this to finalize outputs, flush files, or display summaries.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
