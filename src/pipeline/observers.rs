//! Observer pattern for simulation runs
//!
//! Observers allow composable data collection during a run without
//! coupling the trial runner to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::TrialObserver,
    types::{Action, State, TrialOutcome},
};

/// Observation of a single decision-update cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepObservation {
    /// Trial number (1-based)
    pub trial: usize,
    /// Step within the trial (0-based)
    pub step: usize,
    /// Decision state the action was chosen from
    pub state: State,
    /// Action submitted to the environment
    pub action: Action,
    /// Reward signal returned
    pub reward: f64,
    /// Steps remaining when the action was chosen
    pub deadline: i32,
}

/// Observation of a complete trial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialObservation {
    pub trial: usize,
    pub outcome: String,
    pub total_steps: usize,
    pub steps: Vec<StepObservation>,
}

/// Progress observer - indicatif progress bar over trials
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    successes: usize,
    failures: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            successes: 0,
            failures: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrialObserver for ProgressObserver {
    fn on_run_start(&mut self, total_trials: usize) -> Result<()> {
        let pb = ProgressBar::new(total_trials as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} trials ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_trial_end(&mut self, trial: usize, outcome: TrialOutcome) -> Result<()> {
        if outcome.is_success() {
            self.successes += 1;
        } else {
            self.failures += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(trial as u64);
            pb.set_message(format!("ok:{} fail:{}", self.successes, self.failures));
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("ok:{} fail:{}", self.successes, self.failures));
        }
        Ok(())
    }
}

/// Metrics observer - tracks run metrics
pub struct MetricsObserver {
    successes: usize,
    failures: usize,
    total_trials: usize,
    penalty_steps: usize,
    step_counts: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            successes: 0,
            failures: 0,
            total_trials: 0,
            penalty_steps: 0,
            step_counts: Vec::new(),
        }
    }

    /// Get current success rate
    pub fn success_rate(&self) -> f64 {
        if self.total_trials == 0 {
            0.0
        } else {
            self.successes as f64 / self.total_trials as f64
        }
    }

    /// Get average trial length in steps
    pub fn avg_trial_length(&self) -> f64 {
        if self.step_counts.is_empty() {
            0.0
        } else {
            self.step_counts.iter().sum::<usize>() as f64 / self.step_counts.len() as f64
        }
    }

    /// Steps that drew a negative reward, over the whole run
    ///
    /// Counts warm-up violations too; the warm-up-gated tally lives in
    /// [`super::RunResult`].
    pub fn penalty_steps(&self) -> usize {
        self.penalty_steps
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_trials: self.total_trials,
            successes: self.successes,
            failures: self.failures,
            success_rate: self.success_rate(),
            penalty_steps: self.penalty_steps,
            avg_trial_length: self.avg_trial_length(),
        }
    }
}

/// Summary of run metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_trials: usize,
    pub successes: usize,
    pub failures: usize,
    pub success_rate: f64,
    pub penalty_steps: usize,
    pub avg_trial_length: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl TrialObserver for MetricsObserver {
    fn on_trial_start(&mut self, _trial: usize) -> Result<()> {
        self.step_counts.push(0);
        Ok(())
    }

    fn on_step(
        &mut self,
        _trial: usize,
        _step: usize,
        _state: &State,
        _action: Action,
        reward: f64,
        _deadline: i32,
    ) -> Result<()> {
        if let Some(last) = self.step_counts.last_mut() {
            *last += 1;
        }
        if reward < 0.0 {
            self.penalty_steps += 1;
        }
        Ok(())
    }

    fn on_trial_end(&mut self, _trial: usize, outcome: TrialOutcome) -> Result<()> {
        self.total_trials += 1;
        if outcome.is_success() {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        Ok(())
    }
}

/// JSONL observer - exports observations to JSON Lines format
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_trial_steps: Vec<StepObservation>,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self {
            writer,
            current_trial_steps: Vec::new(),
        })
    }
}

impl TrialObserver for JsonlObserver {
    fn on_trial_start(&mut self, _trial: usize) -> Result<()> {
        self.current_trial_steps.clear();
        Ok(())
    }

    fn on_step(
        &mut self,
        trial: usize,
        step: usize,
        state: &State,
        action: Action,
        reward: f64,
        deadline: i32,
    ) -> Result<()> {
        self.current_trial_steps.push(StepObservation {
            trial,
            step,
            state: *state,
            action,
            reward,
            deadline,
        });
        Ok(())
    }

    fn on_trial_end(&mut self, trial: usize, outcome: TrialOutcome) -> Result<()> {
        let observation = TrialObservation {
            trial,
            outcome: format!("{outcome:?}"),
            total_steps: self.current_trial_steps.len(),
            steps: self.current_trial_steps.clone(),
        };

        // Write as JSONL (one JSON object per line)
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}
