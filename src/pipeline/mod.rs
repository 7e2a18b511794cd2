//! Simulation pipeline abstractions
//!
//! This module provides the trial runner that drives an agent through a
//! run of trials, plus composable observers for recording what happened.

pub mod observers;
pub mod trials;

// Re-export observer implementations (adapters)
pub use observers::{
    JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver, StepObservation,
    TrialObservation,
};
pub use trials::{RunResult, SimulationConfig, TrialRunner};

pub use crate::ports::{Environment, RoutePlanner, TrialObserver};
