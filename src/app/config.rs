//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration for creating a learning driver.
///
/// Builder-style API; defaults match the reference hyperparameters used
/// for the 100-trial grid-world runs.
///
/// # Examples
///
/// ```
/// use smartcab::app::AgentConfig;
///
/// let config = AgentConfig::new(100).with_seed(42).with_learning_rate(0.5);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Fraction of trials spent in the pure-exploration warm-up
    pub eps_cutoff_fraction: f64,
    /// Number of trials the run will last; sizes the warm-up phase
    pub total_trials: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration for a run of the given length.
    ///
    /// Defaults: α = 0.5, γ = 0.25, warm-up fraction 0.25, no seed.
    pub fn new(total_trials: usize) -> Self {
        Self {
            learning_rate: 0.5,
            discount_factor: 0.25,
            eps_cutoff_fraction: 0.25,
            total_trials,
            seed: None,
        }
    }

    /// Set the learning rate α.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set the discount factor γ.
    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    /// Set the warm-up fraction of the exploration schedule.
    pub fn with_eps_cutoff_fraction(mut self, fraction: f64) -> Self {
        self.eps_cutoff_fraction = fraction;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of warm-up trials implied by this configuration.
    pub fn warmup_trials(&self) -> usize {
        (self.eps_cutoff_fraction * self.total_trials as f64) as usize
    }

    /// Check that all parameters are in range.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.learning_rate) {
            return Err(Error::InvalidConfiguration {
                message: format!("learning rate {} must be in [0, 1]", self.learning_rate),
            });
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(Error::InvalidConfiguration {
                message: format!("discount factor {} must be in [0, 1]", self.discount_factor),
            });
        }
        if !(0.0..=1.0).contains(&self.eps_cutoff_fraction) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "warm-up fraction {} must be in [0, 1]",
                    self.eps_cutoff_fraction
                ),
            });
        }
        if self.total_trials == 0 {
            return Err(Error::InvalidConfiguration {
                message: "total trials must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(100)
    }
}
