//! Configuration types for the simulation.

use crate::types::{validate_unit, Rates};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Rate parameters and initial-density seed for one species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    /// Birth rate (0.0 to 1.0)
    pub birth_rate: f64,
    /// Death rate (0.0 to 1.0)
    pub death_rate: f64,
    /// Diffusion rate (0.0 to 1.0)
    pub diffusion_rate: f64,
    /// Seed for the initial density; 0 starts the species extinct
    pub seed: i64,
}

impl SpeciesConfig {
    pub fn prey() -> Self {
        Self {
            birth_rate: 0.1,
            death_rate: 0.05,
            diffusion_rate: 0.2,
            seed: 1,
        }
    }

    pub fn predator() -> Self {
        Self {
            birth_rate: 0.03,
            death_rate: 0.09,
            diffusion_rate: 0.2,
            seed: 1,
        }
    }

    pub fn rates(&self) -> Rates {
        Rates::new(self.diffusion_rate, self.birth_rate, self.death_rate)
    }

    /// Generator seed; a negative seed draws the same field as its magnitude
    pub fn rng_seed(&self) -> u64 {
        self.seed.unsigned_abs()
    }
}

/// Full parameter set for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Prey (mice) parameters
    pub prey: SpeciesConfig,
    /// Predator (foxes) parameters
    pub predator: SpeciesConfig,
    /// Time step size
    pub delta_t: f64,
    /// Number of time steps between output files
    pub log_interval: i64,
    /// Simulated time to run for
    pub duration: i64,
    /// Habitat map to load
    pub landscape_file: PathBuf,
    /// Directory receiving maps and the averages log
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            prey: SpeciesConfig::prey(),
            predator: SpeciesConfig::predator(),
            delta_t: 0.5,
            log_interval: 10,
            duration: 500,
            landscape_file: PathBuf::new(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl RunConfig {
    /// Decode a config from JSON text; absent fields take their defaults
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Validate every scalar parameter, failing on the first bad one
    pub fn validate(&self) -> Result<()> {
        validate_delta(self.delta_t)?;
        validate_duration(self.duration)?;
        validate_log_interval(self.log_interval, self.duration)?;
        self.prey.rates().validate()?;
        self.predator.rates().validate()?;
        debug!(
            delta_t = self.delta_t,
            duration = self.duration,
            log_interval = self.log_interval,
            "Run configuration validated"
        );
        Ok(())
    }

    /// Number of whole steps of `delta_t` that fit in `duration`
    pub fn total_steps(&self) -> u64 {
        if self.delta_t > 0.0 && self.duration > 0 {
            (self.duration as f64 / self.delta_t) as u64
        } else {
            0
        }
    }

    /// Whether output is produced before step `step`.
    ///
    /// An interval of 0 only reports the initial state.
    pub fn is_log_step(&self, step: u64) -> bool {
        match self.log_interval {
            i if i <= 0 => step == 0,
            i => step % i as u64 == 0,
        }
    }
}

/// Time step must lie in `(0, 1]`
pub fn validate_delta(delta: f64) -> Result<f64> {
    let delta = validate_unit("delta t", delta)?;
    if delta == 0.0 {
        return Err(Error::Configuration(
            "delta t must be greater than 0".to_string(),
        ));
    }
    Ok(delta)
}

pub fn validate_duration(duration: i64) -> Result<i64> {
    if duration <= 0 {
        return Err(Error::Configuration(format!(
            "duration must be greater than 0, got {}",
            duration
        )));
    }
    Ok(duration)
}

/// Log interval must lie in `[0, duration]`
pub fn validate_log_interval(log_interval: i64, duration: i64) -> Result<i64> {
    if log_interval > duration {
        return Err(Error::Configuration(format!(
            "log interval {} can't be more than the duration {}",
            log_interval, duration
        )));
    }
    if log_interval < 0 {
        return Err(Error::Configuration(format!(
            "log interval can't be less than 0, got {}",
            log_interval
        )));
    }
    Ok(log_interval)
}
