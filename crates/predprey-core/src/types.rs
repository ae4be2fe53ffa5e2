//! Core type definitions for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a population plays in the reaction term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Prey,
    Predator,
}

impl Species {
    /// Coefficients of the local reaction term for this species.
    ///
    /// Both species share the shape `linear * own + coupled * own * other`;
    /// they differ only in which rate feeds which slot. Prey grow linearly
    /// and are eaten through the coupled term, predators starve linearly and
    /// grow through the coupled term.
    pub fn reaction(&self, rates: &Rates) -> ReactionCoefficients {
        match self {
            Species::Prey => ReactionCoefficients {
                linear: rates.birth,
                coupled: -rates.death,
            },
            Species::Predator => ReactionCoefficients {
                linear: -rates.death,
                coupled: rates.birth,
            },
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Prey => write!(f, "prey"),
            Species::Predator => write!(f, "predator"),
        }
    }
}

/// Per-species rate parameters, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    pub diffusion: f64,
    pub birth: f64,
    pub death: f64,
}

impl Rates {
    pub fn new(diffusion: f64, birth: f64, death: f64) -> Self {
        Self {
            diffusion,
            birth,
            death,
        }
    }

    /// Check every rate lies in `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        validate_unit("diffusion rate", self.diffusion)?;
        validate_unit("birth rate", self.birth)?;
        validate_unit("death rate", self.death)?;
        Ok(())
    }
}

/// Linear and predator-prey coupled coefficients of a reaction term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionCoefficients {
    pub linear: f64,
    pub coupled: f64,
}

impl ReactionCoefficients {
    /// Local rate of change for a cell holding `own` of this species and
    /// `other` of the opposing one.
    #[inline]
    pub fn apply(&self, own: f64, other: f64) -> f64 {
        self.linear * own + self.coupled * own * other
    }
}

/// Reject values outside `[0, 1]` (NaN included)
pub fn validate_unit(name: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )))
    }
}
