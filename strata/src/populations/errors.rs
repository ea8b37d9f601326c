use crate::organism::OrganismID;
use crate::populations::SpeciesID;

use thiserror::Error;

/// An error type indicating a failed population operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PopulationError {
    /// The parents are too distant to be mated.
    #[error("crossover between genomes at distance {distance} (threshold {threshold})")]
    Incompatible { distance: f32, threshold: f32 },
    /// The organism was never assigned to a species.
    #[error("organism {0:?} has not been assigned a species")]
    Unspeciated(OrganismID),
    /// The organism's species is not part of the population,
    /// or the organism is no longer one of its members.
    #[error("organism {0:?} is not a member of species {1:?}")]
    NotAMember(OrganismID, SpeciesID),
}

/// An error type indicating a malformed configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A probability outside of [0, 1].
    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f32 },
    /// A quantity that must be strictly positive.
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    /// A quantity that must not be negative.
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

impl ConfigError {
    /// Checks that `value` lies in [0, 1].
    pub fn check_probability(name: &'static str, value: f32) -> Result<(), ConfigError> {
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::InvalidProbability { name, value })
        }
    }

    /// Checks that `value` is finite and greater than 0.
    pub fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositive { name, value })
        }
    }

    /// Checks that `value` is finite and not lesser than 0.
    pub fn check_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Negative { name, value })
        }
    }
}
