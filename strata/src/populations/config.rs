use super::ConfigError;

use serde::{Deserialize, Serialize};

/// Configuration data for speciation and reproduction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Genetic distance threshold, at or beyond which
    /// genomes are considered as belonging to
    /// different species, and cannot be mated.
    pub distance_threshold: f32,
}

impl PopulationConfig {
    /// Returns a "zero-valued" default configuration.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments,
    /// as a zero threshold places every genome in its own species.
    /// It is meant as a way to abbreviate configuration
    /// instantiation.
    ///
    /// # Examples
    /// ```
    /// use strata::PopulationConfig;
    ///
    /// let config = PopulationConfig {
    ///     distance_threshold: 10.0,
    ///     ..PopulationConfig::zero()
    /// };
    /// assert!(config.validate().is_ok());
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            distance_threshold: 0.0,
        }
    }

    /// Checks that all values are usable.
    ///
    /// # Errors
    /// Returns an error if the distance threshold
    /// is not a positive, finite quantity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("distance_threshold", self.distance_threshold)
    }
}
