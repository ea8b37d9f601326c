use crate::genomics::ActivationType;

use serde::{Deserialize, Serialize};
use strata::ConfigError;

use std::num::NonZeroUsize;

/// Connectivity of the template genome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitialTopology {
    /// No genes at all.
    Unconnected,
    /// Every input connected to every hidden node, and
    /// every hidden node to every output. Without hidden
    /// nodes, every input is connected to every output.
    /// The bias node is left unconnected.
    FullNoDirect,
}

/// Configuration data for genome generation
/// and inter-genome operations.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Use
/// [`validate`] to check a loaded configuration.
///
/// [`validate`]: GeneticConfig::validate
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of inputs in a genome.
    pub input_count: NonZeroUsize,
    /// Number of outputs in a genome.
    pub output_count: NonZeroUsize,
    /// Number of hidden nodes in the template genome,
    /// all placed in a single layer.
    pub hidden_count: usize,
    /// Connectivity of the template genome.
    pub initial_topology: InitialTopology,
    /// Whether genes may originate at the bias node.
    pub bias_enabled: bool,
    /// Activation function of every non-input node.
    pub activation_type: ActivationType,
    /// Weight of excess genes in genetic distance.
    pub excess_gene_factor: f32,
    /// Weight of disjoint genes in genetic distance.
    pub disjoint_gene_factor: f32,
    /// Weight of the mean homologous gene weight
    /// difference in genetic distance.
    pub common_weight_factor: f32,
    /// Fraction of homologous genes that a child
    /// inherits from its recessive parent.
    pub weak_gene_ratio: f32,
    /// Chance of a gene weight being replaced, rather
    /// than perturbed, during weight mutation.
    pub weight_replace_chance: f32,
    /// Chance of a node addition mutation.
    pub node_addition_mutation_chance: f32,
    /// Chance of a node deletion mutation.
    pub node_deletion_mutation_chance: f32,
    /// Chance of a gene addition mutation.
    pub gene_addition_mutation_chance: f32,
    /// Chance of a gene being disabled.
    pub gene_disable_mutation_chance: f32,
    /// Chance of a gene being re-enabled.
    pub gene_enable_mutation_chance: f32,
    /// Chance of all gene weights being mutated.
    pub weight_mutation_chance: f32,
}

impl GeneticConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, false, or in the case of
    /// `NonZeroUsize`s, 1. The template is unconnected
    /// and uses [`Sigmoid`] activations.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to fill in unused values during
    /// configuration instantiation.
    ///
    /// [`Sigmoid`]: crate::genomics::ActivationType::Sigmoid
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::GeneticConfig;
    ///
    /// let cfg1 = GeneticConfig::zero();
    ///
    /// let cfg2 = GeneticConfig {
    ///     // Specify some values here...
    ///     gene_addition_mutation_chance: 0.2,
    ///     weak_gene_ratio: 0.5,
    ///     // Default the rest...
    ///     ..GeneticConfig::zero()
    /// };
    /// assert!(cfg2.validate().is_ok());
    /// ```
    pub const fn zero() -> GeneticConfig {
        GeneticConfig {
            // SAFETY: 1 is a valid NonZeroUsize.
            input_count: unsafe { NonZeroUsize::new_unchecked(1) },
            output_count: unsafe { NonZeroUsize::new_unchecked(1) },
            hidden_count: 0,
            initial_topology: InitialTopology::Unconnected,
            bias_enabled: false,
            activation_type: ActivationType::Sigmoid,
            excess_gene_factor: 0.0,
            disjoint_gene_factor: 0.0,
            common_weight_factor: 0.0,
            weak_gene_ratio: 0.0,
            weight_replace_chance: 0.0,
            node_addition_mutation_chance: 0.0,
            node_deletion_mutation_chance: 0.0,
            gene_addition_mutation_chance: 0.0,
            gene_disable_mutation_chance: 0.0,
            gene_enable_mutation_chance: 0.0,
            weight_mutation_chance: 0.0,
        }
    }

    /// Checks that all values are usable.
    ///
    /// # Errors
    /// Returns the first offending value found: a probability
    /// outside of [0, 1], or a negative or non-finite
    /// distance coefficient.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_non_negative("excess_gene_factor", self.excess_gene_factor)?;
        ConfigError::check_non_negative("disjoint_gene_factor", self.disjoint_gene_factor)?;
        ConfigError::check_non_negative("common_weight_factor", self.common_weight_factor)?;
        for (name, value) in [
            ("weak_gene_ratio", self.weak_gene_ratio),
            ("weight_replace_chance", self.weight_replace_chance),
            (
                "node_addition_mutation_chance",
                self.node_addition_mutation_chance,
            ),
            (
                "node_deletion_mutation_chance",
                self.node_deletion_mutation_chance,
            ),
            (
                "gene_addition_mutation_chance",
                self.gene_addition_mutation_chance,
            ),
            (
                "gene_disable_mutation_chance",
                self.gene_disable_mutation_chance,
            ),
            (
                "gene_enable_mutation_chance",
                self.gene_enable_mutation_chance,
            ),
            ("weight_mutation_chance", self.weight_mutation_chance),
        ] {
            ConfigError::check_probability(name, value)?;
        }
        Ok(())
    }
}
