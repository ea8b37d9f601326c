use rand::Rng;

/// An interface for genomes that can be evolved by a [`Population`].
///
/// All randomness is drawn from the generator passed in by the
/// caller, so that a seeded generator makes evolution reproducible.
///
/// [`Population`]: crate::Population
pub trait Genome: Clone {
    type Config;
    type InnovationHistory: InnovationHistory<Config = Self::Config>;

    /// Returns the template genome described by the configuration.
    fn new<R: Rng + ?Sized>(
        config: &Self::Config,
        history: &mut Self::InnovationHistory,
        rng: &mut R,
    ) -> Self;

    /// Returns a copy of the genome with every weight
    /// replaced by a fresh random value.
    fn randomized<R: Rng + ?Sized>(&self, config: &Self::Config, rng: &mut R) -> Self;

    /// Returns the compatibility between two genomes: their
    /// genetic distance, and the number of homologous genes
    /// found while computing it.
    fn compatibility(first: &Self, second: &Self, config: &Self::Config) -> Compatibility;

    /// Combines a dominant and a recessive parent into a child,
    /// and mutates the child before returning it.
    ///
    /// `compatibility` must be the result of comparing both parents.
    fn mate<R: Rng + ?Sized>(
        dominant: &Self,
        recessive: &Self,
        compatibility: Compatibility,
        history: &mut Self::InnovationHistory,
        config: &Self::Config,
        rng: &mut R,
    ) -> Self;

    /// Mutates the genome in place. Returns whether
    /// any mutation was attempted.
    fn mutate<R: Rng + ?Sized>(
        &mut self,
        history: &mut Self::InnovationHistory,
        config: &Self::Config,
        rng: &mut R,
    ) -> bool;
}

/// An Innovation History is used to keep track
/// of structural innovations across all genomes
/// of a simulation run, so that identical mutations
/// discovered independently receive identical ids.
///
/// A history is owned by a single population and
/// passed explicitly into every call that may
/// create structure. Callers evolving genomes in
/// parallel must serialize access to it.
pub trait InnovationHistory {
    type Config;

    fn new(config: &Self::Config) -> Self;
}

/// The result of comparing two genomes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Compatibility {
    /// Genetic distance between the genomes.
    pub distance: f32,
    /// Number of genes present in both genomes.
    pub homologous: usize,
}
