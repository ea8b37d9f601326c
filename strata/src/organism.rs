use crate::populations::SpeciesID;

use serde::{Deserialize, Serialize};

/// Organism identifier. Assigned by the simulation,
/// and expected to be unique among living organisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrganismID(pub usize);

/// The engine's view of an agent living in the simulation.
///
/// Organisms are owned by the simulation. The population only
/// keeps track of their ids and a copy of their genomes, and
/// reads or writes the fields below through this trait.
pub trait Organism {
    type Genome;

    /// Returns the organism's id.
    fn id(&self) -> OrganismID;

    /// Returns the genome the organism was built from.
    fn genome(&self) -> &Self::Genome;

    /// Evaluates and returns the organism's raw fitness,
    /// from whatever state the simulation keeps for it.
    fn raw_fitness(&mut self) -> f32;

    /// Returns the most recently computed adjusted fitness.
    fn adjusted_fitness(&self) -> f32;

    /// Stores a newly computed adjusted fitness.
    fn set_adjusted_fitness(&mut self, fitness: f32);

    /// Returns the species the organism was assigned to, if any.
    fn species(&self) -> Option<SpeciesID>;

    /// Records the species the organism was assigned to.
    fn set_species(&mut self, species: SpeciesID);
}
