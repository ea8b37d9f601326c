use crate::genome::Genome;
use crate::organism::OrganismID;

use serde::{Deserialize, Serialize};

use std::cmp::Ordering;

/// Species identifier. Species are numbered
/// in order of creation, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesID(pub usize);

/// A species' record of one of its organisms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member<G> {
    id: OrganismID,
    genome: G,
    adjusted_fitness: f32,
}

impl<G> Member<G> {
    /// Returns the member organism's id.
    pub fn id(&self) -> OrganismID {
        self.id
    }

    /// Returns the genome the member organism was built from.
    pub fn genome(&self) -> &G {
        &self.genome
    }

    /// Returns the member's last computed adjusted fitness,
    /// or 0 if it has not been computed yet.
    pub fn adjusted_fitness(&self) -> f32 {
        self.adjusted_fitness
    }
}

/// Species are collections of reproductively
/// compatible (within a certain [genetic distance])
/// organisms. Membership is determined by calculating
/// the genetic distance to a _representative_, which
/// is the genome of the species' founding member, and
/// never changes during the species' lifetime.
///
/// A species whose membership becomes empty is extinct.
/// Extinct species are kept in the population's species
/// list unless explicitly pruned.
///
/// [genetic distance]: crate::PopulationConfig::distance_threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species<G> {
    id: SpeciesID,
    representative: G,
    members: Vec<Member<G>>,
}

impl<G: Clone> Species<G> {
    /// Creates a new species with the specified ID,
    /// whose representative and sole member is the
    /// founding organism.
    pub fn new(id: SpeciesID, founder: OrganismID, genome: G) -> Species<G> {
        Species {
            id,
            representative: genome.clone(),
            members: vec![Member {
                id: founder,
                genome,
                adjusted_fitness: 0.0,
            }],
        }
    }

    /// Returns the species' ID.
    pub fn id(&self) -> SpeciesID {
        self.id
    }

    /// Returns the species' representative genome.
    pub fn representative(&self) -> &G {
        &self.representative
    }

    /// Returns the genetic distance between the species'
    /// representative and `other`.
    pub fn genetic_distance(&self, other: &G, config: &G::Config) -> f32
    where
        G: Genome,
    {
        G::compatibility(&self.representative, other, config).distance
    }

    /// Returns an iterator over the species' members,
    /// in order of arrival unless [sorted].
    ///
    /// [sorted]: Species::sort_by_fitness
    pub fn members(&self) -> impl Iterator<Item = &Member<G>> {
        self.members.iter()
    }

    /// Returns the member record of the specified organism.
    pub fn member(&self, id: OrganismID) -> Option<&Member<G>> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Returns the number of living members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the species is extinct.
    pub fn is_extinct(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the species' mean member adjusted fitness,
    /// or 0 for an extinct species.
    pub fn adjusted_fitness(&self) -> f32 {
        if self.members.is_empty() {
            0.0
        } else {
            self.members.iter().map(|m| m.adjusted_fitness).sum::<f32>() / self.members.len() as f32
        }
    }

    /// Returns the member with the highest adjusted fitness,
    /// or `None` if the species is extinct.
    pub fn champion(&self) -> Option<&Member<G>> {
        self.members
            .iter()
            .max_by(|m1, m2| compare_fitness(m1.adjusted_fitness, m2.adjusted_fitness))
    }

    /// Sorts the species' members by adjusted fitness,
    /// in decreasing order.
    pub fn sort_by_fitness(&mut self) {
        self.members
            .sort_by(|m1, m2| compare_fitness(m2.adjusted_fitness, m1.adjusted_fitness));
    }

    pub(super) fn add_member(&mut self, id: OrganismID, genome: G) {
        self.members.push(Member {
            id,
            genome,
            adjusted_fitness: 0.0,
        });
    }

    /// Removes a member, returning whether it was present.
    pub(super) fn remove_member(&mut self, id: OrganismID) -> bool {
        match self.members.iter().position(|m| m.id == id) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    pub(super) fn set_member_fitness(&mut self, id: OrganismID, fitness: f32) {
        if let Some(member) = self.members.iter_mut().find(|m| m.id == id) {
            member.adjusted_fitness = fitness;
        }
    }
}

fn compare_fitness(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| panic!("uncomparable fitness value detected"))
}
