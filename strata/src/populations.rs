//! A Population tracks the genomes of every living
//! organism in a simulation, grouped into species of
//! genetically similar individuals. Organisms enter and
//! leave the population one at a time, as the simulation
//! dictates, rather than in generational batches.
mod config;
mod errors;
pub mod logging;
mod species;

use crate::genome::{Compatibility, Genome, InnovationHistory};
use crate::organism::Organism;
pub use config::PopulationConfig;
pub use errors::{ConfigError, PopulationError};
pub use species::{Member, Species, SpeciesID};

use log::debug;
use rand::prelude::{Rng, SliceRandom};
use serde::{Deserialize, Serialize};

/// Number of breeding pool slots shared
/// among all candidates of a [`breeding_pair`] draw.
///
/// [`breeding_pair`]: Population::breeding_pair
const BREEDING_POOL_SLOTS: f32 = 100.0;

/// A continuously evolving population of genomes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Population<C, H, G> {
    species: Vec<Species<G>>,
    template: G,
    history: H,
    historical_species_count: usize,
    population_config: PopulationConfig,
    genetic_config: C,
}

impl<C, H, G> Population<C, H, G>
where
    H: InnovationHistory<Config = C>,
    G: Genome<InnovationHistory = H, Config = C>,
{
    /// Creates a new, empty population using the passed configurations.
    /// A fresh innovation history is created from the genetic
    /// configuration, and used to build the template genome from
    /// which every [created genome] descends.
    ///
    /// The type of `genetic_config` depends on the implementation
    /// of [`Genome`], and is effectively opaque to the population.
    ///
    /// [created genome]: Population::create_genome
    /// [`Genome`]: crate::Genome
    ///
    /// # Examples
    /// ```
    /// use strata::{Population, PopulationConfig};
    /// use strata_nn::genomics::{GeneticConfig, LayeredGenome};
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(7);
    /// let pop_config = PopulationConfig {
    ///     distance_threshold: 10.0,
    ///     ..PopulationConfig::zero()
    /// };
    ///
    /// let population =
    ///     Population::<_, _, LayeredGenome>::new(pop_config, GeneticConfig::zero(), &mut rng);
    /// assert_eq!(population.organism_count(), 0);
    /// ```
    pub fn new<R: Rng + ?Sized>(
        population_config: PopulationConfig,
        genetic_config: C,
        rng: &mut R,
    ) -> Population<C, H, G> {
        let history = H::new(&genetic_config);
        Population::with_history(population_config, genetic_config, history, rng)
    }

    /// Creates a new, empty population that records structural
    /// innovations in the supplied history.
    pub fn with_history<R: Rng + ?Sized>(
        population_config: PopulationConfig,
        genetic_config: C,
        mut history: H,
        rng: &mut R,
    ) -> Population<C, H, G> {
        let template = G::new(&genetic_config, &mut history, rng);
        Population {
            species: vec![],
            template,
            history,
            historical_species_count: 0,
            population_config,
            genetic_config,
        }
    }

    /// Returns a copy of the template genome with
    /// freshly randomized weights.
    pub fn create_genome<R: Rng + ?Sized>(&self, rng: &mut R) -> G {
        self.template.randomized(&self.genetic_config, rng)
    }

    /// Returns the compatibility between two genomes.
    pub fn compatibility(&self, first: &G, second: &G) -> Compatibility {
        G::compatibility(first, second, &self.genetic_config)
    }

    /// Returns the genetic distance between two genomes.
    pub fn genetic_distance(&self, first: &G, second: &G) -> f32 {
        self.compatibility(first, second).distance
    }

    /// Assigns an organism to a species, and returns the species' id.
    ///
    /// Species are scanned in order of creation, extinct ones
    /// included, and the organism joins the first whose representative
    /// lies closer than the [distance threshold]. If none does, a new
    /// species is founded with the organism's genome as representative.
    ///
    /// An organism that already belonged to a species
    /// leaves it before being reassigned.
    ///
    /// [distance threshold]: crate::PopulationConfig::distance_threshold
    pub fn determine_species<O>(&mut self, organism: &mut O) -> SpeciesID
    where
        O: Organism<Genome = G>,
    {
        if organism.species().is_some() {
            self.kill(organism);
        }

        let threshold = self.population_config.distance_threshold;
        let genome = organism.genome();
        let compatible = self
            .species
            .iter()
            .position(|s| s.genetic_distance(genome, &self.genetic_config) < threshold);
        let id = match compatible {
            Some(index) => {
                let species = &mut self.species[index];
                species.add_member(organism.id(), genome.clone());
                species.id()
            }
            None => {
                let id = SpeciesID(self.historical_species_count);
                self.historical_species_count += 1;
                self.species
                    .push(Species::new(id, organism.id(), genome.clone()));
                debug!("{:?} founded by {:?}", id, organism.id());
                id
            }
        };
        organism.set_species(id);
        id
    }

    /// Removes an organism from its species' membership.
    /// Returns whether the organism was a member of a
    /// species of this population.
    ///
    /// Species left without members are kept, and reported as
    /// extinct; see [`remove_extinct_species`].
    ///
    /// [`remove_extinct_species`]: Population::remove_extinct_species
    pub fn kill<O: Organism<Genome = G>>(&mut self, organism: &O) -> bool {
        let species_id = match organism.species() {
            Some(id) => id,
            None => return false,
        };
        match self.species_index(species_id) {
            Some(index) => {
                let species = &mut self.species[index];
                let removed = species.remove_member(organism.id());
                if removed && species.is_extinct() {
                    debug!("{:?} went extinct", species_id);
                }
                removed
            }
            None => false,
        }
    }

    /// Evaluates an organism's raw fitness and divides it by the
    /// sum of its sharing values with every member of its species,
    /// itself included. The sharing value of two genomes at distance
    /// `d` is `max(0, 1 - d / threshold)`.
    ///
    /// The resulting adjusted fitness is stored on the organism
    /// and on its species' member record, and returned.
    ///
    /// # Errors
    /// Returns an error if the organism is not
    /// a member of any of the population's species.
    pub fn calculate_fitness<O>(&mut self, organism: &mut O) -> Result<f32, PopulationError>
    where
        O: Organism<Genome = G>,
    {
        let species_id = organism
            .species()
            .ok_or(PopulationError::Unspeciated(organism.id()))?;
        let index = self
            .species_index(species_id)
            .filter(|&i| self.species[i].member(organism.id()).is_some())
            .ok_or(PopulationError::NotAMember(organism.id(), species_id))?;

        let raw_fitness = organism.raw_fitness();
        let threshold = self.population_config.distance_threshold;
        let sharing: f32 = self.species[index]
            .members()
            .map(|m| {
                let distance = self.genetic_distance(organism.genome(), m.genome());
                (1.0 - distance / threshold).max(0.0)
            })
            .sum();

        let adjusted_fitness = raw_fitness / sharing;
        organism.set_adjusted_fitness(adjusted_fitness);
        self.species[index].set_member_fitness(organism.id(), adjusted_fitness);
        Ok(adjusted_fitness)
    }

    /// Mates two organisms, returning the child genome.
    ///
    /// The parent with the greater adjusted fitness is dominant,
    /// with ties broken by a coin flip. The child is built from the
    /// dominant parent's genome, and mutated before being returned.
    ///
    /// # Errors
    /// Returns an error if the parents' genetic distance is
    /// not lesser than the [distance threshold].
    ///
    /// [distance threshold]: crate::PopulationConfig::distance_threshold
    pub fn crossover<O, R>(
        &mut self,
        parent1: &O,
        parent2: &O,
        rng: &mut R,
    ) -> Result<G, PopulationError>
    where
        O: Organism<Genome = G>,
        R: Rng + ?Sized,
    {
        let compatibility = self.compatibility(parent1.genome(), parent2.genome());
        let threshold = self.population_config.distance_threshold;
        if compatibility.distance >= threshold {
            debug!(
                "crossover between {:?} and {:?} rejected",
                parent1.id(),
                parent2.id()
            );
            return Err(PopulationError::Incompatible {
                distance: compatibility.distance,
                threshold,
            });
        }

        let (f1, f2) = (parent1.adjusted_fitness(), parent2.adjusted_fitness());
        let parent1_dominant = if f1 == f2 { rng.gen_bool(0.5) } else { f1 > f2 };
        let (dominant, recessive) = if parent1_dominant {
            (parent1, parent2)
        } else {
            (parent2, parent1)
        };

        Ok(G::mate(
            dominant.genome(),
            recessive.genome(),
            compatibility,
            &mut self.history,
            &self.genetic_config,
            rng,
        ))
    }

    /// Draws two distinct organisms for mating, returning their indices.
    ///
    /// Each candidate is entered into a breeding pool a number of
    /// times proportional to its share of the candidates' total
    /// adjusted fitness, rounded down. The first parent is drawn
    /// from the pool, all of its entries are removed, and the
    /// second parent is drawn from what remains.
    ///
    /// Returns `None` if fewer than two candidates have entries.
    pub fn breeding_pair<O, R>(&self, candidates: &[O], rng: &mut R) -> Option<(usize, usize)>
    where
        O: Organism<Genome = G>,
        R: Rng + ?Sized,
    {
        let total: f32 = candidates.iter().map(|o| o.adjusted_fitness()).sum();
        if !(total.is_finite() && total > 0.0) {
            return None;
        }

        let mut pool: Vec<usize> = candidates
            .iter()
            .enumerate()
            .flat_map(|(i, o)| {
                let entries = (o.adjusted_fitness().max(0.0) * BREEDING_POOL_SLOTS / total) as usize;
                std::iter::repeat(i).take(entries)
            })
            .collect();

        let first = *pool.choose(rng)?;
        pool.retain(|&i| i != first);
        let second = *pool.choose(rng)?;
        Some((first, second))
    }

    /// Removes every extinct species from the species list.
    /// Returns the number of species removed.
    pub fn remove_extinct_species(&mut self) -> usize {
        let before = self.species.len();
        self.species.retain(|s| !s.is_extinct());
        before - self.species.len()
    }

    /// Returns an iterator over all species,
    /// extinct ones included, in order of creation.
    pub fn species(&self) -> impl Iterator<Item = &Species<G>> {
        self.species.iter()
    }

    /// Returns an iterator over the species with living members.
    pub fn living_species(&self) -> impl Iterator<Item = &Species<G>> {
        self.species.iter().filter(|s| !s.is_extinct())
    }

    /// Returns the species with the specified id, if it
    /// exists and has not been removed.
    pub fn species_by_id(&self, id: SpeciesID) -> Option<&Species<G>> {
        self.species_index(id).map(|i| &self.species[i])
    }

    /// Returns the number of organisms across all species.
    pub fn organism_count(&self) -> usize {
        self.species.iter().map(|s| s.len()).sum()
    }

    /// Returns the number of species ever created.
    pub fn historical_species_count(&self) -> usize {
        self.historical_species_count
    }

    /// Returns the template genome.
    pub fn template(&self) -> &G {
        &self.template
    }

    /// Returns the population's innovation history.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Returns a mutable reference to the innovation history,
    /// for mutating genomes outside of crossover.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Returns the population's configuration.
    pub fn population_config(&self) -> &PopulationConfig {
        &self.population_config
    }

    /// Returns the genetic configuration.
    pub fn genetic_config(&self) -> &C {
        &self.genetic_config
    }

    /// Species ids are created in increasing order and never
    /// reordered, so the list can be binary searched.
    fn species_index(&self, id: SpeciesID) -> Option<usize> {
        self.species.binary_search_by_key(&id, |s| s.id()).ok()
    }
}
