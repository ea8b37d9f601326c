//! A real-time implementation of NeuroEvolution of Augmenting Topologies,
//! in the style of rtNEAT: organisms are born, evaluated and killed one at
//! a time by an external simulation, rather than in generational batches.
//!
//! The engine is agnostic to the genetic representation in use, which is
//! supplied through the `Genome` trait. A layered, feed-forward neural network
//! representation is provided by the `strata-nn` crate. The simulation plugs
//! its agents in by implementing the `Organism` trait.
//!
//! # Example usage: a tick-driven loop, using `strata-nn`
//! ```
//! use strata::{Organism, OrganismID, Population, PopulationConfig, SpeciesID};
//! use strata_nn::{
//!     genomics::{GeneticConfig, LayeredGenome},
//!     networks::Network,
//! };
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use std::num::NonZeroUsize;
//!
//! struct Agent {
//!     id: OrganismID,
//!     genome: LayeredGenome,
//!     network: Network,
//!     score: f32,
//!     adjusted_fitness: f32,
//!     species: Option<SpeciesID>,
//! }
//!
//! impl Agent {
//!     fn new(id: usize, genome: LayeredGenome) -> Agent {
//!         Agent {
//!             id: OrganismID(id),
//!             network: Network::new(&genome),
//!             genome,
//!             score: 0.0,
//!             adjusted_fitness: 0.0,
//!             species: None,
//!         }
//!     }
//! }
//!
//! impl Organism for Agent {
//!     type Genome = LayeredGenome;
//!
//!     fn id(&self) -> OrganismID { self.id }
//!     fn genome(&self) -> &LayeredGenome { &self.genome }
//!     fn raw_fitness(&mut self) -> f32 { self.score }
//!     fn adjusted_fitness(&self) -> f32 { self.adjusted_fitness }
//!     fn set_adjusted_fitness(&mut self, fitness: f32) { self.adjusted_fitness = fitness }
//!     fn species(&self) -> Option<SpeciesID> { self.species }
//!     fn set_species(&mut self, species: SpeciesID) { self.species = Some(species) }
//! }
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let genetic_config = GeneticConfig {
//!     input_count: NonZeroUsize::new(2).unwrap(),
//!     output_count: NonZeroUsize::new(1).unwrap(),
//!     bias_enabled: true,
//!     excess_gene_factor: 1.0,
//!     disjoint_gene_factor: 1.0,
//!     common_weight_factor: 0.4,
//!     weak_gene_ratio: 0.5,
//!     weight_replace_chance: 0.1,
//!     gene_addition_mutation_chance: 0.5,
//!     weight_mutation_chance: 0.8,
//!     ..GeneticConfig::zero()
//! };
//! let population_config = PopulationConfig { distance_threshold: 10.0 };
//! let mut population = Population::new(population_config, genetic_config, &mut rng);
//!
//! let mut agents: Vec<Agent> = (0..10)
//!     .map(|id| Agent::new(id, population.create_genome(&mut rng)))
//!     .collect();
//! for agent in &mut agents {
//!     population.determine_species(agent);
//! }
//!
//! for tick in 0..50 {
//!     for agent in &mut agents {
//!         let output = agent.network.evaluate(&[1.0, 0.0])[0];
//!         agent.score += 1.0 - output;
//!         population.calculate_fitness(agent).unwrap();
//!     }
//!     if tick % 10 == 9 {
//!         let (p1, p2) = match population.breeding_pair(&agents, &mut rng) {
//!             Some(pair) => pair,
//!             None => continue,
//!         };
//!         if let Ok(genome) = population.crossover(&agents[p1], &agents[p2], &mut rng) {
//!             // Replace the least fit agent with the child.
//!             let worst = (0..agents.len())
//!                 .min_by(|&a, &b| agents[a].adjusted_fitness.total_cmp(&agents[b].adjusted_fitness))
//!                 .unwrap();
//!             population.kill(&agents[worst]);
//!             agents[worst] = Agent::new(10 + tick, genome);
//!             population.determine_species(&mut agents[worst]);
//!         }
//!     }
//! }
//! assert_eq!(population.organism_count(), agents.len());
//! ```

mod genome;
mod organism;
mod populations;

pub use genome::*;
pub use organism::*;
pub use populations::*;
