//! # strata-nn
//! A layered, feed-forward neural network implementation of the
//! [`strata`] crate's `Genome` trait.
//!
//! Provides a [`LayeredGenome`] type usable in `strata` `Population`s,
//! the innovation [`History`] it evolves under, and a [`Network`]
//! which can be compiled from a [`LayeredGenome`] and evaluated once
//! per simulation tick.
//!
//! [`LayeredGenome`]: crate::genomics::LayeredGenome
//! [`History`]: crate::genomics::History
//! [`Network`]: crate::networks::Network
//!
//! # Example usage: growing a network from nothing
//! ```
//! use strata_nn::{
//!     genomics::{GeneticConfig, History, LayeredGenome},
//!     networks::Network,
//! };
//! use rand::SeedableRng;
//! use std::num::NonZeroUsize;
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
//! let config = GeneticConfig {
//!     input_count: NonZeroUsize::new(2).unwrap(),
//!     output_count: NonZeroUsize::new(4).unwrap(),
//!     bias_enabled: true,
//!     node_addition_mutation_chance: 0.1,
//!     gene_addition_mutation_chance: 0.3,
//!     weight_mutation_chance: 0.8,
//!     ..GeneticConfig::zero()
//! };
//! let mut history = History::new(&config);
//! let mut genome = LayeredGenome::new(&config, &mut history, &mut rng);
//!
//! for _ in 0..100 {
//!     genome.mutate(&mut history, &config, &mut rng);
//! }
//! assert!(genome.is_feed_forward());
//!
//! let mut network = Network::new(&genome);
//! let outputs = network.evaluate(&[1.0, 0.0]);
//! assert!(outputs.iter().all(|&o| 0.0 < o && o < 1.0));
//! ```

pub mod genomics;
pub mod networks;

/// Innovation numbers identify nodes and genes
/// across all genomes of a simulation run.
pub type Innovation = usize;
