//! Genomes are the focus of evolution in NEAT.
//! They are a collection of genes and nodes that can be instantiated
//! as a phenotype (a neural network). Genomes can be progressively mutated,
//! thus adding complexity and functionality.
//!
//! The genomes in this module are _layered_: every node lives in a
//! numbered layer, and every gene points from a lower layer to a
//! strictly higher one, so the phenotype is always feed-forward.
mod config;
mod errors;
mod genes;
mod history;
mod nodes;

pub use config::{GeneticConfig, InitialTopology};
pub use errors::{GeneValidityError, MutationError};
pub use genes::Gene;
pub use history::{History, NodeKey};
pub use nodes::{ActivationType, Node, NodeType};

use crate::Innovation;

use ahash::RandomState;
use log::trace;
use rand::prelude::{Rng, SliceRandom};
use serde::{Deserialize, Serialize};
use strata::Compatibility;

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A mutable collection of genes and nodes, arranged in layers.
///
/// Nodes are kept sorted by layer, with the bias node first,
/// followed by the sensors, hidden nodes, and actuators.
/// Genes are kept sorted by innovation number.
///
/// Genomes serialize with Serde, so populations can be saved and resumed.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LayeredGenome {
    nodes: Vec<Node>,
    genes: Vec<Gene>,
    node_layers: Vec<usize>,
    first_output_index: usize,
    node_positions: HashMap<Innovation, usize, RandomState>,
    node_pairings: HashSet<(Innovation, Innovation), RandomState>,
}

impl LayeredGenome {
    /// Create the template genome described by the configuration.
    ///
    /// The bias node, sensors and actuators are always present,
    /// followed by `hidden_count` hidden nodes in a single layer
    /// between them. Genes are created as specified by the
    /// [initial topology], with random weights in [-0.5, 0.5).
    ///
    /// [initial topology]: crate::genomics::GeneticConfig::initial_topology
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{
    ///     GeneticConfig, History, InitialTopology, LayeredGenome, NodeType,
    /// };
    /// use rand::SeedableRng;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     hidden_count: 4,
    ///     initial_topology: InitialTopology::FullNoDirect,
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let genome = LayeredGenome::new(&config, &mut History::new(&config), &mut rng);
    ///
    /// // Bias + 3 sensors in layer 0, 4 hidden nodes in layer 1, 2 actuators in layer 2.
    /// assert_eq!(genome.node_layers(), &[4, 4, 2]);
    /// assert_eq!(genome.nodes().filter(|n| n.node_type() == NodeType::Neuron).count(), 4);
    ///
    /// // Inputs are connected to hidden nodes, and those to outputs.
    /// assert_eq!(genome.genes().count(), 3 * 4 + 4 * 2);
    /// assert!(genome.genes().all(|g| (-0.5..0.5).contains(&g.weight())));
    /// ```
    pub fn new<R: Rng + ?Sized>(
        config: &GeneticConfig,
        history: &mut History,
        rng: &mut R,
    ) -> LayeredGenome {
        let input_count = config.input_count.get();
        let output_count = config.output_count.get();
        let hidden_count = config.hidden_count;
        let (node_layers, output_layer) = if hidden_count > 0 {
            (vec![input_count + 1, hidden_count, output_count], 2)
        } else {
            (vec![input_count + 1, output_count], 1)
        };

        let mut genome = LayeredGenome {
            nodes: Vec::with_capacity(1 + input_count + output_count + hidden_count),
            genes: vec![],
            node_layers,
            first_output_index: 0,
            node_positions: HashMap::default(),
            node_pairings: HashSet::default(),
        };

        let activation_type = config.activation_type;
        let template_nodes = std::iter::once((NodeKey::Bias, 0, NodeType::Bias))
            .chain((0..input_count).map(|i| (NodeKey::Sensor(i), 0, NodeType::Sensor)))
            .chain((0..output_count).map(|o| (NodeKey::Actuator(o), output_layer, NodeType::Actuator)))
            .chain((0..hidden_count).map(|h| (NodeKey::Hidden(h), 1, NodeType::Neuron)));
        for (key, layer, node_type) in template_nodes {
            let id = history.lookup_or_assign_node(key, |id| genome.node_positions.contains_key(&id));
            genome.node_positions.insert(id, genome.nodes.len());
            genome
                .nodes
                .push(Node::new(id, layer, node_type, activation_type));
        }
        genome.nodes.sort_by_key(|n| n.layer);
        genome.first_output_index = genome.nodes.len() - output_count;
        genome.reindex();

        if config.initial_topology == InitialTopology::FullNoDirect {
            let sensors = 1..input_count + 1;
            let hidden = input_count + 1..genome.first_output_index;
            let actuators = genome.first_output_index..genome.nodes.len();
            let pairs: Vec<(usize, usize)> = if hidden_count > 0 {
                Self::cartesian(sensors, hidden.clone())
                    .chain(Self::cartesian(hidden, actuators))
                    .collect()
            } else {
                Self::cartesian(sensors, actuators).collect()
            };
            for (input, output) in pairs {
                let (input, output) = (genome.nodes[input].innovation(), genome.nodes[output].innovation());
                let id = history.lookup_or_assign_gene(input, output);
                genome.insert_gene(id, input, output, Gene::random_weight(rng));
            }
        }

        genome
    }

    fn cartesian(
        inputs: std::ops::Range<usize>,
        outputs: std::ops::Range<usize>,
    ) -> impl Iterator<Item = (usize, usize)> {
        inputs.flat_map(move |i| outputs.clone().map(move |o| (i, o)))
    }

    /// Add a new gene between the specified nodes, with
    /// its innovation number taken from the history.
    /// Returns a reference to the new gene.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is not in the
    /// genome, a gene between the same endpoints already
    /// exists, or the gene would not point to a strictly
    /// higher layer.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{GeneticConfig, History, LayeredGenome};
    /// use rand::SeedableRng;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut history = History::new(&config);
    /// let mut genome = LayeredGenome::new(&config, &mut history, &mut rng);
    ///
    /// // Nodes 0 (bias), 1 and 2 (sensors) and 3 (actuator).
    /// let gene = genome.add_gene(1, 3, 2.5, &mut history).unwrap();
    /// assert_eq!(gene.endpoints(), (1, 3));
    /// assert_eq!(gene.weight(), 2.5);
    ///
    /// // Duplicate, backwards and dangling genes are rejected.
    /// assert!(genome.add_gene(1, 3, 1.0, &mut history).is_err());
    /// assert!(genome.add_gene(3, 1, 1.0, &mut history).is_err());
    /// assert!(genome.add_gene(1, 9, 1.0, &mut history).is_err());
    /// ```
    pub fn add_gene(
        &mut self,
        input_id: Innovation,
        output_id: Innovation,
        weight: f32,
        history: &mut History,
    ) -> Result<&mut Gene, GeneValidityError> {
        use GeneValidityError::*;
        let (input_layer, output_layer) = match (self.node(input_id), self.node(output_id)) {
            (Some(input), Some(output)) => (input.layer(), output.layer()),
            _ => return Err(NonexistantEndpoints(input_id, output_id)),
        };
        if self.node_pairings.contains(&(input_id, output_id)) {
            Err(DuplicateEndpoints(input_id, output_id))
        } else if input_layer >= output_layer {
            Err(NotFeedForward(input_id, output_id))
        } else {
            let id = history.lookup_or_assign_gene(input_id, output_id);
            Ok(self.insert_gene(id, input_id, output_id, weight))
        }
    }

    /// Inserts a gene at its place in innovation order.
    /// Assumes the gene is valid for the genome.
    fn insert_gene(
        &mut self,
        gene_id: Innovation,
        input_id: Innovation,
        output_id: Innovation,
        weight: f32,
    ) -> &mut Gene {
        let index = self.genes.partition_point(|g| g.innovation() < gene_id);
        self.genes
            .insert(index, Gene::new(gene_id, input_id, output_id, weight));
        self.node_pairings.insert((input_id, output_id));
        &mut self.genes[index]
    }

    /// Rebuilds the node id to position index.
    fn reindex(&mut self) {
        self.node_positions.clear();
        self.node_positions
            .extend(self.nodes.iter().enumerate().map(|(i, n)| (n.innovation(), i)));
    }

    fn layer_of(&self, node_id: Innovation) -> usize {
        self.nodes[self.node_positions[&node_id]].layer()
    }

    /// Returns the largest number of genes the genome's current
    /// layout admits: one for every pair of nodes in which the
    /// second lies in a higher layer than the first. Genes from
    /// the bias node are only counted if bias is enabled.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{GeneticConfig, History, LayeredGenome};
    /// use rand::SeedableRng;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    /// let mut config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_count: NonZeroUsize::new(4).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    /// let genome = LayeredGenome::new(&config, &mut History::new(&config), &mut rng);
    ///
    /// assert_eq!(genome.max_gene_count(&config), 2 * 4);
    /// config.bias_enabled = true;
    /// assert_eq!(genome.max_gene_count(&config), 3 * 4);
    /// ```
    pub fn max_gene_count(&self, config: &GeneticConfig) -> usize {
        let bias = config.bias_enabled as usize;
        let mut nodes_to_connect = self.nodes.len() + bias - 1;
        let mut count = 0;
        for (i, &layer_size) in self.node_layers[..self.node_layers.len() - 1].iter().enumerate() {
            let nodes_in_layer = if i == 0 {
                layer_size + bias - 1
            } else {
                layer_size
            };
            nodes_to_connect -= nodes_in_layer;
            count += nodes_to_connect * nodes_in_layer;
        }
        count
    }

    /// Induces a _gene mutation_ in the genome: a new gene
    /// is created between a random pair of unconnected nodes,
    /// with the second in a higher layer than the first, and a
    /// random weight in [-0.5, 0.5). If successful, returns the
    /// newly added gene.
    ///
    /// # Errors
    ///
    /// Returns an error if every allowed pair of
    /// nodes is already connected.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{GeneticConfig, History, LayeredGenome};
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    /// let config = GeneticConfig::zero();
    /// let mut history = History::new(&config);
    /// let mut genome = LayeredGenome::new(&config, &mut history, &mut rng);
    ///
    /// // With bias disabled, the single sensor can only
    /// // connect to the single actuator.
    /// assert!(genome.mutate_add_gene(&mut history, &config, &mut rng).is_ok());
    /// assert!(genome.mutate_add_gene(&mut history, &config, &mut rng).is_err());
    /// ```
    pub fn mutate_add_gene<R: Rng + ?Sized>(
        &mut self,
        history: &mut History,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Result<&Gene, MutationError> {
        let eligible_gene_count = self
            .genes
            .iter()
            .filter(|g| config.bias_enabled || self.node_type_of(g.input()) != NodeType::Bias)
            .count();
        if eligible_gene_count >= self.max_gene_count(config) {
            return Err(MutationError::GenomeFullyConnected);
        }

        let (input, output) = loop {
            let input = &self.nodes[rng.gen_range(0..self.first_output_index)];
            if input.node_type() == NodeType::Bias && !config.bias_enabled {
                continue;
            }
            let first_candidate = self.nodes.partition_point(|n| n.layer() <= input.layer());
            let output = &self.nodes[rng.gen_range(first_candidate..self.nodes.len())];
            if !self
                .node_pairings
                .contains(&(input.innovation(), output.innovation()))
            {
                break (input.innovation(), output.innovation());
            }
        };

        let id = history.lookup_or_assign_gene(input, output);
        trace!("gene mutation {} -> {} ({})", input, output, id);
        let weight = Gene::random_weight(rng);
        Ok(&*self.insert_gene(id, input, output, weight))
    }

    fn node_type_of(&self, node_id: Innovation) -> NodeType {
        self.nodes[self.node_positions[&node_id]].node_type()
    }

    /// Induces a _node mutation_ in the genome: a random enabled
    /// gene not originating at the bias node is split in two, with
    /// a new hidden node in between. If successful, returns the
    /// new node.
    ///
    /// If the split gene spans more than one layer, the node is
    /// placed in a random layer between its endpoints. Otherwise,
    /// a new layer is created for it right below the gene's output.
    /// The gene into the new node inherits the split gene's weight,
    /// the gene out of it has weight 1, and the split gene is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no gene to split.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{GeneticConfig, History, LayeredGenome, NodeType};
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    /// let config = GeneticConfig::zero();
    /// let mut history = History::new(&config);
    /// let mut genome = LayeredGenome::new(&config, &mut history, &mut rng);
    /// genome.add_gene(1, 2, 0.3, &mut history).unwrap();
    ///
    /// let node = genome.mutate_add_node(&mut history, &config, &mut rng).unwrap().clone();
    ///
    /// assert_eq!(node.node_type(), NodeType::Neuron);
    /// assert_eq!(genome.node_layers(), &[2, 1, 1]);
    /// assert_eq!(genome.genes().filter(|g| g.enabled()).count(), 2);
    /// ```
    pub fn mutate_add_node<R: Rng + ?Sized>(
        &mut self,
        history: &mut History,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Result<&Node, MutationError> {
        let candidates: Vec<usize> = self
            .genes
            .iter()
            .enumerate()
            .filter(|(_, g)| g.enabled() && self.node_type_of(g.input()) != NodeType::Bias)
            .map(|(i, _)| i)
            .collect();
        let split = *candidates
            .choose(rng)
            .ok_or(MutationError::NoSplittableGene)?;

        let (input, output) = self.genes[split].endpoints();
        let weight = self.genes[split].weight();
        self.genes[split].set_enabled(false);

        let (input_layer, output_layer) = (self.layer_of(input), self.layer_of(output));
        let layer = if output_layer - input_layer > 1 {
            let layer = rng.gen_range(input_layer + 1..output_layer);
            self.node_layers[layer] += 1;
            layer
        } else {
            self.node_layers.insert(output_layer, 1);
            for node in self.nodes.iter_mut().filter(|n| n.layer >= output_layer) {
                node.layer += 1;
            }
            output_layer
        };

        let node_positions = &self.node_positions;
        let id = history.lookup_or_assign_node(NodeKey::Split(input, output), |id| {
            node_positions.contains_key(&id)
        });
        let position = self.nodes.partition_point(|n| n.layer() <= layer);
        self.nodes.insert(
            position,
            Node::new(id, layer, NodeType::Neuron, config.activation_type),
        );
        self.first_output_index += 1;
        self.reindex();

        let input_gene = history.lookup_or_assign_gene(input, id);
        self.insert_gene(input_gene, input, id, weight);
        let output_gene = history.lookup_or_assign_gene(id, output);
        self.insert_gene(output_gene, id, output, 1.0);

        trace!("node mutation {} -> {} -> {}", input, id, output);
        Ok(&self.nodes[position])
    }

    /// Induces a _node deletion mutation_: a random hidden node
    /// is removed, along with every gene into or out of it.
    /// If successful, returns the removed node.
    ///
    /// Layers left empty are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the genome has no hidden nodes.
    pub fn mutate_remove_node<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Node, MutationError> {
        let hidden = self.first_hidden_index()..self.first_output_index;
        if hidden.is_empty() {
            return Err(MutationError::NoHiddenNodes);
        }

        let node = self.nodes.remove(rng.gen_range(hidden));
        let id = node.innovation();
        self.node_layers[node.layer()] -= 1;
        self.first_output_index -= 1;
        self.genes.retain(|g| g.input() != id && g.output() != id);
        self.node_pairings.retain(|&(i, o)| i != id && o != id);
        self.reindex();

        trace!("node deletion {}", id);
        Ok(node)
    }

    /// Induces a _gene enabling mutation_ on a random disabled gene.
    /// If successful, returns the affected gene.
    ///
    /// # Errors
    ///
    /// Returns an error if no gene is disabled.
    pub fn mutate_enable_gene<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Gene, MutationError> {
        self.toggle_random_gene(false, rng)
            .ok_or(MutationError::NoDisabledGenes)
    }

    /// Induces a _gene disabling mutation_ on a random enabled gene.
    /// If successful, returns the affected gene.
    ///
    /// # Errors
    ///
    /// Returns an error if no gene is enabled.
    pub fn mutate_disable_gene<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Gene, MutationError> {
        self.toggle_random_gene(true, rng)
            .ok_or(MutationError::NoEnabledGenes)
    }

    /// Flips the status of a random gene whose
    /// status is `enabled`, if there are any.
    fn toggle_random_gene<R: Rng + ?Sized>(&mut self, enabled: bool, rng: &mut R) -> Option<&Gene> {
        let candidates: Vec<usize> = self
            .genes
            .iter()
            .enumerate()
            .filter(|(_, g)| g.enabled() == enabled)
            .map(|(i, _)| i)
            .collect();
        let &index = candidates.choose(rng)?;
        let gene = &mut self.genes[index];
        gene.set_enabled(!enabled);
        trace!("gene {} enabled: {}", gene.innovation(), !enabled);
        Some(&*gene)
    }

    /// Mutates the weight of every gene: with probability
    /// [`weight_replace_chance`] it is replaced with a random
    /// value in [-0.5, 0.5), and otherwise nudged by a random
    /// amount in [-0.1, 0.1]. If `replace_all` is set, every
    /// weight is replaced.
    ///
    /// [`weight_replace_chance`]: crate::genomics::GeneticConfig::weight_replace_chance
    pub fn mutate_weights<R: Rng + ?Sized>(
        &mut self,
        config: &GeneticConfig,
        rng: &mut R,
        replace_all: bool,
    ) {
        for gene in self.genes.iter_mut() {
            if replace_all || rng.gen::<f32>() < config.weight_replace_chance {
                gene.randomize_weight(rng);
            } else {
                gene.nudge_weight(rng);
            }
        }
    }

    /// Attempts each kind of mutation with its configured chance,
    /// in order: node addition, node deletion, gene addition, gene
    /// disabling, gene enabling, and weight mutation. Returns whether
    /// any of them was attempted.
    ///
    /// Mutations that find nothing to act on have no effect.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{GeneticConfig, History, LayeredGenome};
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    /// let config = GeneticConfig {
    ///     gene_addition_mutation_chance: 1.0,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut history = History::new(&config);
    /// let mut genome = LayeredGenome::new(&config, &mut history, &mut rng);
    ///
    /// assert!(genome.mutate(&mut history, &config, &mut rng));
    /// assert_eq!(genome.genes().count(), 1);
    /// ```
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        history: &mut History,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> bool {
        let mut mutated = false;
        if rng.gen::<f32>() < config.node_addition_mutation_chance {
            let _ = self.mutate_add_node(history, config, rng);
            mutated = true;
        }
        if rng.gen::<f32>() < config.node_deletion_mutation_chance {
            let _ = self.mutate_remove_node(rng);
            mutated = true;
        }
        if rng.gen::<f32>() < config.gene_addition_mutation_chance {
            let _ = self.mutate_add_gene(history, config, rng);
            mutated = true;
        }
        if rng.gen::<f32>() < config.gene_disable_mutation_chance {
            let _ = self.mutate_disable_gene(rng);
            mutated = true;
        }
        if rng.gen::<f32>() < config.gene_enable_mutation_chance {
            let _ = self.mutate_enable_gene(rng);
            mutated = true;
        }
        if rng.gen::<f32>() < config.weight_mutation_chance {
            self.mutate_weights(config, rng, false);
            mutated = true;
        }
        mutated
    }

    /// Returns the compatibility of two genomes.
    ///
    /// Both gene lists are walked in innovation order. Genes
    /// present in both are homologous, and contribute their
    /// weight difference to the mean weight difference. Genes
    /// present in only one are disjoint, unless they are part of
    /// the tail left over once either list runs out, in which case
    /// they are excess. The distance is
    /// `excess_gene_factor · excess + disjoint_gene_factor · disjoint
    /// + common_weight_factor · mean weight difference`, and 0 for
    /// two genomes without genes.
    pub fn compatibility(
        first: &LayeredGenome,
        second: &LayeredGenome,
        config: &GeneticConfig,
    ) -> Compatibility {
        let (genes1, genes2) = (&first.genes, &second.genes);
        let (mut i, mut j) = (0, 0);
        let (mut disjoint, mut homologous) = (0, 0);
        let mut weight_difference = 0.0;

        while i < genes1.len() && j < genes2.len() {
            match genes1[i].innovation().cmp(&genes2[j].innovation()) {
                Ordering::Less => {
                    disjoint += 1;
                    i += 1;
                }
                Ordering::Greater => {
                    disjoint += 1;
                    j += 1;
                }
                Ordering::Equal => {
                    weight_difference += (genes1[i].weight() - genes2[j].weight()).abs();
                    homologous += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        let excess = (genes1.len() - i) + (genes2.len() - j);

        let mean_weight_difference = if homologous > 0 {
            weight_difference / homologous as f32
        } else {
            0.0
        };
        Compatibility {
            distance: config.excess_gene_factor * excess as f32
                + config.disjoint_gene_factor * disjoint as f32
                + config.common_weight_factor * mean_weight_difference,
            homologous,
        }
    }

    /// Returns the genetic distance between two genomes.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{GeneticConfig, History, LayeredGenome};
    /// use rand::SeedableRng;
    /// use std::num::NonZeroUsize;
    ///
    /// const EXCESS_FACTOR: f32 = 1.0;
    /// const DISJOINT_FACTOR: f32 = 2.0;
    /// const WEIGHT_FACTOR: f32 = 0.5;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     excess_gene_factor: EXCESS_FACTOR,
    ///     disjoint_gene_factor: DISJOINT_FACTOR,
    ///     common_weight_factor: WEIGHT_FACTOR,
    ///     ..GeneticConfig::zero()
    /// };
    /// let mut history = History::new(&config);
    /// let mut genome1 = LayeredGenome::new(&config, &mut history, &mut rng);
    /// let mut genome2 = genome1.clone();
    ///
    /// // Nodes 0 (bias), 1 to 3 (sensors), 4 (actuator).
    /// // Common genes (0 and 2).
    /// genome1.add_gene(1, 4, 1.0, &mut history).unwrap();
    /// genome2.add_gene(1, 4, 3.0, &mut history).unwrap();
    /// // Disjoint gene (1).
    /// genome1.add_gene(2, 4, 1.0, &mut history).unwrap();
    /// genome1.add_gene(3, 4, 1.0, &mut history).unwrap();
    /// genome2.add_gene(3, 4, 1.0, &mut history).unwrap();
    /// // Excess gene (3).
    /// genome2.add_gene(0, 4, 1.0, &mut history).unwrap();
    ///
    /// assert_eq!(
    ///     LayeredGenome::genetic_distance(&genome1, &genome2, &config),
    ///     EXCESS_FACTOR * 1.0 + DISJOINT_FACTOR * 1.0 + WEIGHT_FACTOR * (2.0 + 0.0) / 2.0
    /// );
    /// ```
    pub fn genetic_distance(
        first: &LayeredGenome,
        second: &LayeredGenome,
        config: &GeneticConfig,
    ) -> f32 {
        Self::compatibility(first, second, config).distance
    }

    /// Mates a dominant and a recessive genome.
    ///
    /// The child is a copy of the dominant parent, in which a
    /// random selection of `weak_gene_ratio` of the homologous
    /// genes takes its weight and enabled status from the
    /// recessive parent. Disjoint and excess genes always come
    /// from the dominant parent. The child is mutated before
    /// being returned.
    ///
    /// `compatibility` must be the result of comparing both parents.
    pub fn mate<R: Rng + ?Sized>(
        dominant: &LayeredGenome,
        recessive: &LayeredGenome,
        compatibility: Compatibility,
        history: &mut History,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> LayeredGenome {
        let mut child = dominant.clone();
        let homologous = compatibility.homologous;
        let weak_gene_count =
            ((homologous as f32 * config.weak_gene_ratio) as usize).min(homologous);
        let mut weak_genes = rand::seq::index::sample(rng, homologous, weak_gene_count).into_vec();
        weak_genes.sort_unstable();
        let mut weak_genes = weak_genes.into_iter().peekable();

        let (dominant_genes, recessive_genes) = (&dominant.genes, &recessive.genes);
        let (mut i, mut j, mut h) = (0, 0, 0);
        while i < dominant_genes.len() && j < recessive_genes.len() && weak_genes.peek().is_some() {
            match dominant_genes[i].innovation().cmp(&recessive_genes[j].innovation()) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    if weak_genes.peek() == Some(&h) {
                        let gene = &mut child.genes[i];
                        gene.set_weight(recessive_genes[j].weight());
                        gene.set_enabled(recessive_genes[j].enabled());
                        weak_genes.next();
                    }
                    h += 1;
                    i += 1;
                    j += 1;
                }
            }
        }

        child.mutate(history, config, rng);
        child
    }

    /// Returns an iterator over the genome's nodes, in layer order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns an iterator over the genome's genes,
    /// in innovation order.
    pub fn genes(&self) -> impl Iterator<Item = &Gene> {
        self.genes.iter()
    }

    /// Returns the node with the specified innovation number.
    pub fn node(&self, node_id: Innovation) -> Option<&Node> {
        self.node_positions.get(&node_id).map(|&i| &self.nodes[i])
    }

    /// Returns the position of the node with the
    /// specified innovation number in layer order.
    pub fn node_position(&self, node_id: Innovation) -> Option<usize> {
        self.node_positions.get(&node_id).copied()
    }

    /// Returns the number of nodes in each layer.
    pub fn node_layers(&self) -> &[usize] {
        &self.node_layers
    }

    /// Returns the position of the first actuator
    /// in layer order. Actuators occupy every position
    /// from here onwards.
    pub fn first_output_index(&self) -> usize {
        self.first_output_index
    }

    /// Returns the number of sensors in the genome.
    pub fn input_count(&self) -> usize {
        self.node_layers[0] - 1
    }

    /// Returns the number of actuators in the genome.
    pub fn output_count(&self) -> usize {
        self.nodes.len() - self.first_output_index
    }

    /// Returns the number of hidden nodes in the genome.
    pub fn hidden_count(&self) -> usize {
        self.first_output_index - self.first_hidden_index()
    }

    fn first_hidden_index(&self) -> usize {
        self.node_layers[0]
    }

    /// Returns whether every gene points
    /// to a node in a higher layer.
    pub fn is_feed_forward(&self) -> bool {
        self.genes
            .iter()
            .all(|g| self.layer_of(g.input()) < self.layer_of(g.output()))
    }
}

impl strata::Genome for LayeredGenome {
    type Config = GeneticConfig;
    type InnovationHistory = History;

    fn new<R: Rng + ?Sized>(config: &GeneticConfig, history: &mut History, rng: &mut R) -> Self {
        LayeredGenome::new(config, history, rng)
    }

    fn randomized<R: Rng + ?Sized>(&self, config: &GeneticConfig, rng: &mut R) -> Self {
        let mut genome = self.clone();
        genome.mutate_weights(config, rng, true);
        genome
    }

    fn compatibility(first: &Self, second: &Self, config: &GeneticConfig) -> Compatibility {
        LayeredGenome::compatibility(first, second, config)
    }

    fn mate<R: Rng + ?Sized>(
        dominant: &Self,
        recessive: &Self,
        compatibility: Compatibility,
        history: &mut History,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> Self {
        LayeredGenome::mate(dominant, recessive, compatibility, history, config, rng)
    }

    fn mutate<R: Rng + ?Sized>(
        &mut self,
        history: &mut History,
        config: &GeneticConfig,
        rng: &mut R,
    ) -> bool {
        LayeredGenome::mutate(self, history, config, rng)
    }
}

impl fmt::Display for LayeredGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredGenome")
            .field("Layers", &self.node_layers)
            .field(
                "Nodes",
                &self.nodes.iter().map(|n| n.to_string()).collect::<Vec<_>>(),
            )
            .field(
                "Genes",
                &self.genes.iter().map(|g| g.to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::num::NonZeroUsize;

    fn config(inputs: usize, outputs: usize) -> GeneticConfig {
        let mut config = GeneticConfig::zero();
        config.input_count = NonZeroUsize::new(inputs).unwrap();
        config.output_count = NonZeroUsize::new(outputs).unwrap();
        config
    }

    fn genome(config: &GeneticConfig, history: &mut History) -> LayeredGenome {
        LayeredGenome::new(config, history, &mut ChaCha8Rng::seed_from_u64(0))
    }

    fn ids(genome: &LayeredGenome) -> Vec<Innovation> {
        genome.genes().map(|g| g.innovation()).collect()
    }

    /// Checks every structural invariant of a genome.
    fn assert_consistent(genome: &LayeredGenome) {
        assert!(genome.is_feed_forward());
        assert!(genome.nodes.windows(2).all(|w| w[0].layer() <= w[1].layer()));
        assert!(genome
            .genes
            .windows(2)
            .all(|w| w[0].innovation() < w[1].innovation()));
        assert_eq!(genome.node_layers.iter().sum::<usize>(), genome.nodes.len());
        for (layer, &count) in genome.node_layers.iter().enumerate() {
            assert_eq!(genome.nodes().filter(|n| n.layer() == layer).count(), count);
        }
        assert!(genome.nodes[genome.first_output_index..]
            .iter()
            .all(|n| n.node_type() == NodeType::Actuator));
        assert!(genome.nodes[..genome.first_output_index]
            .iter()
            .all(|n| n.node_type() != NodeType::Actuator));
        for (i, node) in genome.nodes.iter().enumerate() {
            assert_eq!(genome.node_positions[&node.innovation()], i);
        }
        assert_eq!(genome.node_positions.len(), genome.nodes.len());
        assert_eq!(genome.node_pairings.len(), genome.genes.len());
        for gene in &genome.genes {
            assert!(genome.node_pairings.contains(&gene.endpoints()));
        }
    }

    #[test]
    fn new_unconnected() {
        let config = config(2, 4);
        let mut history = History::new(&config);
        let genome = genome(&config, &mut history);

        assert_eq!(genome.genes.len(), 0);
        assert_eq!(genome.node_layers, [3, 4]);
        assert_eq!(genome.first_output_index, 3);
        assert_eq!(genome.nodes[0].node_type(), NodeType::Bias);
        assert_eq!(
            genome.nodes[1..3].iter().map(|n| n.node_type()).collect::<Vec<_>>(),
            [NodeType::Sensor, NodeType::Sensor]
        );
        assert_eq!(genome.input_count(), 2);
        assert_eq!(genome.output_count(), 4);
        assert_eq!(genome.hidden_count(), 0);
        assert_consistent(&genome);
    }

    #[test]
    fn new_full_no_direct() {
        for hidden_count in 0..4 {
            let mut config = config(3, 2);
            config.hidden_count = hidden_count;
            config.initial_topology = InitialTopology::FullNoDirect;
            let mut history = History::new(&config);
            let genome = genome(&config, &mut history);

            if hidden_count == 0 {
                assert_eq!(genome.genes.len(), 3 * 2);
                assert_eq!(genome.node_layers, [4, 2]);
            } else {
                assert_eq!(genome.genes.len(), 3 * hidden_count + hidden_count * 2);
                assert_eq!(genome.node_layers, [4, hidden_count, 2]);
                // No direct input to output genes.
                assert!(genome.genes.iter().all(|g| {
                    genome.node(g.input()).unwrap().node_type() == NodeType::Neuron
                        || genome.node(g.output()).unwrap().node_type() == NodeType::Neuron
                }));
            }
            assert!(genome
                .genes
                .iter()
                .all(|g| genome.node(g.input()).unwrap().node_type() != NodeType::Bias));
            assert_consistent(&genome);
        }
    }

    #[test]
    fn templates_share_innovations() {
        let mut config = config(2, 2);
        config.initial_topology = InitialTopology::FullNoDirect;
        let mut history = History::new(&config);
        let first = genome(&config, &mut history);
        let second = LayeredGenome::new(&config, &mut history, &mut ChaCha8Rng::seed_from_u64(9));

        assert_eq!(
            first.nodes().map(|n| n.innovation()).collect::<Vec<_>>(),
            second.nodes().map(|n| n.innovation()).collect::<Vec<_>>()
        );
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(history.max_node_innovation(), Some(4));
    }

    #[test]
    fn max_gene_count() {
        let mut config = config(2, 4);
        let mut history = History::new(&config);
        let mut genome = genome(&config, &mut history);
        assert_eq!(genome.max_gene_count(&config), 8);

        // Bias 0, sensors 1 and 2, actuators 3 to 6.
        genome.add_gene(1, 3, 1.0, &mut history).unwrap();
        genome
            .mutate_add_node(&mut history, &config, &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap();
        // Layers [3, 1, 4]: sensors reach the hidden node and all
        // actuators, and the hidden node reaches all actuators.
        assert_eq!(genome.max_gene_count(&config), 2 * 5 + 4);
        config.bias_enabled = true;
        assert_eq!(genome.max_gene_count(&config), 3 * 5 + 4);
    }

    #[test]
    fn mutate_add_gene_fills_genome() {
        for bias_enabled in [false, true] {
            let mut config = config(3, 2);
            config.hidden_count = 2;
            config.bias_enabled = bias_enabled;
            let mut history = History::new(&config);
            let mut genome = genome(&config, &mut history);
            let mut rng = ChaCha8Rng::seed_from_u64(1);

            let max = genome.max_gene_count(&config);
            for _ in 0..max {
                genome.mutate_add_gene(&mut history, &config, &mut rng).unwrap();
            }
            assert_eq!(
                genome.mutate_add_gene(&mut history, &config, &mut rng),
                Err(MutationError::GenomeFullyConnected)
            );
            assert_eq!(genome.genes.len(), max);
            assert_eq!(
                genome
                    .genes
                    .iter()
                    .any(|g| genome.node(g.input()).unwrap().node_type() == NodeType::Bias),
                bias_enabled
            );
            assert!(genome.genes.iter().all(|g| (-0.5..0.5).contains(&g.weight())));
            assert_consistent(&genome);
        }
    }

    #[test]
    fn mutate_add_node_splits_gene() {
        let config = config(2, 1);
        let mut history = History::new(&config);
        let mut genome = genome(&config, &mut history);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        genome.add_gene(1, 3, 0.7, &mut history).unwrap();

        let node = genome
            .mutate_add_node(&mut history, &config, &mut rng)
            .unwrap()
            .innovation();

        assert_eq!(genome.genes.iter().filter(|g| !g.enabled()).count(), 1);
        assert!(!genome.genes[0].enabled());
        let new_genes: Vec<&Gene> = genome.genes.iter().filter(|g| g.enabled()).collect();
        assert_eq!(new_genes.len(), 2);
        assert_eq!(new_genes[0].endpoints(), (1, node));
        assert_eq!(new_genes[0].weight(), 0.7);
        assert_eq!(new_genes[1].endpoints(), (node, 3));
        assert_eq!(new_genes[1].weight(), 1.0);

        // A new layer was created between sensors and the actuator.
        assert_eq!(genome.node_layers, [3, 1, 1]);
        assert_eq!(genome.node(node).unwrap().layer(), 1);
        assert_eq!(genome.node(3).unwrap().layer(), 2);
        assert_eq!(genome.first_output_index, 4);
        assert_consistent(&genome);
    }

    #[test]
    fn mutate_add_node_uses_existing_layers() {
        let config = config(2, 1);
        let mut history = History::new(&config);
        let mut genome = genome(&config, &mut history);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        genome.add_gene(1, 3, 0.7, &mut history).unwrap();
        genome.mutate_add_node(&mut history, &config, &mut rng).unwrap();

        // Sensor 2 to the actuator spans two layers now.
        genome.add_gene(2, 3, 0.2, &mut history).unwrap();
        genome.genes.retain(|g| g.endpoints() == (2, 3));
        let node = genome
            .mutate_add_node(&mut history, &config, &mut rng)
            .unwrap()
            .innovation();

        assert_eq!(genome.node_layers, [3, 2, 1]);
        assert_eq!(genome.node(node).unwrap().layer(), 1);
    }

    #[test]
    fn mutate_add_node_skips_bias_and_disabled_genes() {
        let mut config = config(1, 1);
        config.bias_enabled = true;
        let mut history = History::new(&config);
        let mut genome = genome(&config, &mut history);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        genome.add_gene(0, 2, 1.0, &mut history).unwrap();
        genome.add_gene(1, 2, 1.0, &mut history).unwrap().set_enabled(false);
        assert_eq!(
            genome.mutate_add_node(&mut history, &config, &mut rng).err(),
            Some(MutationError::NoSplittableGene)
        );
    }

    #[test]
    fn split_innovations_are_shared_and_reused() {
        let config = config(2, 1);
        let mut history = History::new(&config);
        let mut base = genome(&config, &mut history);
        base.add_gene(1, 3, 0.5, &mut history).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let mut first = base.clone();
        let mut second = base.clone();
        let node1 = first.mutate_add_node(&mut history, &config, &mut rng).unwrap().innovation();
        let node2 = second.mutate_add_node(&mut history, &config, &mut rng).unwrap().innovation();
        assert_eq!(node1, node2);
        assert_eq!(ids(&first), ids(&second));

        // Splitting the same gene again within one genome
        // yields a fresh node, as the first one is present.
        first.genes[0].set_enabled(true);
        first.genes.retain(|g| g.endpoints() == (1, 3));
        first.node_pairings.retain(|&p| p == (1, 3));
        let node3 = first.mutate_add_node(&mut history, &config, &mut rng).unwrap().innovation();
        assert_ne!(node3, node1);

        // After removing both split nodes, the earliest is reused.
        let mut third = first.clone();
        while third.hidden_count() > 0 {
            third.mutate_remove_node(&mut rng).unwrap();
        }
        third.genes[0].set_enabled(true);
        let node4 = third.mutate_add_node(&mut history, &config, &mut rng).unwrap().innovation();
        assert_eq!(node4, node1);
    }

    #[test]
    fn mutate_remove_node() {
        let config = config(2, 2);
        let mut history = History::new(&config);
        let mut genome = genome(&config, &mut history);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        assert_eq!(
            genome.mutate_remove_node(&mut rng),
            Err(MutationError::NoHiddenNodes)
        );

        genome.add_gene(1, 3, 0.5, &mut history).unwrap();
        let node = genome
            .mutate_add_node(&mut history, &config, &mut rng)
            .unwrap()
            .innovation();
        genome.add_gene(node, 4, 0.5, &mut history).unwrap();
        genome.add_gene(2, node, 0.5, &mut history).unwrap();

        let removed = genome.mutate_remove_node(&mut rng).unwrap();
        assert_eq!(removed.innovation(), node);
        assert!(genome
            .genes
            .iter()
            .all(|g| g.input() != node && g.output() != node));
        assert_eq!(ids(&genome), [0]);
        // The emptied layer is kept.
        assert_eq!(genome.node_layers, [3, 0, 2]);
        assert_eq!(genome.hidden_count(), 0);
        assert_consistent(&genome);
    }

    #[test]
    fn toggle_genes() {
        let config = config(2, 1);
        let mut history = History::new(&config);
        let mut genome = genome(&config, &mut history);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(
            genome.mutate_disable_gene(&mut rng).err(),
            Some(MutationError::NoEnabledGenes)
        );
        assert_eq!(
            genome.mutate_enable_gene(&mut rng).err(),
            Some(MutationError::NoDisabledGenes)
        );

        genome.add_gene(1, 3, 0.5, &mut history).unwrap();
        assert!(!genome.mutate_disable_gene(&mut rng).unwrap().enabled());
        assert!(genome.mutate_enable_gene(&mut rng).unwrap().enabled());
    }

    #[test]
    fn mutate_weights() {
        let mut config = config(3, 3);
        config.initial_topology = InitialTopology::FullNoDirect;
        let mut history = History::new(&config);
        let genome = genome(&config, &mut history);
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        let mut nudged = genome.clone();
        nudged.mutate_weights(&config, &mut rng, false);
        for (before, after) in genome.genes.iter().zip(&nudged.genes) {
            assert!((before.weight() - after.weight()).abs() <= 0.1 + 1e-6);
        }

        config.weight_replace_chance = 1.0;
        let mut replaced = genome.clone();
        replaced.mutate_weights(&config, &mut rng, false);
        assert!(replaced.genes.iter().all(|g| (-0.5..0.5).contains(&g.weight())));
        assert_ne!(
            replaced.genes.iter().map(|g| g.weight()).collect::<Vec<_>>(),
            genome.genes.iter().map(|g| g.weight()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn mutate_reports_attempts() {
        let config = config(2, 2);
        let mut history = History::new(&config);
        let mut genome = genome(&config, &mut history);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert!(!genome.mutate(&mut history, &config, &mut rng));

        // Attempts that have nothing to act on still count.
        let mut config = config.clone();
        config.node_deletion_mutation_chance = 1.0;
        assert!(genome.mutate(&mut history, &config, &mut rng));
        assert_eq!(genome.genes.len(), 0);
    }

    #[test]
    fn mutation_sequences_stay_feed_forward() {
        let mut config = config(3, 2);
        config.bias_enabled = true;
        config.node_addition_mutation_chance = 0.3;
        config.node_deletion_mutation_chance = 0.1;
        config.gene_addition_mutation_chance = 0.5;
        config.gene_disable_mutation_chance = 0.2;
        config.gene_enable_mutation_chance = 0.2;
        config.weight_mutation_chance = 0.8;
        config.weight_replace_chance = 0.1;
        let mut history = History::new(&config);

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut genome = LayeredGenome::new(&config, &mut history, &mut rng);
            for _ in 0..100 {
                genome.mutate(&mut history, &config, &mut rng);
                assert_consistent(&genome);
            }
        }
    }

    /// Builds two genomes over 4 sensors and 1 actuator
    /// holding genes with the specified innovation numbers.
    /// Gene `i` connects sensor `i + 1` to the actuator.
    fn genomes_with_genes(
        config: &GeneticConfig,
        first: &[(Innovation, f32)],
        second: &[(Innovation, f32)],
    ) -> (LayeredGenome, LayeredGenome) {
        let mut history = History::new(config);
        let base = genome(config, &mut history);
        for i in 0..4 {
            history.lookup_or_assign_gene(i + 1, 5);
        }
        let build = |genes: &[(Innovation, f32)], history: &mut History| {
            let mut genome = base.clone();
            for &(id, weight) in genes {
                let gene = genome.add_gene(id + 1, 5, weight, history).unwrap();
                assert_eq!(gene.innovation(), id);
            }
            genome
        };
        (build(first, &mut history), build(second, &mut history))
    }

    fn distance_config() -> GeneticConfig {
        let mut config = config(4, 1);
        config.excess_gene_factor = 1.0;
        config.disjoint_gene_factor = 2.0;
        config.common_weight_factor = 0.4;
        config
    }

    #[test]
    fn compatibility_leftover_genes_are_excess() {
        let config = distance_config();
        // 0 is disjoint, 1 is homologous, 2 and 3 are left over.
        let (a, b) = genomes_with_genes(&config, &[(1, 0.5), (2, 0.0), (3, 0.0)], &[(0, 0.0), (1, 0.0)]);
        let compatibility = LayeredGenome::compatibility(&a, &b, &config);
        assert_eq!(compatibility.homologous, 1);
        assert_eq!(compatibility.distance, 1.0 * 2.0 + 2.0 * 1.0 + 0.4 * 0.5);

        // Trailing genes of one genome interleaved with the
        // other's are counted as disjoint while both lists last.
        let (a, b) = genomes_with_genes(&config, &[(0, 0.0), (2, 0.0)], &[(1, 0.0), (3, 0.0)]);
        let compatibility = LayeredGenome::compatibility(&a, &b, &config);
        assert_eq!(compatibility.homologous, 0);
        assert_eq!(compatibility.distance, 1.0 * 1.0 + 2.0 * 3.0);
    }

    #[test]
    fn compatibility_of_empty_genomes() {
        let config = distance_config();
        let (a, b) = genomes_with_genes(&config, &[], &[]);
        assert_eq!(LayeredGenome::compatibility(&a, &b, &config), Compatibility::default());

        let (a, b) = genomes_with_genes(&config, &[], &[(0, 1.0), (1, 1.0)]);
        assert_eq!(LayeredGenome::genetic_distance(&a, &b, &config), 2.0);
    }

    #[test]
    fn compatibility_is_symmetric_and_reflexive() {
        let mut config = distance_config();
        config.bias_enabled = true;
        config.node_addition_mutation_chance = 0.3;
        config.gene_addition_mutation_chance = 0.6;
        config.weight_mutation_chance = 0.8;
        let mut history = History::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let template = LayeredGenome::new(&config, &mut history, &mut rng);

        let genomes: Vec<LayeredGenome> = (0..8)
            .map(|_| {
                let mut genome = template.clone();
                for _ in 0..10 {
                    genome.mutate(&mut history, &config, &mut rng);
                }
                genome
            })
            .collect();
        for a in &genomes {
            assert_eq!(LayeredGenome::genetic_distance(a, a, &config), 0.0);
            for b in &genomes {
                assert_eq!(
                    LayeredGenome::compatibility(a, b, &config),
                    LayeredGenome::compatibility(b, a, &config)
                );
            }
        }
    }

    #[test]
    fn mate_takes_only_homologous_genes_from_recessive() {
        let mut config = distance_config();
        config.weak_gene_ratio = 1.0;
        let (dominant, mut recessive) =
            genomes_with_genes(&config, &[(0, 0.1), (1, 0.2), (3, 0.3)], &[(1, -0.2), (2, -0.4), (3, -0.3)]);
        recessive.genes[2].set_enabled(false);
        let compatibility = LayeredGenome::compatibility(&dominant, &recessive, &config);
        assert_eq!(compatibility.homologous, 2);

        let mut history = History::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let child = LayeredGenome::mate(&dominant, &recessive, compatibility, &mut history, &config, &mut rng);

        assert_eq!(ids(&child), [0, 1, 3]);
        assert_eq!(child.genes[0], dominant.genes[0]);
        assert_eq!(child.genes[1].weight(), -0.2);
        assert_eq!(child.genes[2].weight(), -0.3);
        assert!(!child.genes[2].enabled());
        assert_eq!(child.nodes, dominant.nodes);
    }

    #[test]
    fn mate_samples_weak_genes() {
        let mut config = distance_config();
        config.weak_gene_ratio = 0.5;
        let genes1 = [(0, 1.0), (1, 1.0), (2, 1.0), (3, 1.0)];
        let genes2 = [(0, -1.0), (1, -1.0), (2, -1.0), (3, -1.0)];
        let (dominant, recessive) = genomes_with_genes(&config, &genes1, &genes2);
        let compatibility = LayeredGenome::compatibility(&dominant, &recessive, &config);

        let mut history = History::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for _ in 0..20 {
            let child = LayeredGenome::mate(&dominant, &recessive, compatibility, &mut history, &config, &mut rng);
            assert_eq!(child.genes.iter().filter(|g| g.weight() == -1.0).count(), 2);
        }
    }

    #[test]
    fn randomized_replaces_every_weight() {
        let mut config = config(2, 4);
        config.hidden_count = 3;
        config.initial_topology = InitialTopology::FullNoDirect;
        let mut history = History::new(&config);
        let template = genome(&config, &mut history);
        assert_eq!(template.genes.len(), 2 * 3 + 3 * 4);

        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..5 {
            let genome = <LayeredGenome as strata::Genome>::randomized(&template, &config, &mut rng);
            assert_eq!(genome.nodes, template.nodes);
            assert_eq!(genome.node_layers, template.node_layers);
            assert_eq!(ids(&genome), ids(&template));
            for (new, old) in genome.genes().zip(template.genes()) {
                assert_eq!(new.endpoints(), old.endpoints());
                assert_eq!(new.enabled(), old.enabled());
                assert_ne!(new.weight(), old.weight());
                assert!((-0.5..0.5).contains(&new.weight()));
            }
            assert_consistent(&genome);
        }
    }

    #[test]
    fn display() {
        let config = config(1, 1);
        let mut history = History::new(&config);
        let mut genome = genome(&config, &mut history);
        genome.add_gene(1, 2, 0.5, &mut history).unwrap();
        let text = genome.to_string();
        assert!(text.contains("0[1->2, 0.500]"));
        assert!(text.contains("2[Actuator, Sigmoid, L1]"));
    }
}
