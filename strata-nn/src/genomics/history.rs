use crate::genomics::GeneticConfig;
use crate::Innovation;

use ahash::RandomState;
use serde::{Deserialize, Serialize};
use strata::InnovationHistory;

use std::collections::HashMap;

/// The structural role of a node, used to recognize
/// nodes that different genomes created for the
/// same reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKey {
    /// The bias node.
    Bias,
    /// The i-th sensor.
    Sensor(usize),
    /// The o-th actuator.
    Actuator(usize),
    /// The h-th hidden node of the template genome.
    Hidden(usize),
    /// A node created by splitting the gene between
    /// the two specified nodes.
    Split(Innovation, Innovation),
}

/// A `History` keeps track of gene and node innovations in a
/// simulation run, in order to make sure identical mutations
/// are assigned the same innovation numbers.
///
/// For gene innovations the input and output nodes are used to
/// identify identical mutations, and exactly one innovation
/// number is ever assigned to each pair.
///
/// For node innovations the node's [`NodeKey`] is used, and
/// every innovation number assigned to the key is recorded in
/// order of assignment. A genome that splits the same pair of
/// nodes twice (after the first split node was removed, or
/// inherited alongside another) receives the earliest number
/// it does not already contain, so that no genome ever holds
/// two nodes with the same number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    next_gene_innovation: Innovation,
    next_node_innovation: Innovation,
    gene_innovations: HashMap<(Innovation, Innovation), Innovation, RandomState>,
    node_innovations: HashMap<NodeKey, Vec<Innovation>, RandomState>,
}

impl InnovationHistory for History {
    type Config = GeneticConfig;

    fn new(config: &GeneticConfig) -> History {
        Self::new(config)
    }
}

impl History {
    /// Creates a new, empty History. The configuration is used
    /// to reserve space for the template genome's nodes.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{GeneticConfig, History};
    ///
    /// let history = History::new(&GeneticConfig::zero());
    /// assert_eq!(history.max_node_innovation(), None);
    /// ```
    pub fn new(config: &GeneticConfig) -> History {
        let template_nodes =
            1 + config.input_count.get() + config.output_count.get() + config.hidden_count;
        History {
            next_gene_innovation: 0,
            next_node_innovation: 0,
            gene_innovations: HashMap::default(),
            node_innovations: HashMap::with_capacity_and_hasher(
                template_nodes,
                RandomState::default(),
            ),
        }
    }

    /// Returns the innovation number of a node with the specified key.
    ///
    /// `present` must report whether the requesting genome already
    /// contains a node with a given number. The earliest number
    /// assigned to the key that is not present is returned; if
    /// there is none, a new number is assigned and recorded.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{GeneticConfig, History, NodeKey};
    ///
    /// let mut history = History::new(&GeneticConfig::zero());
    ///
    /// let first = history.lookup_or_assign_node(NodeKey::Split(0, 1), |_| false);
    /// // Another genome, without the node, gets the same number...
    /// assert_eq!(history.lookup_or_assign_node(NodeKey::Split(0, 1), |_| false), first);
    /// // ...while a genome that has it gets a new one.
    /// let second = history.lookup_or_assign_node(NodeKey::Split(0, 1), |id| id == first);
    /// assert_ne!(second, first);
    /// ```
    pub fn lookup_or_assign_node(
        &mut self,
        key: NodeKey,
        present: impl Fn(Innovation) -> bool,
    ) -> Innovation {
        let assigned = self.node_innovations.entry(key).or_default();
        match assigned.iter().copied().find(|&id| !present(id)) {
            Some(id) => id,
            None => {
                let id = self.next_node_innovation;
                self.next_node_innovation += 1;
                assigned.push(id);
                id
            }
        }
    }

    /// Returns the innovation number of the gene between
    /// the specified nodes, assigning a new one if the
    /// pair was never connected before.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{GeneticConfig, History};
    ///
    /// let mut history = History::new(&GeneticConfig::zero());
    ///
    /// assert_eq!(history.lookup_or_assign_gene(0, 2), 0);
    /// assert_eq!(history.lookup_or_assign_gene(1, 2), 1);
    /// assert_eq!(history.lookup_or_assign_gene(0, 2), 0);
    /// ```
    pub fn lookup_or_assign_gene(&mut self, input: Innovation, output: Innovation) -> Innovation {
        let next = &mut self.next_gene_innovation;
        *self
            .gene_innovations
            .entry((input, output))
            .or_insert_with(|| {
                *next += 1;
                *next - 1
            })
    }

    /// Returns the highest gene innovation number generated,
    /// or `None` if none was.
    pub fn max_gene_innovation(&self) -> Option<Innovation> {
        self.next_gene_innovation.checked_sub(1)
    }

    /// Returns the highest node innovation number generated,
    /// or `None` if none was.
    pub fn max_node_innovation(&self) -> Option<Innovation> {
        self.next_node_innovation.checked_sub(1)
    }

    /// Returns an iterator over the complete record of
    /// gene innovations, in the format
    /// `((input node, output node), gene innovation)`.
    /// No ordering is guaranteed.
    pub fn gene_innovation_history(
        &self,
    ) -> impl Iterator<Item = (&(Innovation, Innovation), &Innovation)> {
        self.gene_innovations.iter()
    }

    /// Returns an iterator over the complete record of
    /// node innovations, in the format `(key, numbers)`,
    /// with numbers in order of assignment.
    /// No ordering of keys is guaranteed.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{GeneticConfig, History, LayeredGenome, NodeKey};
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    /// let config = GeneticConfig::zero();
    /// let mut history = History::new(&config);
    ///
    /// // Nodes are recorded as genomes are built.
    /// LayeredGenome::new(&config, &mut history, &mut rng);
    ///
    /// for (key, nodes) in history.node_innovation_history() {
    ///     println!("{:?} was assigned nodes {:?}", key, nodes);
    /// }
    /// # assert_eq!(history.node_innovation_history().count(), 3);
    /// ```
    pub fn node_innovation_history(&self) -> impl Iterator<Item = (&NodeKey, &[Innovation])> {
        self.node_innovations
            .iter()
            .map(|(key, ids)| (key, ids.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_numbers_are_reused_in_order() {
        let mut history = History::new(&GeneticConfig::zero());
        let key = NodeKey::Split(1, 2);

        let a = history.lookup_or_assign_node(key, |_| false);
        let b = history.lookup_or_assign_node(key, |id| id == a);
        let c = history.lookup_or_assign_node(key, |id| id == a || id == b);
        assert_eq!((a, b, c), (0, 1, 2));

        // Holding only the second number yields the first.
        assert_eq!(history.lookup_or_assign_node(key, |id| id == b), a);
        // Holding the first yields the second.
        assert_eq!(history.lookup_or_assign_node(key, |id| id == a), b);
        assert_eq!(history.max_node_innovation(), Some(2));
    }

    #[test]
    fn keys_are_distinct() {
        let mut history = History::new(&GeneticConfig::zero());
        let ids: Vec<Innovation> = [
            NodeKey::Bias,
            NodeKey::Sensor(0),
            NodeKey::Actuator(0),
            NodeKey::Hidden(0),
            NodeKey::Split(0, 0),
        ]
        .iter()
        .map(|&k| history.lookup_or_assign_node(k, |_| false))
        .collect();
        assert_eq!(ids, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn gene_numbers_are_monotonic() {
        let mut history = History::new(&GeneticConfig::zero());
        assert_eq!(history.max_gene_innovation(), None);
        assert_eq!(history.lookup_or_assign_gene(3, 4), 0);
        assert_eq!(history.lookup_or_assign_gene(4, 3), 1);
        assert_eq!(history.lookup_or_assign_gene(3, 4), 0);
        assert_eq!(history.max_gene_innovation(), Some(1));
        assert_eq!(history.gene_innovation_history().count(), 2);
    }
}
