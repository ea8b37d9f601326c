//! A Network is the phenotype of a [`LayeredGenome`]:
//! its enabled genes become connections, and its nodes
//! become network nodes, laid out in layer order.
//!
//! Because every gene of a layered genome points to a
//! strictly higher layer, a single pass over the nodes
//! in that order is enough to propagate a set of sensor
//! values all the way to the outputs.
//!
//! A network is a snapshot: it must be rebuilt whenever
//! its genome's genes change, but may be evaluated any
//! number of times in between.
mod connection;

use crate::genomics::{ActivationType, LayeredGenome};
use connection::Connection;

use std::fmt;

/// A compiled, feed-forward neural network.
#[derive(Clone, Debug)]
pub struct Network {
    sensor_count: usize,
    first_output_index: usize,
    values: Box<[f32]>,
    initial_values: Box<[f32]>,
    activation_functions: Box<[ActivationType]>,
    fan_in: Box<[Box<[Connection]>]>,
}

impl Network {
    /// Compiles a new network from the passed genome.
    /// Disabled genes are ignored.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::{
    ///     genomics::{GeneticConfig, History, InitialTopology, LayeredGenome},
    ///     networks::Network,
    /// };
    /// use rand::SeedableRng;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     initial_topology: InitialTopology::FullNoDirect,
    ///     ..GeneticConfig::zero()
    /// };
    /// let genome = LayeredGenome::new(&config, &mut History::new(&config), &mut rng);
    ///
    /// let network = Network::new(&genome);
    /// assert_eq!(network.outputs().len(), 2);
    /// ```
    pub fn new(genome: &LayeredGenome) -> Network {
        let node_count = genome.nodes().count();
        let mut genes: Vec<_> = genome.genes().filter(|g| g.enabled()).collect();
        genes.sort_by_key(|g| g.output());

        let mut fan_in = vec![vec![]; node_count];
        for gene in genes {
            // Both endpoints of a gene are always in its genome.
            if let (Some(input), Some(output)) = (
                genome.node_position(gene.input()),
                genome.node_position(gene.output()),
            ) {
                fan_in[output].push(Connection::new(input, gene.weight()));
            }
        }

        let initial_values: Box<[f32]> = genome.nodes().map(|n| n.initial_value()).collect();
        Network {
            sensor_count: genome.input_count(),
            first_output_index: genome.first_output_index(),
            values: initial_values.clone(),
            initial_values,
            activation_functions: genome.nodes().map(|n| n.activation_type()).collect(),
            fan_in: fan_in.into_iter().map(|v| v.into()).collect(),
        }
    }

    /// Loads the sensor values into the network, propagates
    /// them through every layer, and returns the resulting
    /// output values.
    ///
    /// Nodes without incoming connections keep their
    /// previous value.
    ///
    /// # Panics
    /// This function panics if the length of the passed
    /// slice is not equal to the number of sensors in the network.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::{
    ///     genomics::{GeneticConfig, History, LayeredGenome},
    ///     networks::Network,
    /// };
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
    /// // Nodes 0 (bias), 1 and 2 (sensors) and 3 (actuator).
    /// genome.add_gene(1, 3, 2.5, &mut history).unwrap();
    /// genome.add_gene(2, 3, -2.5, &mut history).unwrap();
    ///
    /// let mut network = Network::new(&genome);
    /// let outputs = network.evaluate(&[0.5, 1.0]);
    ///
    /// let sigmoid = |x: f32| 1.0 / (1.0 + (-x).exp());
    /// assert_eq!(outputs, [sigmoid(0.5 * 2.5 + 1.0 * -2.5)]);
    /// ```
    pub fn evaluate(&mut self, sensor_values: &[f32]) -> Vec<f32> {
        assert_eq!(
            sensor_values.len(),
            self.sensor_count,
            "expected {} sensor values",
            self.sensor_count
        );
        self.values[1..=self.sensor_count].copy_from_slice(sensor_values);

        for position in self.sensor_count + 1..self.values.len() {
            let connections = &self.fan_in[position];
            if connections.is_empty() {
                continue;
            }
            let sum: f32 = connections
                .iter()
                .map(|c| self.values[c.input] * c.weight)
                .sum();
            self.values[position] = self.activation_functions[position].apply(sum);
        }

        self.outputs().to_vec()
    }

    /// Returns the output values of the latest evaluation,
    /// or the initial output values if there was none.
    pub fn outputs(&self) -> &[f32] {
        &self.values[self.first_output_index..]
    }

    /// Restores every node to its initial value.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::{
    ///     genomics::{GeneticConfig, History, LayeredGenome},
    ///     networks::Network,
    /// };
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    /// let config = GeneticConfig::zero();
    /// let mut history = History::new(&config);
    /// let mut genome = LayeredGenome::new(&config, &mut history, &mut rng);
    /// genome.add_gene(1, 2, 1.0, &mut history).unwrap();
    ///
    /// let mut network = Network::new(&genome);
    /// assert_ne!(network.evaluate(&[1.0]), [0.5]);
    ///
    /// network.reset();
    ///
    /// assert_eq!(network.outputs(), [0.5]);
    /// ```
    pub fn reset(&mut self) {
        self.values.copy_from_slice(&self.initial_values);
    }
}

impl From<&LayeredGenome> for Network {
    fn from(genome: &LayeredGenome) -> Network {
        Network::new(genome)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self as &dyn fmt::Debug).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::{GeneticConfig, History};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::num::NonZeroUsize;

    fn sigmoid(x: f32) -> f32 {
        1.0 / (1.0 + (-x).exp())
    }

    fn steep_sigmoid(x: f32) -> f32 {
        1.0 / (1.0 + (-4.9 * x).exp())
    }

    fn genome(config: &GeneticConfig) -> (LayeredGenome, History) {
        let mut history = History::new(config);
        let genome = LayeredGenome::new(config, &mut history, &mut ChaCha8Rng::seed_from_u64(0));
        (genome, history)
    }

    #[test]
    fn from() {
        let mut config = GeneticConfig::zero();
        config.input_count = NonZeroUsize::new(2).unwrap();
        config.output_count = NonZeroUsize::new(2).unwrap();
        let (mut genome, mut history) = genome(&config);
        // Bias 0, sensors 1 and 2, actuators 3 and 4.
        genome.add_gene(2, 4, 1.5, &mut history).unwrap();
        genome.add_gene(1, 4, -1.0, &mut history).unwrap();
        genome.add_gene(1, 3, 0.5, &mut history).unwrap().set_enabled(false);

        let network = Network::from(&genome);
        assert_eq!(network.sensor_count, 2);
        assert_eq!(network.first_output_index, 3);
        assert!(network.fan_in[3].is_empty());
        assert_eq!(
            &network.fan_in[4][..],
            [Connection::new(2, 1.5), Connection::new(1, -1.0)]
        );
        assert_eq!(&network.initial_values[..], [1.0, 0.0, 0.0, 0.5, 0.5]);
    }

    #[test]
    fn zero_weights_rest_at_half() {
        let mut config = GeneticConfig::zero();
        config.input_count = NonZeroUsize::new(2).unwrap();
        config.output_count = NonZeroUsize::new(3).unwrap();
        let (mut genome, mut history) = genome(&config);
        // Bias 0, sensors 1 and 2, actuators 3 to 5.
        for input in 1..=2 {
            for output in 3..=5 {
                genome.add_gene(input, output, 0.0, &mut history).unwrap();
            }
        }

        let mut network = Network::new(&genome);
        assert_eq!(network.evaluate(&[0.0, 0.0]), [0.5; 3]);
        assert_eq!(network.evaluate(&[1.0, -3.0]), [0.5; 3]);
    }

    #[test]
    fn hidden_layers() {
        let mut config = GeneticConfig::zero();
        config.activation_type = ActivationType::SteepSigmoid;
        let (mut genome, mut history) = genome(&config);
        // Bias 0, sensor 1, actuator 2.
        genome.add_gene(1, 2, 2.0, &mut history).unwrap();
        let hidden = genome
            .mutate_add_node(&mut history, &config, &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap()
            .innovation();

        let mut network = Network::new(&genome);
        for input in -20..=20 {
            let input = input as f32 / 10.0;
            let expected = steep_sigmoid(steep_sigmoid(input * 2.0) * 1.0);
            assert_eq!(network.evaluate(&[input]), [expected]);
        }
        assert_eq!(genome.node(hidden).unwrap().layer(), 1);
    }

    #[test]
    fn bias() {
        let mut config = GeneticConfig::zero();
        config.bias_enabled = true;
        let (mut genome, mut history) = genome(&config);
        genome.add_gene(0, 2, -0.75, &mut history).unwrap();
        genome.add_gene(1, 2, 0.5, &mut history).unwrap();

        let mut network = Network::new(&genome);
        assert_eq!(network.evaluate(&[2.0]), [sigmoid(-0.75 + 2.0 * 0.5)]);
    }

    #[test]
    fn unconnected_outputs_rest() {
        let mut config = GeneticConfig::zero();
        config.input_count = NonZeroUsize::new(2).unwrap();
        config.output_count = NonZeroUsize::new(4).unwrap();
        let (mut genome, mut history) = genome(&config);
        // Bias 0, sensors 1 and 2, actuators 3 to 6.
        genome.add_gene(1, 5, 1.0, &mut history).unwrap();

        let mut network = Network::new(&genome);
        assert_eq!(network.evaluate(&[1.0, 0.0]), [0.5, 0.5, sigmoid(1.0), 0.5]);
    }

    #[test]
    fn reevaluation_without_recompiling() {
        let (mut genome, mut history) = genome(&GeneticConfig::zero());
        genome.add_gene(1, 2, 1.0, &mut history).unwrap();
        let mut network = Network::new(&genome);

        for input in -20..=20 {
            let input = input as f32 / 10.0;
            assert_eq!(network.evaluate(&[input]), [sigmoid(input)]);
            assert_eq!(network.outputs(), [sigmoid(input)]);
        }
    }

    #[test]
    #[should_panic(expected = "expected 2 sensor values")]
    fn wrong_sensor_count() {
        let mut config = GeneticConfig::zero();
        config.input_count = NonZeroUsize::new(2).unwrap();
        let (genome, _) = genome(&config);
        Network::new(&genome).evaluate(&[1.0]);
    }
}
