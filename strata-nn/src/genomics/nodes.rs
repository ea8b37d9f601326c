use crate::Innovation;

use serde::{Deserialize, Serialize};

use std::fmt;

/// An ActivationType represents the type
/// of activation function the node's network
/// equivalent will use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationType {
    // 1 / (1 + exp(-x))
    Sigmoid,
    // 1 / (1 + exp(-4.9x))
    SteepSigmoid,
}

impl ActivationType {
    /// Applies the activation function to `x`.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::ActivationType;
    ///
    /// assert_eq!(ActivationType::Sigmoid.apply(0.0), 0.5);
    /// assert!(ActivationType::SteepSigmoid.apply(1.0) > ActivationType::Sigmoid.apply(1.0));
    /// ```
    pub fn apply(self, x: f32) -> f32 {
        match self {
            ActivationType::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ActivationType::SteepSigmoid => 1.0 / (1.0 + (-4.9 * x).exp()),
        }
    }
}

/// A NodeType indicates the function of
/// the node's network equivalent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    /// The constant-valued input node.
    Bias,
    /// Input nodes.
    Sensor,
    /// Hidden nodes.
    Neuron,
    /// Output nodes.
    Actuator,
}

/// Nodes are the structural elements of genomes
/// between which genes are created. Each node lives
/// in a layer, and genes only ever point from a
/// lower layer to a higher one.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Node {
    id: Innovation,
    pub(super) layer: usize,
    node_type: NodeType,
    activation_type: ActivationType,
}

impl Node {
    /// Generate a new node with the passed parameters.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{ActivationType, Node, NodeType};
    ///
    /// let node = Node::new(5, 1, NodeType::Neuron, ActivationType::Sigmoid);
    /// assert_eq!(node.layer(), 1);
    /// ```
    pub fn new(
        id: Innovation,
        layer: usize,
        node_type: NodeType,
        activation_type: ActivationType,
    ) -> Node {
        Node {
            id,
            layer,
            node_type,
            activation_type,
        }
    }

    /// Returns the node's innovation number.
    pub fn innovation(&self) -> Innovation {
        self.id
    }

    /// Returns the node's layer.
    pub fn layer(&self) -> usize {
        self.layer
    }

    /// Returns the node's node type.
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns the node's activation type.
    pub fn activation_type(&self) -> ActivationType {
        self.activation_type
    }

    /// Returns the value the node's network equivalent
    /// holds before any input reaches it: 1 for the bias
    /// node, 0 for sensors, and the activation of 0 for
    /// every other node.
    ///
    /// # Examples
    /// ```
    /// use strata_nn::genomics::{ActivationType, Node, NodeType};
    ///
    /// let bias = Node::new(0, 0, NodeType::Bias, ActivationType::Sigmoid);
    /// let output = Node::new(3, 1, NodeType::Actuator, ActivationType::Sigmoid);
    /// assert_eq!(bias.initial_value(), 1.0);
    /// assert_eq!(output.initial_value(), 0.5);
    /// ```
    pub fn initial_value(&self) -> f32 {
        match self.node_type {
            NodeType::Bias => 1.0,
            NodeType::Sensor => 0.0,
            NodeType::Neuron | NodeType::Actuator => self.activation_type.apply(0.0),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}[{:?}, {:?}, L{}]",
            self.id, self.node_type, self.activation_type, self.layer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steep_sigmoid() {
        let x: f32 = 0.3;
        let expected = 1.0 / (1.0 + (-4.9 * x).exp());
        assert_eq!(ActivationType::SteepSigmoid.apply(x), expected);
        assert_eq!(ActivationType::SteepSigmoid.apply(0.0), 0.5);
    }

    #[test]
    fn display() {
        let node = Node::new(7, 2, NodeType::Neuron, ActivationType::SteepSigmoid);
        assert_eq!(node.to_string(), "7[Neuron, SteepSigmoid, L2]");
    }
}
