use crate::Innovation;

use thiserror::Error;

/// An error type indicating the gene being
/// added is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneValidityError {
    /// The gene's endpoints do not exist.
    #[error("gene insertion between nonexistant endpoint(s) {0} -> {1}")]
    NonexistantEndpoints(Innovation, Innovation),
    /// The genome already has a gene with the same endpoints.
    #[error("gene insertion with endpoints {0} -> {1} shadows gene with same endpoints")]
    DuplicateEndpoints(Innovation, Innovation),
    /// The gene does not point to a strictly higher layer.
    #[error("gene insertion from node {0} to node {1} is not feed-forward")]
    NotFeedForward(Innovation, Innovation),
}

/// An error type indicating why a
/// structural mutation had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MutationError {
    /// Every allowed pair of nodes is already connected.
    #[error("gene mutation on fully-connected genome")]
    GenomeFullyConnected,
    /// No enabled gene leaves a non-bias node.
    #[error("node mutation on genome without splittable genes")]
    NoSplittableGene,
    /// The genome has no hidden nodes.
    #[error("node deletion on genome without hidden nodes")]
    NoHiddenNodes,
    /// The genome has no disabled genes.
    #[error("gene enabling on genome without disabled genes")]
    NoDisabledGenes,
    /// The genome has no enabled genes.
    #[error("gene disabling on genome without enabled genes")]
    NoEnabledGenes,
}
