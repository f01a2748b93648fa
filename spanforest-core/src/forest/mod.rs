//! Spanning forest construction over the active subgraph.
//!
//! Two interchangeable strategies are provided behind [`ForestBuilder`]:
//!
//! - [`UnionFindClustering`] walks the active edges in insertion order and
//!   accepts every edge joining two different clusters. This is the default
//!   and the reference semantics.
//! - [`RootDistanceLabeling`] propagates the lexicographically smallest
//!   label of each component as its root, together with a hop distance,
//!   then lets every non-root node pick one edge towards its parent.
//!
//! Both yield one tree per connected component of the active subgraph and
//! are deterministic for a fixed insertion order, but they may accept
//! different edge sets on the same input. Neither sorts by length, so the
//! result is a spanning forest, minimal only when all lengths are equal.

mod clusters;
mod root_distance;
mod union_find;

use std::fmt;

use crate::graph::{EdgeId, Graph, NodeId};

pub use self::{
    clusters::{Cluster, ClusterSet},
    root_distance::RootDistanceLabeling,
    union_find::UnionFindClustering,
};

/// Selects the algorithm used by a forest pass.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Strategy {
    /// Insertion-order union-find clustering.
    #[default]
    UnionFind,
    /// Root-label propagation followed by per-node parent selection.
    RootDistance,
}

impl Strategy {
    /// Returns the stable identifier used in logs and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnionFind => "union-find",
            Self::RootDistance => "root-distance",
        }
    }

    /// Runs the selected algorithm over `active`.
    #[must_use]
    pub fn build(self, graph: &Graph, active: &[EdgeId]) -> ForestRun {
        match self {
            Self::UnionFind => UnionFindClustering.build(graph, active),
            Self::RootDistance => RootDistanceLabeling.build(graph, active),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A spanning-forest algorithm.
///
/// Implementations read the graph and the active edge list, never mutate
/// either, and must be deterministic for a fixed input.
pub trait ForestBuilder {
    /// Returns which strategy this builder implements.
    fn strategy(&self) -> Strategy;

    /// Builds a forest over the `active` edges of `graph`.
    ///
    /// `active` lists edge identifiers in insertion order. Identifiers that
    /// do not belong to `graph` are ignored.
    fn build(&self, graph: &Graph, active: &[EdgeId]) -> ForestRun;
}

/// Identifier of a cluster within one union-find pass.
///
/// Clusters are numbered after the node they started from, so before any
/// merge node `n` lives in cluster `n`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClusterId(usize);

impl ClusterId {
    /// Returns the raw cluster index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

/// Per-node state written by a forest pass.
///
/// Strategies only update the fields they use; the others keep their initial
/// values (the node is its own root at distance zero, alone in its own
/// cluster).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeRunState {
    visited: bool,
    root: NodeId,
    distance: u32,
    cluster: ClusterId,
}

impl NodeRunState {
    pub(crate) const fn initial(node: NodeId) -> Self {
        Self {
            visited: false,
            root: node,
            distance: 0,
            cluster: ClusterId(node.index()),
        }
    }

    /// Returns `true` when an accepted edge touches the node.
    #[rustfmt::skip]
    #[must_use]
    pub const fn visited(&self) -> bool { self.visited }

    /// Returns the root node of the node's component.
    #[rustfmt::skip]
    #[must_use]
    pub const fn root(&self) -> NodeId { self.root }

    /// Returns the hop distance from the node to its root.
    #[rustfmt::skip]
    #[must_use]
    pub const fn distance(&self) -> u32 { self.distance }

    /// Returns the cluster the node ended up in.
    #[rustfmt::skip]
    #[must_use]
    pub const fn cluster(&self) -> ClusterId { self.cluster }
}

/// Output of one forest pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ForestRun {
    accepted: Vec<EdgeId>,
    total_cost: f64,
    component_count: usize,
    node_states: Vec<NodeRunState>,
}

impl ForestRun {
    /// Returns the accepted edges in acceptance order.
    #[rustfmt::skip]
    #[must_use]
    pub fn accepted(&self) -> &[EdgeId] { &self.accepted }

    /// Returns the sum of the accepted edge lengths.
    #[rustfmt::skip]
    #[must_use]
    pub fn total_cost(&self) -> f64 { self.total_cost }

    /// Returns the number of trees in the forest, isolated nodes included.
    #[rustfmt::skip]
    #[must_use]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns the run state of every node, indexed by node.
    #[rustfmt::skip]
    #[must_use]
    pub fn node_states(&self) -> &[NodeRunState] { &self.node_states }
}

/// Running accumulator shared by both strategies.
struct ForestAccumulator {
    accepted: Vec<EdgeId>,
    total_cost: f64,
    node_states: Vec<NodeRunState>,
}

impl ForestAccumulator {
    fn new(graph: &Graph) -> Self {
        Self {
            accepted: Vec::with_capacity(graph.node_count().saturating_sub(1)),
            total_cost: 0.0,
            node_states: graph
                .nodes()
                .map(|(id, _)| NodeRunState::initial(id))
                .collect(),
        }
    }

    fn accept(&mut self, id: EdgeId, first: NodeId, second: NodeId, length: f64) {
        self.accepted.push(id);
        self.total_cost += length;
        for node in [first, second] {
            if let Some(state) = self.node_states.get_mut(node.index()) {
                state.visited = true;
            }
        }
    }

    fn finish(self, component_count: usize) -> ForestRun {
        ForestRun {
            accepted: self.accepted,
            total_cost: self.total_cost,
            component_count,
            node_states: self.node_states,
        }
    }
}

#[cfg(test)]
mod property;
