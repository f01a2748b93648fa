//! Graph model: an arena of labelled nodes and weighted undirected edges.
//!
//! Nodes and edges are addressed by [`NodeId`] and [`EdgeId`], which are
//! indices into the arena in creation order. Nothing is ever removed
//! individually; the whole graph is cleared at once. Each node also carries
//! the run state written by the most recent forest pass.

mod labels;

use std::{collections::HashMap, fmt, sync::Arc};

use crate::{
    error::{EngineError, Result, validate_length},
    forest::{ClusterId, NodeRunState},
};

pub use self::labels::LabelSequence;

/// Identifier of a node, stable for the lifetime of the graph.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates an identifier from a raw arena index.
    ///
    /// # Examples
    /// ```
    /// use spanforest_core::NodeId;
    ///
    /// assert_eq!(NodeId::new(3).index(), 3);
    /// ```
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the arena index of the node.
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an edge. Edge identifiers follow insertion order.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Creates an identifier from a raw arena index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the arena index of the edge.
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A labelled node.
#[derive(Clone, Debug)]
pub struct Node {
    label: Arc<str>,
    next_slot: u32,
    run: NodeRunState,
}

impl Node {
    /// Returns the node label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the slot number the next incident edge will receive.
    ///
    /// Slots start at 1 and only serve to number the interfaces drawn next
    /// to an edge.
    #[rustfmt::skip]
    #[must_use]
    pub fn next_slot(&self) -> u32 { self.next_slot }

    /// Returns `true` when the last forest pass accepted an edge touching
    /// this node.
    #[must_use]
    pub fn visited(&self) -> bool {
        self.run.visited()
    }

    /// Returns the root of the node's component as labelled by the last
    /// root-distance pass.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.run.root()
    }

    /// Returns the hop distance to [`Self::root`].
    #[must_use]
    pub fn distance(&self) -> u32 {
        self.run.distance()
    }

    /// Returns the cluster the last union-find pass left the node in.
    #[must_use]
    pub fn cluster(&self) -> ClusterId {
        self.run.cluster()
    }

    /// Returns the run state written by the last forest pass.
    #[rustfmt::skip]
    #[must_use]
    pub fn run_state(&self) -> &NodeRunState { &self.run }

    fn take_slot(&mut self) -> u32 {
        let slot = self.next_slot;
        self.next_slot = self.next_slot.saturating_add(1);
        slot
    }
}

/// An undirected edge between two distinct nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    first: NodeId,
    second: NodeId,
    length: f64,
    first_slot: u32,
    second_slot: u32,
}

impl Edge {
    /// Returns the endpoint the edge was created from.
    #[rustfmt::skip]
    #[must_use]
    pub fn first(&self) -> NodeId { self.first }

    /// Returns the endpoint the edge was created to.
    #[rustfmt::skip]
    #[must_use]
    pub fn second(&self) -> NodeId { self.second }

    /// Returns both endpoints in creation order.
    #[rustfmt::skip]
    #[must_use]
    pub fn endpoints(&self) -> (NodeId, NodeId) { (self.first, self.second) }

    /// Returns the edge length (its cost).
    #[rustfmt::skip]
    #[must_use]
    pub fn length(&self) -> f64 { self.length }

    /// Returns the interface slot the edge occupies on its first endpoint.
    #[rustfmt::skip]
    #[must_use]
    pub fn first_slot(&self) -> u32 { self.first_slot }

    /// Returns the interface slot the edge occupies on its second endpoint.
    #[rustfmt::skip]
    #[must_use]
    pub fn second_slot(&self) -> u32 { self.second_slot }

    /// Returns the endpoint opposite to `node`, or `None` when `node` is not
    /// an endpoint of this edge.
    #[must_use]
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if node == self.first {
            Some(self.second)
        } else if node == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Arena holding every node and edge placed in the session.
///
/// # Examples
/// ```
/// use spanforest_core::Graph;
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("A")?;
/// let b = graph.add_node("B")?;
/// let edge = graph.add_edge(a, b, 2.5)?;
/// assert_eq!(graph.edge(edge)?.length(), 2.5);
/// assert_eq!(graph.incident_edges(a)?, &[edge]);
/// # Ok::<(), spanforest_core::EngineError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    incident: Vec<Vec<EdgeId>>,
    by_label: HashMap<Arc<str>, NodeId>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with a unique label.
    ///
    /// # Errors
    /// Returns [`EngineError::DuplicateLabel`] when another node already uses
    /// `label`.
    pub fn add_node(&mut self, label: &str) -> Result<NodeId> {
        if self.by_label.contains_key(label) {
            return Err(EngineError::DuplicateLabel {
                label: Arc::from(label),
            });
        }
        let id = NodeId(self.nodes.len());
        let label: Arc<str> = Arc::from(label);
        self.nodes.push(Node {
            label: Arc::clone(&label),
            next_slot: 1,
            run: NodeRunState::initial(id),
        });
        self.incident.push(Vec::new());
        self.by_label.insert(label, id);
        Ok(id)
    }

    /// Adds an undirected edge between two existing, distinct nodes.
    ///
    /// Parallel edges between the same pair are allowed. Each endpoint hands
    /// its next free interface slot to the new edge.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownNode`] when an endpoint does not exist,
    /// [`EngineError::InvalidEdge`] when `first == second`, and
    /// [`EngineError::InvalidLength`] when `length` is negative or not
    /// finite.
    pub fn add_edge(&mut self, first: NodeId, second: NodeId, length: f64) -> Result<EdgeId> {
        self.node(first)?;
        self.node(second)?;
        if first == second {
            return Err(EngineError::InvalidEdge { node: first });
        }
        let length = validate_length(length)?;

        let id = EdgeId(self.edges.len());
        let first_slot = self.attach(first, id)?;
        let second_slot = self.attach(second, id)?;
        self.edges.push(Edge {
            first,
            second,
            length,
            first_slot,
            second_slot,
        });
        Ok(id)
    }

    /// Records `edge` as incident to `node` and hands it the node's next
    /// interface slot.
    fn attach(&mut self, node: NodeId, edge: EdgeId) -> Result<u32> {
        let unknown = EngineError::UnknownNode { node };
        let incident = self.incident.get_mut(node.0).ok_or_else(|| unknown.clone())?;
        let slot = self.nodes.get_mut(node.0).map(Node::take_slot).ok_or(unknown)?;
        incident.push(edge);
        Ok(slot)
    }

    /// Looks up a node.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownNode`] when `id` is not in the graph.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .ok_or(EngineError::UnknownNode { node: id })
    }

    /// Looks up an edge.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownEdge`] when `id` is not in the graph.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edges
            .get(id.0)
            .ok_or(EngineError::UnknownEdge { edge: id })
    }

    /// Returns the edges touching `id` in insertion order.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownNode`] when `id` is not in the graph.
    pub fn incident_edges(&self, id: NodeId) -> Result<&[EdgeId]> {
        self.incident
            .get(id.0)
            .map(Vec::as_slice)
            .ok_or(EngineError::UnknownNode { node: id })
    }

    /// Finds the node carrying `label`.
    #[must_use]
    pub fn find_node(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label).copied()
    }

    /// Returns `true` when a node already uses `label`.
    #[must_use]
    pub fn contains_label(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    /// Iterates all nodes in creation order.
    pub fn nodes(
        &self,
    ) -> impl DoubleEndedIterator<Item = (NodeId, &Node)> + ExactSizeIterator + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Iterates all edges in insertion order.
    pub fn edges(
        &self,
    ) -> impl DoubleEndedIterator<Item = (EdgeId, &Edge)> + ExactSizeIterator + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(index, edge)| (EdgeId(index), edge))
    }

    /// Returns the number of nodes.
    #[rustfmt::skip]
    #[must_use]
    pub fn node_count(&self) -> usize { self.nodes.len() }

    /// Returns the number of edges, broken or not.
    #[rustfmt::skip]
    #[must_use]
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the label of `id`, or an empty string for unknown nodes.
    pub(crate) fn label_of(&self, id: NodeId) -> &str {
        self.nodes.get(id.0).map_or("", Node::label)
    }

    /// Overwrites the run state of every node. `states` is indexed by node.
    pub(crate) fn apply_run_states(&mut self, states: &[NodeRunState]) {
        for (node, state) in self.nodes.iter_mut().zip(states) {
            node.run = state.clone();
        }
    }

    /// Returns every node to the state it had before any pass.
    pub(crate) fn reset_run_states(&mut self) {
        for (index, node) in self.nodes.iter_mut().enumerate() {
            node.run = NodeRunState::initial(NodeId(index));
        }
    }

    /// Drops every node and edge.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.incident.clear();
        self.by_label.clear();
    }
}
