//! Root-label propagation with per-node parent selection.
//!
//! Every node starts as its own root at distance zero. Relaxation passes
//! over the active edges make the node with the lexicographically greater
//! root label adopt its neighbour's root (at the neighbour's distance plus
//! one); when both share a root, the farther node is pulled down to the
//! nearer distance plus one. There are as many passes as active edges,
//! which is enough for labels and distances to settle on every component.
//!
//! The selection pass then walks nodes in reverse creation order. Each
//! non-root node accepts one edge to the neighbour with the smallest
//! distance (ties broken by the smallest label, then by edge insertion
//! order). Roots select nothing, so a component of `k` nodes contributes
//! exactly `k - 1` edges.

use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::graph::{EdgeId, Graph, NodeId};

use super::{ForestAccumulator, ForestBuilder, ForestRun, Strategy};

/// Builds a breadth-first forest rooted at the smallest label of each
/// component.
///
/// # Examples
/// ```
/// use spanforest_core::{ForestBuilder, Graph, RootDistanceLabeling};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("A")?;
/// let b = graph.add_node("B")?;
/// let c = graph.add_node("C")?;
/// let ab = graph.add_edge(a, b, 1.0)?;
/// let bc = graph.add_edge(b, c, 1.0)?;
/// let ac = graph.add_edge(a, c, 1.0)?;
///
/// let run = RootDistanceLabeling.build(&graph, &[ab, bc, ac]);
/// // C and B both hang directly off the root A.
/// assert_eq!(run.accepted(), &[ac, ab]);
/// assert_eq!(run.total_cost(), 2.0);
/// # Ok::<(), spanforest_core::EngineError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RootDistanceLabeling;

impl ForestBuilder for RootDistanceLabeling {
    fn strategy(&self) -> Strategy {
        Strategy::RootDistance
    }

    #[instrument(
        name = "forest.root_distance",
        skip_all,
        fields(nodes = graph.node_count(), active_edges = active.len()),
    )]
    fn build(&self, graph: &Graph, active: &[EdgeId]) -> ForestRun {
        let edges: Vec<(EdgeId, NodeId, NodeId)> = active
            .iter()
            .filter_map(|&id| {
                let edge = graph.edge(id).ok()?;
                Some((id, edge.first(), edge.second()))
            })
            .collect();

        let mut labels = RootLabels::new(graph);
        let mut passes = 0usize;
        for _ in 0..edges.len() {
            passes += 1;
            let mut changed = false;
            for &(_, first, second) in &edges {
                changed |= labels.relax(graph, first, second);
            }
            // A pass without changes is a fixed point.
            if !changed {
                break;
            }
        }
        debug!(passes, "root labels settled");

        let mut is_active = vec![false; graph.edge_count()];
        for &(id, _, _) in &edges {
            if let Some(flag) = is_active.get_mut(id.index()) {
                *flag = true;
            }
        }

        let mut forest = ForestAccumulator::new(graph);
        let mut taken = vec![false; graph.edge_count()];
        for (node, _) in graph.nodes().rev() {
            if labels.root(node) == node {
                continue;
            }
            let Some((id, parent)) = labels.select_parent(graph, node, &is_active) else {
                continue;
            };
            let Some(flag) = taken.get_mut(id.index()) else {
                continue;
            };
            if *flag {
                continue;
            }
            *flag = true;
            let length = graph.edge(id).map_or(0.0, |edge| edge.length());
            forest.accept(id, node, parent, length);
            debug!(edge = %id, node = %node, parent = %parent, "parent edge accepted");
        }

        let mut roots = 0usize;
        for (index, state) in forest.node_states.iter_mut().enumerate() {
            let node = NodeId::new(index);
            state.root = labels.root(node);
            state.distance = labels.distance(node);
            if state.root == node {
                roots += 1;
            }
        }
        forest.finish(roots)
    }
}

struct RootLabels {
    roots: Vec<NodeId>,
    distances: Vec<u32>,
}

impl RootLabels {
    fn new(graph: &Graph) -> Self {
        Self {
            roots: graph.nodes().map(|(id, _)| id).collect(),
            distances: vec![0; graph.node_count()],
        }
    }

    fn root(&self, node: NodeId) -> NodeId {
        self.roots.get(node.index()).copied().unwrap_or(node)
    }

    fn distance(&self, node: NodeId) -> u32 {
        self.distances.get(node.index()).copied().unwrap_or(0)
    }

    fn set(&mut self, node: NodeId, root: NodeId, distance: u32) -> bool {
        let (Some(root_slot), Some(distance_slot)) = (
            self.roots.get_mut(node.index()),
            self.distances.get_mut(node.index()),
        ) else {
            return false;
        };
        let changed = *root_slot != root || *distance_slot != distance;
        *root_slot = root;
        *distance_slot = distance;
        changed
    }

    /// Relaxes one edge, returning whether either endpoint changed.
    fn relax(&mut self, graph: &Graph, first: NodeId, second: NodeId) -> bool {
        let (first_root, second_root) = (self.root(first), self.root(second));
        let (first_distance, second_distance) = (self.distance(first), self.distance(second));
        let order = graph
            .label_of(second_root)
            .cmp(graph.label_of(first_root));
        match order {
            Ordering::Greater => self.set(second, first_root, first_distance.saturating_add(1)),
            Ordering::Less => self.set(first, second_root, second_distance.saturating_add(1)),
            Ordering::Equal if first_distance < second_distance => {
                self.set(second, second_root, first_distance.saturating_add(1))
            }
            Ordering::Equal if first_distance > second_distance => {
                self.set(first, first_root, second_distance.saturating_add(1))
            }
            Ordering::Equal => false,
        }
    }

    /// Picks the active edge from `node` towards its closest neighbour.
    fn select_parent(
        &self,
        graph: &Graph,
        node: NodeId,
        is_active: &[bool],
    ) -> Option<(EdgeId, NodeId)> {
        let mut best: Option<(u32, &str, EdgeId, NodeId)> = None;
        for &id in graph.incident_edges(node).ok()? {
            if !is_active.get(id.index()).copied().unwrap_or(false) {
                continue;
            }
            let Some(neighbour) = graph.edge(id).ok().and_then(|edge| edge.opposite(node)) else {
                continue;
            };
            let candidate = (self.distance(neighbour), graph.label_of(neighbour));
            let closer = best.is_none_or(|(distance, label, _, _)| candidate < (distance, label));
            if closer {
                best = Some((candidate.0, candidate.1, id, neighbour));
            }
        }
        best.map(|(_, _, id, neighbour)| (id, neighbour))
    }
}
