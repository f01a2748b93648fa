//! Insertion-order union-find clustering.

use tracing::{debug, instrument};

use crate::graph::{EdgeId, Graph};

use super::{ClusterSet, ForestAccumulator, ForestBuilder, ForestRun, Strategy};

/// Accepts every active edge that joins two different clusters.
///
/// Edges are visited in the order given (insertion order), not by length.
/// The walk stops as soon as a single cluster remains.
///
/// # Examples
/// ```
/// use spanforest_core::{ForestBuilder, Graph, UnionFindClustering};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("A")?;
/// let b = graph.add_node("B")?;
/// let c = graph.add_node("C")?;
/// let ab = graph.add_edge(a, b, 1.0)?;
/// let bc = graph.add_edge(b, c, 1.0)?;
/// let ac = graph.add_edge(a, c, 1.0)?;
///
/// let run = UnionFindClustering.build(&graph, &[ab, bc, ac]);
/// assert_eq!(run.accepted(), &[ab, bc]);
/// assert_eq!(run.total_cost(), 2.0);
/// # Ok::<(), spanforest_core::EngineError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct UnionFindClustering;

impl ForestBuilder for UnionFindClustering {
    fn strategy(&self) -> Strategy {
        Strategy::UnionFind
    }

    #[instrument(
        name = "forest.union_find",
        skip_all,
        fields(nodes = graph.node_count(), active_edges = active.len()),
    )]
    fn build(&self, graph: &Graph, active: &[EdgeId]) -> ForestRun {
        let mut clusters = ClusterSet::singletons(graph);
        let mut forest = ForestAccumulator::new(graph);

        for &id in active {
            if clusters.live_count() <= 1 {
                break;
            }
            let Ok(edge) = graph.edge(id) else {
                continue;
            };
            let (first, second) = edge.endpoints();
            let (Some(left), Some(right)) = (clusters.cluster_of(first), clusters.cluster_of(second))
            else {
                continue;
            };
            if left == right {
                debug!(edge = %id, "edge would close a cycle, skipping");
                continue;
            }
            forest.accept(id, first, second, edge.length());
            clusters.merge(left, right);
            debug!(edge = %id, clusters = clusters.live_count(), "edge accepted");
        }

        for (state, (node, _)) in forest.node_states.iter_mut().zip(graph.nodes()) {
            if let Some(cluster) = clusters.cluster_of(node) {
                state.cluster = cluster;
            }
        }
        forest.finish(clusters.live_count())
    }
}
