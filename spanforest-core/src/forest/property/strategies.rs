//! Graph generators for forest property tests.

use proptest::prelude::*;

use crate::graph::{EdgeId, Graph, NodeId};

const MAX_NODES: usize = 12;
const MAX_EDGES: usize = 30;
const MAX_LENGTH: u8 = 4;

/// A generated graph together with the subset of edges left active.
#[derive(Clone, Debug)]
pub(super) struct GraphFixture {
    pub graph: Graph,
    pub active: Vec<EdgeId>,
}

/// Raw edge as produced by proptest: endpoints, length and broken flag.
type RawEdge = (usize, usize, u8, bool);

/// Generates graphs of up to [`MAX_NODES`] nodes with random, possibly
/// parallel, edges. Small integer lengths keep cost sums exact.
pub(super) fn graph_fixture() -> impl Strategy<Value = GraphFixture> {
    fixture_with_lengths(0..=MAX_LENGTH)
}

/// Like [`graph_fixture`] but every edge has length one.
pub(super) fn uniform_graph_fixture() -> impl Strategy<Value = GraphFixture> {
    fixture_with_lengths(Just(1))
}

fn fixture_with_lengths(
    lengths: impl Strategy<Value = u8> + Clone + 'static,
) -> impl Strategy<Value = GraphFixture> {
    (1..=MAX_NODES)
        .prop_flat_map(move |nodes| {
            let edge = (0..nodes, 0..nodes, lengths.clone(), prop::bool::weighted(0.25));
            let ranks = Just((0..nodes).collect::<Vec<_>>()).prop_shuffle();
            (ranks, prop::collection::vec(edge, 0..=MAX_EDGES))
        })
        .prop_map(|(ranks, raw)| build_fixture(&ranks, &raw))
}

/// Builds the fixture graph. Node `i` is labelled after `ranks[i]`, so label
/// order is a random permutation of creation order.
fn build_fixture(ranks: &[usize], raw: &[RawEdge]) -> GraphFixture {
    let mut graph = Graph::new();
    for rank in ranks {
        graph
            .add_node(&format!("n{rank:02}"))
            .expect("generated labels are unique");
    }
    let mut active = Vec::new();
    for &(first, second, length, broken) in raw {
        if first == second {
            continue;
        }
        let id = graph
            .add_edge(NodeId::new(first), NodeId::new(second), f64::from(length))
            .expect("generated edges are valid");
        if !broken {
            active.push(id);
        }
    }
    GraphFixture { graph, active }
}
