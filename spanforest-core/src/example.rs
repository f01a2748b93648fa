//! Built-in demonstration graph.

use tracing::{info, instrument};

use crate::{EngineError, Result, engine::ForestEngine, graph::NodeId};

const EXAMPLE_NODES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Edges of the demonstration graph as indices into [`EXAMPLE_NODES`].
const EXAMPLE_EDGES: [(usize, usize); 10] = [
    (0, 1), // A-B
    (1, 2), // B-C
    (2, 4), // C-E
    (4, 5), // E-F
    (1, 3), // B-D
    (2, 3), // C-D
    (3, 4), // D-E
    (3, 5), // D-F
    (0, 5), // A-F
    (1, 5), // B-F
];

impl ForestEngine {
    /// Replaces the current graph with the six-node demonstration network.
    ///
    /// Nodes `A` to `F` are joined by ten edges, each using the default
    /// edge length, and the automatic label sequence continues at `G`.
    ///
    /// # Errors
    /// Never fails on a freshly reset engine; errors from the underlying
    /// commands are propagated unchanged.
    ///
    /// # Examples
    /// ```
    /// use spanforest_core::EngineBuilder;
    ///
    /// let mut engine = EngineBuilder::new().build()?;
    /// engine.load_example()?;
    /// let report = engine.compute_forest();
    /// assert_eq!(report.accepted().len(), 5);
    /// assert_eq!(report.rejected_active().len(), 5);
    /// # Ok::<(), spanforest_core::EngineError>(())
    /// ```
    #[instrument(name = "engine.load_example", skip(self))]
    pub fn load_example(&mut self) -> Result<()> {
        self.reset();
        let mut nodes: Vec<NodeId> = Vec::with_capacity(EXAMPLE_NODES.len());
        for _ in EXAMPLE_NODES {
            nodes.push(self.add_auto_node()?);
        }
        let node_at = |index: usize| {
            nodes.get(index).copied().ok_or(EngineError::UnknownNode {
                node: NodeId::new(index),
            })
        };
        for (first, second) in EXAMPLE_EDGES {
            self.add_default_edge(node_at(first)?, node_at(second)?)?;
        }
        info!(
            nodes = nodes.len(),
            edges = EXAMPLE_EDGES.len(),
            "example graph loaded"
        );
        Ok(())
    }
}
