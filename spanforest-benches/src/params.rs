//! Benchmark parameter types.

use std::fmt;

use spanforest_core::Strategy;

/// Parameters for one forest-pass benchmark.
#[derive(Clone, Debug)]
pub struct ForestBenchParams {
    /// Number of nodes in the synthetic graph.
    pub node_count: usize,
    /// Percentage of edges broken before the pass.
    pub broken_percent: u32,
    /// Strategy under test.
    pub strategy: Strategy,
}

impl fmt::Display for ForestBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/n={},broken={}%",
            self.strategy, self.node_count, self.broken_percent
        )
    }
}
