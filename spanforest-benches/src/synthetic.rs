//! Seeded synthetic graphs.
//!
//! Every node after the first is attached to a random earlier node, so the
//! full graph is connected; `extra_edges_per_node` random chords per node are
//! then added (parallel edges allowed) and `broken_percent` of all edges are
//! broken.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use spanforest_core::{EngineBuilder, ForestEngine, NodeId, Strategy};

use crate::error::BenchSetupError;

/// Shape of a synthetic graph.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Random chords added per node on top of the spanning tree.
    pub extra_edges_per_node: usize,
    /// Percentage of edges broken after construction.
    pub broken_percent: u32,
    /// Seed for the random generator.
    pub seed: u64,
    /// Strategy the engine is configured with.
    pub strategy: Strategy,
}

/// Builds an engine holding the graph described by `config`.
///
/// Edge lengths are drawn from `1..=9`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] for an empty graph,
/// [`BenchSetupError::PercentOutOfRange`] for `broken_percent > 100`, and
/// propagates engine errors.
///
/// # Examples
/// ```
/// use spanforest_benches::synthetic::{SyntheticConfig, generate_engine};
/// use spanforest_core::Strategy;
///
/// let engine = generate_engine(&SyntheticConfig {
///     node_count: 8,
///     extra_edges_per_node: 1,
///     broken_percent: 0,
///     seed: 7,
///     strategy: Strategy::UnionFind,
/// })?;
/// assert_eq!(engine.graph().node_count(), 8);
/// assert_eq!(engine.graph().edge_count(), 15);
/// # Ok::<(), spanforest_benches::error::BenchSetupError>(())
/// ```
pub fn generate_engine(config: &SyntheticConfig) -> Result<ForestEngine, BenchSetupError> {
    if config.node_count == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "node_count",
        });
    }
    if config.broken_percent > 100 {
        return Err(BenchSetupError::PercentOutOfRange {
            context: "broken_percent",
            value: config.broken_percent,
        });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut engine = EngineBuilder::new()
        .with_strategy(config.strategy)
        .build()?;
    for _ in 0..config.node_count {
        engine.add_auto_node()?;
    }

    for index in 1..config.node_count {
        let parent = rng.gen_range(0..index);
        add_random_length_edge(&mut engine, &mut rng, index, parent)?;
    }
    if config.node_count > 1 {
        let chords = config.node_count.saturating_mul(config.extra_edges_per_node);
        for _ in 0..chords {
            let first = rng.gen_range(0..config.node_count);
            let offset = rng.gen_range(1..config.node_count);
            let shifted = first.saturating_add(offset);
            let second = if shifted >= config.node_count {
                shifted.saturating_sub(config.node_count)
            } else {
                shifted
            };
            add_random_length_edge(&mut engine, &mut rng, first, second)?;
        }
    }

    for id in engine.active_edges() {
        if rng.gen_ratio(config.broken_percent, 100) {
            engine.set_edge_broken(id, true)?;
        }
    }
    Ok(engine)
}

fn add_random_length_edge(
    engine: &mut ForestEngine,
    rng: &mut SmallRng,
    first: usize,
    second: usize,
) -> Result<(), BenchSetupError> {
    let length = f64::from(rng.gen_range(1_u8..=9));
    engine.add_edge(NodeId::new(first), NodeId::new(second), length)?;
    Ok(())
}
