//! Classified result of a forest pass.

use crate::{forest::Strategy, graph::EdgeId};

/// Where an edge ended up after a pass.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeClass {
    /// The edge is part of the forest.
    InForest,
    /// The edge was active but the builder did not need it.
    RejectedActive,
    /// The edge was broken and never considered.
    Broken,
}

/// Every edge of the graph, partitioned by a forest pass, plus its cost.
///
/// # Examples
/// ```
/// use spanforest_core::{EdgeClass, EngineBuilder};
///
/// let mut engine = EngineBuilder::new().build()?;
/// let a = engine.add_node("A")?;
/// let b = engine.add_node("B")?;
/// let edge = engine.add_edge(a, b, 4.0)?;
/// let report = engine.compute_forest();
/// assert_eq!(report.accepted(), &[edge]);
/// assert_eq!(report.class_of(edge), Some(EdgeClass::InForest));
/// assert_eq!(report.total_cost(), 4.0);
/// # Ok::<(), spanforest_core::EngineError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ForestReport {
    accepted: Vec<EdgeId>,
    rejected_active: Vec<EdgeId>,
    broken: Vec<EdgeId>,
    total_cost: f64,
    component_count: usize,
    strategy: Strategy,
}

impl ForestReport {
    pub(crate) fn new(
        accepted: Vec<EdgeId>,
        active: &[EdgeId],
        broken: Vec<EdgeId>,
        total_cost: f64,
        component_count: usize,
        strategy: Strategy,
    ) -> Self {
        let rejected_active = active
            .iter()
            .copied()
            .filter(|edge| !accepted.contains(edge))
            .collect();
        Self {
            accepted,
            rejected_active,
            broken,
            total_cost,
            component_count,
            strategy,
        }
    }

    /// Returns the forest edges in acceptance order.
    #[rustfmt::skip]
    #[must_use]
    pub fn accepted(&self) -> &[EdgeId] { &self.accepted }

    /// Returns the active edges left out of the forest, in insertion order.
    #[rustfmt::skip]
    #[must_use]
    pub fn rejected_active(&self) -> &[EdgeId] { &self.rejected_active }

    /// Returns the broken edges, in insertion order.
    #[rustfmt::skip]
    #[must_use]
    pub fn broken(&self) -> &[EdgeId] { &self.broken }

    /// Returns the sum of the accepted edge lengths.
    #[rustfmt::skip]
    #[must_use]
    pub fn total_cost(&self) -> f64 { self.total_cost }

    /// Returns the number of trees in the forest, isolated nodes included.
    #[rustfmt::skip]
    #[must_use]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns the strategy that produced the forest.
    #[rustfmt::skip]
    #[must_use]
    pub fn strategy(&self) -> Strategy { self.strategy }

    /// Returns the class of `edge`, or `None` when the pass did not see it.
    #[must_use]
    pub fn class_of(&self, edge: EdgeId) -> Option<EdgeClass> {
        if self.accepted.contains(&edge) {
            Some(EdgeClass::InForest)
        } else if self.rejected_active.contains(&edge) {
            Some(EdgeClass::RejectedActive)
        } else if self.broken.contains(&edge) {
            Some(EdgeClass::Broken)
        } else {
            None
        }
    }
}
