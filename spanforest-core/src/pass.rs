//! Forest passes detached from the engine.
//!
//! A [`ForestPass`] owns a snapshot of the graph and active edge list, so it
//! can be moved to a worker thread while the engine stays responsive. The
//! resulting [`CompletedPass`] is applied with
//! [`crate::ForestEngine::commit`], which refuses it if it came from another
//! engine or the engine was mutated in the meantime.

use tracing::instrument;

use crate::{
    forest::{ForestRun, Strategy},
    graph::{EdgeId, Graph},
};

/// Snapshot of everything a forest pass reads.
#[derive(Clone, Debug)]
pub struct ForestPass {
    graph: Graph,
    active: Vec<EdgeId>,
    strategy: Strategy,
    engine: u64,
    generation: u64,
}

impl ForestPass {
    pub(crate) fn new(
        graph: Graph,
        active: Vec<EdgeId>,
        strategy: Strategy,
        engine: u64,
        generation: u64,
    ) -> Self {
        Self {
            graph,
            active,
            strategy,
            engine,
            generation,
        }
    }

    /// Returns the engine generation the snapshot was taken at.
    #[rustfmt::skip]
    #[must_use]
    pub fn generation(&self) -> u64 { self.generation }

    /// Returns the strategy the pass will run.
    #[rustfmt::skip]
    #[must_use]
    pub fn strategy(&self) -> Strategy { self.strategy }

    /// Returns the active edges captured in the snapshot.
    #[rustfmt::skip]
    #[must_use]
    pub fn active(&self) -> &[EdgeId] { &self.active }

    /// Runs the pass. Pure with respect to the engine.
    #[must_use]
    #[instrument(
        name = "pass.run",
        skip(self),
        fields(strategy = %self.strategy, generation = self.generation),
    )]
    pub fn run(self) -> CompletedPass {
        let run = self.strategy.build(&self.graph, &self.active);
        CompletedPass {
            run,
            active: self.active,
            strategy: self.strategy,
            engine: self.engine,
            generation: self.generation,
        }
    }
}

/// Result of [`ForestPass::run`], waiting to be committed.
#[derive(Clone, Debug)]
pub struct CompletedPass {
    run: ForestRun,
    active: Vec<EdgeId>,
    strategy: Strategy,
    engine: u64,
    generation: u64,
}

impl CompletedPass {
    /// Returns the raw forest computed by the pass.
    #[rustfmt::skip]
    #[must_use]
    pub fn run(&self) -> &ForestRun { &self.run }

    /// Returns the engine generation the pass was prepared at.
    #[rustfmt::skip]
    #[must_use]
    pub fn generation(&self) -> u64 { self.generation }

    #[rustfmt::skip]
    pub(crate) fn engine(&self) -> u64 { self.engine }

    #[rustfmt::skip]
    pub(crate) fn active(&self) -> &[EdgeId] { &self.active }

    #[rustfmt::skip]
    pub(crate) fn strategy(&self) -> Strategy { self.strategy }
}
