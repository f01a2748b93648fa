//! Run controller for the spanning-forest engine.
//!
//! [`ForestEngine`] owns the graph and the edge states, exposes the commands
//! a presentation layer issues (place nodes, connect them, break or repair
//! edges), and runs forest passes on demand. All mutation goes through
//! `&mut self`, so a pass never observes a half-applied command.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{Span, debug, field, info, instrument, warn};

use crate::{
    Result,
    edge_state::{EdgeStates, Endpoint},
    error::EngineError,
    forest::{ForestRun, Strategy},
    graph::{EdgeId, Graph, LabelSequence, Node, NodeId},
    pass::{CompletedPass, ForestPass},
    report::ForestReport,
};

/// Interactive spanning-forest engine.
///
/// # Examples
/// ```
/// use spanforest_core::EngineBuilder;
///
/// let mut engine = EngineBuilder::new().build()?;
/// let a = engine.add_node("A")?;
/// let b = engine.add_node("B")?;
/// let c = engine.add_node("C")?;
/// let ab = engine.add_edge(a, b, 1.0)?;
/// let bc = engine.add_edge(b, c, 1.0)?;
/// let ac = engine.add_edge(a, c, 1.0)?;
///
/// let report = engine.compute_forest();
/// assert_eq!(report.accepted(), &[ab, bc]);
/// assert_eq!(report.rejected_active(), &[ac]);
/// assert_eq!(report.total_cost(), 2.0);
///
/// engine.set_edge_broken(ab, true)?;
/// let report = engine.compute_forest();
/// assert_eq!(report.accepted(), &[bc, ac]);
/// assert_eq!(report.broken(), &[ab]);
/// # Ok::<(), spanforest_core::EngineError>(())
/// ```
///
/// Every engine, clones included, carries its own identity so that
/// [`Self::commit`] only accepts passes it prepared itself.
#[derive(Debug)]
pub struct ForestEngine {
    id: u64,
    graph: Graph,
    edge_states: EdgeStates,
    labels: LabelSequence,
    strategy: Strategy,
    default_length: f64,
    generation: u64,
    last_report: Option<ForestReport>,
}

static NEXT_ENGINE_ID: AtomicU64 = AtomicU64::new(0);

fn next_engine_id() -> u64 {
    NEXT_ENGINE_ID.fetch_add(1, Ordering::Relaxed)
}

impl Clone for ForestEngine {
    fn clone(&self) -> Self {
        Self {
            id: next_engine_id(),
            graph: self.graph.clone(),
            edge_states: self.edge_states.clone(),
            labels: self.labels.clone(),
            strategy: self.strategy,
            default_length: self.default_length,
            generation: self.generation,
            last_report: self.last_report.clone(),
        }
    }
}

impl ForestEngine {
    pub(crate) fn new(strategy: Strategy, default_length: f64) -> Self {
        Self {
            id: next_engine_id(),
            graph: Graph::new(),
            edge_states: EdgeStates::default(),
            labels: LabelSequence::new(),
            strategy,
            default_length,
            generation: 0,
            last_report: None,
        }
    }

    /// Returns the strategy used by the next pass.
    #[rustfmt::skip]
    #[must_use]
    pub fn strategy(&self) -> Strategy { self.strategy }

    /// Switches the strategy used by subsequent passes.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Returns the length used by [`Self::add_default_edge`].
    #[rustfmt::skip]
    #[must_use]
    pub fn default_length(&self) -> f64 { self.default_length }

    /// Returns the graph model.
    #[rustfmt::skip]
    #[must_use]
    pub fn graph(&self) -> &Graph { &self.graph }

    /// Returns the edge-state tracker.
    #[rustfmt::skip]
    #[must_use]
    pub fn edge_states(&self) -> &EdgeStates { &self.edge_states }

    /// Returns a counter bumped by every command that changes what a pass
    /// would compute.
    #[rustfmt::skip]
    #[must_use]
    pub fn generation(&self) -> u64 { self.generation }

    /// Looks up a node.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownNode`] when `id` is not in the graph.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.graph.node(id)
    }

    /// Places a node with a caller-chosen, unique label.
    ///
    /// # Errors
    /// Returns [`EngineError::DuplicateLabel`] when the label is taken.
    pub fn add_node(&mut self, label: &str) -> Result<NodeId> {
        let id = self.graph.add_node(label).inspect_err(|err| {
            warn!(label, code = %err.code(), "rejected node");
        })?;
        self.bump();
        debug!(node = %id, label, "node placed");
        Ok(id)
    }

    /// Places a node labelled with the next free automatic label
    /// (`A`, `B`, ..., `Z`, `AA`, ...).
    ///
    /// # Errors
    /// Returns [`EngineError::DuplicateLabel`] only if the graph changed
    /// between picking and inserting the label, which cannot happen through
    /// this API.
    pub fn add_auto_node(&mut self) -> Result<NodeId> {
        let graph = &self.graph;
        let label = self.labels.next_free(|candidate| graph.contains_label(candidate));
        self.add_node(&label)
    }

    /// Connects two distinct nodes with an edge of the given length.
    ///
    /// The new edge starts active.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownNode`], [`EngineError::InvalidEdge`] or
    /// [`EngineError::InvalidLength`] as described on [`Graph::add_edge`].
    pub fn add_edge(&mut self, first: NodeId, second: NodeId, length: f64) -> Result<EdgeId> {
        let id = self
            .graph
            .add_edge(first, second, length)
            .inspect_err(|err| {
                warn!(first = %first, second = %second, code = %err.code(), "rejected edge");
            })?;
        let tracked = self.edge_states.register();
        debug_assert_eq!(id, tracked, "edge states must follow graph insertion order");
        self.bump();
        debug!(edge = %id, first = %first, second = %second, length, "edge placed");
        Ok(id)
    }

    /// Connects two nodes using the configured default length.
    ///
    /// # Errors
    /// See [`Self::add_edge`].
    pub fn add_default_edge(&mut self, first: NodeId, second: NodeId) -> Result<EdgeId> {
        self.add_edge(first, second, self.default_length)
    }

    /// Marks `edge` broken (`true`) or active (`false`). Idempotent.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownEdge`] when `edge` is not in the graph.
    pub fn set_edge_broken(&mut self, edge: EdgeId, broken: bool) -> Result<()> {
        if self.edge_states.set_broken(edge, broken)? {
            self.bump();
            debug!(edge = %edge, broken, "edge state changed");
        }
        Ok(())
    }

    /// Takes one interface of `edge` down or brings it back up. The edge is
    /// broken while either interface is down. Idempotent.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownEdge`] when `edge` is not in the graph.
    pub fn set_interface_down(&mut self, edge: EdgeId, endpoint: Endpoint, down: bool) -> Result<()> {
        if self.edge_states.set_interface_down(edge, endpoint, down)? {
            self.bump();
            debug!(edge = %edge, ?endpoint, down, "interface state changed");
        }
        Ok(())
    }

    /// Returns `true` when `edge` is broken.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownEdge`] when `edge` is not in the graph.
    pub fn is_edge_broken(&self, edge: EdgeId) -> Result<bool> {
        self.edge_states.is_broken(edge)
    }

    /// Returns the active edges in insertion order.
    #[must_use]
    pub fn active_edges(&self) -> Vec<EdgeId> {
        self.edge_states.active_edges()
    }

    /// Returns the broken edges in insertion order.
    #[must_use]
    pub fn broken_edges(&self) -> Vec<EdgeId> {
        self.edge_states.broken_edges()
    }

    /// Returns the report of the last pass, if any since the last
    /// restart or reset.
    #[must_use]
    pub fn last_report(&self) -> Option<&ForestReport> {
        self.last_report.as_ref()
    }

    /// Returns the total cost of the last pass, or zero when there is none.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.last_report.as_ref().map_or(0.0, ForestReport::total_cost)
    }

    /// Runs one forest pass over the current active edges and classifies
    /// every edge.
    #[instrument(
        name = "engine.compute_forest",
        skip(self),
        fields(
            strategy = %self.strategy,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            accepted = field::Empty,
            total_cost = field::Empty,
        ),
    )]
    pub fn compute_forest(&mut self) -> ForestReport {
        let active = self.edge_states.active_edges();
        let run = self.strategy.build(&self.graph, &active);
        self.apply_run(&run, &active, self.strategy)
    }

    /// Snapshots everything a pass needs so it can run on another thread.
    ///
    /// # Examples
    /// ```
    /// use spanforest_core::EngineBuilder;
    ///
    /// let mut engine = EngineBuilder::new().build()?;
    /// let a = engine.add_node("A")?;
    /// let b = engine.add_node("B")?;
    /// engine.add_edge(a, b, 1.0)?;
    ///
    /// let pass = engine.prepare_pass();
    /// let completed = std::thread::spawn(move || pass.run())
    ///     .join()
    ///     .expect("pass thread must not panic");
    /// let report = engine.commit(completed)?;
    /// assert_eq!(report.total_cost(), 1.0);
    /// # Ok::<(), spanforest_core::EngineError>(())
    /// ```
    #[must_use]
    pub fn prepare_pass(&self) -> ForestPass {
        ForestPass::new(
            self.graph.clone(),
            self.edge_states.active_edges(),
            self.strategy,
            self.id,
            self.generation,
        )
    }

    /// Applies a pass computed from [`Self::prepare_pass`].
    ///
    /// # Errors
    /// Returns [`EngineError::ForeignPass`] when another engine prepared the
    /// pass and [`EngineError::StalePass`] when this engine changed after the
    /// pass was prepared. Either way the engine is left untouched.
    #[instrument(
        name = "engine.commit",
        skip(self, pass),
        fields(prepared = pass.generation(), current = self.generation),
    )]
    pub fn commit(&mut self, pass: CompletedPass) -> Result<ForestReport> {
        if pass.engine() != self.id {
            warn!("discarding forest pass from another engine");
            return Err(EngineError::ForeignPass);
        }
        if pass.generation() != self.generation {
            warn!("discarding stale forest pass");
            return Err(EngineError::StalePass {
                prepared: pass.generation(),
                current: self.generation,
            });
        }
        Ok(self.apply_run(pass.run(), pass.active(), pass.strategy()))
    }

    /// Discards forest results and reopens every broken edge, keeping all
    /// nodes and edges.
    #[instrument(name = "engine.restart", skip(self))]
    pub fn restart(&mut self) {
        self.graph.reset_run_states();
        let reopened = self.edge_states.restart();
        self.last_report = None;
        self.bump();
        info!(reopened, "engine restarted");
    }

    /// Drops every node, edge and result, returning to the empty graph.
    #[instrument(name = "engine.reset", skip(self))]
    pub fn reset(&mut self) {
        self.graph.clear();
        self.edge_states.clear();
        self.labels.rewind();
        self.last_report = None;
        self.bump();
        info!("engine reset");
    }

    fn apply_run(&mut self, run: &ForestRun, active: &[EdgeId], strategy: Strategy) -> ForestReport {
        self.graph.apply_run_states(run.node_states());
        let report = ForestReport::new(
            run.accepted().to_vec(),
            active,
            self.edge_states.broken_edges(),
            run.total_cost(),
            run.component_count(),
            strategy,
        );

        let span = Span::current();
        span.record("accepted", report.accepted().len());
        span.record("total_cost", report.total_cost());
        info!(
            strategy = %strategy,
            accepted = report.accepted().len(),
            rejected = report.rejected_active().len(),
            broken = report.broken().len(),
            components = report.component_count(),
            total_cost = report.total_cost(),
            "forest computed"
        );

        self.last_report = Some(report.clone());
        report
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
