//! Active/broken bookkeeping for every edge.
//!
//! Each edge has two interfaces, one per endpoint. An edge is broken as soon
//! as either interface is down and active only when both are up, so the
//! active and broken views are always disjoint and together cover every
//! edge.

use crate::{
    error::{EngineError, Result},
    graph::EdgeId,
};

/// One side of an edge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Endpoint {
    /// The interface on the edge's first endpoint.
    First,
    /// The interface on the edge's second endpoint.
    Second,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct Interfaces {
    first_down: bool,
    second_down: bool,
}

impl Interfaces {
    const fn is_broken(self) -> bool {
        self.first_down || self.second_down
    }

    const fn is_down(self, endpoint: Endpoint) -> bool {
        match endpoint {
            Endpoint::First => self.first_down,
            Endpoint::Second => self.second_down,
        }
    }

    fn set_down(&mut self, endpoint: Endpoint, down: bool) {
        match endpoint {
            Endpoint::First => self.first_down = down,
            Endpoint::Second => self.second_down = down,
        }
    }
}

/// Tracks which edges are usable by the forest builder.
///
/// # Examples
/// ```
/// use spanforest_core::{EdgeId, EdgeStates};
///
/// let mut states = EdgeStates::default();
/// let edge = states.register();
/// assert!(states.mark_broken(edge)?);
/// assert!(!states.mark_broken(edge)?);
/// assert_eq!(states.broken_edges(), vec![edge]);
/// assert!(states.active_edges().is_empty());
/// # Ok::<(), spanforest_core::EngineError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct EdgeStates {
    interfaces: Vec<Interfaces>,
}

impl EdgeStates {
    /// Starts tracking a new edge, initially active. Edges are registered in
    /// the same order the graph creates them.
    pub fn register(&mut self) -> EdgeId {
        let id = EdgeId::new(self.interfaces.len());
        self.interfaces.push(Interfaces::default());
        id
    }

    /// Returns the number of tracked edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    /// Returns `true` when no edge is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Returns `true` when `edge` is excluded from forest construction.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownEdge`] when `edge` is not tracked.
    pub fn is_broken(&self, edge: EdgeId) -> Result<bool> {
        Ok(self.get(edge)?.is_broken())
    }

    /// Returns `true` when the given interface of `edge` is down.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownEdge`] when `edge` is not tracked.
    pub fn is_interface_down(&self, edge: EdgeId, endpoint: Endpoint) -> Result<bool> {
        Ok(self.get(edge)?.is_down(endpoint))
    }

    /// Moves `edge` from active to broken by taking both interfaces down.
    ///
    /// Returns whether the edge changed state.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownEdge`] when `edge` is not tracked.
    pub fn mark_broken(&mut self, edge: EdgeId) -> Result<bool> {
        self.set_broken(edge, true)
    }

    /// Moves `edge` from broken to active by bringing both interfaces up.
    ///
    /// Returns whether the edge changed state.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownEdge`] when `edge` is not tracked.
    pub fn mark_active(&mut self, edge: EdgeId) -> Result<bool> {
        self.set_broken(edge, false)
    }

    /// Sets both interfaces of `edge` down (`broken == true`) or up.
    ///
    /// An edge already in the requested state is left untouched, including
    /// the individual interfaces that put it there. Returns whether the edge
    /// changed state.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownEdge`] when `edge` is not tracked.
    pub fn set_broken(&mut self, edge: EdgeId, broken: bool) -> Result<bool> {
        let slot = self.get_mut(edge)?;
        if slot.is_broken() == broken {
            return Ok(false);
        }
        *slot = Interfaces {
            first_down: broken,
            second_down: broken,
        };
        Ok(true)
    }

    /// Sets a single interface of `edge` down or up.
    ///
    /// Returns whether the interface changed.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownEdge`] when `edge` is not tracked.
    pub fn set_interface_down(
        &mut self,
        edge: EdgeId,
        endpoint: Endpoint,
        down: bool,
    ) -> Result<bool> {
        let slot = self.get_mut(edge)?;
        let changed = slot.is_down(endpoint) != down;
        slot.set_down(endpoint, down);
        Ok(changed)
    }

    /// Returns the active edges in insertion order.
    #[must_use]
    pub fn active_edges(&self) -> Vec<EdgeId> {
        self.collect_where(|interfaces| !interfaces.is_broken())
    }

    /// Returns the broken edges in insertion order.
    #[must_use]
    pub fn broken_edges(&self) -> Vec<EdgeId> {
        self.collect_where(Interfaces::is_broken)
    }

    /// Brings every interface back up, returning how many edges were broken.
    pub fn restart(&mut self) -> usize {
        let reopened = self
            .interfaces
            .iter()
            .filter(|interfaces| interfaces.is_broken())
            .count();
        self.interfaces.fill(Interfaces::default());
        reopened
    }

    /// Forgets every edge.
    pub fn clear(&mut self) {
        self.interfaces.clear();
    }

    fn collect_where(&self, predicate: impl Fn(Interfaces) -> bool) -> Vec<EdgeId> {
        self.interfaces
            .iter()
            .enumerate()
            .filter(|(_, interfaces)| predicate(**interfaces))
            .map(|(index, _)| EdgeId::new(index))
            .collect()
    }

    fn get(&self, edge: EdgeId) -> Result<Interfaces> {
        self.interfaces
            .get(edge.index())
            .copied()
            .ok_or(EngineError::UnknownEdge { edge })
    }

    fn get_mut(&mut self, edge: EdgeId) -> Result<&mut Interfaces> {
        self.interfaces
            .get_mut(edge.index())
            .ok_or(EngineError::UnknownEdge { edge })
    }
}
