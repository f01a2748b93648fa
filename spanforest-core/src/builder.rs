//! Builder utilities for configuring a [`ForestEngine`].
//!
//! Exposes strategy selection and the default edge length, validated before
//! an engine is constructed.

use crate::{
    Result,
    engine::ForestEngine,
    error::validate_length,
    forest::Strategy,
};

/// Length given to edges created through [`ForestEngine::add_default_edge`]
/// unless configured otherwise.
pub const DEFAULT_EDGE_LENGTH: f64 = 1.0;

/// Configures and constructs [`ForestEngine`] instances.
///
/// # Examples
/// ```
/// use spanforest_core::{EngineBuilder, Strategy};
///
/// let engine = EngineBuilder::new()
///     .with_strategy(Strategy::RootDistance)
///     .with_default_length(2.0)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(engine.strategy(), Strategy::RootDistance);
/// assert_eq!(engine.default_length(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    strategy: Strategy,
    default_length: f64,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            strategy: Strategy::UnionFind,
            default_length: DEFAULT_EDGE_LENGTH,
        }
    }
}

impl EngineBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use spanforest_core::{EngineBuilder, Strategy};
    ///
    /// let builder = EngineBuilder::new();
    /// assert_eq!(builder.strategy(), Strategy::UnionFind);
    /// assert_eq!(builder.default_length(), 1.0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the forest strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the configured strategy.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Overrides the length used by [`ForestEngine::add_default_edge`].
    #[must_use]
    pub fn with_default_length(mut self, length: f64) -> Self {
        self.default_length = length;
        self
    }

    /// Returns the configured default edge length.
    #[must_use]
    pub fn default_length(&self) -> f64 {
        self.default_length
    }

    /// Validates the configuration and constructs a [`ForestEngine`].
    ///
    /// # Errors
    /// Returns [`crate::EngineError::InvalidLength`] when the default length
    /// is negative or not finite.
    ///
    /// # Examples
    /// ```
    /// use spanforest_core::{EngineBuilder, EngineError};
    ///
    /// let err = EngineBuilder::new()
    ///     .with_default_length(-1.0)
    ///     .build()
    ///     .expect_err("negative lengths are rejected");
    /// assert!(matches!(err, EngineError::InvalidLength { .. }));
    /// ```
    pub fn build(self) -> Result<ForestEngine> {
        let default_length = validate_length(self.default_length)?;
        Ok(ForestEngine::new(self.strategy, default_length))
    }
}
