//! Benchmark setup error type.

use spanforest_core::EngineError;

/// Errors that may occur while building benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// The engine rejected a generated node or edge.
    #[error("engine rejected synthetic graph: {0}")]
    Engine(#[from] EngineError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// The parameter that was unexpectedly zero.
        context: &'static str,
    },
    /// A percentage exceeded 100.
    #[error("{context} must be at most 100 (got {value})")]
    PercentOutOfRange {
        /// The parameter that was out of range.
        context: &'static str,
        /// The rejected value.
        value: u32,
    },
}
