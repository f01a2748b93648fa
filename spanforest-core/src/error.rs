//! Error types for the spanning-forest engine.
//!
//! Every variant describes a rejected caller command. The engine keeps its
//! prior state whenever one of these is returned.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error returned by [`crate::ForestEngine`] commands.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    /// Both endpoints of a new edge were the same node.
    #[error("edge endpoints must differ (self-loop on node {node})")]
    InvalidEdge {
        /// The node used for both endpoints.
        node: NodeId,
    },
    /// A command referenced a node that is not part of the graph.
    #[error("node {node} is not part of the graph")]
    UnknownNode {
        /// The unknown node identifier.
        node: NodeId,
    },
    /// A command referenced an edge that is not part of the graph.
    #[error("edge {edge} is not part of the graph")]
    UnknownEdge {
        /// The unknown edge identifier.
        edge: EdgeId,
    },
    /// An edge length was negative, NaN or infinite.
    #[error("edge length must be finite and non-negative (got {length})")]
    InvalidLength {
        /// The rejected length.
        length: f64,
    },
    /// A node with the same label already exists.
    #[error("a node labelled `{label}` already exists")]
    DuplicateLabel {
        /// The label that is already taken.
        label: Arc<str>,
    },
    /// A prepared pass was committed after the engine had been mutated.
    #[error("pass prepared at generation {prepared} is stale (engine is at generation {current})")]
    StalePass {
        /// Generation captured when the pass was prepared.
        prepared: u64,
        /// Generation of the engine at commit time.
        current: u64,
    },
    /// A prepared pass was committed to an engine other than the one that
    /// prepared it.
    #[error("pass was prepared by a different engine")]
    ForeignPass,
}

define_error_codes! {
    /// Stable codes describing [`EngineError`] variants.
    enum EngineErrorCode for EngineError {
        /// Both endpoints of a new edge were the same node.
        InvalidEdge => InvalidEdge { .. } => "ENGINE_INVALID_EDGE",
        /// A command referenced a node that is not part of the graph.
        UnknownNode => UnknownNode { .. } => "ENGINE_UNKNOWN_NODE",
        /// A command referenced an edge that is not part of the graph.
        UnknownEdge => UnknownEdge { .. } => "ENGINE_UNKNOWN_EDGE",
        /// An edge length was negative, NaN or infinite.
        InvalidLength => InvalidLength { .. } => "ENGINE_INVALID_LENGTH",
        /// A node with the same label already exists.
        DuplicateLabel => DuplicateLabel { .. } => "ENGINE_DUPLICATE_LABEL",
        /// A prepared pass was committed after the engine had been mutated.
        StalePass => StalePass { .. } => "ENGINE_STALE_PASS",
        /// A prepared pass was committed to a different engine.
        ForeignPass => ForeignPass => "ENGINE_FOREIGN_PASS",
    }
}

/// Convenient alias for results returned by the engine API.
pub type Result<T> = core::result::Result<T, EngineError>;

pub(crate) fn validate_length(length: f64) -> Result<f64> {
    if length.is_finite() && length >= 0.0 {
        Ok(length)
    } else {
        Err(EngineError::InvalidLength { length })
    }
}
