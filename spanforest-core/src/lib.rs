//! Spanforest core library.
//!
//! An interactive engine that maintains an undirected, weighted graph whose
//! edges can be broken and repaired, and computes a spanning forest over the
//! edges that are still active. Start from [`EngineBuilder`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod edge_state;
mod engine;
mod error;
mod example;
mod forest;
mod graph;
mod pass;
mod report;

pub use crate::{
    builder::{DEFAULT_EDGE_LENGTH, EngineBuilder},
    edge_state::{EdgeStates, Endpoint},
    engine::ForestEngine,
    error::{EngineError, EngineErrorCode, Result},
    forest::{
        Cluster, ClusterId, ClusterSet, ForestBuilder, ForestRun, NodeRunState,
        RootDistanceLabeling, Strategy, UnionFindClustering,
    },
    graph::{Edge, EdgeId, Graph, LabelSequence, Node, NodeId},
    pass::{CompletedPass, ForestPass},
    report::{EdgeClass, ForestReport},
};
