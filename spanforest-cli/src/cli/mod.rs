//! Command-line presentation layer for the spanning-forest engine.
//!
//! `run` loads a graph from an edge-list file, `example` uses the built-in
//! six-node network. Both apply the requested broken edges and downed
//! interfaces, run one pass and report the three edge partitions.

mod commands;
mod graph_file;

pub use commands::{
    Cli, CliError, Command, EdgeRef, ExampleCommand, ExecutionSummary, InterfaceRef, PassArgs,
    RunCommand, StrategyArg, render_summary, run_cli,
};
pub use graph_file::{GraphFileError, load_graph};

#[cfg(test)]
mod tests;
