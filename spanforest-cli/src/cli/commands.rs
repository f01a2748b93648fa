//! Command implementations and argument parsing for the spanforest CLI.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use spanforest_core::{
    EdgeId, EngineBuilder, EngineError, EngineErrorCode, Endpoint, ForestEngine, ForestReport,
    Graph, NodeId, Strategy,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::graph_file::{GraphFileError, load_graph};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "spanforest",
    about = "Compute a spanning forest over the active edges of a graph."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Load a graph from an edge-list file and run one pass.
    Run(RunCommand),
    /// Run one pass over the built-in six-node example graph.
    Example(ExampleCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Edge-list file: `FIRST SECOND [LENGTH]` or `LABEL` per line.
    pub path: PathBuf,

    /// Pass configuration.
    #[command(flatten)]
    pub pass: PassArgs,
}

/// Options accepted by the `example` command.
#[derive(Debug, Args, Clone)]
pub struct ExampleCommand {
    /// Pass configuration.
    #[command(flatten)]
    pub pass: PassArgs,
}

/// Options shared by every command that runs a pass.
#[derive(Debug, Args, Clone, Default)]
pub struct PassArgs {
    /// Forest strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::UnionFind)]
    pub strategy: StrategyArg,

    /// Break every edge between two nodes, e.g. `--broken A-B`.
    #[arg(long = "broken", value_name = "FIRST-SECOND")]
    pub broken: Vec<EdgeRef>,

    /// Take down one interface, e.g. `--down B:2`.
    #[arg(long = "down", value_name = "NODE:SLOT")]
    pub down: Vec<InterfaceRef>,
}

/// Strategy names accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Insertion-order union-find clustering.
    #[default]
    UnionFind,
    /// Root-label propagation with per-node parent selection.
    RootDistance,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::UnionFind => Self::UnionFind,
            StrategyArg::RootDistance => Self::RootDistance,
        }
    }
}

/// A pair of node labels naming the edges between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRef {
    /// Label of one endpoint.
    pub first: String,
    /// Label of the other endpoint.
    pub second: String,
}

impl FromStr for EdgeRef {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.split_once('-') {
            Some((first, second)) if !first.is_empty() && !second.is_empty() => Ok(Self {
                first: first.to_owned(),
                second: second.to_owned(),
            }),
            _ => Err(format!("expected FIRST-SECOND, got `{raw}`")),
        }
    }
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

/// One interface, named by its node label and slot number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRef {
    /// Label of the node owning the interface.
    pub node: String,
    /// Interface slot on that node, starting at 1.
    pub slot: u32,
}

impl FromStr for InterfaceRef {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let Some((node, slot)) = raw.rsplit_once(':') else {
            return Err(format!("expected NODE:SLOT, got `{raw}`"));
        };
        if node.is_empty() {
            return Err(format!("missing node label in `{raw}`"));
        }
        let slot = slot
            .parse()
            .map_err(|err| format!("invalid slot in `{raw}`: {err}"))?;
        Ok(Self {
            node: node.to_owned(),
            slot,
        })
    }
}

/// Errors surfaced while executing CLI commands.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CliError {
    /// The graph file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The graph file could not be parsed.
    #[error("invalid graph file `{path}`: {source}")]
    GraphFile {
        /// Path of the graph file.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: GraphFileError,
    },
    /// A node label given on the command line does not exist.
    #[error("no node labelled `{label}`")]
    UnknownLabel {
        /// The label that was not found.
        label: String,
    },
    /// `--broken` named two nodes that share no edge.
    #[error("no edge between `{edge}`")]
    NoSuchEdge {
        /// The pair as given on the command line.
        edge: EdgeRef,
    },
    /// `--down` named a slot that no edge occupies.
    #[error("node `{node}` has no interface {slot}")]
    NoSuchInterface {
        /// Node label.
        node: String,
        /// Requested slot.
        slot: u32,
    },
    /// The engine rejected a command.
    #[error(transparent)]
    Core(#[from] EngineError),
}

impl CliError {
    /// Returns the engine error code behind this failure, when the engine
    /// rejected a command directly or a line of a graph file.
    #[must_use]
    pub const fn engine_code(&self) -> Option<EngineErrorCode> {
        match self {
            Self::Core(source)
            | Self::GraphFile {
                source: GraphFileError::Engine { source, .. },
                ..
            } => Some(source.code()),
            _ => None,
        }
    }
}

/// Outcome of one CLI pass.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Where the graph came from (`example` or the file stem).
    pub source: String,
    /// The graph the pass ran over.
    pub graph: Graph,
    /// Classified edges and cost.
    pub report: ForestReport,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the graph cannot be loaded or a command-line
/// reference does not resolve.
///
/// # Examples
/// ```
/// use spanforest_cli::cli::{Cli, Command, ExampleCommand, PassArgs, run_cli};
///
/// let cli = Cli {
///     command: Command::Example(ExampleCommand {
///         pass: PassArgs::default(),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.report.accepted().len(), 5);
/// assert_eq!(summary.report.total_cost(), 5.0);
/// # Ok::<(), spanforest_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Run(run) => {
            span.record("command", field::display("run"));
            run_command(run)
        }
        Command::Example(example) => {
            span.record("command", field::display("example"));
            example_command(example)
        }
    }
}

pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand { path, pass } = command;
    let mut engine = build_engine(&pass)?;
    let reader = open_graph_file(&path)?;
    load_graph(&mut engine, reader).map_err(|source| CliError::GraphFile {
        path: path.clone(),
        source,
    })?;
    execute(engine, derive_source_name(&path), &pass)
}

pub(super) fn example_command(command: ExampleCommand) -> Result<ExecutionSummary, CliError> {
    let mut engine = build_engine(&command.pass)?;
    engine.load_example()?;
    execute(engine, "example".to_owned(), &command.pass)
}

fn build_engine(pass: &PassArgs) -> Result<ForestEngine, CliError> {
    Ok(EngineBuilder::new()
        .with_strategy(pass.strategy.into())
        .build()?)
}

#[instrument(
    name = "cli.execute",
    err,
    skip(engine, pass),
    fields(strategy = field::Empty, broken = pass.broken.len(), down = pass.down.len()),
)]
fn execute(
    mut engine: ForestEngine,
    source: String,
    pass: &PassArgs,
) -> Result<ExecutionSummary, CliError> {
    Span::current().record("strategy", field::display(engine.strategy()));
    for edge in &pass.broken {
        for id in edges_between(engine.graph(), edge)? {
            engine.set_edge_broken(id, true)?;
        }
    }
    for interface in &pass.down {
        let (edge, endpoint) = find_interface(engine.graph(), interface)?;
        engine.set_interface_down(edge, endpoint, true)?;
    }

    let report = engine.compute_forest();
    info!(
        source = source.as_str(),
        accepted = report.accepted().len(),
        total_cost = report.total_cost(),
        "command completed"
    );
    Ok(ExecutionSummary {
        source,
        graph: engine.graph().clone(),
        report,
    })
}

fn resolve(graph: &Graph, label: &str) -> Result<NodeId, CliError> {
    graph.find_node(label).ok_or_else(|| CliError::UnknownLabel {
        label: label.to_owned(),
    })
}

fn edges_between(graph: &Graph, edge: &EdgeRef) -> Result<Vec<EdgeId>, CliError> {
    let first = resolve(graph, &edge.first)?;
    let second = resolve(graph, &edge.second)?;
    let ids: Vec<EdgeId> = graph
        .edges()
        .filter(|(_, candidate)| candidate.opposite(first) == Some(second))
        .map(|(id, _)| id)
        .collect();
    if ids.is_empty() {
        return Err(CliError::NoSuchEdge { edge: edge.clone() });
    }
    Ok(ids)
}

fn find_interface(graph: &Graph, interface: &InterfaceRef) -> Result<(EdgeId, Endpoint), CliError> {
    let node = resolve(graph, &interface.node)?;
    let incident = graph.incident_edges(node)?;
    incident
        .iter()
        .find_map(|&id| {
            let edge = graph.edge(id).ok()?;
            if edge.first() == node && edge.first_slot() == interface.slot {
                Some((id, Endpoint::First))
            } else if edge.second() == node && edge.second_slot() == interface.slot {
                Some((id, Endpoint::Second))
            } else {
                None
            }
        })
        .ok_or_else(|| CliError::NoSuchInterface {
            node: interface.node.clone(),
            slot: interface.slot,
        })
}

#[instrument(name = "cli.open_graph_file", err, skip_all, fields(path = %path.display()))]
pub(super) fn open_graph_file(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "graph".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Each edge line reads `ID<TAB>FIRST-SECOND<TAB>LENGTH`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::io::Cursor;
/// use spanforest_cli::cli::{Cli, Command, ExampleCommand, PassArgs, render_summary, run_cli};
///
/// let summary = run_cli(Cli {
///     command: Command::Example(ExampleCommand { pass: PassArgs::default() }),
/// })?;
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer.into_inner())?;
/// assert!(text.contains("total cost: 5\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let report = &summary.report;
    writeln!(writer, "source: {}", summary.source)?;
    writeln!(writer, "strategy: {}", report.strategy())?;
    writeln!(writer, "nodes: {}", summary.graph.node_count())?;
    writeln!(writer, "components: {}", report.component_count())?;
    writeln!(writer, "total cost: {}", report.total_cost())?;
    for (heading, edges) in [
        ("accepted", report.accepted()),
        ("rejected", report.rejected_active()),
        ("broken", report.broken()),
    ] {
        writeln!(writer, "{heading}: {}", edges.len())?;
        for &id in edges {
            let Ok(edge) = summary.graph.edge(id) else {
                continue;
            };
            let label = |node| {
                summary
                    .graph
                    .node(node)
                    .map_or("?", |node| node.label())
            };
            writeln!(
                writer,
                "{id}\t{}-{}\t{}",
                label(edge.first()),
                label(edge.second()),
                edge.length()
            )?;
        }
    }
    Ok(())
}
