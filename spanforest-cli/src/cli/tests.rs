//! Unit tests for the CLI commands and graph-file loading.

use super::commands::{derive_source_name, example_command, run_command};
use super::{
    Cli, CliError, Command, EdgeRef, ExampleCommand, GraphFileError, InterfaceRef, PassArgs,
    RunCommand, StrategyArg, render_summary, run_cli,
};

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use rstest::{fixture, rstest};
use spanforest_core::{EdgeId, EngineError, EngineErrorCode, Strategy};
use spanforest_test_support::tracing::record;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[fixture]
fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn write_graph(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

fn example(pass: PassArgs) -> Result<super::ExecutionSummary, CliError> {
    example_command(ExampleCommand { pass })
}

fn ids(raw: &[usize]) -> Vec<EdgeId> {
    raw.iter().copied().map(EdgeId::new).collect()
}

#[rstest]
fn example_defaults_to_union_find() -> TestResult {
    let summary = example(PassArgs::default())?;
    assert_eq!(summary.source, "example");
    assert_eq!(summary.report.strategy(), Strategy::UnionFind);
    assert_eq!(summary.report.accepted(), ids(&[0, 1, 2, 3, 4]).as_slice());
    assert_eq!(summary.report.rejected_active(), ids(&[5, 6, 7, 8, 9]).as_slice());
    assert_eq!(summary.report.total_cost(), 5.0);
    Ok(())
}

#[rstest]
fn example_with_root_distance_hangs_nodes_off_a() -> TestResult {
    let cli = Cli::try_parse_from(["spanforest", "example", "--strategy", "root-distance"])?;
    let summary = run_cli(cli)?;
    assert_eq!(summary.report.strategy(), Strategy::RootDistance);
    assert_eq!(summary.report.accepted(), ids(&[8, 3, 4, 1, 0]).as_slice());
    assert_eq!(summary.report.total_cost(), 5.0);
    Ok(())
}

#[rstest]
#[case::broken_pair(&["--broken", "A-B"])]
#[case::reversed_pair(&["--broken", "B-A"])]
#[case::interface_on_b(&["--down", "B:1"])]
#[case::interface_on_a(&["--down", "A:1"])]
fn breaking_a_b_reroutes_through_a_f(#[case] flags: &[&str]) -> TestResult {
    let args = ["spanforest", "example"].iter().chain(flags);
    let summary = run_cli(Cli::try_parse_from(args)?)?;
    assert_eq!(summary.report.accepted(), ids(&[1, 2, 3, 4, 8]).as_slice());
    assert_eq!(summary.report.broken(), ids(&[0]).as_slice());
    assert_eq!(summary.report.total_cost(), 5.0);
    Ok(())
}

#[rstest]
#[case::unknown_label(&["--broken", "A-Z"])]
#[case::unknown_interface_node(&["--down", "Q:1"])]
fn unknown_labels_are_reported(#[case] flags: &[&str]) -> TestResult {
    let args = ["spanforest", "example"].iter().chain(flags);
    let err = run_cli(Cli::try_parse_from(args)?).expect_err("label does not exist");
    assert!(matches!(err, CliError::UnknownLabel { .. }));
    Ok(())
}

#[rstest]
fn pairs_without_an_edge_are_reported() {
    let pass = PassArgs {
        broken: vec!["A-C".parse().expect("valid pair")],
        ..PassArgs::default()
    };
    let err = example(pass).expect_err("A and C share no edge");
    assert!(matches!(err, CliError::NoSuchEdge { ref edge } if edge.to_string() == "A-C"));
}

#[rstest]
fn unused_slots_are_reported() {
    let pass = PassArgs {
        down: vec!["A:9".parse().expect("valid interface")],
        ..PassArgs::default()
    };
    let err = example(pass).expect_err("A only has two interfaces");
    assert!(matches!(
        err,
        CliError::NoSuchInterface { ref node, slot: 9 } if node == "A"
    ));
}

#[rstest]
fn run_loads_an_edge_list(temp_dir: TempDir) -> TestResult {
    let path = write_graph(
        &temp_dir,
        "square.txt",
        "# triangle plus a loner\nA B\nB C\nA C  # closes the cycle\n\nD\n",
    )?;
    let summary = run_command(RunCommand {
        path,
        pass: PassArgs::default(),
    })?;
    assert_eq!(summary.source, "square");
    assert_eq!(summary.graph.node_count(), 4);
    assert_eq!(summary.report.accepted(), ids(&[0, 1]).as_slice());
    assert_eq!(summary.report.rejected_active(), ids(&[2]).as_slice());
    assert_eq!(summary.report.component_count(), 2);
    Ok(())
}

#[rstest]
fn run_reports_missing_files(temp_dir: TempDir) {
    let path = temp_dir.path().join("absent.txt");
    let err = run_command(RunCommand {
        path: path.clone(),
        pass: PassArgs::default(),
    })
    .expect_err("file does not exist");
    match err {
        CliError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
#[case::too_many_fields("A B 1 extra\n", 1)]
#[case::bad_length("A B\nB C two\n", 2)]
#[case::self_loop("A B\n\nC C\n", 3)]
#[case::negative_length("A B -1\n", 1)]
fn run_reports_the_offending_line(
    temp_dir: TempDir,
    #[case] contents: &str,
    #[case] expected_line: usize,
) -> TestResult {
    let path = write_graph(&temp_dir, "bad.txt", contents)?;
    let err = run_command(RunCommand {
        path,
        pass: PassArgs::default(),
    })
    .expect_err("graph file is invalid");
    let source = match err {
        CliError::GraphFile { source, .. } => source,
        other => panic!("unexpected error: {other:?}"),
    };
    let line = match source {
        GraphFileError::Malformed { line, fields } => {
            assert_eq!(fields, 4);
            line
        }
        GraphFileError::InvalidNumber { line, ref raw, .. } => {
            assert_eq!(raw, "two");
            line
        }
        GraphFileError::Engine {
            line,
            source: EngineError::InvalidEdge { .. } | EngineError::InvalidLength { .. },
        } => line,
        other => panic!("unexpected graph file error: {other:?}"),
    };
    assert_eq!(line, expected_line);
    Ok(())
}

#[rstest]
#[case::engine_rejection("A B\nC C\n", Some("ENGINE_INVALID_EDGE"))]
#[case::parse_failure("A B x\n", None)]
fn graph_file_failures_expose_engine_codes(
    temp_dir: TempDir,
    #[case] contents: &str,
    #[case] expected: Option<&str>,
) -> TestResult {
    let path = write_graph(&temp_dir, "codes.txt", contents)?;
    let err = run_command(RunCommand {
        path,
        pass: PassArgs::default(),
    })
    .expect_err("graph file is invalid");
    assert_eq!(err.engine_code().map(EngineErrorCode::as_str), expected);
    Ok(())
}

#[rstest]
fn engine_rejections_expose_their_code() {
    let err = CliError::from(EngineError::UnknownEdge {
        edge: EdgeId::new(7),
    });
    assert_eq!(
        err.engine_code().map(EngineErrorCode::as_str),
        Some("ENGINE_UNKNOWN_EDGE")
    );
    let err = CliError::UnknownLabel {
        label: "Q".to_owned(),
    };
    assert_eq!(err.engine_code(), None);
}

#[rstest]
fn render_summary_lists_every_partition(temp_dir: TempDir) -> TestResult {
    let path = write_graph(&temp_dir, "tri.txt", "A B\nB C 2\nA C\n")?;
    let cli = Cli::try_parse_from([OsStr::new("spanforest"), OsStr::new("run"), path.as_os_str()])?;
    let summary = run_cli(cli)?;
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let expected = "source: tri\n\
                    strategy: union-find\n\
                    nodes: 3\n\
                    components: 1\n\
                    total cost: 3\n\
                    accepted: 2\n\
                    0\tA-B\t1\n\
                    1\tB-C\t2\n\
                    rejected: 1\n\
                    2\tA-C\t1\n\
                    broken: 0\n";
    assert_eq!(String::from_utf8(buffer)?, expected);
    Ok(())
}

#[rstest]
#[case("A-B", "A", "B")]
#[case("node1-node2", "node1", "node2")]
fn edge_refs_parse(#[case] raw: &str, #[case] first: &str, #[case] second: &str) {
    let edge: EdgeRef = raw.parse().expect("valid pair");
    assert_eq!(edge.first, first);
    assert_eq!(edge.second, second);
}

#[rstest]
#[case("AB")]
#[case("-B")]
#[case("A-")]
fn malformed_edge_refs_are_rejected(#[case] raw: &str) {
    assert!(raw.parse::<EdgeRef>().is_err());
}

#[rstest]
#[case("B:2", "B", 2)]
#[case("a:b:3", "a:b", 3)]
fn interface_refs_parse(#[case] raw: &str, #[case] node: &str, #[case] slot: u32) {
    let interface: InterfaceRef = raw.parse().expect("valid interface");
    assert_eq!(interface.node, node);
    assert_eq!(interface.slot, slot);
}

#[rstest]
#[case("B")]
#[case(":2")]
#[case("B:x")]
#[case("B:-1")]
fn malformed_interface_refs_are_rejected(#[case] raw: &str) {
    assert!(raw.parse::<InterfaceRef>().is_err());
}

#[rstest]
fn strategy_flag_rejects_unknown_names() {
    let result = Cli::try_parse_from(["spanforest", "example", "--strategy", "kruskal"]);
    assert!(result.is_err());
}

#[rstest]
fn strategy_flag_maps_onto_engine_strategies() -> TestResult {
    let cli = Cli::try_parse_from(["spanforest", "example", "--strategy", "union-find"])?;
    let Command::Example(ExampleCommand { pass }) = cli.command else {
        panic!("expected the example command");
    };
    assert_eq!(pass.strategy, StrategyArg::UnionFind);
    assert_eq!(Strategy::from(StrategyArg::RootDistance), Strategy::RootDistance);
    Ok(())
}

#[rstest]
#[case::with_extension("/tmp/graph.txt", "graph")]
#[case::without_extension("/tmp/graph", "graph")]
#[case::missing_stem("", "graph")]
#[case::custom_name("/tmp/office.edges", "office")]
fn derive_source_name_uses_the_file_stem(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(derive_source_name(Path::new(raw)), expected);
}

#[rstest]
fn run_cli_records_the_command_span() -> TestResult {
    let cli = Cli::try_parse_from(["spanforest", "example"])?;
    let (summary, layer) = record(|| run_cli(cli));
    summary?;

    let span = layer.span_named("cli.run").expect("cli.run span recorded");
    assert_eq!(span.field("command"), Some("example"));
    let execute = layer.span_named("cli.execute").expect("cli.execute span recorded");
    assert_eq!(execute.field("strategy"), Some("union-find"));
    assert!(layer.span_named("engine.compute_forest").is_some());
    assert_eq!(layer.events_with_message("command completed").len(), 1);
    Ok(())
}
