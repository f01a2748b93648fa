//! Structural checks shared by the property runners.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    forest::ForestRun,
    graph::{EdgeId, Graph},
};

/// Path-halving find over a plain parent array.
fn find_root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}

/// Counts connected components of the subgraph formed by `edges`.
pub(super) fn component_count(graph: &Graph, edges: &[EdgeId]) -> usize {
    let mut parent: Vec<usize> = (0..graph.node_count()).collect();
    let mut components = graph.node_count();
    for &id in edges {
        let edge = graph.edge(id).expect("fixture edges exist");
        let left = find_root(&mut parent, edge.first().index());
        let right = find_root(&mut parent, edge.second().index());
        if left != right {
            parent[right] = left;
            components -= 1;
        }
    }
    components
}

/// Runs every structural check against `run`.
pub(super) fn check_forest(graph: &Graph, active: &[EdgeId], run: &ForestRun) -> TestCaseResult {
    check_only_active(active, run)?;
    check_acyclic(graph, run)?;
    check_spans_components(graph, active, run)?;
    check_cost(graph, run)
}

fn check_only_active(active: &[EdgeId], run: &ForestRun) -> TestCaseResult {
    for (position, id) in run.accepted().iter().enumerate() {
        if !active.contains(id) {
            return Err(TestCaseError::fail(format!("edge {id} accepted but not active")));
        }
        if run.accepted()[..position].contains(id) {
            return Err(TestCaseError::fail(format!("edge {id} accepted twice")));
        }
    }
    Ok(())
}

fn check_acyclic(graph: &Graph, run: &ForestRun) -> TestCaseResult {
    let mut parent: Vec<usize> = (0..graph.node_count()).collect();
    for &id in run.accepted() {
        let edge = graph.edge(id).expect("accepted edges exist");
        let left = find_root(&mut parent, edge.first().index());
        let right = find_root(&mut parent, edge.second().index());
        if left == right {
            return Err(TestCaseError::fail(format!("edge {id} closes a cycle")));
        }
        parent[right] = left;
    }
    Ok(())
}

fn check_spans_components(graph: &Graph, active: &[EdgeId], run: &ForestRun) -> TestCaseResult {
    let components = component_count(graph, active);
    let expected = graph.node_count() - components;
    if run.accepted().len() != expected {
        return Err(TestCaseError::fail(format!(
            "accepted {} edges, expected n - c = {expected}",
            run.accepted().len(),
        )));
    }
    if run.component_count() != components {
        return Err(TestCaseError::fail(format!(
            "reported {} components, expected {components}",
            run.component_count(),
        )));
    }
    Ok(())
}

fn check_cost(graph: &Graph, run: &ForestRun) -> TestCaseResult {
    let expected: f64 = run
        .accepted()
        .iter()
        .map(|&id| graph.edge(id).expect("accepted edges exist").length())
        .sum();
    if run.total_cost() != expected {
        return Err(TestCaseError::fail(format!(
            "total cost {} differs from accepted lengths {expected}",
            run.total_cost(),
        )));
    }
    Ok(())
}
