//! Proptest runners for the forest strategies.

use proptest::prelude::*;
use spanforest_test_support::proptest_profile::CaseProfile;

use crate::forest::Strategy as ForestStrategy;

use super::invariants::check_forest;
use super::strategies::{graph_fixture, uniform_graph_fixture};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: CaseProfile::load(256).cases(),
        ..ProptestConfig::default()
    }
}

fn either_strategy() -> impl Strategy<Value = ForestStrategy> {
    prop_oneof![
        Just(ForestStrategy::UnionFind),
        Just(ForestStrategy::RootDistance),
    ]
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn forests_satisfy_structural_invariants(
        fixture in graph_fixture(),
        strategy in either_strategy(),
    ) {
        let run = strategy.build(&fixture.graph, &fixture.active);
        check_forest(&fixture.graph, &fixture.active, &run)?;
    }

    #[test]
    fn passes_are_deterministic(
        fixture in graph_fixture(),
        strategy in either_strategy(),
    ) {
        let first = strategy.build(&fixture.graph, &fixture.active);
        let second = strategy.build(&fixture.graph, &fixture.active);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn strategies_agree_on_size_and_uniform_cost(fixture in uniform_graph_fixture()) {
        let union_find = ForestStrategy::UnionFind.build(&fixture.graph, &fixture.active);
        let root_distance = ForestStrategy::RootDistance.build(&fixture.graph, &fixture.active);
        prop_assert_eq!(union_find.accepted().len(), root_distance.accepted().len());
        prop_assert_eq!(union_find.total_cost(), root_distance.total_cost());
    }

    #[test]
    fn root_distance_roots_each_component_at_its_smallest_label(fixture in graph_fixture()) {
        let run = ForestStrategy::RootDistance.build(&fixture.graph, &fixture.active);
        for (id, node) in fixture.graph.nodes() {
            let state = &run.node_states()[id.index()];
            let root = fixture.graph.node(state.root()).expect("roots are graph nodes");
            prop_assert!(root.label() <= node.label());
            let root_state = &run.node_states()[state.root().index()];
            prop_assert_eq!(root_state.root(), state.root());
            prop_assert_eq!(root_state.distance(), 0);
        }
    }

    #[test]
    fn breaking_an_edge_never_raises_uniform_cost(
        fixture in uniform_graph_fixture(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!fixture.active.is_empty());
        let before = ForestStrategy::UnionFind.build(&fixture.graph, &fixture.active);
        let mut remaining = fixture.active.clone();
        remaining.remove(pick.index(remaining.len()));
        let after = ForestStrategy::UnionFind.build(&fixture.graph, &remaining);
        prop_assert!(after.total_cost() <= before.total_cost());
    }
}
