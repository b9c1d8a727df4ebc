//! Property-based tests (§9.1) checking invariants that should hold across
//! many graph shapes rather than one fixed scenario.

use graphq_ast::{EdgeDirection, ForkBranchBuilder, Projection, ProjectionKind, QueryAst, TraversalSpec};
use graphq_common::config::EngineConfig;
use graphq_common::types::{EdgeId, NodeId};
use graphq_core::GraphStore;
use graphq_engine::Engine;
use proptest::prelude::*;

fn traversal(from: &str, edge_type: &str) -> TraversalSpec {
    TraversalSpec {
        from: from.to_string(),
        to: String::new(),
        edge_alias: None,
        edge_types: vec![edge_type.to_string()],
        direction: EdgeDirection::Out,
        to_labels: vec![],
        optional: false,
        edge_conditions: vec![],
        variable_length: None,
    }
}

proptest! {
    /// `Limit(l)` after `Skip(s)` always yields exactly the `[s, s+l)` slice
    /// of the full, order-preserving match (§4.3.6).
    #[test]
    fn limit_and_skip_slice_the_full_match(count in 0usize..12, skip in 0u64..14, limit in 0u64..14) {
        let store = GraphStore::new();
        for i in 0..count {
            store.create_node(NodeId::new(format!("n{i}")), "item", []).unwrap();
        }
        let engine = Engine::new(EngineConfig::default());

        let full_ast = QueryAst::new().match_node("item").as_alias("i").unwrap();
        let full = engine.execute(&full_ast, &store).unwrap();

        let sliced_ast = QueryAst::new()
            .match_node("item")
            .as_alias("i")
            .unwrap()
            .skip(skip)
            .limit(limit);
        let sliced = engine.execute(&sliced_ast, &store).unwrap();

        let start = (skip as usize).min(full.len());
        let end = (start + limit as usize).min(full.len());
        prop_assert_eq!(&sliced, &full[start..end]);
    }

    /// A two-branch fork with no `collect` entries emits exactly the
    /// Cartesian product of the branches' own row counts per input row —
    /// a branch producing zero rows substitutes exactly one row (§4.3.8).
    #[test]
    fn fork_without_collect_is_the_cartesian_product(a_count in 0usize..5, b_count in 0usize..5) {
        let store = GraphStore::new();
        store.create_node(NodeId::new("c"), "center", []).unwrap();
        for i in 0..a_count {
            let id = format!("a{i}");
            store.create_node(NodeId::new(&id), "leaf", []).unwrap();
            store.create_edge(EdgeId::new(format!("ea{i}")), "a", NodeId::new("c"), NodeId::new(&id), []).unwrap();
        }
        for i in 0..b_count {
            let id = format!("b{i}");
            store.create_node(NodeId::new(&id), "leaf", []).unwrap();
            store.create_edge(EdgeId::new(format!("eb{i}")), "b", NodeId::new("c"), NodeId::new(&id), []).unwrap();
        }

        let ast = QueryAst::new()
            .match_by_id("c", "center")
            .as_alias("c")
            .unwrap()
            .fork(
                10,
                vec![
                    Box::new(|b: ForkBranchBuilder| b.traverse(traversal("n0", "a"), "leaf").as_alias("a").unwrap()),
                    Box::new(|b: ForkBranchBuilder| b.traverse(traversal("n0", "b"), "leaf").as_alias("b").unwrap()),
                ],
            )
            .unwrap()
            .with_projection(Projection {
                kind: Some(ProjectionKind::MultiNode),
                node_aliases: vec!["c".to_string(), "a".to_string(), "b".to_string()],
                ..Projection::default()
            });

        let engine = Engine::new(EngineConfig::default());
        let records = engine.execute(&ast, &store).unwrap();

        let expected = a_count.max(1) * b_count.max(1);
        prop_assert_eq!(records.len(), expected);
    }

    /// `Distinct` after a plain match never changes row count, since a
    /// single-label match never binds the same node twice (§4.3.6).
    #[test]
    fn distinct_is_a_no_op_after_a_plain_match(count in 0usize..10) {
        let store = GraphStore::new();
        for i in 0..count {
            store.create_node(NodeId::new(format!("n{i}")), "item", []).unwrap();
        }
        let engine = Engine::new(EngineConfig::default());

        let ast = QueryAst::new().match_node("item").as_alias("i").unwrap().distinct();
        let records = engine.execute(&ast, &store).unwrap();
        prop_assert_eq!(records.len(), count);
    }

    /// `Exists` agrees with whether a plain match produced any rows.
    #[test]
    fn exists_matches_collection_emptiness(count in 0usize..6) {
        let store = GraphStore::new();
        for i in 0..count {
            store.create_node(NodeId::new(format!("n{i}")), "item", []).unwrap();
        }
        let engine = Engine::new(EngineConfig::default());

        let exists_ast = QueryAst::new().match_node("item").with_projection(Projection {
            kind: Some(ProjectionKind::Exists),
            ..Projection::default()
        });
        let exists = engine.execute(&exists_ast, &store).unwrap();
        prop_assert_eq!(exists.len(), 1);
        prop_assert_eq!(exists[0].as_bool().unwrap(), count > 0);
    }
}
