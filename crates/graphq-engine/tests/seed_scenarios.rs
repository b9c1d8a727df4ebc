//! End-to-end seed scenarios (§9): each test exercises one scenario against
//! a real [`GraphStore`] and [`Engine`], asserting on the projected JSON
//! records the engine returns.

use graphq_ast::{
    AggregateFunction, AggregateSpec, CollectSpec, EdgeDirection, ForkBranchBuilder,
    GroupByField, HierarchyDirection, HierarchyOp, HierarchySpec, Projection, ProjectionKind,
    QueryAst, TraversalSpec, Uniqueness, VariableLength,
};
use graphq_common::config::EngineConfig;
use graphq_common::types::{EdgeId, NodeId, PropertyKey, Value};
use graphq_core::GraphStore;
use graphq_engine::Engine;

fn engine() -> Engine {
    Engine::new(EngineConfig::default())
}

fn traversal(from: &str, edge_types: Vec<String>, direction: EdgeDirection, to_labels: Vec<String>) -> TraversalSpec {
    TraversalSpec {
        from: from.to_string(),
        to: String::new(),
        edge_alias: None,
        edge_types,
        direction,
        to_labels,
        optional: false,
        edge_conditions: vec![],
        variable_length: None,
    }
}

/// S1 — basic match: two users, plain collection projection.
#[test]
fn s1_basic_match() {
    let store = GraphStore::new();
    store.create_node(NodeId::new("u1"), "user", [(PropertyKey::new("name"), Value::from("A"))]).unwrap();
    store.create_node(NodeId::new("u2"), "user", [(PropertyKey::new("name"), Value::from("B"))]).unwrap();

    let ast = QueryAst::new().match_node("user").as_alias("u").unwrap();
    let records = engine().execute(&ast, &store).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["u"]["name"], "A");
    assert_eq!(records[1]["u"]["name"], "B");
}

/// S2 — one-hop traversal: u1 authored p1.
#[test]
fn s2_one_hop_traversal() {
    let store = GraphStore::new();
    store.create_node(NodeId::new("u1"), "user", []).unwrap();
    store.create_node(NodeId::new("p1"), "post", []).unwrap();
    store.create_edge(EdgeId::new("e1"), "authored", NodeId::new("u1"), NodeId::new("p1"), []).unwrap();

    let ast = QueryAst::new()
        .match_by_id("u1", "user")
        .traverse(traversal("n0", vec!["authored".to_string()], EdgeDirection::Out, vec!["post".to_string()]), "post")
        .as_alias("p")
        .unwrap();
    let records = engine().execute(&ast, &store).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["p"]["id"], "p1");
}

/// S3 — variable-length ancestors over a `hasParent` tree (direction `up`).
#[test]
fn s3_variable_length_ancestors() {
    let store = GraphStore::new();
    for id in ["a", "b", "c"] {
        store.create_node(NodeId::new(id), "person", []).unwrap();
    }
    store.create_edge(EdgeId::new("e1"), "hasParent", NodeId::new("c"), NodeId::new("b"), []).unwrap();
    store.create_edge(EdgeId::new("e2"), "hasParent", NodeId::new("b"), NodeId::new("a"), []).unwrap();

    let ast = QueryAst::new().match_by_id("c", "person").hierarchy(
        HierarchySpec {
            operation: HierarchyOp::Ancestors,
            edge_type: "hasParent".to_string(),
            direction: HierarchyDirection::Up,
            from: "n0".to_string(),
            to: String::new(),
            min_depth: None,
            max_depth: None,
            include_self: false,
            include_depth: true,
            depth_alias: None,
            until_kind: None,
        },
        "person",
    ).as_alias("ancestor").unwrap().with_projection(Projection {
        kind: Some(ProjectionKind::MultiNode),
        node_aliases: vec!["ancestor".to_string()],
        include_depth: true,
        ..Projection::default()
    });

    let records = engine().execute(&ast, &store).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["ancestor"]["id"], "b");
    assert_eq!(records[0]["_depth"], 1);
    assert_eq!(records[1]["ancestor"]["id"], "a");
    assert_eq!(records[1]["_depth"], 2);
}

/// S4 — OPTIONAL traversal: `m4` has no outgoing `replyTo` edge.
#[test]
fn s4_optional_traversal_yields_null() {
    let store = GraphStore::new();
    store.create_node(NodeId::new("m4"), "message", []).unwrap();

    let mut spec = traversal("n0", vec!["replyTo".to_string()], EdgeDirection::Out, vec![]);
    spec.optional = true;
    let ast = QueryAst::new()
        .match_by_id("m4", "message")
        .traverse(spec, "message")
        .as_alias("replyTo")
        .unwrap()
        .with_projection(Projection {
            kind: Some(ProjectionKind::MultiNode),
            node_aliases: vec!["replyTo".to_string()],
            ..Projection::default()
        });

    let records = engine().execute(&ast, &store).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0]["replyTo"].is_null());
}

/// S5 — fork + collect: `m1` has one incoming reply and two reactions.
#[test]
fn s5_fork_and_collect() {
    let store = GraphStore::new();
    store.create_node(NodeId::new("m1"), "message", []).unwrap();
    store.create_node(NodeId::new("m2"), "message", []).unwrap();
    store.create_node(NodeId::new("r1"), "reaction", []).unwrap();
    store.create_node(NodeId::new("r2"), "reaction", []).unwrap();
    store.create_edge(EdgeId::new("e1"), "replyTo", NodeId::new("m2"), NodeId::new("m1"), []).unwrap();
    store.create_edge(EdgeId::new("e2"), "hasReaction", NodeId::new("m1"), NodeId::new("r1"), []).unwrap();
    store.create_edge(EdgeId::new("e3"), "hasReaction", NodeId::new("m1"), NodeId::new("r2"), []).unwrap();

    let ast = QueryAst::new()
        .match_by_id("m1", "message")
        .as_alias("m")
        .unwrap()
        .fork(
            10,
            vec![
                Box::new(|b: ForkBranchBuilder| {
                    b.traverse(traversal("n0", vec!["replyTo".to_string()], EdgeDirection::In, vec![]), "message")
                        .as_alias("reply")
                        .unwrap()
                }),
                Box::new(|b: ForkBranchBuilder| {
                    b.traverse(traversal("n0", vec!["hasReaction".to_string()], EdgeDirection::Out, vec![]), "reaction")
                        .as_alias("reaction")
                        .unwrap()
                }),
            ],
        )
        .unwrap()
        .with_projection(Projection {
            kind: Some(ProjectionKind::MultiNode),
            node_aliases: vec!["m".to_string()],
            collect: vec![
                CollectSpec { result_alias: "replies".to_string(), source_alias: "reply".to_string(), distinct: true },
                CollectSpec { result_alias: "reactions".to_string(), source_alias: "reaction".to_string(), distinct: true },
            ],
            ..Projection::default()
        });

    let records = engine().execute(&ast, &store).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["m"]["id"], "m1");
    assert_eq!(records[0]["replies"].as_array().unwrap().len(), 1);
    assert_eq!(records[0]["replies"][0]["id"], "m2");
    let reactions: Vec<&str> = records[0]["reactions"].as_array().unwrap().iter().map(|v| v["id"].as_str().unwrap()).collect();
    assert_eq!(reactions.len(), 2);
    assert!(reactions.contains(&"r1"));
    assert!(reactions.contains(&"r2"));
}

/// S6 — grouped aggregation: 3 posts, `status` in {draft, published, published}.
#[test]
fn s6_grouped_aggregation() {
    let store = GraphStore::new();
    store.create_node(NodeId::new("p1"), "post", [(PropertyKey::new("status"), Value::from("draft"))]).unwrap();
    store.create_node(NodeId::new("p2"), "post", [(PropertyKey::new("status"), Value::from("published"))]).unwrap();
    store.create_node(NodeId::new("p3"), "post", [(PropertyKey::new("status"), Value::from("published"))]).unwrap();

    let ast = QueryAst::new().match_node("post").aggregate(
        vec![GroupByField { alias: "n0".to_string(), field: Some("status".to_string()) }],
        vec![AggregateSpec { function: AggregateFunction::Count, distinct: false, source: None, field: None, result_alias: "c".to_string() }],
    ).with_projection(Projection { kind: Some(ProjectionKind::Aggregate), ..Projection::default() });

    let records = engine().execute(&ast, &store).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["status"], "draft");
    assert_eq!(records[0]["c"], 1);
    assert_eq!(records[1]["status"], "published");
    assert_eq!(records[1]["c"], 2);
}

/// S7 — transaction rollback restores pre-transaction state.
#[test]
fn s7_transaction_rollback() {
    let store = GraphStore::new();
    store.create_node(NodeId::new("a"), "person", []).unwrap();

    store.begin().unwrap();
    store.create_node(NodeId::new("b"), "person", []).unwrap();
    store.create_node(NodeId::new("c"), "person", []).unwrap();
    store.rollback().unwrap();

    let stats = store.stats();
    assert_eq!(stats.node_count, 1);
    assert_eq!(stats.edge_count, 0);
    assert_eq!(store.nodes_by_label("person").len(), 1);
}

/// A second variable-length-traversal exercise alongside S3, covering the
/// `Traversal` step's own `variableLength` field rather than `Hierarchy`'s.
#[test]
fn variable_length_traversal_respects_uniqueness() {
    let store = GraphStore::new();
    for id in ["a", "b", "c"] {
        store.create_node(NodeId::new(id), "node", []).unwrap();
    }
    store.create_edge(EdgeId::new("e1"), "link", NodeId::new("a"), NodeId::new("b"), []).unwrap();
    store.create_edge(EdgeId::new("e2"), "link", NodeId::new("b"), NodeId::new("c"), []).unwrap();

    let mut spec = traversal("n0", vec!["link".to_string()], EdgeDirection::Out, vec![]);
    spec.variable_length = Some(VariableLength { min: 1, max: None, uniqueness: Uniqueness::Nodes });
    let ast = QueryAst::new().match_by_id("a", "node").traverse(spec, "node").as_alias("reached").unwrap().with_projection(Projection {
        kind: Some(ProjectionKind::MultiNode),
        node_aliases: vec!["reached".to_string()],
        ..Projection::default()
    });

    let records = engine().execute(&ast, &store).unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r["reached"]["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["b", "c"]);
}
