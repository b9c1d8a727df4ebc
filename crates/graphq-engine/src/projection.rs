//! Turns a finished row set into the engine's passive JSON result records
//! (§4.3.9).

use crate::row::Row;
use graphq_ast::{CollectSpec, Projection, ProjectionKind, QueryAst};
use graphq_common::config::EngineConfig;
use graphq_common::error::{Error, Result};
use graphq_common::hash::FxHashMap;
use graphq_common::types::Value;
use graphq_core::{Edge, Node};
use serde_json::{Map, Value as Json};

/// Applies `ast`'s projection to `rows`, producing the finite result
/// sequence an [`crate::Engine`] returns (§4.3.9).
///
/// # Errors
/// Returns [`Error::AliasError`] if the projection or a `collect` entry
/// names an alias that was never registered, and
/// [`Error::Cardinality`] if a `single` projection produced zero or more
/// than one record.
pub(crate) fn apply_projection(rows: &[Row], ast: &QueryAst, config: &EngineConfig) -> Result<Vec<Json>> {
    let projection = ast.projection();
    match projection.kind.unwrap_or(ProjectionKind::Collection) {
        ProjectionKind::Count => Ok(vec![count_record(rows.len())]),
        ProjectionKind::Exists => Ok(vec![Json::Bool(!rows.is_empty())]),
        ProjectionKind::Aggregate => Ok(rows.iter().map(aggregate_record).collect()),
        ProjectionKind::Single => {
            let records = collection_records(rows, ast, projection, config)?;
            if records.len() == 1 {
                Ok(records)
            } else {
                Err(Error::Cardinality { found: records.len() })
            }
        }
        ProjectionKind::Collection => collection_records(rows, ast, projection, config),
        ProjectionKind::MultiNode => multi_node_records(rows, ast, projection, config),
    }
}

fn count_record(n: usize) -> Json {
    let mut map = Map::new();
    map.insert("count".to_string(), Json::from(n));
    Json::Object(map)
}

fn aggregate_record(row: &Row) -> Json {
    let mut map = Map::new();
    for (key, value) in row.computed_map() {
        map.insert(key.clone(), value_to_json(value));
    }
    Json::Object(map)
}

/// Builds `{ userAlias: nodeProjection }` per row for `single`/`collection`
/// (§4.3.9), using the first declared node alias, or the AST's current node
/// alias when none was declared.
fn collection_records(rows: &[Row], ast: &QueryAst, projection: &Projection, config: &EngineConfig) -> Result<Vec<Json>> {
    let (key, internal) = resolve_primary_node_alias(ast, projection)?;
    let fields = projection.field_selectors.get(&key).filter(|f| !f.is_empty());

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let mut map = Map::new();
        let value = row.node(&internal).map_or(Json::Null, |node| project_node(node, fields.map(Vec::as_slice)));
        map.insert(key.clone(), value);
        attach_depth(&mut map, row, projection, config);
        out.push(Json::Object(map));
    }
    Ok(out)
}

fn resolve_primary_node_alias(ast: &QueryAst, projection: &Projection) -> Result<(String, String)> {
    match projection.node_aliases.first() {
        Some(user_alias) => {
            let internal = ast
                .resolve_user_alias(user_alias)
                .ok_or_else(|| Error::AliasError { alias: user_alias.clone() })?
                .to_string();
            Ok((user_alias.clone(), internal))
        }
        None => {
            let internal = ast
                .current_node_alias()
                .ok_or_else(|| Error::AliasError { alias: "<projection node alias>".to_string() })?
                .to_string();
            Ok((internal.clone(), internal))
        }
    }
}

/// Builds one record per row keyed by every requested node/edge alias; when
/// the projection carries `collect` entries, rows are first grouped by the
/// primary node alias's id and each collect entry becomes a list gathered
/// across the group (§4.3.8, §4.3.9).
fn multi_node_records(rows: &[Row], ast: &QueryAst, projection: &Projection, config: &EngineConfig) -> Result<Vec<Json>> {
    if projection.collect.is_empty() {
        return rows.iter().map(|row| multi_node_record(row, ast, projection, config)).collect();
    }

    let (_, primary_internal) = resolve_primary_node_alias(ast, projection)?;

    let mut order: Vec<String> = Vec::new();
    let mut groups: FxHashMap<String, Vec<&Row>> = FxHashMap::default();
    for row in rows {
        let key = row.node(&primary_internal).map(|n| n.id.to_string()).unwrap_or_default();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(row);
    }

    let mut out = Vec::with_capacity(order.len());
    for key in order {
        let group_rows = &groups[&key];
        let record = multi_node_record(group_rows[0], ast, projection, config)?;
        let Json::Object(mut map) = record else { unreachable!("multi_node_record always returns an object") };
        for spec in &projection.collect {
            map.insert(spec.result_alias.clone(), collect_json(group_rows, ast, spec)?);
        }
        out.push(Json::Object(map));
    }
    Ok(out)
}

fn multi_node_record(row: &Row, ast: &QueryAst, projection: &Projection, config: &EngineConfig) -> Result<Json> {
    let mut map = Map::new();
    for user_alias in &projection.node_aliases {
        let internal = ast.resolve_user_alias(user_alias).ok_or_else(|| Error::AliasError { alias: user_alias.clone() })?;
        let fields = projection.field_selectors.get(user_alias).filter(|f| !f.is_empty());
        let value = row.node(internal).map_or(Json::Null, |node| project_node(node, fields.map(Vec::as_slice)));
        map.insert(user_alias.clone(), value);
    }
    for user_alias in &projection.edge_aliases {
        let internal = ast.resolve_edge_user_alias(user_alias).ok_or_else(|| Error::AliasError { alias: user_alias.clone() })?;
        let value = row.edge(internal).map_or(Json::Null, project_edge);
        map.insert(user_alias.clone(), value);
    }
    attach_depth(&mut map, row, projection, config);
    Ok(Json::Object(map))
}

/// Gathers `spec.source_alias`'s bound values across every row in a
/// collect-mode group into a list, deduplicating by id when requested
/// (§4.3.8 step 6, §4.3.9).
fn collect_json(group_rows: &[&Row], ast: &QueryAst, spec: &CollectSpec) -> Result<Json> {
    let mut seen: graphq_common::hash::FxHashSet<String> = graphq_common::hash::FxHashSet::default();
    let mut items = Vec::new();

    if let Some(internal) = ast.resolve_user_alias(&spec.source_alias) {
        for row in group_rows {
            if let Some(node) = row.node(internal) {
                if spec.distinct && !seen.insert(node.id.to_string()) {
                    continue;
                }
                items.push(project_node(node, None));
            }
        }
    } else if let Some(internal) = ast.resolve_edge_user_alias(&spec.source_alias) {
        for row in group_rows {
            if let Some(edge) = row.edge(internal) {
                if spec.distinct && !seen.insert(edge.id.to_string()) {
                    continue;
                }
                items.push(project_edge(edge));
            }
        }
    } else {
        return Err(Error::AliasError { alias: spec.source_alias.clone() });
    }
    Ok(Json::Array(items))
}

fn attach_depth(map: &mut Map<String, Json>, row: &Row, projection: &Projection, config: &EngineConfig) {
    if !projection.include_depth {
        return;
    }
    let key = projection.depth_key.clone().unwrap_or_else(|| config.default_depth_alias().to_string());
    if let Some(value) = row.computed(&key) {
        map.insert(key, value_to_json(value));
    }
}

/// `{id} ∪ properties`, or only the requested `fields` when given (§4.3.9).
fn project_node(node: &Node, fields: Option<&[String]>) -> Json {
    let mut map = Map::new();
    match fields {
        None => {
            map.insert("id".to_string(), Json::String(node.id.to_string()));
            for (key, value) in &node.properties {
                map.insert(key.as_str().to_string(), value_to_json(value));
            }
        }
        Some(requested) => {
            for field in requested {
                let value = if field == "id" { Some(Value::String(node.id.to_string())) } else { node.get(field).cloned() };
                if let Some(value) = value {
                    map.insert(field.clone(), value_to_json(&value));
                }
            }
        }
    }
    Json::Object(map)
}

/// `{id, type, fromId, toId} ∪ properties` (§4.3.9).
fn project_edge(edge: &Edge) -> Json {
    let mut map = Map::new();
    map.insert("id".to_string(), Json::String(edge.id.to_string()));
    map.insert("type".to_string(), Json::String(edge.edge_type.clone()));
    map.insert("fromId".to_string(), Json::String(edge.from_id.to_string()));
    map.insert("toId".to_string(), Json::String(edge.to_id.to_string()));
    for (key, value) in &edge.properties {
        map.insert(key.as_str().to_string(), value_to_json(value));
    }
    Json::Object(map)
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Int(i) => Json::from(*i),
        Value::Float(f) => Json::from(*f),
        Value::Bool(b) => Json::from(*b),
        Value::String(s) => Json::from(s.clone()),
        Value::Timestamp(t) => Json::from(t.as_millis()),
        Value::Null => Json::Null,
        Value::List(items) => Json::Array(items.iter().map(value_to_json).collect()),
    }
}
