//! `Aggregate` — grouped or whole-set reduction (§4.3.7).

use crate::fields::node_field;
use crate::row::Row;
use graphq_ast::{AggregateFunction, AggregateSpec, GroupByField};
use graphq_common::hash::{FxHashMap, FxHashSet};
use graphq_common::types::Value;

pub(crate) fn apply_aggregate(rows: Vec<Row>, group_by: &[GroupByField], aggregations: &[AggregateSpec]) -> Vec<Row> {
    if group_by.is_empty() {
        let mut result = Row::new();
        for spec in aggregations {
            result.set_computed(spec.result_alias.clone(), compute_aggregate(&rows, spec));
        }
        return vec![result];
    }

    let mut order: Vec<Vec<String>> = Vec::new();
    let mut groups: FxHashMap<Vec<String>, Vec<Row>> = FxHashMap::default();
    let mut key_values: FxHashMap<Vec<String>, Vec<(String, Value)>> = FxHashMap::default();

    for row in rows {
        let pairs: Vec<(String, Value)> = group_by.iter().map(|g| group_key_and_value(&row, g)).collect();
        let key: Vec<String> = pairs.iter().map(|(_, v)| v.ordinal_string()).collect();
        if !groups.contains_key(&key) {
            order.push(key.clone());
            key_values.insert(key.clone(), pairs);
        }
        groups.entry(key).or_default().push(row);
    }

    let mut out = Vec::with_capacity(order.len());
    for key in order {
        let group_rows = &groups[&key];
        let mut result = group_rows[0].clone();
        for (field_name, value) in &key_values[&key] {
            result.set_computed(field_name.clone(), value.clone());
        }
        for spec in aggregations {
            result.set_computed(spec.result_alias.clone(), compute_aggregate(group_rows, spec));
        }
        out.push(result);
    }
    out
}

/// Resolves a group key's field name and value for one row, falling back
/// to the bound node's id when `field` is absent (§4.3.7).
fn group_key_and_value(row: &Row, group: &GroupByField) -> (String, Value) {
    let field = group.field.clone().unwrap_or_else(|| "id".to_string());
    let value = row.node(&group.alias).and_then(|n| node_field(n, &field)).unwrap_or(Value::Null);
    (field, value)
}

fn collect_values(rows: &[Row], source: Option<&str>, field: Option<&str>) -> Vec<Value> {
    let Some(source) = source else { return Vec::new() };
    rows.iter()
        .filter_map(|row| {
            let node = row.node(source)?;
            Some(match field {
                Some(f) => node_field(node, f).unwrap_or(Value::Null),
                None => Value::String(node.id.to_string()),
            })
        })
        .collect()
}

fn compute_aggregate(rows: &[Row], spec: &AggregateSpec) -> Value {
    match spec.function {
        AggregateFunction::Count => count(rows, spec),
        AggregateFunction::Sum => numeric_reduce(rows, spec, |numbers| Value::Float(numbers.iter().sum())),
        AggregateFunction::Avg => numeric_reduce(rows, spec, |numbers| {
            if numbers.is_empty() {
                Value::Null
            } else {
                #[allow(clippy::cast_precision_loss)]
                let avg = numbers.iter().sum::<f64>() / numbers.len() as f64;
                Value::Float(avg)
            }
        }),
        AggregateFunction::Min => {
            numeric_reduce(rows, spec, |numbers| numbers.iter().copied().reduce(f64::min).map_or(Value::Null, Value::Float))
        }
        AggregateFunction::Max => {
            numeric_reduce(rows, spec, |numbers| numbers.iter().copied().reduce(f64::max).map_or(Value::Null, Value::Float))
        }
        AggregateFunction::Collect => {
            let mut values = collect_values(rows, spec.source.as_deref(), spec.field.as_deref());
            if spec.distinct {
                let mut seen: FxHashSet<String> = FxHashSet::default();
                values.retain(|v| seen.insert(v.ordinal_string()));
            }
            Value::List(values)
        }
    }
}

fn count(rows: &[Row], spec: &AggregateSpec) -> Value {
    let Some(source) = spec.source.as_deref() else {
        if spec.distinct {
            // No source-alias given: "distinct counts ... unique first-alias
            // node ids" (§4.3.7) — fall back to the row's full bound-node-id
            // set, since a plain `count(distinct)` with no explicit alias
            // has no other notion of "the" alias to dedupe by.
            let mut seen: FxHashSet<String> = FxHashSet::default();
            return Value::Int(rows.iter().filter(|r| seen.insert(r.distinct_key())).count() as i64);
        }
        return Value::Int(rows.len() as i64);
    };
    let values = collect_values(rows, Some(source), spec.field.as_deref());
    if spec.distinct {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        Value::Int(values.iter().filter(|v| seen.insert(v.ordinal_string())).count() as i64)
    } else {
        Value::Int(values.len() as i64)
    }
}

fn numeric_reduce(rows: &[Row], spec: &AggregateSpec, reduce: impl Fn(&[f64]) -> Value) -> Value {
    let values = collect_values(rows, spec.source.as_deref(), spec.field.as_deref());
    let mut numbers: Vec<f64> = values.iter().filter_map(Value::as_numeric).collect();
    if spec.distinct {
        let mut seen: FxHashSet<u64> = FxHashSet::default();
        numbers.retain(|n| seen.insert(n.to_bits()));
    }
    reduce(&numbers)
}
