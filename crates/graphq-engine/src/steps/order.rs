//! `OrderBy`, `Limit`, `Skip`, `Distinct` (§4.3.6).

use crate::fields::{edge_field, node_field};
use crate::row::Row;
use graphq_ast::{OrderField, SortDirection};
use graphq_common::hash::FxHashSet;
use graphq_common::types::Value;
use std::cmp::Ordering;

/// Stable multi-key sort. Null/absent values sort before non-null; numbers
/// compare by value; strings compare byte-wise; mixed types fall back to
/// ordinal string comparison (§4.3.6).
pub(crate) fn apply_order_by(mut rows: Vec<Row>, fields: &[OrderField]) -> Vec<Row> {
    rows.sort_by(|a, b| {
        for field in fields {
            let ordering = compare_rows(a, b, field);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    rows
}

fn compare_rows(a: &Row, b: &Row, field: &OrderField) -> Ordering {
    let av = resolve(a, field);
    let bv = resolve(b, field);
    let ordering = compare_values(av.as_ref(), bv.as_ref());
    match field.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn resolve(row: &Row, field: &OrderField) -> Option<Value> {
    if let Some(node) = row.node(&field.target) {
        return node_field(node, &field.field);
    }
    if let Some(edge) = row.edge(&field.target) {
        return edge_field(edge, &field.field);
    }
    row.computed(&field.target).cloned()
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a_null = a.is_none_or(Value::is_null);
    let b_null = b.is_none_or(Value::is_null);
    match (a_null, b_null) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }
    let (a, b) = (a.unwrap(), b.unwrap());
    if let (Some(x), Some(y)) = (a.as_numeric(), b.as_numeric()) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    if let (Value::String(x), Value::String(y)) = (a, b) {
        return x.as_bytes().cmp(y.as_bytes());
    }
    a.ordinal_string().cmp(&b.ordinal_string())
}

/// Keeps only the first `n` rows.
pub(crate) fn apply_limit(rows: Vec<Row>, n: u64) -> Vec<Row> {
    rows.into_iter().take(usize::try_from(n).unwrap_or(usize::MAX)).collect()
}

/// Drops the first `n` rows.
pub(crate) fn apply_skip(rows: Vec<Row>, n: u64) -> Vec<Row> {
    rows.into_iter().skip(usize::try_from(n).unwrap_or(usize::MAX)).collect()
}

/// Deduplicates by the sorted concatenation of bound node ids (§4.3.6).
pub(crate) fn apply_distinct(rows: Vec<Row>) -> Vec<Row> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    rows.into_iter().filter(|row| seen.insert(row.distinct_key())).collect()
}
