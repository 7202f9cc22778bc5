//! Column correspondence between the source and target schema of a table.

use std::collections::{HashMap, HashSet};

use crate::context::Conv;
use crate::error::{Error, Result};

/// Elements of `a` that also appear in `b`, in `a` order, without duplicates.
pub fn intersect<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<String> {
    let members: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    let mut seen = HashSet::new();
    a.iter()
        .map(AsRef::as_ref)
        .filter(|item| members.contains(item) && seen.insert(*item))
        .map(str::to_string)
        .collect()
}

/// Keep the requested column ids that exist in the source table, in input order.
pub fn common_column_ids(conv: &Conv, table_id: &str, col_ids: &[String]) -> Vec<String> {
    let Some(table) = conv.src_schema.get(table_id) else {
        return Vec::new();
    };
    col_ids
        .iter()
        .filter(|col_id| table.col_defs.contains_key(col_id.as_str()))
        .cloned()
        .collect()
}

/// Resolve source column names to ids and intersect them with the target
/// table's columns. The result follows source column order.
pub fn prepare_columns(conv: &Conv, table_id: &str, src_cols: &[String]) -> Result<Vec<String>> {
    let source = conv.source_table(table_id)?;
    let target = conv.target_table(table_id)?;

    let src_col_ids = src_cols
        .iter()
        .map(|name| {
            source
                .col_id_by_name(name)
                .map(str::to_string)
                .ok_or_else(|| Error::UnknownColumn {
                    table_id: table_id.to_string(),
                    column: name.clone(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let common = intersect(&src_col_ids, &target.col_ids);
    if common.is_empty() {
        return Err(Error::NoCommonColumns {
            table_id: table_id.to_string(),
        });
    }
    Ok(common)
}

/// Reorder a row's values to follow `common_col_ids`, dropping values for
/// columns outside the common set.
///
/// `col_name_to_id` maps each source column name to its id; names without an
/// entry cannot belong to the common set and are skipped.
pub fn prepare_values<T>(
    _conv: &Conv,
    _table_id: &str,
    col_name_to_id: &HashMap<String, String>,
    common_col_ids: &[String],
    src_cols: &[String],
    values: Vec<T>,
) -> Result<Vec<T>> {
    if src_cols.len() != values.len() {
        return Err(Error::LengthMismatch {
            columns: src_cols.len(),
            values: values.len(),
        });
    }

    let mut by_id: HashMap<&str, T> = HashMap::with_capacity(values.len());
    for (name, value) in src_cols.iter().zip(values) {
        if let Some(col_id) = col_name_to_id.get(name) {
            by_id.insert(col_id.as_str(), value);
        }
    }

    common_col_ids
        .iter()
        .map(|col_id| {
            by_id
                .remove(col_id.as_str())
                .ok_or_else(|| Error::MissingValue {
                    column_id: col_id.clone(),
                })
        })
        .collect()
}
