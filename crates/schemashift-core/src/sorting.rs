use std::collections::HashMap;

use crate::schema::{SourceSchema, SourceTable, TargetSchema, TargetTable};

/// A table with a display name.
pub trait NamedTable {
    fn name(&self) -> &str;
}

impl NamedTable for SourceTable {
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedTable for TargetTable {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Table ids ordered by byte-wise table name, then by id for equal names.
pub fn sorted_table_ids_by_name<T: NamedTable>(tables: &HashMap<String, T>) -> Vec<String> {
    let mut entries: Vec<(&str, &str)> = tables
        .iter()
        .map(|(id, table)| (table.name(), id.as_str()))
        .collect();
    entries.sort_unstable();
    entries.into_iter().map(|(_, id)| id.to_string()).collect()
}

pub fn sorted_table_ids_by_src_name(src_schema: &SourceSchema) -> Vec<String> {
    sorted_table_ids_by_name(src_schema)
}

pub fn sorted_table_ids_by_target_name(target_schema: &TargetSchema) -> Vec<String> {
    sorted_table_ids_by_name(target_schema)
}
