use std::collections::{BTreeSet, HashMap};

use crate::context::Conv;
use crate::error::{Error, Result};

/// Validate internal consistency of a conversion snapshot.
///
/// This checks:
/// - table and column map keys match the ids they hold
/// - declared column ids are unique and defined
/// - primary key and index columns exist
pub fn validate_conv(conv: &Conv) -> Result<()> {
    for (table_id, table) in &conv.src_schema {
        check_ids("source", table_id, &table.id, &table.col_ids, &table.col_defs, |col| {
            col.id.as_str()
        })?;

        for key in &table.primary_keys {
            if !table.col_defs.contains_key(&key.col_id) {
                return Err(Error::InvalidSchema(format!(
                    "primary key column not found: {}.{}",
                    table.name, key.col_id
                )));
            }
        }

        for index in &table.indexes {
            for key in &index.keys {
                if !table.col_defs.contains_key(&key.col_id) {
                    return Err(Error::InvalidSchema(format!(
                        "index column not found: {}.{}.{}",
                        table.name, index.name, key.col_id
                    )));
                }
            }
        }
    }

    for (table_id, table) in &conv.target_schema {
        check_ids("target", table_id, &table.id, &table.col_ids, &table.col_defs, |col| {
            col.id.as_str()
        })?;

        for key in &table.primary_keys {
            if !table.col_defs.contains_key(&key.col_id) {
                return Err(Error::InvalidSchema(format!(
                    "target primary key column not found: {}.{}",
                    table.name, key.col_id
                )));
            }
        }
    }

    Ok(())
}

fn check_ids<C>(
    side: &str,
    table_key: &str,
    table_id: &str,
    col_ids: &[String],
    col_defs: &HashMap<String, C>,
    col_id_of: impl Fn(&C) -> &str,
) -> Result<()> {
    if table_key != table_id {
        return Err(Error::InvalidSchema(format!(
            "{side} table keyed as {table_key} but has id {table_id}"
        )));
    }

    for (key, col) in col_defs {
        if key != col_id_of(col) {
            return Err(Error::InvalidSchema(format!(
                "{side} column keyed as {table_id}.{key} but has id {}",
                col_id_of(col)
            )));
        }
    }

    let mut seen = BTreeSet::new();
    for col_id in col_ids {
        if !seen.insert(col_id.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate {side} column id: {table_id}.{col_id}"
            )));
        }
        if !col_defs.contains_key(col_id) {
            return Err(Error::InvalidSchema(format!(
                "{side} column id has no definition: {table_id}.{col_id}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::constraints::Key;
    use crate::schema::{SourceColumn, SourceSchema, SourceTable};

    fn conv_with_table(table: SourceTable) -> Conv {
        let mut src_schema = SourceSchema::new();
        src_schema.insert(table.id.clone(), table);
        Conv::new(src_schema)
    }

    fn users() -> SourceTable {
        SourceTable {
            id: "t1".to_string(),
            name: "users".to_string(),
            col_ids: vec!["c1".to_string()],
            col_defs: HashMap::from([(
                "c1".to_string(),
                SourceColumn {
                    id: "c1".to_string(),
                    name: "id".to_string(),
                    data_type: "bigint".to_string(),
                    is_array: false,
                    size: 0,
                    is_nullable: false,
                },
            )]),
            primary_keys: vec![Key::new("c1")],
            indexes: Vec::new(),
        }
    }

    #[test]
    fn consistent_snapshot_passes() {
        assert!(validate_conv(&conv_with_table(users())).is_ok());
    }

    #[test]
    fn rejects_primary_key_on_unknown_column() {
        let mut table = users();
        table.primary_keys.push(Key::new("c9"));
        let err = validate_conv(&conv_with_table(table)).unwrap_err();
        assert!(err.to_string().contains("primary key column not found: users.c9"));
    }

    #[test]
    fn rejects_duplicate_column_ids() {
        let mut table = users();
        table.col_ids.push("c1".to_string());
        let err = validate_conv(&conv_with_table(table)).unwrap_err();
        assert!(err.to_string().contains("duplicate source column id"));
    }
}
