//! Target-dialect type restrictions.

use crate::context::Conv;
use crate::issues::SchemaIssue;
use crate::schema::SourceTable;
use crate::types::{TargetType, TypeCode};

/// Restrict a target type to what the PostgreSQL-compatible dialect accepts.
///
/// Arrays become `STRING(MAX)`; so do NUMERIC primary-key columns. Anything
/// else passes through unchanged.
pub fn to_pg_dialect_type(standard: &TargetType, is_pk: bool) -> (TargetType, Vec<SchemaIssue>) {
    if standard.is_array {
        return (
            TargetType::unbounded_string(),
            vec![SchemaIssue::ArrayTypeNotSupported],
        );
    }
    if is_pk && standard.name == TypeCode::Numeric {
        return (
            TargetType::unbounded_string(),
            vec![SchemaIssue::NumericPKNotSupported],
        );
    }
    (standard.clone(), Vec::new())
}

/// Whether `col_id` is part of the source table's primary key.
pub fn is_primary_key(col_id: &str, table: &SourceTable) -> bool {
    table.primary_keys.iter().any(|key| key.col_id == col_id)
}

/// Apply [`to_pg_dialect_type`] to every target column, recording the
/// resulting issues as column-level issues.
///
/// Primary-key membership is taken from the source table when it exists and
/// from the target table otherwise. Returns the number of rewritten columns.
pub fn apply_pg_dialect(conv: &mut Conv) -> usize {
    let mut rewritten = 0;

    for (table_id, table) in conv.target_schema.iter_mut() {
        let source = conv.src_schema.get(table_id);
        let pk_cols: Vec<String> = table
            .primary_keys
            .iter()
            .map(|key| key.col_id.clone())
            .collect();

        for col in table.col_defs.values_mut() {
            let is_pk = match source {
                Some(source) => is_primary_key(&col.id, source),
                None => pk_cols.contains(&col.id),
            };
            let (mapped, issues) = to_pg_dialect_type(&col.ty, is_pk);
            if issues.is_empty() {
                continue;
            }
            col.ty = mapped;
            conv.schema_issues
                .add_column_issues(table_id, &col.id, &issues);
            rewritten += 1;
        }
    }

    tracing::info!(event = "pg_dialect_applied", columns = rewritten);
    rewritten
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::constraints::{IndexKey, Key};
    use crate::schema::{SourceSchema, TargetColumn, TargetTable};
    use crate::types::Length;

    #[test]
    fn arrays_become_unbounded_strings() {
        let ty = TargetType::scalar(TypeCode::Int64).into_array();
        for is_pk in [false, true] {
            let first = to_pg_dialect_type(&ty, is_pk);
            let second = to_pg_dialect_type(&ty, is_pk);
            assert_eq!(first, second);

            let (mapped, issues) = first;
            assert_eq!(mapped, TargetType::unbounded_string());
            assert!(!mapped.is_array);
            assert_eq!(issues, vec![SchemaIssue::ArrayTypeNotSupported]);
        }
    }

    #[test]
    fn array_rule_wins_over_numeric_pk() {
        let ty = TargetType::scalar(TypeCode::Numeric).into_array();
        let (_, issues) = to_pg_dialect_type(&ty, true);
        assert_eq!(issues, vec![SchemaIssue::ArrayTypeNotSupported]);
    }

    #[test]
    fn numeric_only_rewritten_in_primary_key() {
        let numeric = TargetType::scalar(TypeCode::Numeric);

        let (mapped, issues) = to_pg_dialect_type(&numeric, true);
        assert_eq!(mapped.name, TypeCode::String);
        assert_eq!(mapped.len, Length::Max);
        assert_eq!(issues, vec![SchemaIssue::NumericPKNotSupported]);

        let (mapped, issues) = to_pg_dialect_type(&numeric, false);
        assert_eq!(mapped, numeric);
        assert!(issues.is_empty());
    }

    #[test]
    fn other_types_pass_through() {
        let ty = TargetType::sized(TypeCode::String, Length::Bounded(40));
        assert_eq!(to_pg_dialect_type(&ty, true), (ty.clone(), Vec::new()));
    }

    fn target_column(id: &str, ty: TargetType) -> TargetColumn {
        TargetColumn {
            id: id.to_string(),
            name: id.to_string(),
            ty,
            not_null: false,
        }
    }

    #[test]
    fn apply_rewrites_columns_and_records_issues() {
        let mut src_schema = SourceSchema::new();
        src_schema.insert(
            "t1".to_string(),
            SourceTable {
                id: "t1".to_string(),
                name: "accounts".to_string(),
                col_ids: Vec::new(),
                col_defs: HashMap::new(),
                primary_keys: vec![Key::new("c1")],
                indexes: Vec::new(),
            },
        );
        let mut conv = Conv::new(src_schema);
        conv.target_schema.insert(
            "t1".to_string(),
            TargetTable {
                id: "t1".to_string(),
                name: "accounts".to_string(),
                col_ids: vec!["c1".into(), "c2".into(), "c3".into()],
                col_defs: HashMap::from([
                    ("c1".to_string(), target_column("c1", TargetType::scalar(TypeCode::Numeric))),
                    ("c2".to_string(), target_column("c2", TargetType::scalar(TypeCode::Numeric))),
                    (
                        "c3".to_string(),
                        target_column("c3", TargetType::scalar(TypeCode::Int64).into_array()),
                    ),
                ]),
                // Ignored while the source table is known.
                primary_keys: vec![IndexKey::new("c2")],
            },
        );

        assert_eq!(apply_pg_dialect(&mut conv), 2);

        let table = &conv.target_schema["t1"];
        assert_eq!(table.col_defs["c1"].ty, TargetType::unbounded_string());
        assert_eq!(table.col_defs["c2"].ty, TargetType::scalar(TypeCode::Numeric));
        assert_eq!(table.col_defs["c3"].ty, TargetType::unbounded_string());
        assert_eq!(
            conv.schema_issues.column_issues("t1", "c1"),
            &[SchemaIssue::NumericPKNotSupported]
        );
        assert_eq!(
            conv.schema_issues.column_issues("t1", "c3"),
            &[SchemaIssue::ArrayTypeNotSupported]
        );
        assert!(conv.schema_issues.column_issues("t1", "c2").is_empty());
    }
}
