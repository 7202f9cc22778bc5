use schemashift_core::{ConversionSettings, Conv, Length, SchemaIssue, TypeCode};

#[test]
fn minimal_snapshot_fills_defaults() {
    let json = r#"{
  "src_schema": {
    "t1": {
      "id": "t1",
      "name": "users",
      "col_ids": ["c1"],
      "col_defs": {
        "c1": { "id": "c1", "name": "id", "data_type": "bigint" }
      },
      "primary_keys": [{ "col_id": "c1" }]
    }
  }
}"#;

    let conv: Conv = serde_json::from_str(json).expect("parse snapshot");
    let table = &conv.src_schema["t1"];
    assert_eq!(table.primary_keys[0].order, 0);
    assert!(table.indexes.is_empty());
    assert!(table.col_defs["c1"].is_nullable);
    assert!(conv.target_schema.is_empty());
    assert!(conv.schema_issues.is_empty());
    assert_eq!(conv.settings, ConversionSettings::default());
}

#[test]
fn target_types_and_issues_use_stable_spelling() {
    let json = r#"{
  "src_schema": {},
  "target_schema": {
    "t1": {
      "id": "t1",
      "name": "users",
      "col_ids": ["c1"],
      "col_defs": {
        "c1": { "id": "c1", "name": "bio", "type": { "name": "STRING", "len": "max" } }
      }
    }
  },
  "schema_issues": {
    "t1": { "table_level_issues": ["RowLimitExceeded"] }
  },
  "settings": { "max_non_key_column_length": 64 }
}"#;

    let conv: Conv = serde_json::from_str(json).expect("parse snapshot");
    let col = &conv.target_schema["t1"].col_defs["c1"];
    assert_eq!(col.ty.name, TypeCode::String);
    assert_eq!(col.ty.len, Length::Max);
    assert_eq!(
        conv.schema_issues.table_level_issues("t1"),
        &[SchemaIssue::RowLimitExceeded]
    );
    assert_eq!(conv.settings.max_non_key_column_length, 64);
    assert_eq!(
        conv.settings.string_max_length,
        ConversionSettings::default().string_max_length
    );

    let encoded = serde_json::to_value(&conv).expect("serialize snapshot");
    assert_eq!(
        encoded["target_schema"]["t1"]["col_defs"]["c1"]["type"]["len"],
        serde_json::json!("max")
    );
    assert_eq!(
        encoded["target_schema"]["t1"]["col_defs"]["c1"]["type"]["name"],
        serde_json::json!("STRING")
    );
}
