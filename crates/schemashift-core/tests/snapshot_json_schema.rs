use schemars::schema_for;
use schemashift_core::Conv;

#[test]
fn json_schema_describes_snapshot() {
    let generated = schema_for!(Conv);
    let generated_json = serde_json::to_value(&generated).expect("serialize generated schema");

    let properties = generated_json
        .get("properties")
        .and_then(|value| value.as_object())
        .expect("properties object");
    for field in ["src_schema", "target_schema", "schema_issues", "settings"] {
        assert!(properties.contains_key(field), "missing property {field}");
    }

    let required = generated_json
        .get("required")
        .and_then(|value| value.as_array())
        .expect("required array");
    assert_eq!(required, &vec![serde_json::Value::from("src_schema")]);
}
