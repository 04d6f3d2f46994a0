//! Tests for unify-model types.

use serde_json::json;
use unify_model::{
    CanonicalField, FieldSpec, FieldType, InterfaceSchema, RecordSet, RecordShape,
};

#[test]
fn field_type_serializes_lowercase() {
    let json = serde_json::to_string(&FieldType::Datetime).expect("serialize type");
    assert_eq!(json, "\"datetime\"");
    assert_eq!(FieldType::Float.to_string(), "float");
}

#[test]
fn record_set_keeps_shape() {
    let table: RecordSet =
        serde_json::from_value(json!([{"日期": "2024-01-01"}, {"日期": "2024-01-02"}]))
            .expect("table");
    assert_eq!(table.shape(), RecordShape::Table);
    assert_eq!(table.len(), 2);

    let single: RecordSet =
        serde_json::from_value(json!({"代码": "000001"})).expect("record");
    assert_eq!(single.shape(), RecordShape::Record);
    assert_eq!(single.len(), 1);
}

#[test]
fn record_preserves_column_order() {
    let set: RecordSet =
        serde_json::from_value(json!({"z": 1, "a": 2, "m": 3})).expect("record");
    let RecordSet::Record(record) = set else {
        panic!("expected a single record");
    };
    let keys: Vec<&str> = record.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn interface_schema_round_trips_with_optional_fields() {
    let mut schema = InterfaceSchema::new("stock_zh_a_hist");
    schema.target_url = "https://example.com/hist".to_string();
    schema.input_fields.push(FieldSpec::new("symbol", "str").with_description("股票代码"));
    schema.output_fields.push(FieldSpec::new("日期", "object"));

    let json = serde_json::to_value(&schema).expect("serialize schema");
    assert!(json.get("limit").is_none());
    let round: InterfaceSchema = serde_json::from_value(json).expect("deserialize schema");
    assert_eq!(round, schema);
}

#[test]
fn canonical_field_histogram_serializes_as_map() {
    let mut field = CanonicalField::new("close");
    field.type_histogram.record(FieldType::Float);
    field.type_histogram.record(FieldType::Float);
    field.type_histogram.record(FieldType::String);
    field.refresh_common_type();

    let json = serde_json::to_value(&field).expect("serialize field");
    assert_eq!(json["type_histogram"], json!({"float": 2, "string": 1}));
    assert_eq!(json["common_type"], json!("float"));
}
