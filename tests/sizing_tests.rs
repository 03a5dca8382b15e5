//! Storage-footprint summation over a schema with nested objects and
//! arrays, parsed from JSON the way the CLI does it.

use costwise_core::sizes;
use costwise_io::load_environment;

const SCHEMA: &str = r#"{
  "title": "shop",
  "properties": {
    "Order": {
      "primaryKey": ["IDO"],
      "properties": {
        "IDO": {"type": "integer"},
        "date": {"type": "string", "format": "date"},
        "customer": {
          "type": "object",
          "properties": {
            "IDC": {"type": "integer"},
            "email": {"type": "string"}
          }
        },
        "lines": {
          "type": "array",
          "items": {
            "type": "object",
            "properties": {
              "IDP": {"type": "integer"},
              "qty": {"type": "integer"}
            }
          }
        }
      }
    }
  }
}"#;

const STATS: &str = r#"{
  "servers": 100,
  "doc_counts": {"Order": 1000000},
  "array_hints": {"Order.lines": 4}
}"#;

#[test]
fn nested_doc_size_adds_up() {
    let (db, _) = load_environment(SCHEMA, STATS).unwrap();
    let order = db.collection("Order").unwrap();

    // IDO: 12+8, date: 12+20, customer: 12 + (12+8) + (12+80),
    // lines: 12 + 4 * (12 + (12+8) + (12+8))
    let expected = 20.0 + 32.0 + 124.0 + (12.0 + 4.0 * 52.0);
    assert_eq!(sizes::doc_size(order), expected);
    assert_eq!(
        sizes::collection_size(order),
        expected * 1_000_000.0
    );
    assert_eq!(sizes::db_size(&db), sizes::collection_size(order));
}

#[test]
fn gigabyte_conversion_is_binary() {
    assert_eq!(sizes::bytes_to_gb(1024.0 * 1024.0 * 1024.0), 1.0);
    assert_eq!(sizes::bytes_to_gb(0.0), 0.0);
}

#[test]
fn array_fields_price_like_any_other_field_in_messages() {
    let (db, _) = load_environment(SCHEMA, STATS).unwrap();
    let order = db.collection("Order").unwrap();

    let select = vec!["lines".to_string()];
    // selecting the array ships the expected 4 elements
    assert_eq!(
        sizes::message_size(order, &select).unwrap(),
        12.0 + 4.0 * 52.0
    );
}
