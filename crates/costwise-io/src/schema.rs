//! JSON-Schema → `Database` reader.
//!
//! The input is a standard JSON Schema document whose top-level `properties`
//! are the collections and whose nested `properties` are each collection's
//! fields. Two non-standard keywords are honored: `avg_items` on an array
//! field (expected element count) and `primaryKey` on a collection (array
//! of field names).
//!
//! Type rules:
//! - a field with no `type` defaults to `string` — an explicit branch, not
//!   an error;
//! - `number` is accepted as an alias of the integer kind;
//! - `format: date` / `format: longstring` refine a string field;
//! - any other explicit type is fatal (`UnsupportedFieldKind`).

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use costwise_core::error::{Error, Result};
use costwise_core::schema::{Collection, Database, Field, FieldKind};

/// Parse a JSON Schema string into a [`Database`], attaching per-collection
/// document counts and array fan-out hints (keyed by dotted field path,
/// e.g. `"Order.lines"`; paths under array items carry a `[]` suffix).
pub fn parse_schema(
    schema_json: &str,
    doc_counts: &BTreeMap<String, u64>,
    array_hints: &BTreeMap<String, f64>,
) -> Result<Database> {
    let root: Value = serde_json::from_str(schema_json)
        .map_err(|e| Error::Schema(format!("invalid JSON: {e}")))?;

    let name = root
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("database")
        .to_string();
    let props = object_member(&root, "properties")
        .ok_or_else(|| Error::Schema("schema has no top-level 'properties'".into()))?;

    let mut collections = Vec::with_capacity(props.len());
    for (coll_name, coll_def) in props {
        let fields = match object_member(coll_def, "properties") {
            Some(coll_props) => parse_properties(coll_props, coll_name, array_hints)?,
            None => Vec::new(),
        };
        let doc_count = doc_counts.get(coll_name).copied().unwrap_or(0);
        let mut collection = Collection::new(coll_name.clone(), fields, doc_count);
        if let Some(pk) = coll_def.get("primaryKey") {
            collection = collection.with_primary_key(string_array(pk, "primaryKey")?)?;
        }
        collections.push(collection);
    }

    tracing::debug!(database = %name, collections = collections.len(), "schema parsed");
    Ok(Database::new(name, collections))
}

fn parse_properties(
    props: &Map<String, Value>,
    path: &str,
    array_hints: &BTreeMap<String, f64>,
) -> Result<Vec<Field>> {
    let mut fields = Vec::with_capacity(props.len());
    for (fname, fdef) in props {
        let full_path = format!("{path}.{fname}");
        fields.push(parse_field(fname, fdef, &full_path, array_hints)?);
    }
    Ok(fields)
}

fn parse_field(
    fname: &str,
    fdef: &Value,
    full_path: &str,
    array_hints: &BTreeMap<String, f64>,
) -> Result<Field> {
    let declared = fdef.get("type").and_then(Value::as_str);
    // missing type is legal: default to string, then let `format` refine it
    let ftype = declared.unwrap_or("string").to_ascii_lowercase();

    let kind = match ftype.as_str() {
        "object" => {
            let subfields = match object_member(fdef, "properties") {
                Some(sub) => parse_properties(sub, full_path, array_hints)?,
                None => Vec::new(),
            };
            FieldKind::Object(subfields)
        }
        "array" => {
            let items = fdef.get("items").cloned().unwrap_or(Value::Null);
            let item_name = format!("{fname}_item");
            let item_path = format!("{full_path}[]");
            let item = parse_field(&item_name, &items, &item_path, array_hints)?;
            let avg_items = fdef
                .get("avg_items")
                .and_then(Value::as_f64)
                .or_else(|| array_hints.get(full_path).copied())
                .unwrap_or(1.0);
            FieldKind::Array {
                item: Box::new(item),
                avg_items,
            }
        }
        _ => scalar_kind(fname, &ftype, fdef)?,
    };

    Ok(Field::new(fname, kind))
}

fn scalar_kind(fname: &str, ftype: &str, fdef: &Value) -> Result<FieldKind> {
    let format = fdef.get("format").and_then(Value::as_str);
    let kind = match (ftype, format) {
        (_, Some("date")) => FieldKind::Date,
        (_, Some("longstring")) => FieldKind::LongString,
        ("integer" | "number", _) => FieldKind::Integer,
        ("string", _) => FieldKind::String,
        ("date", _) => FieldKind::Date,
        ("longstring", _) => FieldKind::LongString,
        (other, _) => {
            return Err(Error::UnsupportedFieldKind {
                field: fname.to_string(),
                kind: other.to_string(),
            })
        }
    };
    Ok(kind)
}

fn object_member<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    value.get(key).and_then(Value::as_object)
}

fn string_array(value: &Value, what: &str) -> Result<Vec<String>> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| Error::Schema(format!("'{what}' must be an array of strings")))
                })
                .collect()
        })
        .unwrap_or_else(|| Err(Error::Schema(format!("'{what}' must be an array of strings"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(schema: &str) -> Database {
        parse_schema(schema, &BTreeMap::new(), &BTreeMap::new()).unwrap()
    }

    #[test]
    fn missing_type_defaults_to_string() {
        let db = parse(r#"{"properties": {"C": {"properties": {"f": {}}}}}"#);
        let field = db.collection("C").unwrap().lookup("f").unwrap();
        assert_eq!(field.kind, FieldKind::String);
    }

    #[test]
    fn format_refines_string_fields() {
        let db = parse(
            r#"{"properties": {"C": {"properties": {
                "created": {"type": "string", "format": "date"},
                "notes": {"type": "string", "format": "longstring"}
            }}}}"#,
        );
        let coll = db.collection("C").unwrap();
        assert_eq!(coll.lookup("created").unwrap().kind, FieldKind::Date);
        assert_eq!(coll.lookup("notes").unwrap().kind, FieldKind::LongString);
    }

    #[test]
    fn number_is_an_integer_alias() {
        let db = parse(r#"{"properties": {"C": {"properties": {"amount": {"type": "number"}}}}}"#);
        let field = db.collection("C").unwrap().lookup("amount").unwrap();
        assert_eq!(field.kind, FieldKind::Integer);
    }

    #[test]
    fn unknown_explicit_type_is_fatal() {
        let err = parse_schema(
            r#"{"properties": {"C": {"properties": {"blob": {"type": "binary"}}}}}"#,
            &BTreeMap::new(),
            &BTreeMap::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFieldKind { .. }));
    }

    #[test]
    fn array_hints_apply_by_dotted_path() {
        let hints: BTreeMap<String, f64> = [("Order.lines".to_string(), 3.5)].into();
        let db = parse_schema(
            r#"{"properties": {"Order": {"properties": {
                "lines": {"type": "array", "items": {"type": "integer"}}
            }}}}"#,
            &BTreeMap::new(),
            &hints,
        )
        .unwrap();
        let field = db.collection("Order").unwrap().lookup("lines").unwrap();
        match &field.kind {
            FieldKind::Array { avg_items, .. } => assert_eq!(*avg_items, 3.5),
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn inline_avg_items_wins_over_hints() {
        let hints: BTreeMap<String, f64> = [("Order.lines".to_string(), 3.5)].into();
        let db = parse_schema(
            r#"{"properties": {"Order": {"properties": {
                "lines": {"type": "array", "items": {"type": "integer"}, "avg_items": 2}
            }}}}"#,
            &BTreeMap::new(),
            &hints,
        )
        .unwrap();
        let field = db.collection("Order").unwrap().lookup("lines").unwrap();
        match &field.kind {
            FieldKind::Array { avg_items, .. } => assert_eq!(*avg_items, 2.0),
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn nested_object_array_items_parse() {
        let db = parse(
            r#"{"title": "shop", "properties": {"Order": {
                "primaryKey": ["IDO"],
                "properties": {
                    "IDO": {"type": "integer"},
                    "lines": {"type": "array", "items": {"type": "object", "properties": {
                        "IDP": {"type": "integer"},
                        "qty": {"type": "integer"}
                    }}}
                }}}}"#,
        );
        assert_eq!(db.name, "shop");
        let coll = db.collection("Order").unwrap();
        assert_eq!(coll.primary_key.as_deref(), Some(&["IDO".to_string()][..]));
        assert!(coll.field("qty").is_some());
    }

    #[test]
    fn doc_counts_attach_to_collections() {
        let counts: BTreeMap<String, u64> = [("C".to_string(), 42u64)].into();
        let db = parse_schema(
            r#"{"properties": {"C": {"properties": {"f": {"type": "integer"}}}}}"#,
            &counts,
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(db.collection("C").unwrap().doc_count, 42);
    }
}
