//! Logical schema model. Pure data; nothing here reads files or touches
//! statistics.
//!
//! The shape mirrors what the JSON-Schema reader in `costwise-io` produces:
//! a database is a list of collections, a collection is an ordered list of
//! named fields, and a field is a closed tagged kind. Closing the kind enum
//! means the base-size mapping in `sizes.rs` is total — there is no ad-hoc
//! string dispatch anywhere downstream.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The recognized field kinds and, for scalars, their fixed base byte sizes.
///
/// Object and array sizes are derived recursively from their children; see
/// [`crate::sizes::field_byte_size`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// 8 bytes.
    Integer,
    /// 80 bytes.
    String,
    /// 20 bytes.
    Date,
    /// 200 bytes.
    LongString,
    /// Nested document; size is the sum of its children plus its own key.
    Object(Vec<Field>),
    /// Repeated element; `avg_items` is the expected element count and may
    /// be fractional (it is an average over the collection, not a length).
    Array { item: Box<Field>, avg_items: f64 },
}

impl FieldKind {
    /// Base value size for scalar kinds, in bytes (key overhead excluded).
    pub fn scalar_base_size(&self) -> Option<f64> {
        match self {
            FieldKind::Integer => Some(8.0),
            FieldKind::String => Some(80.0),
            FieldKind::Date => Some(20.0),
            FieldKind::LongString => Some(200.0),
            FieldKind::Object(_) | FieldKind::Array { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One named collection of documents: ordered fields (declaration order is
/// meaningful — selectivity uses the *first* filter key), a document count
/// from the statistics file, and an optional declared primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub fields: Vec<Field>,
    pub doc_count: u64,
    pub primary_key: Option<Vec<String>>,
}

impl Collection {
    pub fn new(name: impl Into<String>, fields: Vec<Field>, doc_count: u64) -> Self {
        Self {
            name: name.into(),
            fields,
            doc_count,
            primary_key: None,
        }
    }

    /// Declare the primary key. Every component must name an existing field.
    pub fn with_primary_key<I, S>(mut self, key: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key: Vec<String> = key.into_iter().map(Into::into).collect();
        for component in &key {
            self.lookup(component)?;
        }
        self.primary_key = Some(key);
        Ok(self)
    }

    /// Find a field by name, searching nested object and array subfields in
    /// declaration order, outermost first.
    pub fn field(&self, name: &str) -> Option<&Field> {
        find_field(&self.fields, name)
    }

    /// Like [`Collection::field`] but failing with `UnknownField`.
    pub fn lookup(&self, name: &str) -> Result<&Field> {
        self.field(name).ok_or_else(|| Error::UnknownField {
            collection: self.name.clone(),
            field: name.to_string(),
        })
    }

    /// True when `filter_keys` names every component of the declared primary
    /// key, i.e. the query is a primary-key lookup.
    pub fn primary_key_covered(&self, filter_keys: &[String]) -> bool {
        match &self.primary_key {
            Some(pk) if !pk.is_empty() => pk.iter().all(|component| {
                filter_keys.iter().any(|k| k == component)
            }),
            _ => false,
        }
    }
}

fn find_field<'a>(fields: &'a [Field], name: &str) -> Option<&'a Field> {
    for field in fields {
        if field.name == name {
            return Some(field);
        }
        match &field.kind {
            FieldKind::Object(subfields) => {
                if let Some(found) = find_field(subfields, name) {
                    return Some(found);
                }
            }
            FieldKind::Array { item, .. } => {
                if item.name == name {
                    return Some(item);
                }
                if let FieldKind::Object(subfields) = &item.kind {
                    if let Some(found) = find_field(subfields, name) {
                        return Some(found);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// An immutable snapshot of every collection the estimator knows about.
/// Collections keep schema declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    pub collections: Vec<Collection>,
}

impl Database {
    pub fn new(name: impl Into<String>, collections: Vec<Collection>) -> Self {
        Self {
            name: name.into(),
            collections,
        }
    }

    pub fn collection(&self, name: &str) -> Result<&Collection> {
        self.collections
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::UnknownCollection(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock() -> Collection {
        Collection::new(
            "Stock",
            vec![
                Field::new("IDP", FieldKind::Integer),
                Field::new("IDW", FieldKind::Integer),
                Field::new("quantity", FieldKind::Integer),
                Field::new("location", FieldKind::String),
            ],
            20_000_000,
        )
    }

    #[test]
    fn nested_field_lookup() {
        let coll = Collection::new(
            "Order",
            vec![Field::new(
                "customer",
                FieldKind::Object(vec![
                    Field::new("IDC", FieldKind::Integer),
                    Field::new("email", FieldKind::String),
                ]),
            )],
            0,
        );
        assert!(coll.field("email").is_some());
        assert!(coll.field("phone").is_none());
    }

    #[test]
    fn primary_key_must_exist() {
        assert!(stock().with_primary_key(["IDP", "IDW"]).is_ok());
        assert!(stock().with_primary_key(["IDP", "IDX"]).is_err());
    }

    #[test]
    fn composite_primary_key_coverage() {
        let coll = stock().with_primary_key(["IDP", "IDW"]).unwrap();
        let full = vec!["IDW".to_string(), "IDP".to_string()];
        let partial = vec!["IDP".to_string()];
        assert!(coll.primary_key_covered(&full));
        assert!(!coll.primary_key_covered(&partial));
    }
}
