//! Byte-size arithmetic over the schema model.
//!
//! Sizes are `f64` because array fan-out hints are averages: a document with
//! "2.5 items on average" has an *expected* size, the same way the engine's
//! result cardinalities are expectations. For scalar-only schemas every
//! value is exactly integral.

use crate::config::{BYTES_PER_GB, KEY_OVERHEAD_BYTES};
use crate::error::Result;
use crate::schema::{Collection, Database, Field, FieldKind};

/// Full wire size of one field: its 12-byte key charge plus its value.
///
/// Scalars use the fixed base size; an object charges its own key plus the
/// full size of each child; an array charges its own key plus `avg_items`
/// copies of its element. Every field, of any kind, carries exactly one key
/// charge.
pub fn field_byte_size(field: &Field) -> f64 {
    match &field.kind {
        FieldKind::Object(subfields) => {
            KEY_OVERHEAD_BYTES + subfields.iter().map(field_byte_size).sum::<f64>()
        }
        FieldKind::Array { item, avg_items } => {
            KEY_OVERHEAD_BYTES + avg_items * field_byte_size(item)
        }
        scalar => {
            // scalar_base_size is total over the remaining kinds
            KEY_OVERHEAD_BYTES + scalar.scalar_base_size().unwrap_or(0.0)
        }
    }
}

/// Wire size of a message carrying the named fields of `collection`.
/// Key overhead is already part of each field's size; it is never charged
/// twice. Unknown names fail with `UnknownField`.
pub fn message_size(collection: &Collection, field_names: &[String]) -> Result<f64> {
    let mut total = 0.0;
    for name in field_names {
        total += field_byte_size(collection.lookup(name)?);
    }
    Ok(total)
}

/// Bytes sent *to* each contacted server to pose the query: the projection
/// list and the predicate bindings travel together, so a field named in both
/// is charged in both.
pub fn size_query(collection: &Collection, select: &[String], filter: &[String]) -> Result<f64> {
    Ok(message_size(collection, select)? + message_size(collection, filter)?)
}

/// Bytes of each returned document: only the selected fields come back;
/// filter-only fields are not echoed.
pub fn size_msg(collection: &Collection, select: &[String]) -> Result<f64> {
    message_size(collection, select)
}

/// Expected size of one whole document of the collection.
pub fn doc_size(collection: &Collection) -> f64 {
    collection.fields.iter().map(field_byte_size).sum()
}

/// Total bytes the collection occupies.
pub fn collection_size(collection: &Collection) -> f64 {
    doc_size(collection) * collection.doc_count as f64
}

/// Total bytes of every collection in the database.
pub fn db_size(database: &Database) -> f64 {
    database.collections.iter().map(collection_size).sum()
}

pub fn bytes_to_gb(bytes: f64) -> f64 {
    bytes / BYTES_PER_GB
}
