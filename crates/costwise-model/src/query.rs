//! Immutable query descriptions handed to the cost engine.
//!
//! These describe the *shape* of a query — which fields are returned, which
//! are filtered on, how the collection is sharded — never its literal
//! values. One is constructed per query and read-only thereafter.

use serde::{Deserialize, Serialize};

/// A single-collection filter query.
///
/// `select` and `filter` keep caller-declared order: selectivity estimation
/// uses the *first* filter key only, so the order of `filter` is part of the
/// query's meaning, not an artifact of a map's iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub collection: String,
    pub select: Vec<String>,
    pub filter: Vec<String>,
    /// Sharding key of the collection; more than one name declares a
    /// composite key. Ignored by the without-sharding operator.
    #[serde(default)]
    pub sharding_key: Vec<String>,
}

impl FilterQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            select: Vec::new(),
            filter: Vec::new(),
            sharding_key: Vec::new(),
        }
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn sharding_key<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sharding_key = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// An equi-join between two collections on one key, with per-side
/// projections. The result message concatenates the selected fields of both
/// sides, so each side's list is resolved against its own schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinQuery {
    pub left: String,
    pub right: String,
    pub join_key: String,
    #[serde(default)]
    pub left_select: Vec<String>,
    #[serde(default)]
    pub right_select: Vec<String>,
}

impl JoinQuery {
    pub fn new(
        left: impl Into<String>,
        right: impl Into<String>,
        join_key: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            join_key: join_key.into(),
            left_select: Vec::new(),
            right_select: Vec::new(),
        }
    }

    pub fn left_select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.left_select = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn right_select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.right_select = fields.into_iter().map(Into::into).collect();
        self
    }
}
