//! Read-only dataset statistics consumed by the cost engine.
//!
//! Nothing in here is learned by the estimator; distinct-value counts and
//! the server count are *supplied* (typically from a statistics JSON file,
//! see `costwise-io`). Once constructed, a snapshot is never mutated — the
//! engine borrows it immutably for the lifetime of any number of queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_SERVERS;
use crate::error::{Error, Result};

/// Per-(collection, field) distinct-value counts plus the global server
/// count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    servers: u64,
    distinct: BTreeMap<String, BTreeMap<String, u64>>,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            servers: DEFAULT_SERVERS,
            distinct: BTreeMap::new(),
        }
    }
}

impl Statistics {
    /// A snapshot with an explicit server count. Zero servers cannot host
    /// any data, so it is rejected up front.
    pub fn new(servers: u64) -> Result<Self> {
        if servers == 0 {
            return Err(Error::Stats("server count must be positive".into()));
        }
        Ok(Self {
            servers,
            distinct: BTreeMap::new(),
        })
    }

    pub fn servers(&self) -> u64 {
        self.servers
    }

    /// Replace the server count, keeping every distinct-value entry.
    pub fn with_servers(mut self, servers: u64) -> Result<Self> {
        if servers == 0 {
            return Err(Error::Stats("server count must be positive".into()));
        }
        self.servers = servers;
        Ok(self)
    }

    /// Record the distinct-value count of one field. Builder-style so test
    /// fixtures read declaratively.
    pub fn with_distinct(
        mut self,
        collection: impl Into<String>,
        field: impl Into<String>,
        count: u64,
    ) -> Self {
        self.distinct
            .entry(collection.into())
            .or_default()
            .insert(field.into(), count);
        self
    }

    pub fn distinct(&self, collection: &str, field: &str) -> Option<u64> {
        self.distinct
            .get(collection)
            .and_then(|fields| fields.get(field))
            .copied()
    }

    /// The distinct-value count a selectivity estimate depends on. Absent or
    /// zero is fatal: guessing here would corrupt every downstream number.
    pub fn require_distinct(&self, collection: &str, field: &str) -> Result<u64> {
        match self.distinct(collection, field) {
            Some(count) if count > 0 => Ok(count),
            _ => Err(Error::MissingStatistic {
                collection: collection.to_string(),
                statistic: format!("distinct({field})"),
            }),
        }
    }

    /// Collections and fields with a recorded distinct count, in
    /// deterministic order. Used by reporting layers.
    pub fn distinct_entries(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.distinct.iter().flat_map(|(coll, fields)| {
            fields
                .iter()
                .map(move |(field, count)| (coll.as_str(), field.as_str(), *count))
        })
    }
}
