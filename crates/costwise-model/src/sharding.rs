//! Server fan-out and result-cardinality resolution.
//!
//! This is where the estimator's actual decision logic lives: whether a
//! query can be routed to a single server, and how many documents it is
//! expected to return.

use costwise_core::prelude::{Collection, Error, Result, Statistics};

use serde::{Deserialize, Serialize};

/// How many servers one query must contact.
///
/// Routing to a single server requires *every* component of the sharding
/// key to appear among the filter keys: a document's home server is a
/// function of the whole key, so partial coverage of a composite key gives
/// the router nothing and falls back to a full broadcast. A key with no
/// components never co-locates.
pub fn resolve_fanout(sharding_key: &[String], filter_keys: &[String], servers: u64) -> u64 {
    let covered = !sharding_key.is_empty()
        && sharding_key
            .iter()
            .all(|component| filter_keys.iter().any(|k| k == component));
    if covered {
        1
    } else {
        servers
    }
}

/// Expected number of documents matched by a filter.
///
/// A filter covering the whole primary key names at most one document. With
/// no predicate at all the query is a full scan. Otherwise selectivity is
/// `1 / distinct(first filter key)` — keys beyond the first are ignored by
/// documented policy; combining per-key selectivities is explicitly out of
/// scope.
pub fn resolve_cardinality(
    collection: &Collection,
    filter_keys: &[String],
    statistics: &Statistics,
) -> Result<f64> {
    if collection.primary_key_covered(filter_keys) {
        return Ok(1.0);
    }

    let doc_count = require_doc_count(collection)?;
    match filter_keys.first() {
        None => Ok(doc_count),
        Some(key) => {
            let distinct = statistics.require_distinct(&collection.name, key)?;
            Ok(doc_count / distinct as f64)
        }
    }
}

pub(crate) fn require_doc_count(collection: &Collection) -> Result<f64> {
    if collection.doc_count == 0 {
        return Err(Error::MissingStatistic {
            collection: collection.name.clone(),
            statistic: "doc_count".into(),
        });
    }
    Ok(collection.doc_count as f64)
}

/// Average placement of one collection across the cluster when sharded on a
/// given key: documents per server and distinct key values per server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub docs_per_server: f64,
    pub keys_per_server: f64,
}

pub fn placement(doc_count: u64, distinct_keys: u64, servers: u64) -> Placement {
    Placement {
        docs_per_server: doc_count as f64 / servers as f64,
        keys_per_server: distinct_keys as f64 / servers as f64,
    }
}
