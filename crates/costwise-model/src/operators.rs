//! The four-operator cost engine.
//!
//! Every operator is a pure function of the borrowed schema/statistics
//! snapshot and one query description. They share a single shape: resolve
//! fan-out and cardinality, price the query and result messages, combine
//! into a network volume, then hand that volume to the wire-cost formulas.
//! All precondition checks run before any arithmetic; a failed operator
//! never yields a partial result.

use costwise_core::prelude::{Collection, Database, Error, Result, Statistics};
use costwise_core::sizes;

use serde::{Deserialize, Serialize};

use crate::formulas::{wire_cost, WireCost};
use crate::query::{FilterQuery, JoinQuery};
use crate::sharding::{require_doc_count, resolve_cardinality, resolve_fanout};

/// Everything one query costs. Produced fresh per call; immutable after
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    /// Servers contacted (S). Always at least 1.
    pub servers_contacted: u64,
    /// Expected result documents. An expectation, so not necessarily
    /// integral.
    pub result_docs: f64,
    /// Bytes sent to each contacted server to pose the query.
    pub size_query: f64,
    /// Bytes of each returned result document.
    pub size_msg: f64,
    /// Total bytes moved across the network.
    pub vol_network: f64,
    pub time_network: f64,
    pub time_cpu: f64,
    pub time_total: f64,
    pub co2: f64,
    pub price: f64,
}

impl CostResult {
    fn assemble(
        servers_contacted: u64,
        result_docs: f64,
        size_query: f64,
        size_msg: f64,
        vol_network: f64,
    ) -> Self {
        let WireCost {
            time_network,
            time_cpu,
            time_total,
            co2,
            price,
        } = wire_cost(vol_network);
        Self {
            servers_contacted,
            result_docs,
            size_query,
            size_msg,
            vol_network,
            time_network,
            time_cpu,
            time_total,
            co2,
            price,
        }
    }
}

/// Borrowed read-only view over one schema + statistics snapshot.
///
/// The engine holds no state of its own: two engines over the same snapshot
/// are interchangeable, and calls on one engine never observe each other.
#[derive(Debug, Clone, Copy)]
pub struct CostEngine<'a> {
    db: &'a Database,
    stats: &'a Statistics,
}

impl<'a> CostEngine<'a> {
    pub fn new(db: &'a Database, stats: &'a Statistics) -> Self {
        Self { db, stats }
    }

    pub fn database(&self) -> &Database {
        self.db
    }

    pub fn statistics(&self) -> &Statistics {
        self.stats
    }

    /// Filter over a sharded collection. Contacts a single server when the
    /// filter covers the whole sharding key, otherwise broadcasts.
    pub fn filter_with_sharding(&self, query: &FilterQuery) -> Result<CostResult> {
        let coll = self.db.collection(&query.collection)?;
        self.check_sharding_key(coll, &query.sharding_key)?;
        let fanout = resolve_fanout(&query.sharding_key, &query.filter, self.stats.servers());
        self.filter_cost(coll, query, fanout)
    }

    /// Filter over an unsharded collection: the router has no placement
    /// information, so every server is contacted regardless of the filter.
    pub fn filter_without_sharding(&self, query: &FilterQuery) -> Result<CostResult> {
        let coll = self.db.collection(&query.collection)?;
        self.filter_cost(coll, query, self.stats.servers())
    }

    fn filter_cost(
        &self,
        coll: &Collection,
        query: &FilterQuery,
        fanout: u64,
    ) -> Result<CostResult> {
        let size_query = sizes::size_query(coll, &query.select, &query.filter)?;
        let size_msg = sizes::size_msg(coll, &query.select)?;
        let result_docs = resolve_cardinality(coll, &query.filter, self.stats)?;

        let vol_network = fanout as f64 * size_query + result_docs * size_msg;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            collection = %coll.name,
            fanout,
            result_docs,
            vol_network,
            "filter cost"
        );
        Ok(CostResult::assemble(
            fanout,
            result_docs,
            size_query,
            size_msg,
            vol_network,
        ))
    }

    /// Nested-loop join where the relations are not co-located: the smaller
    /// relation is broadcast in full, then each join result travels back.
    pub fn nested_loop_without_sharding(&self, query: &JoinQuery) -> Result<CostResult> {
        let (left, right) = self.join_sides(query)?;
        let size_msg = join_msg_size(left, right, query)?;
        let result_docs = self.join_cardinality(left, right, &query.join_key)?;

        // Ship whichever side has fewer documents; ties ship the partner
        // (right) relation.
        let shipped = if right.doc_count <= left.doc_count {
            sizes::collection_size(right)
        } else {
            sizes::collection_size(left)
        };

        let vol_network = shipped + result_docs * size_msg;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            left = %left.name,
            right = %right.name,
            shipped,
            result_docs,
            vol_network,
            "nested loop cost (broadcast)"
        );
        Ok(CostResult::assemble(
            self.stats.servers(),
            result_docs,
            0.0,
            size_msg,
            vol_network,
        ))
    }

    /// Nested-loop join with both relations sharded on the join key: every
    /// pair of matching documents already lives on the same server, so only
    /// the join results move.
    pub fn nested_loop_with_sharding(&self, query: &JoinQuery) -> Result<CostResult> {
        let (left, right) = self.join_sides(query)?;
        let size_msg = join_msg_size(left, right, query)?;
        let result_docs = self.join_cardinality(left, right, &query.join_key)?;

        let vol_network = result_docs * size_msg;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            left = %left.name,
            right = %right.name,
            result_docs,
            vol_network,
            "nested loop cost (co-located)"
        );
        Ok(CostResult::assemble(1, result_docs, 0.0, size_msg, vol_network))
    }

    fn join_sides(&self, query: &JoinQuery) -> Result<(&'a Collection, &'a Collection)> {
        let left = self.db.collection(&query.left)?;
        let right = self.db.collection(&query.right)?;
        // the join key must exist on both sides
        left.lookup(&query.join_key)?;
        right.lookup(&query.join_key)?;
        Ok((left, right))
    }

    /// Containment-join estimate: `|L| * |R| / distinct(join_key)`. The
    /// distinct count is taken from the left side's statistics first, then
    /// the right's — the model assumes the key is measured consistently
    /// across both relations.
    fn join_cardinality(
        &self,
        left: &Collection,
        right: &Collection,
        join_key: &str,
    ) -> Result<f64> {
        let left_docs = require_doc_count(left)?;
        let right_docs = require_doc_count(right)?;
        let distinct = self
            .stats
            .distinct(&left.name, join_key)
            .filter(|&n| n > 0)
            .or_else(|| self.stats.distinct(&right.name, join_key).filter(|&n| n > 0))
            .ok_or_else(|| Error::MissingStatistic {
                collection: left.name.clone(),
                statistic: format!("distinct({join_key})"),
            })?;
        Ok(left_docs * right_docs / distinct as f64)
    }

    fn check_sharding_key(&self, coll: &Collection, sharding_key: &[String]) -> Result<()> {
        for component in sharding_key {
            if coll.field(component).is_none() {
                return Err(Error::InvalidShardingKey {
                    collection: coll.name.clone(),
                    field: component.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Result-message size of a join: each side's SELECT fields priced against
/// that side's schema, concatenated.
fn join_msg_size(left: &Collection, right: &Collection, query: &JoinQuery) -> Result<f64> {
    Ok(sizes::message_size(left, &query.left_select)?
        + sizes::message_size(right, &query.right_select)?)
}
