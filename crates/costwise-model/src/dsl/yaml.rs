//! Minimal YAML → query-description parser for workload files.
//!
//! Example:
//! ```yaml
//! queries:
//!   - op: filter_with_sharding
//!     name: stock-by-warehouse
//!     collection: Stock
//!     select: [quantity, location]
//!     where: [IDP, IDW]
//!     sharding_key: [IDP]
//!   - op: nested_loop_without_sharding
//!     left: Stock
//!     right: Product
//!     join_key: IDP
//!     left_select: [quantity]
//!     right_select: [name]
//! ```

use serde::{Deserialize, Serialize};

use costwise_core::error::{Error, Result};

use crate::operators::{CostEngine, CostResult};
use crate::query::{FilterQuery, JoinQuery};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workload {
    #[serde(default)]
    pub queries: Vec<QueryDef>,
}

/// One workload entry, tagged by the operator that evaluates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum QueryDef {
    FilterWithSharding {
        #[serde(default)]
        name: Option<String>,
        collection: String,
        #[serde(default)]
        select: Vec<String>,
        #[serde(rename = "where", default)]
        filter: Vec<String>,
        sharding_key: Vec<String>,
    },
    FilterWithoutSharding {
        #[serde(default)]
        name: Option<String>,
        collection: String,
        #[serde(default)]
        select: Vec<String>,
        #[serde(rename = "where", default)]
        filter: Vec<String>,
    },
    NestedLoopWithSharding {
        #[serde(default)]
        name: Option<String>,
        left: String,
        right: String,
        join_key: String,
        #[serde(default)]
        left_select: Vec<String>,
        #[serde(default)]
        right_select: Vec<String>,
    },
    NestedLoopWithoutSharding {
        #[serde(default)]
        name: Option<String>,
        left: String,
        right: String,
        join_key: String,
        #[serde(default)]
        left_select: Vec<String>,
        #[serde(default)]
        right_select: Vec<String>,
    },
}

impl QueryDef {
    /// Display label: the declared name, or the operator name.
    pub fn label(&self) -> &str {
        let (name, fallback) = match self {
            QueryDef::FilterWithSharding { name, .. } => (name, "filter_with_sharding"),
            QueryDef::FilterWithoutSharding { name, .. } => (name, "filter_without_sharding"),
            QueryDef::NestedLoopWithSharding { name, .. } => (name, "nested_loop_with_sharding"),
            QueryDef::NestedLoopWithoutSharding { name, .. } => {
                (name, "nested_loop_without_sharding")
            }
        };
        name.as_deref().unwrap_or(fallback)
    }

    /// Evaluate this entry against an engine.
    pub fn evaluate(&self, engine: &CostEngine<'_>) -> Result<CostResult> {
        match self {
            QueryDef::FilterWithSharding {
                collection,
                select,
                filter,
                sharding_key,
                ..
            } => {
                let q = FilterQuery::new(collection.clone())
                    .select(select.clone())
                    .filter(filter.clone())
                    .sharding_key(sharding_key.clone());
                engine.filter_with_sharding(&q)
            }
            QueryDef::FilterWithoutSharding {
                collection,
                select,
                filter,
                ..
            } => {
                let q = FilterQuery::new(collection.clone())
                    .select(select.clone())
                    .filter(filter.clone());
                engine.filter_without_sharding(&q)
            }
            QueryDef::NestedLoopWithSharding {
                left,
                right,
                join_key,
                left_select,
                right_select,
                ..
            } => {
                let q = JoinQuery::new(left.clone(), right.clone(), join_key.clone())
                    .left_select(left_select.clone())
                    .right_select(right_select.clone());
                engine.nested_loop_with_sharding(&q)
            }
            QueryDef::NestedLoopWithoutSharding {
                left,
                right,
                join_key,
                left_select,
                right_select,
                ..
            } => {
                let q = JoinQuery::new(left.clone(), right.clone(), join_key.clone())
                    .left_select(left_select.clone())
                    .right_select(right_select.clone());
                engine.nested_loop_without_sharding(&q)
            }
        }
    }
}

/// Parse a YAML workload string.
pub fn parse_workload(yaml_src: &str) -> Result<Workload> {
    serde_yaml::from_str(yaml_src).map_err(|e| Error::Workload(e.to_string()))
}
