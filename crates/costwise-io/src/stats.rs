//! Statistics-file reader.
//!
//! The statistics file is plain JSON:
//! ```json
//! {
//!   "servers": 1000,
//!   "doc_counts": { "Stock": 20000000, "Product": 100000 },
//!   "distinct_values": { "Stock": { "IDP": 100000, "IDW": 200 } },
//!   "array_hints": { "Order.lines": 3.5 }
//! }
//! ```
//! `servers` defaults to 1000 when omitted. `array_hints` are consumed by
//! the schema reader, not by the statistics snapshot itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use costwise_core::config::DEFAULT_SERVERS;
use costwise_core::error::{Error, Result};
use costwise_core::stats::Statistics;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsFile {
    #[serde(default = "default_servers")]
    pub servers: u64,
    #[serde(default)]
    pub doc_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub distinct_values: BTreeMap<String, BTreeMap<String, u64>>,
    #[serde(default)]
    pub array_hints: BTreeMap<String, f64>,
}

fn default_servers() -> u64 {
    DEFAULT_SERVERS
}

impl StatsFile {
    /// Build the read-only snapshot the engine consumes.
    pub fn statistics(&self) -> Result<Statistics> {
        let mut stats = Statistics::new(self.servers)?;
        for (collection, fields) in &self.distinct_values {
            for (field, count) in fields {
                stats = stats.with_distinct(collection.clone(), field.clone(), *count);
            }
        }
        Ok(stats)
    }
}

pub fn parse_stats(stats_json: &str) -> Result<StatsFile> {
    let file: StatsFile = serde_json::from_str(stats_json)
        .map_err(|e| Error::Stats(format!("invalid JSON: {e}")))?;
    tracing::debug!(
        servers = file.servers,
        collections = file.doc_counts.len(),
        "statistics parsed"
    );
    Ok(file)
}
