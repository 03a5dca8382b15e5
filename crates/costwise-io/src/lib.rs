#![forbid(unsafe_code)]
//! costwise-io: readers that turn schema and statistics files into the
//! in-memory model from `costwise-core`.
//!
//! Parsing works on strings; reading files from disk is left to the caller
//! (the CLI) so the readers stay trivially testable.

pub mod schema;
pub mod stats;

pub use schema::parse_schema;
pub use stats::{parse_stats, StatsFile};

use costwise_core::error::Result;
use costwise_core::schema::Database;
use costwise_core::stats::Statistics;

/// Load a schema + statistics pair in the right order: document counts and
/// array hints from the statistics file feed the schema reader.
pub fn load_environment(schema_json: &str, stats_json: &str) -> Result<(Database, Statistics)> {
    let stats_file = parse_stats(stats_json)?;
    let db = parse_schema(schema_json, &stats_file.doc_counts, &stats_file.array_hints)?;
    let statistics = stats_file.statistics()?;
    Ok((db, statistics))
}
