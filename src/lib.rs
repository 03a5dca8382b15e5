#![forbid(unsafe_code)]
//! costwise: storage footprint and per-query cost estimation for
//! denormalized document databases.
//!
//! Facade over the workspace crates; most users want a [`CostEngine`]
//! built from the readers in `costwise-io`.

pub use costwise_core::{
    Collection, Database, Error, Field, FieldKind, Result, Statistics,
};
pub use costwise_io::{load_environment, parse_schema, parse_stats, StatsFile};
pub use costwise_model::{
    parse_workload, CostEngine, CostResult, FilterQuery, JoinQuery, Workload,
};
