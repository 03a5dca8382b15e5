#![forbid(unsafe_code)]
//! costwise-model: from a query description → one `CostResult`.
//!
//! Design:
//! - `sharding` decides server fan-out and expected result cardinality.
//! - `formulas` turns a network volume into time/CO2/price (pure, linear).
//! - `operators` is the four-operator engine tying the two together over a
//!   borrowed schema/statistics snapshot from `costwise-core`.
//! - `dsl` parses YAML workload files into query descriptions.
//!
//! No I/O here; callers load schema and statistics first (see
//! `costwise-io`) and pass them in.

pub mod dsl;
pub mod formulas;
pub mod operators;
pub mod query;
pub mod sharding;

pub use dsl::yaml::{parse_workload, QueryDef, Workload};
pub use formulas::{wire_cost, WireCost};
pub use operators::{CostEngine, CostResult};
pub use query::{FilterQuery, JoinQuery};
pub use sharding::{placement, resolve_cardinality, resolve_fanout, Placement};
