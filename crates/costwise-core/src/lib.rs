#![forbid(unsafe_code)]
//! costwise-core: schema model, statistics snapshot, size formulas, fixed
//! constants, and the workspace error type.
//!
//! Everything here is pure data and pure arithmetic. File parsing lives in
//! `costwise-io`; the operator cost engine lives in `costwise-model`. Core
//! deliberately has no I/O, no logging, and no async.

pub mod config;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod sizes;
pub mod stats;

pub use error::{Error, Result};
pub use schema::{Collection, Database, Field, FieldKind};
pub use stats::Statistics;
