//! Convenience re-exports for downstream crates.

pub use crate::error::{Error, Result};
pub use crate::schema::{Collection, Database, Field, FieldKind};
pub use crate::stats::Statistics;
