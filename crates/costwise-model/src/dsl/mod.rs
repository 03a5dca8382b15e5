//! Workload description DSL.

pub mod yaml;
