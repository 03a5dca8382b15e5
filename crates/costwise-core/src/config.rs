//! Fixed model constants shared by every cost computation.
//!
//! These are calibration inputs to the estimator, not tunables: the whole
//! point of the model is that two people running it over the same schema and
//! statistics get the same numbers.

/// Every JSON field carries one key/overhead charge of this many bytes,
/// regardless of kind.
pub const KEY_OVERHEAD_BYTES: f64 = 12.0;

/// Network throughput used to turn bytes moved into seconds: 100 MiB/s.
pub const NETWORK_THROUGHPUT_BPS: f64 = 100.0 * 1024.0 * 1024.0;

/// In-memory (CPU-side) throughput: 25 GiB/s.
pub const CPU_THROUGHPUT_BPS: f64 = 25.0 * 1024.0 * 1024.0 * 1024.0;

/// 1 GB = 2^30 bytes throughout the model.
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// kg CO2-eq emitted per GB moved across the network.
pub const CO2_PER_GB: f64 = 0.011;

/// Monetary cost per GB moved. Numerically identical to [`CO2_PER_GB`] by
/// specification, not by coincidence.
pub const PRICE_PER_GB: f64 = 0.011;

/// Cluster size assumed when the statistics file does not say otherwise.
pub const DEFAULT_SERVERS: u64 = 1000;
