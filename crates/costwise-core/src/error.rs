use thiserror::Error;

/// Canonical result for the whole workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// All failures are precondition failures in the query description, schema,
/// or statistics files. They are detected before any cost arithmetic runs
/// and are never retried: the computation is deterministic, so retrying
/// cannot change the outcome.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown collection '{0}'")]
    UnknownCollection(String),

    #[error("unknown field '{field}' in collection '{collection}'")]
    UnknownField { collection: String, field: String },

    /// A distinct-value count, document count, or server count that the
    /// requested estimate depends on is absent or non-positive. Substituting
    /// a default here would silently falsify every downstream cost number,
    /// so this is fatal.
    #[error("missing or non-positive statistic '{statistic}' for collection '{collection}'")]
    MissingStatistic { collection: String, statistic: String },

    #[error("sharding key component '{field}' is not a field of collection '{collection}'")]
    InvalidShardingKey { collection: String, field: String },

    /// An *explicit* type string outside the recognized set. A field with no
    /// type at all is not an error; the schema reader defaults it to string.
    #[error("unsupported field kind '{kind}' for field '{field}'")]
    UnsupportedFieldKind { field: String, kind: String },

    #[error("schema error: {0}")]
    Schema(String),

    #[error("statistics error: {0}")]
    Stats(String),

    #[error("workload error: {0}")]
    Workload(String),
}
