use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for configuration, scheduling and I/O failures.
///
/// Each variant carries enough context to be actionable; the simulation core never
/// panics on bad input and instead surfaces one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Two particles overlap in the initial configuration.
    #[error("particles '{a}' and '{b}' overlap")]
    Overlap { a: String, b: String },

    /// A particle crosses or lies outside the arena boundary.
    #[error("particle '{name}' is not inside the arena")]
    OutOfArena { name: String },

    /// Malformed line in a text configuration.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Numerical or geometric issue (e.g., coincident centers at contact).
    #[error("numerical error: {0}")]
    Math(String),

    /// Extraction from an empty event queue: a scheduling bug, not a runtime condition.
    #[error("event queue is empty")]
    EmptyQueue,

    /// Propagated I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failures for configs and reports.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
