//! Errors
use thiserror::Error;

/// Errors raised by the engine before any worker is started.
///
/// Query times outside of the valid range are not an error; their output
/// slots are simply left untouched.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration field was set to an unsupported value.
    #[error("invalid configuration: {field} must be positive, got {value}")]
    Configuration {
        /// Name of the field
        field: &'static str,
        /// Rejected value
        value: usize,
    },
    /// Output buffer does not match the query times.
    #[error("output buffer has length {output}, but {queries} query times were given")]
    Precondition {
        /// Number of query times
        queries: usize,
        /// Length of the output buffer
        output: usize,
    },
    /// Input sample period is not a positive, finite number.
    #[error("input period must be positive and finite, got {0}")]
    InvalidPeriod(f64),
    /// A worker thread could not be spawned.
    #[error("cannot spawn worker thread")]
    Spawn(#[from] std::io::Error),
    /// A worker thread panicked.
    #[error("worker thread panicked")]
    WorkerPanicked,
}
