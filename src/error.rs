//! Fetch errors.
//!
//! An empty queue is not represented here: both the initial timed-out wait
//! and the drain loop's empty-signal are ordinary `Ok(None)` outcomes.

use thiserror::Error;

/// Fetch error types.
#[derive(Debug, Error)]
pub enum FetchError {
    /// All producers dropped and the queue is drained.
    #[error("queue disconnected: all producers dropped")]
    Disconnected,

    /// Transport-specific fault from a foreign queue adapter.
    #[error("{0}")]
    Custom(String),
}
