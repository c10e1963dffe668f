//! # freshq
//!
//! Latest-item fetching over shared producer-consumer queues.
//!
//! In control loops (robot teleoperation, ML inference pipelines) a fast
//! producer can outpace a slower consumer. The consumer only cares about the
//! newest state, not the backlog of stale states behind it. [`LatestItemFetcher`]
//! wraps a queue handle and exposes one operation: wait (optionally, with a
//! timeout) for at least one item, then non-blockingly drain everything else
//! and return the last item seen.
//!
//! ## Features
//!
//! - Single get-latest-and-drain operation, lossy by design
//! - Pluggable queue transport via the [`QueueSource`] trait
//! - Two drain strategies behind one interface, selected at construction
//! - Empty queue is a normal outcome, never an error
//!
//! Draining is destructive: every item it examines is consumed, and discarded
//! items are not recoverable by any other consumer.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod source;
pub mod strategy;

pub use config::FetcherConfig;
pub use error::FetchError;
pub use fetcher::LatestItemFetcher;
pub use source::QueueSource;
pub use strategy::DrainPolicy;
