//! Latest-item fetching.

use std::time::Duration;

use tracing::{debug, trace};

use crate::config::FetcherConfig;
use crate::error::FetchError;
use crate::source::QueueSource;
use crate::strategy::DrainPolicy;

/// Retrieves the single freshest item from a shared queue, discarding the
/// backlog behind it.
///
/// The fetcher holds the consumer handle for its lifetime and performs no
/// internal parallelism; producers fill the queue from other tasks, threads
/// or processes. There is exactly one potential blocking point, the initial
/// wait, bounded by the timeout. Draining is non-blocking throughout and
/// stops as soon as the queue is observed empty.
pub struct LatestItemFetcher<Q: QueueSource> {
    source: Q,
    config: FetcherConfig,
    policy: DrainPolicy,
    items_discarded: u64,
}

impl<Q: QueueSource> LatestItemFetcher<Q> {
    /// Create a fetcher with the default configuration.
    pub fn new(source: Q) -> Self {
        Self::with_config(source, FetcherConfig::default())
    }

    /// Create a fetcher with a custom configuration.
    pub fn with_config(source: Q, config: FetcherConfig) -> Self {
        let policy = config.drain.resolve(&source);
        Self {
            source,
            config,
            policy,
            items_discarded: 0,
        }
    }

    /// Drain strategy resolved at construction.
    pub fn policy(&self) -> DrainPolicy {
        self.policy
    }

    /// Total items dropped by draining over this fetcher's lifetime.
    pub fn items_discarded(&self) -> u64 {
        self.items_discarded
    }

    /// Give the queue handle back to the caller.
    pub fn into_inner(self) -> Q {
        self.source
    }

    /// Fetch the newest item with the configured blocking mode and timeout.
    pub async fn latest(&mut self) -> Result<Option<Q::Item>, FetchError> {
        let block = self.config.block;
        let timeout = self.config.timeout();
        self.fetch(block, timeout).await
    }

    /// Fetch the newest available item, discarding everything older.
    ///
    /// With `block` set, waits up to `timeout` for the first item; if none
    /// arrives the call returns `Ok(None)` without touching the queue
    /// further. Without `block`, the drain loop runs immediately over
    /// whatever has already landed. `Ok(None)` is a normal outcome, not a
    /// failure. Every drained item except the returned one is gone for good.
    pub async fn fetch(
        &mut self,
        block: bool,
        timeout: Duration,
    ) -> Result<Option<Q::Item>, FetchError> {
        let mut newest = if block {
            match self.source.recv_timeout(timeout).await? {
                Some(item) => Some(item),
                None => {
                    // Timed out on an empty queue; it is almost certainly
                    // still empty, so skip the drain entirely.
                    debug!(timeout_ms = timeout.as_millis() as u64, "fetch timed out");
                    return Ok(None);
                }
            }
        } else {
            None
        };

        let discarded_before = self.items_discarded;
        match self.policy {
            DrainPolicy::Exhaustive | DrainPolicy::Auto => {
                self.drain_exhaustive(&mut newest)?
            }
            DrainPolicy::SizeHinted => self.drain_size_hinted(&mut newest)?,
        }

        let discarded = self.items_discarded - discarded_before;
        debug!(
            discarded,
            found = newest.is_some(),
            "fetch complete"
        );
        Ok(newest)
    }

    /// Tight loop until the empty-signal; the only safe strategy when the
    /// queue's size counter is unreliable.
    fn drain_exhaustive(&mut self, newest: &mut Option<Q::Item>) -> Result<(), FetchError> {
        while let Some(item) = self.source.try_recv()? {
            if newest.replace(item).is_some() {
                self.items_discarded += 1;
                trace!("discarded stale item");
            }
        }
        Ok(())
    }

    /// Loop while the approximate size reports pending items. The size is
    /// best-effort under concurrent producers, so the loop may under- or
    /// over-drain by a small margin; an empty-signal after a positive size
    /// check is a race and the size is simply re-checked.
    fn drain_size_hinted(&mut self, newest: &mut Option<Q::Item>) -> Result<(), FetchError> {
        while self.source.len_hint().is_some_and(|n| n > 0) {
            if let Some(item) = self.source.try_recv()? {
                if newest.replace(item).is_some() {
                    self.items_discarded += 1;
                    trace!("discarded stale item");
                }
            }
        }
        Ok(())
    }
}
