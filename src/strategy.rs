//! Drain strategy selection.

use serde::{Deserialize, Serialize};

use crate::source::QueueSource;

/// How the fetcher empties the backlog behind the first item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrainPolicy {
    /// Probe the queue at construction and pick for it.
    Auto,
    /// Tight non-blocking loop until the empty-signal. Required where the
    /// queue's size counter is unreliable (macOS semaphore counters) or
    /// absent.
    Exhaustive,
    /// Loop while the approximate size reports pending items; races between
    /// the size check and the dequeue are ignored and the size re-checked.
    SizeHinted,
}

impl Default for DrainPolicy {
    fn default() -> Self {
        DrainPolicy::Auto
    }
}

impl DrainPolicy {
    /// Strategy suiting the platform this binary runs on.
    ///
    /// Darwin's `sem_getvalue` is broken, so cross-process queue size
    /// counters cannot be trusted there and the backlog is drained blind.
    pub fn for_current_platform() -> Self {
        if cfg!(target_os = "macos") {
            DrainPolicy::Exhaustive
        } else {
            DrainPolicy::SizeHinted
        }
    }

    /// Resolve `Auto` against a concrete queue, once, at construction.
    pub(crate) fn resolve<Q: QueueSource>(self, source: &Q) -> DrainPolicy {
        match self {
            DrainPolicy::Auto => {
                if source.len_hint().is_none() {
                    DrainPolicy::Exhaustive
                } else {
                    DrainPolicy::for_current_platform()
                }
            }
            chosen => chosen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_explicit_policy_wins_over_probe() {
        let (_tx, rx) = mpsc::channel::<u8>(1);
        assert_eq!(DrainPolicy::Exhaustive.resolve(&rx), DrainPolicy::Exhaustive);
        assert_eq!(DrainPolicy::SizeHinted.resolve(&rx), DrainPolicy::SizeHinted);
    }

    #[test]
    fn test_auto_resolves_for_sized_queue() {
        let (_tx, rx) = mpsc::channel::<u8>(1);
        assert_eq!(DrainPolicy::Auto.resolve(&rx), DrainPolicy::for_current_platform());
    }

    #[test]
    fn test_serde_names() {
        let policy: DrainPolicy = serde_json::from_str(r#""size_hinted""#).unwrap();
        assert_eq!(policy, DrainPolicy::SizeHinted);
    }
}
