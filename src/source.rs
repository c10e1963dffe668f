//! Queue transport seam.
//!
//! The fetcher never owns the queue's transport; it talks to whatever channel
//! the pipeline hands it through [`QueueSource`]. Adapters for the tokio mpsc
//! receivers are provided; other transports implement the trait themselves.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::FetchError;

/// Consumer-side handle to a shared producer-consumer queue.
///
/// `Ok(None)` from [`recv_timeout`](Self::recv_timeout) means the wait timed
/// out; `Ok(None)` from [`try_recv`](Self::try_recv) means the queue was
/// empty at that instant. Neither is an error. Transport faults (all
/// producers gone) are `Err` and pass through the fetcher untouched.
#[async_trait]
pub trait QueueSource: Send {
    /// Item type carried by the queue.
    type Item: Send;

    /// Wait up to `timeout` for an item.
    async fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Self::Item>, FetchError>;

    /// Take an item if one is immediately available.
    fn try_recv(&mut self) -> Result<Option<Self::Item>, FetchError>;

    /// Best-effort count of items currently enqueued.
    ///
    /// `None` means the transport has no trustworthy count and the fetcher
    /// must drain blind.
    fn len_hint(&self) -> Option<usize>;
}

#[async_trait]
impl<T: Send> QueueSource for mpsc::Receiver<T> {
    type Item = T;

    async fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<T>, FetchError> {
        match tokio::time::timeout(timeout, self.recv()).await {
            Ok(Some(item)) => Ok(Some(item)),
            Ok(None) => Err(FetchError::Disconnected),
            Err(_) => Ok(None),
        }
    }

    fn try_recv(&mut self) -> Result<Option<T>, FetchError> {
        match mpsc::Receiver::try_recv(self) {
            Ok(item) => Ok(Some(item)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(FetchError::Disconnected),
        }
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

#[async_trait]
impl<T: Send> QueueSource for mpsc::UnboundedReceiver<T> {
    type Item = T;

    async fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<T>, FetchError> {
        match tokio::time::timeout(timeout, self.recv()).await {
            Ok(Some(item)) => Ok(Some(item)),
            Ok(None) => Err(FetchError::Disconnected),
            Err(_) => Ok(None),
        }
    }

    fn try_recv(&mut self) -> Result<Option<T>, FetchError> {
        match mpsc::UnboundedReceiver::try_recv(self) {
            Ok(item) => Ok(Some(item)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(FetchError::Disconnected),
        }
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_try_recv_empty_is_not_an_error() {
        let (_tx, mut rx) = mpsc::channel::<u32>(4);
        assert!(matches!(QueueSource::try_recv(&mut rx), Ok(None)));
    }

    #[tokio::test]
    async fn test_try_recv_disconnected() {
        let (tx, mut rx) = mpsc::channel::<u32>(4);
        drop(tx);
        assert!(matches!(
            QueueSource::try_recv(&mut rx),
            Err(FetchError::Disconnected)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recv_timeout_elapses() {
        let (_tx, mut rx) = mpsc::channel::<u32>(4);
        let got = rx.recv_timeout(Duration::from_millis(50)).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_len_hint_tracks_queue() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(1).unwrap();
        tx.send(2).unwrap();
        assert_eq!(rx.len_hint(), Some(2));
        QueueSource::try_recv(&mut rx).unwrap();
        assert_eq!(rx.len_hint(), Some(1));
    }
}
