//! Snapshot publishing
//!
//! Every mutation of a feed publishes the whole list. Subscribers get the
//! latest snapshot right away and every later one until they drop the stream.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::models::{FeedItem, FeedKind};

/// Default number of snapshots a slow subscriber may fall behind by
pub const DEFAULT_SNAPSHOT_BUFFER: usize = 64;

/// The full feed list at one point in time
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Increases by one with every published mutation
    pub version: u64,
    /// Feed the list was loaded for, `None` before the first load
    pub kind: Option<FeedKind>,
    /// Items, newest first
    pub items: Arc<Vec<FeedItem>>,
}

impl Snapshot {
    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Producer side, owned by the feed
#[derive(Debug)]
pub struct SnapshotPublisher {
    latest: Snapshot,
    tx: broadcast::Sender<Snapshot>,
}

impl SnapshotPublisher {
    /// Create a publisher holding an empty version-0 snapshot
    pub fn new(buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer.max(1));
        Self {
            latest: Snapshot::default(),
            tx,
        }
    }

    /// The most recently published snapshot
    pub fn latest(&self) -> &Snapshot {
        &self.latest
    }

    /// Publish a new list, returning the snapshot that was sent
    pub fn publish(&mut self, kind: Option<FeedKind>, items: Arc<Vec<FeedItem>>) -> Snapshot {
        let snapshot = Snapshot {
            version: self.latest.version + 1,
            kind,
            items,
        };
        self.latest = snapshot.clone();

        // No subscribers is fine
        let _ = self.tx.send(snapshot.clone());
        snapshot
    }

    /// Start observing: current snapshot plus all later ones
    pub fn subscribe(&self) -> SnapshotStream {
        SnapshotStream {
            current: self.latest.clone(),
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_BUFFER)
    }
}

/// Consumer side, handed out by [`SnapshotPublisher::subscribe`]
#[derive(Debug)]
pub struct SnapshotStream {
    current: Snapshot,
    rx: broadcast::Receiver<Snapshot>,
}

impl SnapshotStream {
    /// Latest snapshot seen by this stream
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// Wait for the next snapshot
    ///
    /// Returns `None` once the feed is gone. A subscriber that fell too far
    /// behind skips the snapshots it missed.
    pub async fn next(&mut self) -> Option<Snapshot> {
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => {
                    self.current = snapshot.clone();
                    return Some(snapshot);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Snapshot subscriber lagged, skipped {skipped} snapshots");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Take the next snapshot if one is already waiting
    pub fn try_next(&mut self) -> Option<Snapshot> {
        loop {
            match self.rx.try_recv() {
                Ok(snapshot) => {
                    self.current = snapshot.clone();
                    return Some(snapshot);
                }
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Snapshot subscriber lagged, skipped {skipped} snapshots");
                }
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_sees_latest_then_updates() {
        let mut publisher = SnapshotPublisher::new(8);
        publisher.publish(Some(FeedKind::Home), Arc::new(Vec::new()));

        let mut stream = publisher.subscribe();
        assert_eq!(stream.current().version, 1);

        publisher.publish(Some(FeedKind::Home), Arc::new(Vec::new()));
        publisher.publish(Some(FeedKind::Home), Arc::new(Vec::new()));

        assert_eq!(stream.next().await.map(|s| s.version), Some(2));
        assert_eq!(stream.next().await.map(|s| s.version), Some(3));
        assert_eq!(stream.current().version, 3);
        assert!(stream.try_next().is_none());
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips_ahead() {
        let mut publisher = SnapshotPublisher::new(2);
        let mut stream = publisher.subscribe();

        for _ in 0..5 {
            publisher.publish(None, Arc::new(Vec::new()));
        }

        let next = stream.next().await.map(|s| s.version);
        assert_eq!(next, Some(4));
    }

    #[tokio::test]
    async fn test_stream_ends_when_publisher_dropped() {
        let publisher = SnapshotPublisher::default();
        let mut stream = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 1);

        drop(publisher);
        assert!(stream.next().await.is_none());
    }
}
