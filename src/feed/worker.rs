//! Feed worker
//!
//! Moves a [`FeedController`] into a background task and feeds it commands
//! through a channel, so any number of callers can share one feed while the
//! list keeps a single writer.

use tokio::sync::{mpsc, oneshot};

use crate::api::FeedSource;
use crate::error::{FeedError, Result};
use crate::models::{FeedKind, Status};

use super::controller::FeedController;
use super::snapshot::{Snapshot, SnapshotStream};

/// Commands accepted by the feed task
#[derive(Debug)]
enum FeedCommand {
    /// Replace the list with the first page
    LoadInitial {
        kind: FeedKind,
        reply: oneshot::Sender<Result<Snapshot>>,
    },
    /// Append the next older page
    LoadNext {
        kind: FeedKind,
        reply: oneshot::Sender<Result<Snapshot>>,
    },
    /// Reconcile a fresh status into the list
    Update {
        status: Box<Status>,
        reply: oneshot::Sender<Result<Snapshot>>,
    },
    /// Drop items for a deleted status
    Delete {
        status: Box<Status>,
        reply: oneshot::Sender<Snapshot>,
    },
    /// Open a snapshot stream
    Subscribe { reply: oneshot::Sender<SnapshotStream> },
    /// Stop the task
    Shutdown,
}

/// Cloneable handle to a feed running in the background
#[derive(Debug, Clone)]
pub struct FeedHandle {
    cmd_tx: mpsc::Sender<FeedCommand>,
}

/// Spawn the feed task and return a handle to it
///
/// Commands run strictly in the order they were sent. The task ends when
/// every handle is dropped or [`FeedHandle::shutdown`] is called.
pub fn spawn_feed<S>(controller: FeedController<S>) -> FeedHandle
where
    S: FeedSource + Send + Sync + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<FeedCommand>(32);
    tokio::spawn(feed_task(controller, cmd_rx));
    FeedHandle { cmd_tx }
}

async fn feed_task<S>(mut controller: FeedController<S>, mut cmd_rx: mpsc::Receiver<FeedCommand>)
where
    S: FeedSource + Send + Sync + 'static,
{
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            FeedCommand::LoadInitial { kind, reply } => {
                let _ = reply.send(controller.load_initial(kind).await);
            }
            FeedCommand::LoadNext { kind, reply } => {
                let _ = reply.send(controller.load_next(kind).await);
            }
            FeedCommand::Update { status, reply } => {
                let _ = reply.send(controller.update(&status));
            }
            FeedCommand::Delete { status, reply } => {
                let _ = reply.send(controller.delete(&status));
            }
            FeedCommand::Subscribe { reply } => {
                let _ = reply.send(controller.subscribe());
            }
            FeedCommand::Shutdown => break,
        }
    }

    tracing::debug!("Feed worker shutting down");
}

impl FeedHandle {
    /// Replace the list with the first page of `kind`
    pub async fn load_initial(&self, kind: FeedKind) -> Result<Snapshot> {
        self.request(|reply| FeedCommand::LoadInitial { kind, reply })
            .await?
    }

    /// Append the page older than the oldest loaded item
    pub async fn load_next(&self, kind: FeedKind) -> Result<Snapshot> {
        self.request(|reply| FeedCommand::LoadNext { kind, reply })
            .await?
    }

    /// Reconcile a fresh status into the list
    pub async fn update(&self, status: Status) -> Result<Snapshot> {
        self.request(|reply| FeedCommand::Update {
            status: Box::new(status),
            reply,
        })
        .await?
    }

    /// Remove items for a deleted status
    pub async fn delete(&self, status: Status) -> Result<Snapshot> {
        self.request(|reply| FeedCommand::Delete {
            status: Box::new(status),
            reply,
        })
        .await
    }

    /// Observe the list: the snapshot at the time of the call plus all later ones
    pub async fn subscribe(&self) -> Result<SnapshotStream> {
        self.request(|reply| FeedCommand::Subscribe { reply }).await
    }

    /// Ask the task to stop once queued commands are done
    pub async fn shutdown(&self) {
        let _ = self.cmd_tx.send(FeedCommand::Shutdown).await;
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> FeedCommand,
    ) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.cmd_tx
            .send(command(reply))
            .await
            .map_err(|_| FeedError::Closed)?;
        response.await.map_err(|_| FeedError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::controller::tests::{ScriptedSource, boost, entity, home, status};
    use tokio_test::assert_ok;

    fn spawn_with(items: Vec<crate::models::FeedItem>) -> FeedHandle {
        spawn_feed(FeedController::new(ScriptedSource::with_items(items)))
    }

    #[tokio::test]
    async fn test_commands_run_in_order() {
        let s = entity("1", "alice");
        let handle = spawn_with(vec![
            home(Status::from_entity(s.clone())),
            home(boost("2", s.clone(), false)),
            home(status("3")),
        ]);
        let mut stream = assert_ok!(handle.subscribe().await);
        assert_eq!(stream.current().version, 0);

        let (loaded, deleted) = tokio::join!(
            handle.load_initial(FeedKind::Home),
            handle.delete(Status::from_entity(s))
        );
        assert_eq!(assert_ok!(loaded).len(), 3);
        assert_eq!(assert_ok!(deleted).len(), 2);

        assert_eq!(stream.next().await.map(|snap| snap.version), Some(1));
        let latest = stream.next().await.unwrap();
        assert_eq!(latest.version, 2);
        assert_eq!(latest.items[0].id.as_str(), "2");
    }

    #[tokio::test]
    async fn test_update_errors_come_back_to_caller() {
        let handle = spawn_with(Vec::new());
        let mut looped = status("1");
        looped.reblog = Some(Box::new(status("1")));

        let result = handle.update(looped).await;
        assert!(matches!(result, Err(FeedError::InvalidUpdate(_))));
    }

    #[tokio::test]
    async fn test_closed_after_shutdown() {
        let handle = spawn_with(Vec::new());
        handle.shutdown().await;

        // Give the task a chance to exit
        tokio::task::yield_now().await;
        let result = handle.load_next(FeedKind::Home).await;
        assert!(matches!(result, Err(FeedError::Closed)));
    }
}
