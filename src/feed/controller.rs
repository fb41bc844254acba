//! Feed controller: owns one ordered feed list and reconciles updates into it

use std::collections::HashSet;
use std::sync::Arc;

use crate::api::{DEFAULT_PAGE_LIMIT, FeedSource, PageRequest};
use crate::error::{FeedError, Result};
use crate::models::{FeedItem, FeedKind, FeedPayload, Notification, Status, StatusId};

use super::snapshot::{DEFAULT_SNAPSHOT_BUFFER, Snapshot, SnapshotPublisher, SnapshotStream};

/// Owner of a feed list
///
/// Every entry point takes `&mut self`, so whoever owns the controller
/// serializes loads, updates and deletes. Loads only touch the list after the
/// fetch resolved: dropping a pending load leaves the list as it was.
pub struct FeedController<S> {
    source: S,
    kind: Option<FeedKind>,
    records: Arc<Vec<FeedItem>>,
    page_limit: usize,
    publisher: SnapshotPublisher,
}

impl<S: FeedSource> FeedController<S> {
    /// Create an empty feed backed by `source`
    pub fn new(source: S) -> Self {
        Self::with_options(source, DEFAULT_PAGE_LIMIT, DEFAULT_SNAPSHOT_BUFFER)
    }

    /// Create an empty feed with explicit page size and subscriber buffer
    pub fn with_options(source: S, page_limit: usize, snapshot_buffer: usize) -> Self {
        Self {
            source,
            kind: None,
            records: Arc::new(Vec::new()),
            page_limit: page_limit.max(1),
            publisher: SnapshotPublisher::new(snapshot_buffer),
        }
    }

    /// Current items, newest first
    pub fn records(&self) -> &[FeedItem] {
        &self.records
    }

    /// Feed currently loaded
    pub fn kind(&self) -> Option<FeedKind> {
        self.kind
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> &Snapshot {
        self.publisher.latest()
    }

    /// Observe the list
    pub fn subscribe(&self) -> SnapshotStream {
        self.publisher.subscribe()
    }

    /// The backing source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replace the list with the first page of `kind`
    pub async fn load_initial(&mut self, kind: FeedKind) -> Result<Snapshot> {
        let page = self.fetch(PageRequest::first(kind, self.page_limit)).await?;

        let mut seen = HashSet::new();
        let records: Vec<FeedItem> = page
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .collect();

        tracing::info!("Loaded {} {} items", records.len(), kind);
        self.kind = Some(kind);
        Ok(self.publish(records))
    }

    /// Append the page older than the oldest loaded item
    ///
    /// The cursor is the oldest item's identity, which `update` never changes,
    /// so paging keeps going after its payload was swapped. Falls back to [`load_initial`](Self::load_initial) when nothing of
    /// `kind` is loaded yet.
    pub async fn load_next(&mut self, kind: FeedKind) -> Result<Snapshot> {
        if self.kind != Some(kind) {
            return self.load_initial(kind).await;
        }
        let Some(cursor) = self.records.last().map(|item| item.id.clone()) else {
            return self.load_initial(kind).await;
        };

        let request = PageRequest::older_than(kind, cursor.clone(), self.page_limit);
        let page = self.fetch(request).await?;

        let mut seen: HashSet<StatusId> = self.records.iter().map(|item| item.id.clone()).collect();
        let mut records = Vec::with_capacity(self.records.len() + page.len());
        records.extend(self.records.iter().cloned());

        let mut skipped = 0;
        for item in page {
            if !seen.insert(item.id.clone()) {
                skipped += 1;
                continue;
            }
            records.push(item);
        }

        if skipped > 0 {
            tracing::debug!("Dropped {skipped} already loaded items older than {cursor}");
        }
        tracing::info!(
            "Loaded {} more {} items",
            records.len() - self.records.len(),
            kind
        );
        Ok(self.publish(records))
    }

    /// Apply a fresh copy of a status everywhere it shows up
    ///
    /// Each item is checked on its own, so one call can touch several items:
    /// the status itself, boosts of it, and boosts of the status it boosts.
    /// Only one level of boost wrapping is looked at.
    pub fn update(&mut self, status: &Status) -> Result<Snapshot> {
        validate(status)?;

        let mut changed = 0;
        let records: Vec<FeedItem> = self
            .records
            .iter()
            .map(|item| match reconcile(item, status) {
                Some(updated) => {
                    changed += 1;
                    updated
                }
                None => item.clone(),
            })
            .collect();

        tracing::debug!("Status {} updated {changed} items", status.id);
        Ok(self.publish(records))
    }

    /// Remove every item whose identity is `status`
    ///
    /// Boosts of the deleted status stay in the list.
    pub fn delete(&mut self, status: &Status) -> Snapshot {
        self.remove(&status.id)
    }

    /// Remove every item with the given identity
    pub fn remove(&mut self, id: &StatusId) -> Snapshot {
        let records: Vec<FeedItem> = self
            .records
            .iter()
            .filter(|item| &item.id != id)
            .cloned()
            .collect();

        tracing::debug!("Removed {} items for {id}", self.records.len() - records.len());
        self.publish(records)
    }

    async fn fetch(&self, request: PageRequest) -> Result<Vec<FeedItem>> {
        let kind = request.kind;
        self.source.fetch(request).await.map_err(|source| {
            tracing::warn!("Failed to load {kind} feed: {source}");
            FeedError::Fetch { kind, source }
        })
    }

    fn publish(&mut self, records: Vec<FeedItem>) -> Snapshot {
        self.records = Arc::new(records);
        self.publisher.publish(self.kind, Arc::clone(&self.records))
    }
}

/// Refuse updates that would corrupt the list
fn validate(status: &Status) -> Result<()> {
    if status.id.is_empty() {
        return Err(FeedError::InvalidUpdate("status has no id".to_string()));
    }
    if let Some(reblog) = &status.reblog {
        if reblog.id.is_empty() {
            return Err(FeedError::InvalidUpdate(format!(
                "status {} boosts a status with no id",
                status.id
            )));
        }
        if reblog.id == status.id {
            return Err(FeedError::InvalidUpdate(format!(
                "status {} boosts itself",
                status.id
            )));
        }
    }
    Ok(())
}

/// New version of `item` after `incoming` arrived, or `None` if unaffected
fn reconcile(item: &FeedItem, incoming: &Status) -> Option<FeedItem> {
    match &item.payload {
        FeedPayload::Status(existing) => {
            reconcile_status(existing, incoming).map(|status| item.with_status(status))
        }
        FeedPayload::Notification(notification) => {
            let embedded = notification.status.as_ref()?;
            if embedded.id != incoming.id {
                return None;
            }
            let notification = Notification {
                status: Some(incoming.clone()),
                ..notification.clone()
            };
            Some(FeedItem {
                payload: FeedPayload::Notification(notification),
                ..item.clone()
            })
        }
    }
}

fn reconcile_status(existing: &Status, incoming: &Status) -> Option<Status> {
    let incoming_reblog = incoming.reblog.as_ref().map(|reblog| &reblog.id);
    let existing_reblog = existing.reblog.as_ref().map(|reblog| &reblog.id);

    if existing.id == incoming.id {
        // Same status
        Some(incoming.clone())
    } else if incoming_reblog == Some(&existing.id) {
        // Incoming boosts this item
        Some(incoming.clone())
    } else if existing_reblog == Some(&incoming.id) {
        // This item boosts the incoming status
        Some(rewrap(existing, incoming))
    } else if existing_reblog.is_some() && existing_reblog == incoming_reblog {
        // Both boost the same status
        Some(incoming.clone())
    } else {
        None
    }
}

/// Refresh a boost whose boosted status changed
///
/// `existing` always wraps `incoming` here.
fn rewrap(existing: &Status, incoming: &Status) -> Status {
    let unboosted = existing.entity.is_reblogged() && !incoming.entity.is_reblogged();

    let mut status = if unboosted {
        // The boost was ours and is gone: show the original on its own
        let mut status = Status::from_entity(incoming.entity.clone());
        status.entity.reblog = None;
        status.reblog = None;
        status
    } else {
        let mut status = Status::from_entity(existing.entity.clone());
        status.entity.reblog = Some(Box::new(incoming.entity.clone()));
        status.reblog = Some(Box::new(Status::from_entity(incoming.entity.clone())));
        status
    };
    status.reveal_sensitive = incoming.reveal_sensitive;
    status
}
