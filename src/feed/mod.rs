//! Feed reconciliation
//!
//! A [`FeedController`] owns the ordered list for one feed. Pages come in
//! from a [`FeedSource`](crate::api::FeedSource) and fresh statuses coming
//! back from boosts, edits or deletes are reconciled into the list in place.
//! Each change is published as a [`Snapshot`].

mod controller;
mod snapshot;
mod worker;

pub use controller::FeedController;
pub use snapshot::{DEFAULT_SNAPSHOT_BUFFER, Snapshot, SnapshotPublisher, SnapshotStream};
pub use worker::{FeedHandle, spawn_feed};
