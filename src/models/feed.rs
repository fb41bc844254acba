//! Feed item: one entry of a feed list

use super::{FeedKind, Notification, NotificationEntity, Status, StatusEntity, StatusId};

/// What a feed item carries
#[derive(Debug, Clone, PartialEq)]
pub enum FeedPayload {
    /// A status (home timeline)
    Status(Status),
    /// A notification (notification feeds)
    Notification(Notification),
}

/// An entry of a feed list
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    /// Stable identity within the list
    ///
    /// Set from the status or notification ID on creation and kept when the
    /// payload is later replaced. Older pages are requested from the last
    /// item's identity: the server pages statuses by status ID and
    /// notifications by notification ID.
    pub id: StatusId,
    /// Feed this item belongs to
    pub kind: FeedKind,
    /// The record itself
    pub payload: FeedPayload,
}

impl FeedItem {
    /// Wrap a status record
    pub fn from_status(status: Status, kind: FeedKind) -> Self {
        Self {
            id: status.id.clone(),
            kind,
            payload: FeedPayload::Status(status),
        }
    }

    /// Wrap a notification record
    pub fn from_notification(notification: Notification, kind: FeedKind) -> Self {
        Self {
            id: notification.id.clone(),
            kind,
            payload: FeedPayload::Notification(notification),
        }
    }

    /// Build an item straight from a status entity
    pub fn from_status_entity(entity: StatusEntity, kind: FeedKind) -> Self {
        Self::from_status(Status::from_entity(entity), kind)
    }

    /// Build an item straight from a notification entity
    pub fn from_notification_entity(entity: NotificationEntity, kind: FeedKind) -> Self {
        Self::from_notification(Notification::from_entity(entity), kind)
    }

    /// The status payload, if this item is a status
    pub fn status(&self) -> Option<&Status> {
        match &self.payload {
            FeedPayload::Status(status) => Some(status),
            FeedPayload::Notification(_) => None,
        }
    }

    /// The notification payload, if this item is a notification
    pub fn notification(&self) -> Option<&Notification> {
        match &self.payload {
            FeedPayload::Status(_) => None,
            FeedPayload::Notification(notification) => Some(notification),
        }
    }

    /// Swap in a new status payload, keeping identity and kind
    pub(crate) fn with_status(&self, status: Status) -> Self {
        Self {
            id: self.id.clone(),
            kind: self.kind,
            payload: FeedPayload::Status(status),
        }
    }
}
