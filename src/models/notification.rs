//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountEntity, Status, StatusEntity, StatusId};

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Someone mentioned the user
    Mention,
    /// Someone the user subscribed to posted
    Status,
    /// Someone boosted one of the user's statuses
    Reblog,
    /// Someone followed the user
    Follow,
    /// Someone asked to follow the user
    FollowRequest,
    /// Someone favourited one of the user's statuses
    Favourite,
    /// A poll the user voted in or created has ended
    Poll,
    /// A status the user interacted with was edited
    Update,
    /// Anything this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl NotificationType {
    /// Get the emoji icon
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Mention => "💬",
            Self::Status => "📝",
            Self::Reblog => "🔁",
            Self::Follow | Self::FollowRequest => "👋",
            Self::Favourite => "♥",
            Self::Poll => "📊",
            Self::Update => "✏️",
            Self::Unknown => "•",
        }
    }
}

/// Notification as delivered by the Mastodon API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEntity {
    /// Server-side notification ID
    pub id: StatusId,
    /// What happened
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// When it happened
    pub created_at: DateTime<Utc>,
    /// Who did it
    pub account: AccountEntity,
    /// The status involved, for status-related notifications
    #[serde(default)]
    pub status: Option<StatusEntity>,
}

/// A notification as held in a feed
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Server-side notification ID
    pub id: StatusId,
    /// What happened
    pub notification_type: NotificationType,
    /// When it happened
    pub created_at: DateTime<Utc>,
    /// Who did it
    pub account: AccountEntity,
    /// Record of the status involved
    pub status: Option<Status>,
}

impl Notification {
    /// Build a record from a server entity
    pub fn from_entity(entity: NotificationEntity) -> Self {
        Self {
            id: entity.id,
            notification_type: entity.notification_type,
            created_at: entity.created_at,
            account: entity.account,
            status: entity.status.map(Status::from_entity),
        }
    }

    /// One-line summary for list display
    pub fn summary(&self) -> String {
        let action = match self.notification_type {
            NotificationType::Mention => "mentioned you",
            NotificationType::Status => "posted",
            NotificationType::Reblog => "boosted your post",
            NotificationType::Follow => "followed you",
            NotificationType::FollowRequest => "requested to follow you",
            NotificationType::Favourite => "favourited your post",
            NotificationType::Poll => "poll ended",
            NotificationType::Update => "edited a post",
            NotificationType::Unknown => "did something",
        };
        format!(
            "{} {} {}",
            self.notification_type.emoji(),
            self.account.name(),
            action
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_is_tolerated() {
        let json = r#"{
            "id": "900",
            "type": "admin.sign_up",
            "created_at": "2024-03-01T10:00:00Z",
            "account": {"id": "1", "username": "carol"}
        }"#;

        let entity: NotificationEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.notification_type, NotificationType::Unknown);
        assert!(entity.status.is_none());
    }

    #[test]
    fn test_mention_carries_status() {
        let json = r#"{
            "id": "901",
            "type": "mention",
            "created_at": "2024-03-01T10:00:00Z",
            "account": {"id": "1", "username": "carol", "display_name": "Carol"},
            "status": {
                "id": "55",
                "created_at": "2024-03-01T10:00:00Z",
                "account": {"id": "1", "username": "carol"},
                "content": "<p>@you hi</p>"
            }
        }"#;

        let notification = Notification::from_entity(serde_json::from_str(json).unwrap());
        assert_eq!(notification.status.as_ref().map(|s| s.id.as_str()), Some("55"));
        assert_eq!(notification.summary(), "💬 Carol mentioned you");
    }
}
