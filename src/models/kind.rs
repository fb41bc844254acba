//! Feed kind definitions

use serde::{Deserialize, Serialize};

/// Which feed a list of items belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FeedKind {
    /// Home timeline
    #[default]
    #[serde(rename = "home")]
    Home,
    /// Every notification
    #[serde(rename = "notifications")]
    NotificationAll,
    /// Mentions only
    #[serde(rename = "mentions")]
    NotificationMentions,
}

impl FeedKind {
    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::NotificationAll => "Notifications",
            Self::NotificationMentions => "Mentions",
        }
    }

    /// Get the emoji icon
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Home => "🏠",
            Self::NotificationAll => "🔔",
            Self::NotificationMentions => "💬",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "home" | "timeline" | "tl" => Some(Self::Home),
            "notifications" | "notification" | "notifs" => Some(Self::NotificationAll),
            "mentions" | "mention" => Some(Self::NotificationMentions),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
