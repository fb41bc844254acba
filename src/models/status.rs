//! Status model: the raw server snapshot and the in-memory record built from it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AccountEntity;

/// Identity of a status (or notification) as known to the server
///
/// Mastodon IDs are opaque strings. They happen to sort chronologically on
/// most servers but nothing here relies on that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusId(String);

impl StatusId {
    /// Create an ID from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw ID
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the ID is blank (never valid on the wire)
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for StatusId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StatusId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for StatusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the server says about a status
///
/// Replaced wholesale whenever a fresher copy arrives. The nested `reblog`
/// is kept exactly as delivered; [`Status`] lifts it into its own record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntity {
    /// Server-side ID
    pub id: StatusId,
    /// When the status was created
    pub created_at: DateTime<Utc>,
    /// Author
    pub account: AccountEntity,
    /// Content as HTML
    #[serde(default)]
    pub content: String,
    /// Content warning text
    #[serde(default)]
    pub spoiler_text: String,
    /// Whether the media/content is marked sensitive
    #[serde(default)]
    pub sensitive: bool,
    /// URL to the status on the web
    #[serde(default)]
    pub url: Option<String>,
    /// ID of the status this one replies to
    #[serde(default)]
    pub in_reply_to_id: Option<StatusId>,
    /// The status being boosted, if this is a boost
    #[serde(default)]
    pub reblog: Option<Box<StatusEntity>>,
    /// Number of boosts
    #[serde(default)]
    pub reblogs_count: u32,
    /// Number of favourites
    #[serde(default)]
    pub favourites_count: u32,
    /// Number of replies
    #[serde(default)]
    pub replies_count: u32,
    /// Whether the current user boosted this status (absent when unauthenticated)
    #[serde(default)]
    pub reblogged: Option<bool>,
    /// Whether the current user favourited this status
    #[serde(default)]
    pub favourited: Option<bool>,
    /// Whether the current user bookmarked this status
    #[serde(default)]
    pub bookmarked: Option<bool>,
}

impl StatusEntity {
    /// Create a bare entity, mostly useful for building fixtures
    pub fn new(id: impl Into<StatusId>, account: AccountEntity) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            account,
            content: String::new(),
            spoiler_text: String::new(),
            sensitive: false,
            url: None,
            in_reply_to_id: None,
            reblog: None,
            reblogs_count: 0,
            favourites_count: 0,
            replies_count: 0,
            reblogged: None,
            favourited: None,
            bookmarked: None,
        }
    }

    /// Whether the current user has boosted this status
    pub fn is_reblogged(&self) -> bool {
        self.reblogged.unwrap_or(false)
    }

    /// Content with HTML tags stripped and entities decoded
    pub fn plain_text(&self) -> String {
        let content = self
            .content
            .replace("<br>", "\n")
            .replace("<br/>", "\n")
            .replace("<br />", "\n")
            .replace("</p><p>", "\n\n");

        let content = regex_lite::Regex::new(r"<[^>]+>")
            .map(|re| re.replace_all(&content, "").to_string())
            .unwrap_or(content);

        html_escape::decode_html_entities(&content).to_string()
    }
}

/// A status as held in a feed
///
/// `reblog` owns the record of the boosted status. `reveal_sensitive` never
/// comes from the server: it is the reader's choice to expand sensitive
/// content and has to survive reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    /// Server-side ID
    pub id: StatusId,
    /// Latest server snapshot
    pub entity: StatusEntity,
    /// Record of the boosted status, if this is a boost
    pub reblog: Option<Box<Status>>,
    /// Sensitive content has been revealed by the reader
    pub reveal_sensitive: bool,
}

impl Status {
    /// Build a record from a server entity
    pub fn from_entity(entity: StatusEntity) -> Self {
        let reblog = entity
            .reblog
            .as_deref()
            .cloned()
            .map(|inner| Box::new(Self::from_entity(inner)));

        Self {
            id: entity.id.clone(),
            entity,
            reblog,
            reveal_sensitive: false,
        }
    }

    /// The status that carries the content: the boosted one for boosts, self otherwise
    pub fn content_status(&self) -> &Self {
        self.reblog.as_deref().unwrap_or(self)
    }

    /// Whether this record is a boost of another status
    pub fn is_reblog(&self) -> bool {
        self.reblog.is_some()
    }

    /// Whether the content stays behind its content warning
    ///
    /// A reveal on the boost counts for the boosted status too.
    pub fn hides_content(&self) -> bool {
        let shown = self.content_status();
        !shown.entity.spoiler_text.is_empty() && !(self.reveal_sensitive || shown.reveal_sensitive)
    }

    /// Get a short preview of the content (for list display)
    pub fn preview(&self, max_len: usize) -> String {
        let content = self.content_status().entity.plain_text().replace('\n', " ");
        if content.chars().count() <= max_len {
            content
        } else {
            let cut: String = content.chars().take(max_len.saturating_sub(3)).collect();
            format!("{cut}...")
        }
    }

    /// Get relative time string (e.g., "5m", "2h", "3d")
    pub fn relative_time(&self) -> String {
        let created_at = self.entity.created_at;
        let duration = Utc::now().signed_duration_since(created_at);

        if duration.num_seconds() < 60 {
            format!("{}s", duration.num_seconds().max(0))
        } else if duration.num_minutes() < 60 {
            format!("{}m", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h", duration.num_hours())
        } else if duration.num_days() < 7 {
            format!("{}d", duration.num_days())
        } else {
            created_at.format("%b %d").to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(name: &str) -> AccountEntity {
        AccountEntity {
            id: format!("acct-{name}"),
            username: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_entity_lifts_reblog() {
        let original = StatusEntity::new("1", author("alice"));
        let mut boost = StatusEntity::new("2", author("bob"));
        boost.reblog = Some(Box::new(original));

        let status = Status::from_entity(boost);
        assert_eq!(status.id.as_str(), "2");
        assert_eq!(status.reblog.as_ref().map(|r| r.id.as_str()), Some("1"));
        assert_eq!(status.content_status().id.as_str(), "1");
        assert!(!status.reveal_sensitive);
    }

    #[test]
    fn test_reveal_on_boost_opens_boosted_warning() {
        let mut original = StatusEntity::new("1", author("alice"));
        original.spoiler_text = "spoilers".to_string();
        let mut boost = StatusEntity::new("2", author("bob"));
        boost.reblog = Some(Box::new(original));

        let mut status = Status::from_entity(boost);
        assert!(status.hides_content());

        status.reveal_sensitive = true;
        assert!(!status.content_status().reveal_sensitive);
        assert!(!status.hides_content());
    }

    #[test]
    fn test_plain_text() {
        let mut entity = StatusEntity::new("1", author("alice"));
        entity.content = "<p>Hello &amp; welcome</p><p>line<br>two</p>".to_string();
        assert_eq!(entity.plain_text(), "Hello & welcome\n\nline\ntwo");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let mut entity = StatusEntity::new("1", author("alice"));
        entity.content = "ééééééééééé".to_string();
        let status = Status::from_entity(entity);
        assert_eq!(status.preview(6), "ééé...");
        assert_eq!(status.preview(40), "ééééééééééé");
    }

    #[test]
    fn test_deserialize_mastodon_status() {
        let json = r#"{
            "id": "109",
            "created_at": "2024-03-01T10:00:00.000Z",
            "account": {"id": "7", "username": "bob", "acct": "bob@example.social", "display_name": "Bob"},
            "content": "<p>boost</p>",
            "reblogged": true,
            "reblogs_count": 3,
            "reblog": {
                "id": "42",
                "created_at": "2024-02-28T09:00:00.000Z",
                "account": {"id": "8", "username": "alice"},
                "content": "<p>original</p>"
            }
        }"#;

        let entity: StatusEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.id, StatusId::from("109"));
        assert!(entity.is_reblogged());
        assert_eq!(entity.account.handle(), "bob@example.social");
        assert_eq!(entity.reblog.as_ref().unwrap().account.name(), "alice");
        assert_eq!(entity.reblog.as_ref().unwrap().reblogged, None);
    }
}
