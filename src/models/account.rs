//! Account model as delivered by the Mastodon API

use serde::{Deserialize, Serialize};

/// The author of a status or the actor of a notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEntity {
    /// Server-side account ID
    pub id: String,
    /// Local username (without domain)
    pub username: String,
    /// Webfinger handle (`user` for local accounts, `user@domain` for remote ones)
    #[serde(default)]
    pub acct: String,
    /// Display name (may be empty)
    #[serde(default)]
    pub display_name: String,
    /// Avatar URL
    #[serde(default)]
    pub avatar: Option<String>,
}

impl AccountEntity {
    /// Get the handle to show, preferring `acct` when the server provided it
    pub fn handle(&self) -> &str {
        if self.acct.is_empty() {
            &self.username
        } else {
            &self.acct
        }
    }

    /// Get the name to show, falling back to the handle
    pub fn name(&self) -> &str {
        if self.display_name.is_empty() {
            self.handle()
        } else {
            &self.display_name
        }
    }
}
