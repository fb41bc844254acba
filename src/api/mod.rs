//! Remote feed source

pub mod mastodon;

use crate::error::ApiError;
use crate::models::{FeedItem, FeedKind, StatusId};

/// Default number of entries requested per page
pub const DEFAULT_PAGE_LIMIT: usize = 40;

/// One page request against a feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Which feed
    pub kind: FeedKind,
    /// Only return entries strictly older than this ID
    pub max_id: Option<StatusId>,
    /// Maximum number of entries
    pub limit: usize,
}

impl PageRequest {
    /// First page of a feed
    pub const fn first(kind: FeedKind, limit: usize) -> Self {
        Self {
            kind,
            max_id: None,
            limit,
        }
    }

    /// Page strictly older than `max_id`
    pub const fn older_than(kind: FeedKind, max_id: StatusId, limit: usize) -> Self {
        Self {
            kind,
            max_id: Some(max_id),
            limit,
        }
    }
}

/// Where feed pages come from
///
/// Pages are newest-first. The returned future is `Send` so a feed can be
/// driven from a spawned task.
pub trait FeedSource {
    /// Fetch one page of feed items
    fn fetch(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Vec<FeedItem>, ApiError>> + Send;
}
