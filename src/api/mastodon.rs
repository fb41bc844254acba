//! Mastodon API client

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{FeedItem, FeedKind, NotificationEntity, StatusEntity, StatusId};

use super::{FeedSource, PageRequest};

/// Mastodon API client
#[derive(Debug, Clone)]
pub struct MastodonClient {
    client: Client,
    instance: String,
    access_token: String,
}

impl MastodonClient {
    /// Create a new Mastodon client
    pub fn new(instance: &str, access_token: &str) -> Self {
        let instance = if instance.starts_with("http") {
            instance.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", instance.trim_end_matches('/'))
        };

        Self {
            client: Client::new(),
            instance,
            access_token: access_token.to_string(),
        }
    }

    /// Instance base URL
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Build API URL
    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/api/v1{}", self.instance, endpoint)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", self.access_token))
    }

    /// Send a request and decode its JSON body
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.authorized(request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Get a page of the home timeline
    pub async fn home_timeline(
        &self,
        max_id: Option<&StatusId>,
        limit: usize,
    ) -> Result<Vec<StatusEntity>, ApiError> {
        let mut endpoint = format!("/timelines/home?limit={limit}");
        if let Some(max_id) = max_id {
            endpoint.push_str(&format!("&max_id={}", urlencoding::encode(max_id.as_str())));
        }

        tracing::debug!("GET {endpoint}");
        self.send_json(self.client.get(self.api_url(&endpoint))).await
    }

    /// Get a page of notifications, optionally mentions only
    pub async fn notifications(
        &self,
        max_id: Option<&StatusId>,
        limit: usize,
        mentions_only: bool,
    ) -> Result<Vec<NotificationEntity>, ApiError> {
        let mut endpoint = format!("/notifications?limit={limit}");
        if let Some(max_id) = max_id {
            endpoint.push_str(&format!("&max_id={}", urlencoding::encode(max_id.as_str())));
        }
        if mentions_only {
            endpoint.push_str(&format!("&{}=mention", urlencoding::encode("types[]")));
        }

        tracing::debug!("GET {endpoint}");
        self.send_json(self.client.get(self.api_url(&endpoint))).await
    }

    /// Fetch a single status
    pub async fn status(&self, id: &StatusId) -> Result<StatusEntity, ApiError> {
        let url = self.api_url(&format!("/statuses/{}", urlencoding::encode(id.as_str())));
        self.send_json(self.client.get(url)).await
    }

    /// Boost a status
    ///
    /// The server answers with the new boost, which wraps the original.
    pub async fn reblog(&self, id: &StatusId) -> Result<StatusEntity, ApiError> {
        let url = self.api_url(&format!(
            "/statuses/{}/reblog",
            urlencoding::encode(id.as_str())
        ));
        self.send_json(self.client.post(url)).await
    }

    /// Undo a boost
    ///
    /// The server answers with the original status, no longer reblogged.
    pub async fn unreblog(&self, id: &StatusId) -> Result<StatusEntity, ApiError> {
        let url = self.api_url(&format!(
            "/statuses/{}/unreblog",
            urlencoding::encode(id.as_str())
        ));
        self.send_json(self.client.post(url)).await
    }

    /// Delete one of the user's statuses, returning what was deleted
    pub async fn delete_status(&self, id: &StatusId) -> Result<StatusEntity, ApiError> {
        let url = self.api_url(&format!("/statuses/{}", urlencoding::encode(id.as_str())));
        self.send_json(self.client.delete(url)).await
    }
}

impl FeedSource for MastodonClient {
    async fn fetch(&self, request: PageRequest) -> Result<Vec<FeedItem>, ApiError> {
        let max_id = request.max_id.as_ref();

        let items = match request.kind {
            FeedKind::Home => self
                .home_timeline(max_id, request.limit)
                .await?
                .into_iter()
                .map(|entity| FeedItem::from_status_entity(entity, FeedKind::Home))
                .collect(),
            FeedKind::NotificationAll => self
                .notifications(max_id, request.limit, false)
                .await?
                .into_iter()
                .map(|entity| FeedItem::from_notification_entity(entity, FeedKind::NotificationAll))
                .collect(),
            FeedKind::NotificationMentions => self
                .notifications(max_id, request.limit, true)
                .await?
                .into_iter()
                .map(|entity| {
                    FeedItem::from_notification_entity(entity, FeedKind::NotificationMentions)
                })
                .collect(),
        };

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_normalization() {
        let client = MastodonClient::new("mastodon.social/", "token");
        assert_eq!(client.instance(), "https://mastodon.social");
        assert_eq!(
            client.api_url("/timelines/home"),
            "https://mastodon.social/api/v1/timelines/home"
        );

        let client = MastodonClient::new("http://localhost:3000", "token");
        assert_eq!(client.instance(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_unreachable_instance_is_http_error() {
        let client = MastodonClient::new("http://127.0.0.1:9", "token");
        let result = client.fetch(PageRequest::first(FeedKind::Home, 5)).await;
        assert!(matches!(result, Err(ApiError::Http(_))));
    }
}
