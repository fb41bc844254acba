//! Data models for Roost

mod account;
mod feed;
mod kind;
mod notification;
mod status;

pub use account::AccountEntity;
pub use feed::{FeedItem, FeedPayload};
pub use kind::FeedKind;
pub use notification::{Notification, NotificationEntity, NotificationType};
pub use status::{Status, StatusEntity, StatusId};
