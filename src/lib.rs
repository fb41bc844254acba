//! # Roost 🐘
//!
//! Feed reconciliation for Mastodon clients.
//!
//! ## Overview
//!
//! Roost keeps an in-memory, newest-first list of feed items (statuses or
//! notifications) and keeps it correct while the user boosts, unboosts,
//! edits and deletes. A status can show up more than once in a feed, directly
//! and wrapped in someone's boost; every copy gets reconciled.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       FeedHandle                            │
//! │     Command queue in front of one background feed task      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     FeedController                          │
//! │  • load_initial / load_next (pagination by cursor)          │
//! │  • update (boost-aware reconciliation)                      │
//! │  • delete                                                   │
//! └─────────────────────────────────────────────────────────────┘
//!          │                                       │
//!          ▼                                       ▼
//! ┌─────────────────┐                     ┌─────────────────┐
//! │   FeedSource    │                     │    Snapshots    │
//! │                 │                     │                 │
//! │ • Mastodon API  │                     │ • Latest + all  │
//! │ • Paging        │                     │   later ones    │
//! └─────────────────┘                     └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — Remote feed source trait and the Mastodon client
//! - [`config`] — Configuration management
//! - [`error`] — Error types
//! - [`feed`] — Feed controller, snapshots and the background worker
//! - [`models`] — Data models (Status, Notification, `FeedItem`)
//!
//! ## Example
//!
//! ```no_run
//! use roost::api::mastodon::MastodonClient;
//! use roost::feed::FeedController;
//! use roost::models::FeedKind;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client = MastodonClient::new("mastodon.social", "token");
//! let mut feed = FeedController::new(client);
//! let mut updates = feed.subscribe();
//!
//! feed.load_initial(FeedKind::Home).await?;
//! feed.load_next(FeedKind::Home).await?;
//!
//! while let Some(snapshot) = updates.try_next() {
//!     println!("v{}: {} items", snapshot.version, snapshot.len());
//! }
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/roost/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::wrong_self_convention)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod paths;

// Re-export main types for convenience
pub use config::Config;
pub use error::{ApiError, FeedError};
pub use feed::{FeedController, FeedHandle, Snapshot, SnapshotStream, spawn_feed};
pub use models::{FeedItem, FeedKind, FeedPayload, Notification, Status, StatusEntity, StatusId};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
