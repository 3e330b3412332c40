// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # photo-feed
//!
//! Paginated photo feeds with refresh, load-more and random sampling.
//!
//! ## Features
//!
//! - **Refresh / Load More**: one outstanding fetch per session, never both
//! - **Sequential Paging**: pages 1, 2, 3, ... in a server-side sort order
//! - **Random Paging**: a shuffled, non-repeating sample of all pages
//! - **Stale Response Safety**: canceled or superseded fetches can't touch the list
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use photo_feed::config::FeedConfig;
//! use photo_feed::controller::PaginationController;
//! use photo_feed::gateway::UnsplashGateway;
//! use photo_feed::view::EventLog;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> photo_feed::Result<()> {
//!     let config = FeedConfig::default().with_env_overrides();
//!     let gateway = Arc::new(UnsplashGateway::new(&config.api)?);
//!     let mut feed = PaginationController::new(gateway, EventLog::new(), Vec::new(), &config);
//!
//!     feed.init_refresh();
//!     feed.next_completion().await;
//!
//!     while feed.load_more(true).is_some() {
//!         feed.next_completion().await;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    PaginationController                      │
//! │  init_refresh()  refresh_new()  load_more()  cancel()        │
//! │  next_completion() → Outcome                                 │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌────────────┬────────────────┼───────────────┬────────────────┐
//! │ Pagination │     Token      │   Gateway     │     View       │
//! ├────────────┼────────────────┼───────────────┼────────────────┤
//! │ Sequential │ Issue          │ Unsplash      │ Indicators     │
//! │ Random     │ Consume        │ Retry (http)  │ Notifications  │
//! │            │ Cancel         │ Rate Limit    │ Photo list     │
//! └────────────┴────────────────┴───────────────┴────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for photo-feed
pub mod error;

/// Common types: photos, feeds, paging modes
pub mod types;

/// Feed configuration
pub mod config;

/// Page index strategies
pub mod pagination;

/// Request tokens and cancellation
pub mod token;

/// HTTP client with retry and rate limiting
pub mod http;

/// Fetch gateways
pub mod gateway;

/// View and list collaborators
pub mod view;

/// Pagination controller
pub mod controller;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, FeedConfig};
pub use controller::{Outcome, PaginationController};
pub use gateway::{FetchGateway, PageRequest, PageResponse, UnsplashGateway};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
