//! Common types used throughout photo-feed
//!
//! Photo entities as returned by the remote API, plus the small enums
//! that select which feed is browsed and how its pages are indexed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Order keys
// ============================================================================

/// Newest photos first
pub const ORDER_LATEST: &str = "latest";

/// Oldest photos first
pub const ORDER_OLDEST: &str = "oldest";

/// Most popular photos first
pub const ORDER_POPULAR: &str = "popular";

/// All order keys accepted by the server
pub const ORDERS: [&str; 3] = [ORDER_LATEST, ORDER_OLDEST, ORDER_POPULAR];

/// Check whether `key` is a known server-side sort order
pub fn is_known_order(key: &str) -> bool {
    ORDERS.contains(&key)
}

// ============================================================================
// Photo
// ============================================================================

/// A single photo item
///
/// Only the fields the feed needs to carry through to the list are modelled;
/// unknown fields in the API payload are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Unique photo id
    pub id: String,
    /// Upload time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    /// Dominant color as a hex string (e.g. `#60544D`)
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub urls: PhotoUrls,
    #[serde(default)]
    pub user: Option<PhotoUser>,
}

impl Photo {
    /// Create a photo with only an id set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: None,
            width: 0,
            height: 0,
            color: None,
            description: None,
            likes: 0,
            urls: PhotoUrls::default(),
            user: None,
        }
    }
}

/// Rendition URLs for a photo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrls {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub full: Option<String>,
    #[serde(default)]
    pub regular: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
}

/// Photo author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}

// ============================================================================
// Feed kind
// ============================================================================

/// Which remote collection a session browses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    /// All new photos
    #[default]
    New,
    /// Curated photos
    Featured,
}

impl FeedKind {
    /// API path for this feed
    pub fn path(self) -> &'static str {
        match self {
            FeedKind::New => "/photos",
            FeedKind::Featured => "/photos/curated",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::New => f.write_str("new"),
            FeedKind::Featured => f.write_str("featured"),
        }
    }
}

impl FromStr for FeedKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(FeedKind::New),
            "featured" | "curated" => Ok(FeedKind::Featured),
            other => Err(crate::Error::invalid_value(
                "feed",
                format!("unknown feed '{other}'"),
            )),
        }
    }
}

// ============================================================================
// Paging mode
// ============================================================================

/// How page numbers are chosen for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagingMode {
    /// Pages 1, 2, 3, ... in the configured order
    #[default]
    Sequential,
    /// A shuffled, non-repeating sample of all pages
    Random,
}

impl fmt::Display for PagingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagingMode::Sequential => f.write_str("sequential"),
            PagingMode::Random => f.write_str("random"),
        }
    }
}

impl FromStr for PagingMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" | "ordered" => Ok(PagingMode::Sequential),
            "random" => Ok(PagingMode::Random),
            other => Err(crate::Error::invalid_value(
                "mode",
                format!("unknown paging mode '{other}'"),
            )),
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
