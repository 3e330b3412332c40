//! Gateway types and traits

use crate::error::Result;
use crate::pagination::PageTarget;
use crate::types::{FeedKind, Photo};
use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies the controller session a request belongs to
///
/// Gateways shared between sessions use it to scope `cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Allocate a process-unique id
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// One page request as seen by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Session that issued the request
    pub session: SessionId,
    /// Collection to read from
    pub feed: FeedKind,
    /// Physical page number
    pub page: u32,
    /// Items per page
    pub per_page: u32,
    /// Server sort key
    pub order: String,
}

impl PageRequest {
    /// Build the request for a strategy target
    pub fn for_target(
        session: SessionId,
        feed: FeedKind,
        target: &PageTarget,
        per_page: u32,
    ) -> Self {
        Self {
            session,
            feed,
            page: target.page,
            per_page,
            order: target.order.clone(),
        }
    }
}

/// Outcome of a fetch that reached the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResponse {
    /// Items in server order, possibly empty
    pub photos: Vec<Photo>,
    /// False when the server answered but refused the request
    pub successful: bool,
}

impl PageResponse {
    /// A successful page
    pub fn success(photos: Vec<Photo>) -> Self {
        Self {
            photos,
            successful: true,
        }
    }

    /// An answered but unsuccessful request
    pub fn unsuccessful() -> Self {
        Self {
            photos: Vec::new(),
            successful: false,
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Check if the page has no items
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// Asynchronous page source
#[async_trait]
pub trait FetchGateway: Send + Sync + 'static {
    /// Fetch one page
    async fn fetch(&self, request: PageRequest) -> Result<PageResponse>;

    /// Best-effort abort of the fetches issued for `session`
    ///
    /// Fetches of other sessions on the same gateway are unaffected.
    fn cancel(&self, _session: SessionId) {}
}
