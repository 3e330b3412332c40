//! Controller types
//!
//! Session state, completions, and per-completion outcomes.

use crate::error::Result;
use crate::gateway::PageResponse;
use crate::pagination::PagingState;
use crate::token::RequestToken;
use crate::types::{FeedKind, PagingMode};
use serde::Serialize;

/// What the session is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// No fetch outstanding
    #[default]
    Idle,
    /// A refresh fetch is outstanding
    Refreshing,
    /// A load-more fetch is outstanding
    Loading,
}

/// Mutable state of one logical list
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) feed: FeedKind,
    pub(crate) mode: PagingMode,
    pub(crate) paging: PagingState,
    pub(crate) activity: Activity,
    pub(crate) exhausted: bool,
}

impl Session {
    /// Create an idle session
    pub fn new(feed: FeedKind, mode: PagingMode, order: impl Into<String>) -> Self {
        Self {
            feed,
            mode,
            paging: PagingState::new(order),
            activity: Activity::Idle,
            exhausted: false,
        }
    }

    pub fn feed(&self) -> FeedKind {
        self.feed
    }

    pub fn mode(&self) -> PagingMode {
        self.mode
    }

    pub fn paging(&self) -> &PagingState {
        &self.paging
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_refreshing(&self) -> bool {
        self.activity == Activity::Refreshing
    }

    pub fn is_loading(&self) -> bool {
        self.activity == Activity::Loading
    }

    /// Check if a fetch is outstanding
    pub fn is_busy(&self) -> bool {
        self.activity != Activity::Idle
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn can_load_more(&self) -> bool {
        !self.is_busy() && !self.exhausted
    }

    pub(crate) fn begin(&mut self, refresh: bool) {
        self.activity = if refresh {
            Activity::Refreshing
        } else {
            Activity::Loading
        };
    }

    pub(crate) fn finish(&mut self) {
        self.activity = Activity::Idle;
    }

    /// Start a new generation: no pages consumed, not exhausted
    pub(crate) fn reset(&mut self) {
        self.paging.reset();
        self.exhausted = false;
    }
}

/// A finished fetch, delivered back to the controller
#[derive(Debug)]
pub struct Completion {
    /// Token the fetch was issued under
    pub token: RequestToken,
    /// Transport result
    pub result: Result<PageResponse>,
}

/// How a completion was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Items were merged into the list
    Success {
        /// Items in the page
        fetched: usize,
        /// The page was short and the feed is now exhausted
        exhausted: bool,
    },
    /// Nothing to show, list untouched
    Empty,
    /// Transport failure surfaced to the view
    Failed,
    /// Stale or canceled completion, ignored
    Discarded,
}
