//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by both strategies.

use crate::types::{PagingMode, ORDER_LATEST};

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch this page
    Fetch(PageTarget),
    /// Nothing left to request
    Exhausted,
}

impl NextPage {
    /// Check if this is an exhausted result
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// The target, if any
    pub fn target(&self) -> Option<&PageTarget> {
        match self {
            Self::Fetch(target) => Some(target),
            Self::Exhausted => None,
        }
    }
}

/// Parameters of one page fetch, captured when the fetch is issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTarget {
    /// Physical page number sent to the server
    pub page: u32,
    /// Logical position: the page number itself in sequential mode,
    /// the index into the page sequence in random mode
    pub index: u32,
    /// Refresh (replace the list) or load-more (append)
    pub refresh: bool,
    /// Mode that produced this target
    pub mode: PagingMode,
    /// Server sort key to send
    pub order: String,
}

impl PageTarget {
    /// Target for a sequential page
    pub fn sequential(page: u32, refresh: bool, order: impl Into<String>) -> Self {
        Self {
            page,
            index: page,
            refresh,
            mode: PagingMode::Sequential,
            order: order.into(),
        }
    }

    /// Target for a random page; the order is always `latest`
    pub fn random(page: u32, index: u32, refresh: bool) -> Self {
        Self {
            page,
            index,
            refresh,
            mode: PagingMode::Random,
            order: ORDER_LATEST.to_string(),
        }
    }
}

/// Paging state of one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagingState {
    /// Last consumed page (sequential) or number of consumed sequence entries (random)
    pub cursor: u32,
    /// Shuffled page numbers, only populated in random mode
    pub page_sequence: Vec<u32>,
    /// User-selected sort key
    pub order: String,
}

impl PagingState {
    /// Create a new paging state with the given sort key
    pub fn new(order: impl Into<String>) -> Self {
        Self {
            cursor: 0,
            page_sequence: Vec::new(),
            order: order.into(),
        }
    }

    /// Forget the current generation
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.page_sequence.clear();
    }
}

/// Core trait for page indexing strategies
pub trait PageIndexStrategy: Send {
    /// Mode implemented by this strategy
    fn mode(&self) -> PagingMode;

    /// Compute the page to request next, counting on from cursor value `from`
    ///
    /// A refresh ignores `from` and may start a new generation of `state`.
    fn next_page(&mut self, state: &mut PagingState, from: u32, refresh: bool) -> NextPage;

    /// Advance the cursor after a response for `target` has been accepted
    fn advance(&self, state: &mut PagingState, target: &PageTarget);
}
