//! Pagination strategy implementations
//!
//! Each strategy handles one page indexing pattern.

use super::types::{NextPage, PageIndexStrategy, PageTarget, PagingState};
use crate::types::PagingMode;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// ============================================================================
// Sequential Pagination
// ============================================================================

/// Ordered page number pagination
///
/// Refresh requests page 1, every load-more requests `cursor + 1`.
/// The user-selected order key is sent with every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialPages;

impl PageIndexStrategy for SequentialPages {
    fn mode(&self) -> PagingMode {
        PagingMode::Sequential
    }

    fn next_page(&mut self, state: &mut PagingState, from: u32, refresh: bool) -> NextPage {
        let page = if refresh { 1 } else { from.saturating_add(1) };
        NextPage::Fetch(PageTarget::sequential(page, refresh, state.order.clone()))
    }

    fn advance(&self, state: &mut PagingState, target: &PageTarget) {
        state.cursor = target.page;
    }
}

// ============================================================================
// Random Pagination
// ============================================================================

/// Randomized, non-repeating page sampling
///
/// Every refresh draws a fresh permutation of all pages of the feed and
/// walks it from the start. The order key is pinned to `latest`.
#[derive(Debug, Clone)]
pub struct RandomPages {
    /// Number of items in the feed
    total_items: u32,
    /// Items per page
    page_size: u32,
    rng: StdRng,
}

impl RandomPages {
    /// Create a random paginator seeded from the OS
    pub fn new(total_items: u32, page_size: u32) -> Self {
        Self {
            total_items,
            page_size,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a random paginator with a fixed seed
    pub fn seeded(total_items: u32, page_size: u32, seed: u64) -> Self {
        Self {
            total_items,
            page_size,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Switch to a feed of a different size, keeping the generator
    pub fn set_total_items(&mut self, total_items: u32) {
        self.total_items = total_items;
    }

    /// Number of candidate pages
    pub fn page_count(&self) -> u32 {
        page_count(self.total_items, self.page_size)
    }

    /// Draw a new page sequence
    pub fn generate(&mut self) -> Vec<u32> {
        generate_page_sequence(self.total_items, self.page_size, &mut self.rng)
    }
}

impl PageIndexStrategy for RandomPages {
    fn mode(&self) -> PagingMode {
        PagingMode::Random
    }

    fn next_page(&mut self, state: &mut PagingState, from: u32, refresh: bool) -> NextPage {
        let index = if refresh {
            state.page_sequence = self.generate();
            state.cursor = 0;
            0
        } else {
            from
        };

        match state.page_sequence.get(index as usize) {
            Some(&page) => NextPage::Fetch(PageTarget::random(page, index, refresh)),
            None => NextPage::Exhausted,
        }
    }

    fn advance(&self, state: &mut PagingState, target: &PageTarget) {
        // Counts drawn entries, independent of the physical page number
        state.cursor = target.index + 1;
    }
}

/// Number of pages needed to cover `total_items`, at least one
pub fn page_count(total_items: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// Shuffle pages `1..=page_count(total_items, page_size)`
pub fn generate_page_sequence<R: Rng + ?Sized>(
    total_items: u32,
    page_size: u32,
    rng: &mut R,
) -> Vec<u32> {
    let mut pages: Vec<u32> = (1..=page_count(total_items, page_size)).collect();
    pages.shuffle(rng);
    pages
}
