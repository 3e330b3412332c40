//! Pagination module
//!
//! Supports: Sequential (ordered) paging, Random (shuffled, non-repeating) page sampling
//!
//! # Overview
//!
//! A strategy decides which physical page the next fetch should request,
//! given the session's paging state and whether the fetch is a refresh or a
//! load-more. After the controller accepts a response it calls back into the
//! same strategy to advance the cursor.

mod strategies;
mod types;

pub use strategies::{generate_page_sequence, page_count, RandomPages, SequentialPages};
pub use types::{NextPage, PageIndexStrategy, PageTarget, PagingState};

#[cfg(test)]
mod tests;
