//! Tests for pagination module

use super::*;
use crate::types::{PagingMode, ORDER_LATEST};
use std::collections::HashSet;
use test_case::test_case;

fn fetch(next: NextPage) -> PageTarget {
    match next {
        NextPage::Fetch(target) => target,
        NextPage::Exhausted => panic!("Expected Fetch"),
    }
}

// ============================================================================
// NextPage / PagingState Tests
// ============================================================================

#[test]
fn test_next_page_accessors() {
    let next = NextPage::Fetch(PageTarget::sequential(3, false, "popular"));
    assert!(!next.is_exhausted());
    assert_eq!(next.target().map(|t| t.page), Some(3));

    assert!(NextPage::Exhausted.is_exhausted());
    assert!(NextPage::Exhausted.target().is_none());
}

#[test]
fn test_paging_state_reset() {
    let mut state = PagingState::new("oldest");
    state.cursor = 7;
    state.page_sequence = vec![4, 2, 9];

    state.reset();
    assert_eq!(state.cursor, 0);
    assert!(state.page_sequence.is_empty());
    assert_eq!(state.order, "oldest");
}

// ============================================================================
// Sequential Tests
// ============================================================================

#[test_case(0, true => 1 ; "refresh from fresh session")]
#[test_case(5, true => 1 ; "refresh always restarts")]
#[test_case(0, false => 1 ; "load more before any page")]
#[test_case(1, false => 2 ; "load more after first page")]
#[test_case(41, false => 42 ; "load more deep")]
fn test_sequential_next_page(cursor: u32, refresh: bool) -> u32 {
    let mut state = PagingState::new("popular");
    state.cursor = cursor;
    fetch(SequentialPages.next_page(&mut state, cursor, refresh)).page
}

#[test]
fn test_sequential_keeps_order_and_mode() {
    let mut state = PagingState::new("oldest");
    let target = fetch(SequentialPages.next_page(&mut state, 0, true));

    assert_eq!(target.order, "oldest");
    assert_eq!(target.mode, PagingMode::Sequential);
    assert!(target.refresh);
    // Issuing never moves the cursor
    assert_eq!(state.cursor, 0);
}

#[test]
fn test_sequential_advance_is_monotonic() {
    let mut strategy = SequentialPages;
    let mut state = PagingState::new(ORDER_LATEST);

    let target = fetch(strategy.next_page(&mut state, 0, true));
    strategy.advance(&mut state, &target);
    assert_eq!(state.cursor, 1);

    for expected in 2..=5 {
        let from = state.cursor;
        let target = fetch(strategy.next_page(&mut state, from, false));
        assert_eq!(target.page, expected);
        strategy.advance(&mut state, &target);
        assert_eq!(state.cursor, expected);
    }
}

// ============================================================================
// Random Tests
// ============================================================================

#[test_case(100, 10 => 10 ; "exact multiple")]
#[test_case(101, 10 => 11 ; "partial last page")]
#[test_case(5, 10 => 1 ; "smaller than a page")]
#[test_case(0, 10 => 1 ; "never zero pages")]
#[test_case(10, 0 => 1 ; "zero page size")]
fn test_page_count(total: u32, page_size: u32) -> u32 {
    page_count(total, page_size)
}

#[test]
fn test_set_total_items_changes_page_count() {
    let mut strategy = RandomPages::seeded(100, 10, 9);
    assert_eq!(strategy.page_count(), 10);

    strategy.set_total_items(35);
    assert_eq!(strategy.page_count(), 4);
    assert_eq!(strategy.generate().len(), 4);
}

#[test]
fn test_generate_page_sequence_is_permutation() {
    let mut strategy = RandomPages::seeded(1_400, 10, 7);
    let sequence = strategy.generate();

    assert_eq!(sequence.len(), 140);
    let unique: HashSet<_> = sequence.iter().copied().collect();
    assert_eq!(unique.len(), sequence.len());
    assert_eq!(unique, (1..=140).collect::<HashSet<_>>());
}

#[test]
fn test_random_refresh_starts_new_generation() {
    let mut strategy = RandomPages::seeded(1_000, 10, 42);
    let mut state = PagingState::new("popular");
    state.cursor = 9;

    let target = fetch(strategy.next_page(&mut state, 9, true));
    let first = state.page_sequence.clone();

    assert_eq!(state.cursor, 0);
    assert_eq!(target.index, 0);
    assert_eq!(target.page, first[0]);
    assert_eq!(target.order, ORDER_LATEST);
    assert_eq!(target.mode, PagingMode::Random);

    strategy.next_page(&mut state, 0, true);
    assert_eq!(state.page_sequence.len(), first.len());
    assert_ne!(state.page_sequence, first);
}

#[test]
fn test_random_walks_sequence() {
    let mut strategy = RandomPages::seeded(50, 10, 1);
    let mut state = PagingState::new(ORDER_LATEST);

    let target = fetch(strategy.next_page(&mut state, 0, true));
    strategy.advance(&mut state, &target);
    assert_eq!(state.cursor, 1);

    let mut requested = vec![target.page];
    for index in 1..5 {
        let from = state.cursor;
        let target = fetch(strategy.next_page(&mut state, from, false));
        assert_eq!(target.index, index);
        assert_eq!(target.page, state.page_sequence[index as usize]);
        strategy.advance(&mut state, &target);
        requested.push(target.page);
    }

    assert_eq!(requested, state.page_sequence);
}

#[test]
fn test_random_past_end_is_exhausted() {
    let mut strategy = RandomPages::seeded(20, 10, 3);
    let mut state = PagingState::new(ORDER_LATEST);

    strategy.next_page(&mut state, 0, true);
    state.cursor = 2;

    assert!(strategy.next_page(&mut state, 2, false).is_exhausted());
    assert!(strategy.next_page(&mut state, 1, false).target().is_some());
}

#[test]
fn test_random_load_more_without_sequence_is_exhausted() {
    let mut strategy = RandomPages::seeded(20, 10, 3);
    let mut state = PagingState::new(ORDER_LATEST);

    assert!(strategy.next_page(&mut state, 0, false).is_exhausted());
    assert!(state.page_sequence.is_empty());
}

#[test]
fn test_random_ignores_user_order() {
    let mut strategy = RandomPages::seeded(100, 10, 5);
    let mut state = PagingState::new("oldest");

    let target = fetch(strategy.next_page(&mut state, 0, true));
    assert_eq!(target.order, ORDER_LATEST);
    assert_eq!(state.order, "oldest");
}
