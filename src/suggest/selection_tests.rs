//! Tests for selection state management

use super::*;
use proptest::prelude::*;

// =========================================================================
// Unit Tests
// =========================================================================

#[test]
fn test_new_selection_state() {
    let state = SelectionState::new();
    assert!(state.get_selected().is_none());
    assert_eq!(state.index(), -1);
    assert_eq!(state.scroll_offset(), 0);
}

#[test]
fn test_navigate_next_from_none() {
    let mut state = SelectionState::new();
    state.navigate_next(5);
    assert_eq!(state.get_selected(), Some(0));
}

#[test]
fn test_navigate_next_clamps_at_last() {
    let mut state = SelectionState::new();
    state.selected_index = Some(4);
    state.navigate_next(5);
    assert_eq!(state.get_selected(), Some(4)); // Does not wrap
}

#[test]
fn test_navigate_previous_from_first_clears() {
    let mut state = SelectionState::new();
    state.selected_index = Some(0);
    state.navigate_previous(5);
    assert_eq!(state.get_selected(), None);
    assert_eq!(state.index(), -1);
}

#[test]
fn test_navigate_previous_from_none_stays_none() {
    let mut state = SelectionState::new();
    state.navigate_previous(5);
    assert_eq!(state.get_selected(), None);
}

#[test]
fn test_navigate_previous_decrements() {
    let mut state = SelectionState::new();
    state.selected_index = Some(3);
    state.navigate_previous(5);
    assert_eq!(state.get_selected(), Some(2));
}

#[test]
fn test_navigate_empty_list_is_noop() {
    let mut state = SelectionState::new();
    state.navigate_next(0);
    assert_eq!(state.get_selected(), None);
    state.navigate_previous(0);
    assert_eq!(state.get_selected(), None);
}

#[test]
fn test_select_index_clamps() {
    let mut state = SelectionState::new();
    state.select_index(9, 3);
    assert_eq!(state.get_selected(), Some(2));
    state.select_index(1, 0);
    assert_eq!(state.get_selected(), None);
}

#[test]
fn test_clear_selection_resets_scroll() {
    let mut state = SelectionState::new();
    state.set_viewport(2);
    state.select_index(5, 10);
    assert!(state.scroll_offset() > 0);
    state.clear_selection();
    assert_eq!(state.get_selected(), None);
    assert_eq!(state.scroll_offset(), 0);
}

#[test]
fn test_scrolls_down_to_keep_selection_visible() {
    let mut state = SelectionState::new();
    state.set_viewport(3);
    for _ in 0..4 {
        state.navigate_next(10);
    }
    // Index 3 with a 3-row window: rows 1..=3 visible
    assert_eq!(state.get_selected(), Some(3));
    assert_eq!(state.scroll_offset(), 1);
}

#[test]
fn test_scrolls_up_to_keep_selection_visible() {
    let mut state = SelectionState::new();
    state.set_viewport(3);
    state.select_index(8, 10);
    assert_eq!(state.scroll_offset(), 6);
    state.select_index(4, 10);
    assert_eq!(state.scroll_offset(), 4);
}

#[test]
fn test_no_scroll_while_inside_window() {
    let mut state = SelectionState::new();
    state.set_viewport(5);
    state.navigate_next(10);
    state.navigate_next(10);
    assert_eq!(state.scroll_offset(), 0);
}

#[test]
fn test_set_viewport_rescrolls() {
    let mut state = SelectionState::new();
    state.select_index(6, 10);
    state.set_viewport(4);
    assert_eq!(state.scroll_offset(), 3);
}

#[test]
fn test_repeated_identical_select_is_idempotent() {
    let mut state = SelectionState::new();
    state.set_viewport(3);
    state.select_index(5, 10);
    let offset = state.scroll_offset();
    state.select_index(5, 10);
    assert_eq!(state.get_selected(), Some(5));
    assert_eq!(state.scroll_offset(), offset);
}

// =========================================================================
// Property Tests
// =========================================================================

#[derive(Debug, Clone, Copy)]
enum Nav {
    Down,
    Up,
}

fn nav_strategy() -> impl Strategy<Value = Nav> {
    prop_oneof![Just(Nav::Down), Just(Nav::Up)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Selection index stays within [-1, count - 1] for any key sequence
    #[test]
    fn prop_selection_stays_in_bounds(
        count in 1usize..20,
        viewport in 0usize..8,
        moves in prop::collection::vec(nav_strategy(), 0..60),
    ) {
        let mut state = SelectionState::new();
        state.set_viewport(viewport);

        for nav in moves {
            match nav {
                Nav::Down => state.navigate_next(count),
                Nav::Up => state.navigate_previous(count),
            }
            let index = state.index();
            prop_assert!(index >= -1);
            prop_assert!(index <= count as isize - 1);
        }
    }

    // Highlighted row is always inside the scroll window
    #[test]
    fn prop_selection_always_visible(
        count in 1usize..30,
        viewport in 1usize..8,
        moves in prop::collection::vec(nav_strategy(), 1..60),
    ) {
        let mut state = SelectionState::new();
        state.set_viewport(viewport);

        for nav in moves {
            match nav {
                Nav::Down => state.navigate_next(count),
                Nav::Up => state.navigate_previous(count),
            }
            if let Some(selected) = state.get_selected() {
                prop_assert!(selected >= state.scroll_offset());
                prop_assert!(selected < state.scroll_offset() + viewport);
            }
        }
    }

    // Pressing Down count+k times lands on the last row
    #[test]
    fn prop_down_saturates_at_last(count in 1usize..20, extra in 0usize..10) {
        let mut state = SelectionState::new();
        for _ in 0..count + extra {
            state.navigate_next(count);
        }
        prop_assert_eq!(state.get_selected(), Some(count - 1));
    }
}
