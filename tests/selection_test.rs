//! Tests for SelectionState

use rstest::rstest;

use grouptree::domain::{Boundary, SelectionEntry, SelectionKind, SelectionState};

/// Host-side container given as a rectangle in screen coordinates.
struct Rect {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Boundary<(i32, i32)> for Rect {
    fn contains(&self, &(px, py): &(i32, i32)) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Group(i64),
    Type(i64),
    Clear,
}

fn apply(state: &mut SelectionState, op: Op) {
    match op {
        Op::Group(id) => state.select_group(id),
        Op::Type(id) => state.select_type(id),
        Op::Clear => state.clear(),
    }
}

fn selected_pairs(state: &SelectionState, ids: &[i64]) -> usize {
    ids.iter()
        .flat_map(|&id| [(id, SelectionKind::Group), (id, SelectionKind::Type)])
        .filter(|&(id, kind)| state.is_selected(id, kind))
        .count()
}

#[test]
fn given_group_then_type_selected_when_querying_then_only_type_is_selected() {
    // Arrange
    let mut state = SelectionState::new();

    // Act
    state.select_group(1);
    state.select_type(5);

    // Assert
    assert!(!state.is_selected(1, SelectionKind::Group));
    assert!(state.is_selected(5, SelectionKind::Type));
}

#[test]
fn given_selected_group_when_clearing_then_nothing_is_selected() {
    // Arrange
    let mut state = SelectionState::new();
    state.select_group(1);

    // Act
    state.clear();

    // Assert
    assert!(!state.is_selected(1, SelectionKind::Group));
    assert_eq!(state.selected(), None);
}

#[rstest]
#[case(vec![Op::Group(1), Op::Group(2), Op::Type(2)])]
#[case(vec![Op::Type(3), Op::Clear, Op::Group(3), Op::Group(3)])]
#[case(vec![Op::Group(1), Op::Type(1), Op::Group(1), Op::Clear])]
#[case(vec![Op::Clear, Op::Clear])]
fn given_any_sequence_when_querying_then_at_most_one_pair_is_selected(#[case] ops: Vec<Op>) {
    let mut state = SelectionState::new();
    let ids = [1, 2, 3];

    for op in ops {
        apply(&mut state, op);
        assert!(selected_pairs(&state, &ids) <= 1, "after {:?}", op);
    }
}

#[test]
fn given_selection_when_replaced_then_last_one_wins() {
    let mut state = SelectionState::new();

    state.select_type(4);
    state.select_group(9);

    assert_eq!(state.selected(), Some(SelectionEntry::group(9)));
    assert_eq!(selected_pairs(&state, &[4, 9]), 1);
}

#[test]
fn given_state_when_clearing_twice_then_same_as_once() {
    // Arrange
    let mut once = SelectionState::new();
    once.select_group(2);
    once.select_type(7);
    let mut twice = once.clone();

    // Act
    once.clear();
    twice.clear();
    twice.clear();

    // Assert
    assert_eq!(once, twice);
}

#[test]
fn given_unselected_state_when_clearing_then_no_op() {
    let mut state = SelectionState::new();

    state.clear();

    assert_eq!(state, SelectionState::new());
}

#[test]
fn given_expanded_group_when_selection_changes_then_expand_state_persists() {
    // Arrange
    let mut state = SelectionState::new();
    state.select_group(1);

    // Act
    state.select_type(3);
    state.clear();
    state.select_group(2);

    // Assert
    assert!(state.is_expanded(1));
    assert!(state.is_expanded(2));
    assert_eq!(state.expanded_ids().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn given_type_selection_when_selecting_then_expand_state_untouched() {
    let mut state = SelectionState::new();

    state.select_type(1);

    assert!(!state.is_expanded(1));
    assert_eq!(state.expanded_ids().count(), 0);
}

#[test]
fn given_unknown_id_when_selecting_then_accepted() {
    let mut state = SelectionState::new();

    state.select_group(i64::MIN);

    assert!(state.is_selected(i64::MIN, SelectionKind::Group));
}

#[test]
fn given_click_inside_container_when_notified_then_selection_kept() {
    // Arrange
    let container = Rect { x: 0, y: 0, w: 100, h: 50 };
    let mut state = SelectionState::new();
    state.select_group(3);

    // Act
    let cleared = state.notify_outside_click(&(10, 10), &container);

    // Assert
    assert!(!cleared);
    assert!(state.is_selected(3, SelectionKind::Group));
}

#[test]
fn given_click_outside_container_when_notified_then_selection_cleared() {
    // Arrange
    let container = Rect { x: 0, y: 0, w: 100, h: 50 };
    let mut state = SelectionState::new();
    state.select_group(3);

    // Act
    let cleared = state.notify_outside_click(&(150, 10), &container);

    // Assert
    assert!(cleared);
    assert_eq!(state.selected(), None);
    assert!(state.is_expanded(3), "outside click leaves expand state alone");
}
