//! Single-selection state with per-group expand/collapse flags.
//!
//! ```text
//! Unselected ──select_group/select_type──→ Selected(kind, id)
//!     ↑                                        │  ↺ select_* replaces the entry
//!     └──────────────── clear ─────────────────┘
//! ```
//!
//! Expand flags are keyed by group id and are independent of the selection:
//! clearing or replacing the selection never touches them.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::domain::entities::{SelectionEntry, SelectionKind};

/// Hit-test predicate supplied by the host for outside-click detection.
pub trait Boundary<T: ?Sized> {
    fn contains(&self, target: &T) -> bool;
}

impl<T: ?Sized, F> Boundary<T> for F
where
    F: Fn(&T) -> bool,
{
    fn contains(&self, target: &T) -> bool {
        self(target)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<SelectionEntry>,
    expanded: BTreeSet<i64>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a group and toggle its expanded flag.
    #[instrument(level = "debug", skip(self))]
    pub fn select_group(&mut self, id: i64) {
        self.selected = Some(SelectionEntry::group(id));
        let expanded = self.toggle_expanded(id);
        debug!("select_group: id={}, expanded={}", id, expanded);
    }

    /// Select a type. Expand state is left alone.
    #[instrument(level = "debug", skip(self))]
    pub fn select_type(&mut self, id: i64) {
        self.selected = Some(SelectionEntry::type_entry(id));
    }

    pub fn is_selected(&self, id: i64, kind: SelectionKind) -> bool {
        self.selected.is_some_and(|entry| entry.matches(id, kind))
    }

    pub fn selected(&self) -> Option<SelectionEntry> {
        self.selected
    }

    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Clear the selection when the click target falls outside the container.
    ///
    /// Returns true if the selection was cleared.
    pub fn notify_outside_click<T, B>(&mut self, target: &T, container: &B) -> bool
    where
        T: ?Sized,
        B: Boundary<T> + ?Sized,
    {
        if container.contains(target) {
            return false;
        }
        debug!("outside click, clearing selection {:?}", self.selected);
        self.clear();
        true
    }

    pub fn is_expanded(&self, group_id: i64) -> bool {
        self.expanded.contains(&group_id)
    }

    /// Flip the expanded flag of a group and return the new value.
    pub fn toggle_expanded(&mut self, group_id: i64) -> bool {
        if self.expanded.remove(&group_id) {
            false
        } else {
            self.expanded.insert(group_id);
            true
        }
    }

    pub fn set_expanded(&mut self, group_id: i64, expanded: bool) {
        if expanded {
            self.expanded.insert(group_id);
        } else {
            self.expanded.remove(&group_id);
        }
    }

    /// Expanded group ids in ascending order.
    pub fn expanded_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.expanded.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_unselected() {
        let state = SelectionState::new();
        assert_eq!(state.selected(), None);
        assert!(!state.is_selected(0, SelectionKind::Group));
    }

    #[test]
    fn test_select_group_twice_collapses_again() {
        let mut state = SelectionState::new();
        state.select_group(3);
        assert!(state.is_expanded(3));
        state.select_group(3);
        assert!(!state.is_expanded(3));
        assert!(state.is_selected(3, SelectionKind::Group));
    }

    #[test]
    fn test_same_id_different_kind_is_not_selected() {
        let mut state = SelectionState::new();
        state.select_type(1);
        assert!(state.is_selected(1, SelectionKind::Type));
        assert!(!state.is_selected(1, SelectionKind::Group));
    }

    #[test]
    fn test_closure_boundary() {
        let mut state = SelectionState::new();
        state.select_type(2);
        let inside = |x: &i32| (0..10).contains(x);

        assert!(!state.notify_outside_click(&5, &inside));
        assert_eq!(state.selected(), Some(SelectionEntry::type_entry(2)));

        assert!(state.notify_outside_click(&42, &inside));
        assert_eq!(state.selected(), None);
    }
}
