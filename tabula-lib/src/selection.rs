//! Row selection tracked by key.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::model::TableRow;

/// Selection mode for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// Single row selection (radio-button style).
    Single,
    /// Multiple rows can be selected (checkbox style).
    #[default]
    Multi,
}

/// Tri-state of a "select all" header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Tracks selected rows by their keys.
///
/// "All" and "some" are always relative to a set of rows passed in by the
/// caller, normally the currently filtered rows, so rows hidden by a filter
/// are never selected by [`Selection::select_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K: Clone + Eq + Hash> {
    mode: SelectionMode,
    selected: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self::new(SelectionMode::default())
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create an empty selection with the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    /// Create single-selection mode.
    pub fn single() -> Self {
        Self::new(SelectionMode::Single)
    }

    /// Create multi-selection mode.
    pub fn multi() -> Self {
        Self::new(SelectionMode::Multi)
    }

    /// Get the selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Toggle selection for a key. Returns true if selection changed.
    ///
    /// In single mode a newly toggled key replaces the previous one.
    pub fn toggle(&mut self, key: K) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                if self.selected.contains(&key) {
                    self.selected.clear();
                } else {
                    self.selected.clear();
                    self.selected.insert(key);
                }
                true
            }
            SelectionMode::Multi => {
                if !self.selected.remove(&key) {
                    self.selected.insert(key);
                }
                true
            }
        }
    }

    /// Add the keys of `rows` to the selection. Returns true if it changed.
    ///
    /// Only multi mode supports this; other modes leave the selection as is.
    pub fn select_all<'a, T, I>(&mut self, rows: I) -> bool
    where
        T: TableRow<Key = K> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        if self.mode != SelectionMode::Multi {
            return false;
        }
        let before = self.selected.len();
        self.selected.extend(rows.into_iter().map(TableRow::key));
        self.selected.len() != before
    }

    /// Clear all selections. Returns true if anything was selected.
    pub fn deselect_all(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    /// `true` iff `rows` is non-empty and every row in it is selected.
    pub fn all_selected<'a, T, I>(&self, rows: I) -> bool
    where
        T: TableRow<Key = K> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut any = false;
        for row in rows {
            if !self.selected.contains(&row.key()) {
                return false;
            }
            any = true;
        }
        any
    }

    /// `true` iff something is selected but not every row in `rows`.
    pub fn some_selected<'a, T, I>(&self, rows: I) -> bool
    where
        T: TableRow<Key = K> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        !self.selected.is_empty() && !self.all_selected(rows)
    }

    /// Header checkbox state for `rows`.
    pub fn check_state<'a, T, I>(&self, rows: I) -> CheckState
    where
        T: TableRow<Key = K> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        if self.all_selected(rows) {
            CheckState::Checked
        } else if self.selected.is_empty() {
            CheckState::Unchecked
        } else {
            CheckState::Indeterminate
        }
    }

    /// Drop keys that are not present in `rows`. Returns true if any were dropped.
    pub fn retain<'a, T, I>(&mut self, rows: I) -> bool
    where
        T: TableRow<Key = K> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        if self.selected.is_empty() {
            return false;
        }
        let present: HashSet<K> = rows.into_iter().map(TableRow::key).collect();
        let before = self.selected.len();
        self.selected.retain(|k| present.contains(k));
        self.selected.len() != before
    }

    /// Get the single selected key (for single mode).
    pub fn get_single(&self) -> Option<&K> {
        self.selected.iter().next()
    }

    /// Get all selected keys.
    pub fn get_all(&self) -> impl Iterator<Item = &K> {
        self.selected.iter()
    }

    /// Number of selected keys.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
