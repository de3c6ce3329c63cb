//! Row selection tracking

use std::collections::HashSet;

/// Visual state of the header checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Unchecked,
    Indeterminate,
}

impl CheckState {
    pub fn symbol(&self) -> &'static str {
        match self {
            CheckState::Checked => "[x]",
            CheckState::Unchecked => "[ ]",
            CheckState::Indeterminate => "[-]",
        }
    }
}

/// Set of selected row identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select every displayed row, or clear the selection.
    ///
    /// Only the ids passed in participate; rows on other pages are not
    /// accumulated.
    pub fn select_all<I, S>(&mut self, displayed_ids: I, checked: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.clear();
        if checked {
            self.selected
                .extend(displayed_ids.into_iter().map(Into::into));
        }
    }

    pub fn select_row(&mut self, id: &str, checked: bool) {
        if checked {
            self.selected.insert(id.to_string());
        } else {
            self.selected.remove(id);
        }
    }

    /// Flip one row and return whether it is now selected
    pub fn toggle_row(&mut self, id: &str) -> bool {
        let checked = !self.is_selected(id);
        self.select_row(id, checked);
        checked
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected ids in sorted order
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_all_selected(&self, displayed: usize) -> bool {
        displayed > 0 && self.selected.len() == displayed
    }

    pub fn is_indeterminate(&self, displayed: usize) -> bool {
        !self.selected.is_empty() && self.selected.len() < displayed
    }

    pub fn header_state(&self, displayed: usize) -> CheckState {
        if self.is_all_selected(displayed) {
            CheckState::Checked
        } else if self.is_indeterminate(displayed) {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_then_deselect_one_is_indeterminate() {
        let mut selection = Selection::new();
        selection.select_all(["1", "2", "3"], true);
        assert!(selection.is_all_selected(3));
        assert_eq!(selection.header_state(3), CheckState::Checked);

        selection.select_row("2", false);
        assert!(selection.is_indeterminate(3));
        assert!(!selection.is_all_selected(3));
        assert_eq!(selection.header_state(3), CheckState::Indeterminate);
    }

    #[test]
    fn test_unchecking_select_all_clears() {
        let mut selection = Selection::new();
        selection.select_row("9", true);
        selection.select_all(["1", "2"], false);
        assert!(selection.is_empty());
        assert_eq!(selection.header_state(2), CheckState::Unchecked);
    }

    #[test]
    fn test_select_all_replaces_previous_selection() {
        let mut selection = Selection::new();
        selection.select_row("old", true);
        selection.select_all(vec!["a".to_string(), "b".to_string()], true);
        assert_eq!(selection.ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_table_is_never_all_selected() {
        let selection = Selection::new();
        assert!(!selection.is_all_selected(0));
        assert!(!selection.is_indeterminate(0));
    }

    #[test]
    fn test_toggle_row() {
        let mut selection = Selection::new();
        assert!(selection.toggle_row("1"));
        assert!(selection.is_selected("1"));
        assert!(!selection.toggle_row("1"));
        assert!(selection.is_empty());
    }
}
