//! Single-column sort state machine

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Which column, if any, rows should be ordered by.
///
/// The state only tracks the indicator; reordering rows is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(String, SortDirection)>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column_key(&self) -> Option<&str> {
        self.active.as_ref().map(|(key, _)| key.as_str())
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.as_ref().map(|(_, direction)| *direction)
    }

    pub fn is_sorted(&self) -> bool {
        self.active.is_some()
    }

    /// Direction applied to `column_key`, if it is the active column
    pub fn direction_for(&self, column_key: &str) -> Option<SortDirection> {
        match &self.active {
            Some((key, direction)) if key == column_key => Some(*direction),
            _ => None,
        }
    }

    /// Register a header click on a sortable column and return the new direction.
    ///
    /// The active column flips between ascending and descending; any other
    /// column starts ascending. Once sorted, the state never returns to unsorted.
    pub fn toggle(&mut self, column_key: &str) -> SortDirection {
        let direction = match self.direction_for(column_key) {
            Some(current) => current.flipped(),
            None => SortDirection::Asc,
        };
        self.active = Some((column_key.to_string(), direction));
        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unsorted() {
        let state = SortState::new();
        assert!(!state.is_sorted());
        assert_eq!(state.column_key(), None);
    }

    #[test]
    fn test_same_column_flips() {
        let mut state = SortState::new();
        assert_eq!(state.toggle("name"), SortDirection::Asc);
        assert_eq!(state.toggle("name"), SortDirection::Desc);
        assert_eq!(state.toggle("name"), SortDirection::Asc);
        assert!(state.is_sorted());
    }

    #[test]
    fn test_new_column_resets_to_ascending() {
        let mut state = SortState::new();
        state.toggle("name");
        state.toggle("name");
        assert_eq!(state.direction(), Some(SortDirection::Desc));

        assert_eq!(state.toggle("price"), SortDirection::Asc);
        assert_eq!(state.column_key(), Some("price"));
        assert_eq!(state.direction_for("name"), None);
    }
}
