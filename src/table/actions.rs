//! Per-row action buttons

/// An inline action offered on each row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Preview,
    Edit,
    Delete,
}

impl RowAction {
    /// Display order of the action buttons
    pub const ORDER: [RowAction; 3] = [RowAction::Preview, RowAction::Edit, RowAction::Delete];

    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Preview => "Preview",
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
        }
    }

    /// Key that triggers the action on the cursor row
    pub fn shortcut(&self) -> char {
        match self {
            RowAction::Preview => 'p',
            RowAction::Edit => 'e',
            RowAction::Delete => 'd',
        }
    }

    pub fn from_shortcut(c: char) -> Option<Self> {
        Self::ORDER.into_iter().find(|action| action.shortcut() == c)
    }
}

/// Which row actions the table offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionsConfig {
    pub show_preview: bool,
    pub show_edit: bool,
    pub show_delete: bool,
}

impl ActionsConfig {
    /// Preview, edit and delete
    pub fn all() -> Self {
        Self {
            show_preview: true,
            show_edit: true,
            show_delete: true,
        }
    }

    pub fn preview_only() -> Self {
        Self {
            show_preview: true,
            ..Default::default()
        }
    }

    pub fn shows(&self, action: RowAction) -> bool {
        match action {
            RowAction::Preview => self.show_preview,
            RowAction::Edit => self.show_edit,
            RowAction::Delete => self.show_delete,
        }
    }

    /// Whether the implicit actions column should be appended
    pub fn any(&self) -> bool {
        self.show_preview || self.show_edit || self.show_delete
    }

    pub fn visible(&self) -> Vec<RowAction> {
        RowAction::ORDER
            .into_iter()
            .filter(|action| self.shows(*action))
            .collect()
    }
}
