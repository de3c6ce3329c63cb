//! Data table state and the view model derived from it

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{text::Line, widgets::TableState};
use tracing::debug;

use super::{
    actions::{ActionsConfig, RowAction},
    column::{Column, ColumnHeader},
    pagination::{Pagination, PaginationControls},
    selection::{CheckState, Selection},
    sort::{SortDirection, SortState},
};
use crate::models::Record;
use crate::tui::traits::Navigable;

/// Number of placeholder rows drawn while loading
pub const SKELETON_ROWS: usize = 5;

/// Notifications a table hands back to its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A sortable header was activated; the owner reorders the rows
    Sort {
        column_key: String,
        direction: SortDirection,
    },
    /// A page was requested; the owner fetches it and updates the pagination
    PageChange(usize),
    /// A row action was triggered on the row with this id
    RowAction { action: RowAction, row_id: String },
}

/// Placeholder shown when there is nothing to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub icon: String,
    pub title: String,
    pub description: String,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            icon: "▤".to_string(),
            title: "No data available".to_string(),
            description: "There are no items to display in this table.".to_string(),
        }
    }
}

impl EmptyState {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }
}

/// Configuration for data table display
#[derive(Debug, Clone)]
pub struct DataTableConfig {
    pub title: String,
    pub row_key: String,
    pub selectable: bool,
    pub compact: bool,
    /// Whether header clicks produce sort events at all
    pub sort_enabled: bool,
    pub empty_state: EmptyState,
}

impl Default for DataTableConfig {
    fn default() -> Self {
        Self {
            title: "Records".to_string(),
            row_key: "id".to_string(),
            selectable: false,
            compact: false,
            sort_enabled: true,
            empty_state: EmptyState::default(),
        }
    }
}

impl DataTableConfig {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    pub fn with_row_key(mut self, row_key: &str) -> Self {
        self.row_key = row_key.to_string();
        self
    }

    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }

    pub fn without_sorting(mut self) -> Self {
        self.sort_enabled = false;
        self
    }

    pub fn with_empty_state(mut self, empty_state: EmptyState) -> Self {
        self.empty_state = empty_state;
        self
    }
}

/// Sort chevrons shown next to a header title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Column cannot be sorted
    Hidden,
    /// Sortable but not the active column
    Neutral,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub column: ColumnHeader,
    pub indicator: SortIndicator,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: String,
    pub selected: bool,
    pub cells: Vec<Line<'static>>,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowsView {
    pub headers: Vec<HeaderView>,
    /// Tri-state header checkbox, present when the table is selectable
    pub select_all: Option<CheckState>,
    pub rows: Vec<RowView>,
    pub pagination: Option<PaginationControls>,
}

/// What the table looks like for its current inputs
#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Loading { rows: usize, columns: usize },
    Empty(EmptyState),
    Rows(RowsView),
}

/// Generic data table over rows of type `T`.
///
/// Rows are the currently displayed slice; sorting and paging are performed
/// by the owner in response to [`TableEvent`]s.
pub struct DataTable<T: Record> {
    pub config: DataTableConfig,
    pub state: TableState,
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    actions: Option<ActionsConfig>,
    pagination: Option<Pagination>,
    loading: bool,
    sort: SortState,
    selection: Selection,
    focused_column: usize,
}

impl<T: Record> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>, config: DataTableConfig) -> Self {
        Self {
            config,
            state: TableState::default(),
            columns,
            rows: Vec::new(),
            actions: None,
            pagination: None,
            loading: false,
            sort: SortState::new(),
            selection: Selection::new(),
            focused_column: 0,
        }
    }

    pub fn with_actions(mut self, actions: ActionsConfig) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn with_rows(mut self, rows: Vec<T>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Replace the displayed rows.
    ///
    /// The selection is left alone; owners that replace the whole row set
    /// call [`DataTable::clear_selection`] themselves.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.state.select(match self.state.selected() {
            _ if self.rows.is_empty() => None,
            Some(idx) if idx < self.rows.len() => Some(idx),
            _ => Some(0),
        });
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn row_by_id(&self, id: &str) -> Option<&T> {
        self.rows
            .iter()
            .find(|row| row.row_id(&self.config.row_key) == id)
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_pagination(&mut self, pagination: Option<Pagination>) {
        self.pagination = pagination;
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn visible_columns(&self) -> Vec<&Column<T>> {
        self.columns.iter().filter(|column| column.visible).collect()
    }

    fn shows_actions(&self) -> bool {
        self.actions.map(|actions| actions.any()).unwrap_or(false)
    }

    /// Rendered column headers, with the implicit actions column last
    pub fn headers(&self) -> Vec<ColumnHeader> {
        let mut headers: Vec<ColumnHeader> = self
            .visible_columns()
            .into_iter()
            .map(ColumnHeader::from)
            .collect();
        if self.shows_actions() {
            headers.push(ColumnHeader::actions());
        }
        headers
    }

    fn row_ids(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.row_id(&self.config.row_key))
            .collect()
    }

    // Sorting

    /// Activate the header of `column_key`.
    ///
    /// Returns a sort event only for visible, sortable columns while sorting
    /// is enabled.
    pub fn click_header(&mut self, column_key: &str) -> Option<TableEvent> {
        if !self.config.sort_enabled {
            return None;
        }
        let sortable = self
            .visible_columns()
            .iter()
            .any(|column| column.key == column_key && column.sortable);
        if !sortable {
            return None;
        }

        let direction = self.sort.toggle(column_key);
        debug!("Sort requested: {} {}", column_key, direction.as_str());
        Some(TableEvent::Sort {
            column_key: column_key.to_string(),
            direction,
        })
    }

    // Selection

    pub fn select_all(&mut self, checked: bool) {
        let ids = self.row_ids();
        self.selection.select_all(ids, checked);
    }

    pub fn select_row(&mut self, id: &str, checked: bool) {
        self.selection.select_row(id, checked);
    }

    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(self.rows.len())
    }

    pub fn is_indeterminate(&self) -> bool {
        self.selection.is_indeterminate(self.rows.len())
    }

    /// Header checkbox behaviour: anything short of "all" selects all
    pub fn toggle_select_all(&mut self) {
        let checked = !self.is_all_selected();
        self.select_all(checked);
    }

    // Pagination

    /// Request a specific page. Out-of-range pages are passed through as-is.
    pub fn request_page(&self, page: usize) -> Option<TableEvent> {
        self.pagination
            .filter(|pagination| pagination.controls().is_some())
            .map(|_| TableEvent::PageChange(page))
    }

    pub fn previous_page(&self) -> Option<TableEvent> {
        self.pagination
            .and_then(|pagination| pagination.previous_request())
            .map(TableEvent::PageChange)
    }

    pub fn next_page(&self) -> Option<TableEvent> {
        self.pagination
            .and_then(|pagination| pagination.next_request())
            .map(TableEvent::PageChange)
    }

    // Row actions

    /// Trigger an action on the displayed row at `row_index`
    pub fn trigger_action(&self, row_index: usize, action: RowAction) -> Option<TableEvent> {
        let actions = self.actions?;
        if !actions.shows(action) {
            return None;
        }
        let row = self.rows.get(row_index)?;
        Some(TableEvent::RowAction {
            action,
            row_id: row.row_id(&self.config.row_key),
        })
    }

    // Cursor and focus

    pub fn cursor(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn cursor_row(&self) -> Option<&T> {
        self.cursor().and_then(|idx| self.rows.get(idx))
    }

    pub fn focused_column(&self) -> Option<&Column<T>> {
        self.visible_columns().get(self.focused_column).copied()
    }

    pub fn focus_next_column(&mut self) {
        let count = self.visible_columns().len();
        if count > 0 {
            self.focused_column = (self.focused_column + 1) % count;
        }
    }

    pub fn focus_previous_column(&mut self) {
        let count = self.visible_columns().len();
        if count > 0 {
            self.focused_column = if self.focused_column == 0 {
                count - 1
            } else {
                self.focused_column - 1
            };
        }
    }

    /// Handle a key aimed at the table
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<TableEvent> {
        if self.loading {
            return None;
        }

        match key.code {
            KeyCode::Up => {
                self.highlight_previous();
                None
            }
            KeyCode::Down => {
                self.highlight_next();
                None
            }
            KeyCode::Left => {
                self.focus_previous_column();
                None
            }
            KeyCode::Right => {
                self.focus_next_column();
                None
            }
            KeyCode::Char('s') => {
                let key = self.focused_column()?.key.clone();
                self.click_header(&key)
            }
            KeyCode::Char(' ') if self.config.selectable => {
                let id = self.cursor_row()?.row_id(&self.config.row_key);
                self.selection.toggle_row(&id);
                None
            }
            KeyCode::Char('a') if self.config.selectable => {
                self.toggle_select_all();
                None
            }
            KeyCode::Char('[') => self.previous_page(),
            KeyCode::Char(']') => self.next_page(),
            KeyCode::Char(c) => {
                let action = RowAction::from_shortcut(c)?;
                self.trigger_action(self.cursor()?, action)
            }
            _ => None,
        }
    }

    // View model

    /// Derive what should be drawn for the current inputs and local state
    pub fn view(&self) -> TableView {
        if self.loading {
            return TableView::Loading {
                rows: SKELETON_ROWS,
                columns: self.headers().len(),
            };
        }

        if self.rows.is_empty() {
            return TableView::Empty(self.config.empty_state.clone());
        }

        let visible = self.visible_columns();
        let headers = self
            .headers()
            .into_iter()
            .enumerate()
            .map(|(idx, column)| {
                let indicator = if !column.sortable {
                    SortIndicator::Hidden
                } else {
                    match self.sort.direction_for(&column.key) {
                        Some(SortDirection::Asc) => SortIndicator::Ascending,
                        Some(SortDirection::Desc) => SortIndicator::Descending,
                        None => SortIndicator::Neutral,
                    }
                };
                HeaderView {
                    focused: idx == self.focused_column && !column.is_actions(),
                    column,
                    indicator,
                }
            })
            .collect();

        let row_actions = self
            .actions
            .filter(|actions| actions.any())
            .map(|actions| actions.visible())
            .unwrap_or_default();

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let id = row.row_id(&self.config.row_key);
                RowView {
                    selected: self.selection.is_selected(&id),
                    id,
                    cells: visible.iter().map(|column| column.cell(row)).collect(),
                    actions: row_actions.clone(),
                }
            })
            .collect();

        TableView::Rows(RowsView {
            headers,
            select_all: self
                .config
                .selectable
                .then(|| self.selection.header_state(self.rows.len())),
            rows,
            pagination: self.pagination.and_then(|pagination| pagination.controls()),
        })
    }
}

impl<T: Record> Navigable for DataTable<T> {
    fn highlighted(&self) -> Option<usize> {
        self.state.selected()
    }

    fn highlight(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    fn item_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldValue, Record};
    use crate::table::column::plain_text;
    use crossterm::event::KeyModifiers;

    #[derive(Debug, Clone)]
    struct Item {
        id: u32,
        name: &'static str,
        price: f64,
    }

    impl Record for Item {
        fn field(&self, key: &str) -> Option<FieldValue> {
            match key {
                "id" => Some(FieldValue::Integer(self.id as i64)),
                "name" => Some(self.name.into()),
                "price" => Some(FieldValue::Decimal(self.price)),
                _ => None,
            }
        }

        fn searchable_fields() -> &'static [&'static str] {
            &["name"]
        }
    }

    fn items(n: u32) -> Vec<Item> {
        (1..=n)
            .map(|id| Item {
                id,
                name: "item",
                price: id as f64,
            })
            .collect()
    }

    fn columns() -> Vec<Column<Item>> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("price", "Price").sortable(),
            Column::new("status", "Status"),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn rows_view(table: &DataTable<Item>) -> RowsView {
        match table.view() {
            TableView::Rows(view) => view,
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[test]
    fn test_sort_cycle_and_reset() {
        let mut table = DataTable::new(columns(), DataTableConfig::default()).with_rows(items(3));

        let first = table.click_header("name");
        assert_eq!(
            first,
            Some(TableEvent::Sort {
                column_key: "name".to_string(),
                direction: SortDirection::Asc
            })
        );
        let second = table.click_header("name");
        assert!(matches!(
            second,
            Some(TableEvent::Sort { direction: SortDirection::Desc, .. })
        ));
        let other = table.click_header("price");
        assert!(matches!(
            other,
            Some(TableEvent::Sort { direction: SortDirection::Asc, .. })
        ));
    }

    #[test]
    fn test_non_sortable_column_never_sorts() {
        let mut table = DataTable::new(columns(), DataTableConfig::default()).with_rows(items(3));
        for _ in 0..3 {
            assert_eq!(table.click_header("status"), None);
        }
        assert!(!table.sort_state().is_sorted());
        assert_eq!(table.click_header("unknown"), None);
    }

    #[test]
    fn test_sorting_disabled() {
        let mut table = DataTable::new(columns(), DataTableConfig::default().without_sorting())
            .with_rows(items(3));
        assert_eq!(table.click_header("name"), None);
        assert!(!table.sort_state().is_sorted());
    }

    #[test]
    fn test_hidden_columns_are_excluded() {
        let cols = vec![
            Column::new("name", "Name").sortable(),
            Column::new("price", "Price").sortable().hidden(),
        ];
        let mut table = DataTable::new(cols, DataTableConfig::default()).with_rows(items(1));
        assert_eq!(table.headers().len(), 1);
        assert_eq!(table.click_header("price"), None);
    }

    #[test]
    fn test_actions_column_appended_only_when_shown() {
        let table = DataTable::new(columns(), DataTableConfig::default());
        assert_eq!(table.headers().len(), 3);

        let table = DataTable::new(columns(), DataTableConfig::default())
            .with_actions(ActionsConfig::default());
        assert_eq!(table.headers().len(), 3);

        let table = DataTable::new(columns(), DataTableConfig::default())
            .with_actions(ActionsConfig::preview_only());
        let headers = table.headers();
        assert_eq!(headers.len(), 4);
        assert!(headers[3].is_actions());
        assert_eq!(headers[3].title, "Actions");
    }

    #[test]
    fn test_select_all_then_deselect_one() {
        let mut table = DataTable::new(columns(), DataTableConfig::default().selectable())
            .with_rows(items(4));
        table.select_all(true);
        assert!(table.is_all_selected());

        table.select_row("2", false);
        assert!(table.is_indeterminate());
        assert!(!table.is_all_selected());
        assert_eq!(rows_view(&table).select_all, Some(CheckState::Indeterminate));

        table.toggle_select_all();
        assert!(table.is_all_selected());
    }

    #[test]
    fn test_selection_survives_row_replacement() {
        let mut table = DataTable::new(columns(), DataTableConfig::default().selectable())
            .with_rows(items(2));
        table.select_row("1", true);
        table.set_rows(items(5));
        assert!(table.selection().is_selected("1"));
        table.clear_selection();
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_custom_row_key() {
        let table = DataTable::new(columns(), DataTableConfig::default().with_row_key("name"))
            .with_rows(items(1));
        assert_eq!(rows_view(&table).rows[0].id, "item");
    }

    #[test]
    fn test_loading_renders_five_skeleton_rows() {
        let mut table = DataTable::new(columns(), DataTableConfig::default())
            .with_actions(ActionsConfig::all())
            .with_rows(items(12));
        table.set_loading(true);
        assert_eq!(table.view(), TableView::Loading { rows: 5, columns: 4 });

        table.set_rows(Vec::new());
        assert_eq!(table.view(), TableView::Loading { rows: 5, columns: 4 });
    }

    #[test]
    fn test_empty_rows_show_empty_state() {
        let table: DataTable<Item> = DataTable::new(columns(), DataTableConfig::default());
        assert_eq!(table.view(), TableView::Empty(EmptyState::default()));

        let custom = EmptyState::new("No meals", "Nothing planned yet").with_icon("∅");
        let table: DataTable<Item> =
            DataTable::new(columns(), DataTableConfig::default().with_empty_state(custom.clone()));
        assert_eq!(table.view(), TableView::Empty(custom));
    }

    #[test]
    fn test_rows_view_cells_and_indicators() {
        let mut table = DataTable::new(columns(), DataTableConfig::default())
            .with_actions(ActionsConfig::all())
            .with_rows(items(2));
        table.click_header("price");

        let view = rows_view(&table);
        assert_eq!(view.headers[0].indicator, SortIndicator::Neutral);
        assert_eq!(view.headers[1].indicator, SortIndicator::Ascending);
        assert_eq!(view.headers[2].indicator, SortIndicator::Hidden);
        assert_eq!(view.select_all, None);

        let row = &view.rows[1];
        assert_eq!(row.id, "2");
        assert_eq!(plain_text(&row.cells[0]), "item");
        assert_eq!(plain_text(&row.cells[1]), "2");
        // unknown field degrades to an empty cell
        assert_eq!(plain_text(&row.cells[2]), "");
        assert_eq!(row.actions, RowAction::ORDER.to_vec());
    }

    #[test]
    fn test_pagination_events() {
        let mut table = DataTable::new(columns(), DataTableConfig::default()).with_rows(items(10));
        assert_eq!(table.request_page(2), None);

        table.set_pagination(Some(Pagination::new(1, 10, 10)));
        assert_eq!(table.request_page(2), None);
        assert!(rows_view(&table).pagination.is_none());

        table.set_pagination(Some(Pagination::new(1, 10, 35)));
        assert_eq!(table.previous_page(), None);
        assert_eq!(table.next_page(), Some(TableEvent::PageChange(2)));
        // not clamped
        assert_eq!(table.request_page(99), Some(TableEvent::PageChange(99)));

        table.set_pagination(Some(Pagination::new(4, 10, 35)));
        assert_eq!(table.next_page(), None);
        assert_eq!(table.previous_page(), Some(TableEvent::PageChange(3)));
    }

    #[test]
    fn test_trigger_action_respects_config() {
        let table = DataTable::new(columns(), DataTableConfig::default())
            .with_actions(ActionsConfig::preview_only())
            .with_rows(items(3));
        assert_eq!(
            table.trigger_action(2, RowAction::Preview),
            Some(TableEvent::RowAction {
                action: RowAction::Preview,
                row_id: "3".to_string()
            })
        );
        assert_eq!(table.trigger_action(2, RowAction::Delete), None);
        assert_eq!(table.trigger_action(7, RowAction::Preview), None);
    }

    #[test]
    fn test_keyboard_flow() {
        let mut table = DataTable::new(columns(), DataTableConfig::default().selectable())
            .with_actions(ActionsConfig::all())
            .with_rows(items(3));
        assert_eq!(table.cursor(), Some(0));

        table.handle_key(key(KeyCode::Down));
        assert_eq!(table.cursor(), Some(1));
        table.handle_key(key(KeyCode::Char(' ')));
        assert!(table.selection().is_selected("2"));

        table.handle_key(key(KeyCode::Right));
        let event = table.handle_key(key(KeyCode::Char('s')));
        assert!(matches!(event, Some(TableEvent::Sort { ref column_key, .. }) if column_key == "price"));

        let event = table.handle_key(key(KeyCode::Char('e')));
        assert_eq!(
            event,
            Some(TableEvent::RowAction {
                action: RowAction::Edit,
                row_id: "2".to_string()
            })
        );

        table.handle_key(key(KeyCode::Up));
        table.handle_key(key(KeyCode::Up));
        assert_eq!(table.cursor(), Some(2));
    }

    #[test]
    fn test_keys_ignored_while_loading() {
        let mut table = DataTable::new(columns(), DataTableConfig::default())
            .with_actions(ActionsConfig::all())
            .with_rows(items(3));
        table.set_loading(true);
        assert_eq!(table.handle_key(key(KeyCode::Char('d'))), None);
        assert_eq!(table.handle_key(key(KeyCode::Char('s'))), None);
    }
}
