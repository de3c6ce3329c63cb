//! Generic admin page: topbar, data table and the add/edit/delete popups

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::forms::Editable;
use crate::repository::{PageQuery, Repository};
use crate::table::{
    ActionsConfig, DataTable, DataTableConfig, EmptyState, RowAction, TableEvent,
};
use crate::tui::{
    components::{
        AddEditModal, ConfirmDialog, ModalOutcome, RecordPreview, SearchEvent, Topbar,
    },
    entities::TableEntity,
    operations::{LoaderMessage, PageLoader},
    traits::{ScreenAction, ScreenHandler},
};

/// Delete waiting for confirmation
struct PendingDelete {
    dialog: ConfirmDialog,
    row_id: String,
}

pub struct ManagementScreen<T: TableEntity + Editable> {
    pub table: DataTable<T>,
    pub topbar: Topbar,
    loader: PageLoader<T>,
    modal: Option<AddEditModal>,
    pending_delete: Option<PendingDelete>,
    preview: Option<RecordPreview>,
}

impl<T: TableEntity + Editable> ManagementScreen<T> {
    pub fn new(repository: Arc<dyn Repository<T>>, page_size: usize) -> Self {
        let config = DataTableConfig::new(&format!("{} Management", T::TITLE))
            .selectable()
            .with_empty_state(EmptyState::new(
                &format!("No {} found", T::TITLE.to_lowercase()),
                "Press [n] to add one or [/] to change the search.",
            ));
        let table = DataTable::new(T::columns(), config).with_actions(ActionsConfig::all());

        Self {
            table,
            topbar: Topbar::new(T::TITLE, T::SEARCH_PLACEHOLDER),
            loader: PageLoader::new(repository, PageQuery::new(page_size)),
            modal: None,
            pending_delete: None,
            preview: None,
        }
    }

    pub fn query(&self) -> &PageQuery {
        &self.loader.query
    }

    pub fn reload(&mut self) {
        self.loader.load(&mut self.table);
    }

    fn handle_table_event(&mut self, event: TableEvent) -> ScreenAction {
        match event {
            TableEvent::Sort {
                column_key,
                direction,
            } => {
                self.loader.query = self
                    .loader
                    .query
                    .clone()
                    .with_sort(&column_key, direction)
                    .with_page(1);
                self.reload();
                ScreenAction::None
            }
            TableEvent::PageChange(page) => {
                self.loader.query.page = page;
                self.reload();
                ScreenAction::None
            }
            TableEvent::RowAction { action, row_id } => {
                let Some(row) = self.table.row_by_id(&row_id).cloned() else {
                    return ScreenAction::SetError(format!("Row {} is no longer listed", row_id));
                };
                match action {
                    RowAction::Preview => {
                        self.preview =
                            Some(RecordPreview::new(row.display_name(), row.preview_fields()));
                    }
                    RowAction::Edit => {
                        self.modal = Some(AddEditModal::for_edit(&row, &row_id));
                    }
                    RowAction::Delete => {
                        self.pending_delete = Some(PendingDelete {
                            dialog: ConfirmDialog::delete(T::ENTITY_NAME, row.display_name()),
                            row_id,
                        });
                    }
                }
                ScreenAction::None
            }
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> ScreenAction {
        let Some(modal) = self.modal.as_mut() else {
            return ScreenAction::None;
        };

        match modal.handle_key(key) {
            ModalOutcome::Pending => ScreenAction::None,
            ModalOutcome::Cancelled => {
                self.modal = None;
                ScreenAction::None
            }
            ModalOutcome::Submitted(values) => {
                let base = modal
                    .record_id
                    .as_deref()
                    .and_then(|id| self.table.row_by_id(id))
                    .cloned();
                match T::from_values(&values, base.as_ref()) {
                    Ok(record) => {
                        let name = record.display_name().to_string();
                        self.loader.save(record, name.clone(), base.is_none());
                        self.modal = None;
                        self.table.set_loading(true);
                        ScreenAction::SetStatus(format!("Saving \"{}\"...", name))
                    }
                    Err(errors) => {
                        warn!("{} form rejected: {}", T::ENTITY_NAME, errors);
                        modal.show_errors(&errors);
                        ScreenAction::None
                    }
                }
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> ScreenAction {
        let Some(pending) = self.pending_delete.as_ref() else {
            return ScreenAction::None;
        };

        match pending.dialog.handle_key(key) {
            Some(true) => {
                let row_id = pending.row_id.clone();
                self.pending_delete = None;
                self.loader.delete(row_id);
                self.table.set_loading(true);
                ScreenAction::None
            }
            Some(false) => {
                self.pending_delete = None;
                ScreenAction::None
            }
            None => ScreenAction::None,
        }
    }

    fn apply(&mut self, message: LoaderMessage<T>) -> ScreenAction {
        match message {
            LoaderMessage::Loaded { result, .. } => {
                match self.loader.show_page(&mut self.table, result) {
                    Ok(()) => ScreenAction::None,
                    Err(e) => ScreenAction::SetError(format!("Failed to load {}: {}", T::TITLE, e)),
                }
            }
            LoaderMessage::Saved {
                name,
                created,
                result,
            } => match result {
                Ok(()) => {
                    info!("Saved {} \"{}\"", T::ENTITY_NAME, name);
                    self.reload();
                    let verb = if created { "Created" } else { "Updated" };
                    ScreenAction::SetStatus(format!("{} {} \"{}\"", verb, T::ENTITY_NAME, name))
                }
                Err(e) => {
                    self.table.set_loading(false);
                    ScreenAction::SetError(format!("Failed to save \"{}\": {}", name, e))
                }
            },
            LoaderMessage::Deleted(result) => match result {
                Ok(record) => {
                    let id = record.row_id(&self.table.config.row_key);
                    self.table.select_row(&id, false);
                    self.reload();
                    ScreenAction::SetStatus(format!(
                        "Deleted {} \"{}\"",
                        T::ENTITY_NAME,
                        record.display_name()
                    ))
                }
                Err(e) => {
                    self.table.set_loading(false);
                    ScreenAction::SetError(format!("Failed to delete: {}", e))
                }
            },
        }
    }

    fn description(&self) -> String {
        let selected = self.table.selection().len();
        if selected > 0 {
            format!("{}  ({} selected)", T::DESCRIPTION, selected)
        } else {
            T::DESCRIPTION.to_string()
        }
    }
}

impl<T: TableEntity + Editable> ScreenHandler for ManagementScreen<T> {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        let description = self.description();
        self.topbar.render(f, chunks[0], &description);
        let table_focused = !self.topbar.searching;
        self.table.render(f, chunks[1], table_focused);

        if let Some(modal) = &self.modal {
            modal.render(f, area);
        }
        if let Some(pending) = &self.pending_delete {
            pending.dialog.render(f, area);
        }
        if let Some(preview) = &self.preview {
            preview.render(f, area);
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        if self.preview.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.preview = None;
            }
            return ScreenAction::None;
        }
        if self.pending_delete.is_some() {
            return self.handle_confirm_key(key);
        }
        if self.modal.is_some() {
            return self.handle_modal_key(key);
        }
        if self.topbar.searching {
            if let Some(SearchEvent::Submit(search)) = self.topbar.handle_key(key) {
                self.loader.query = self.loader.query.clone().with_search(&search).with_page(1);
                self.table.clear_selection();
                self.reload();
            }
            return ScreenAction::None;
        }

        match key.code {
            KeyCode::Char('n') => {
                self.modal = Some(AddEditModal::for_new::<T>());
                ScreenAction::None
            }
            KeyCode::Char('/') => {
                self.topbar.focus_search();
                ScreenAction::None
            }
            KeyCode::Char('r') => {
                self.reload();
                ScreenAction::SetStatus(format!("Reloading {}", T::TITLE))
            }
            _ => match self.table.handle_key(key) {
                Some(event) => self.handle_table_event(event),
                None => ScreenAction::None,
            },
        }
    }

    fn on_enter(&mut self) {
        self.reload();
    }

    fn on_tick(&mut self) -> Vec<ScreenAction> {
        let mut actions = Vec::new();
        while let Some(message) = self.loader.try_next() {
            actions.push(self.apply(message));
        }
        actions
    }

    fn captures_input(&self) -> bool {
        self.topbar.searching
            || self.modal.is_some()
            || self.pending_delete.is_some()
            || self.preview.is_some()
    }

    fn help_text(&self) -> &'static str {
        "Management:\n\
        ↑/↓ - Move between rows\n\
        ←/→ - Focus column, s - Sort by it\n\
        Space - Select row, a - Select all\n\
        [ / ] - Previous/next page\n\
        p - Preview, e - Edit, d - Delete\n\
        n - Add new, / - Search, r - Reload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Supplement;
    use crate::repository::InMemoryRepository;
    use crate::sample;
    use crate::table::SortDirection;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(page_size: usize) -> (ManagementScreen<Supplement>, InMemoryRepository<Supplement>) {
        let repository = InMemoryRepository::new(sample::supplements());
        let screen = ManagementScreen::new(Arc::new(repository.clone()), page_size);
        (screen, repository)
    }

    /// Apply background results until the table is idle
    async fn settle(screen: &mut ManagementScreen<Supplement>) -> Vec<ScreenAction> {
        let mut actions = Vec::new();
        while screen.table.is_loading() {
            match screen.loader.next().await {
                Some(message) => actions.push(screen.apply(message)),
                None => break,
            }
        }
        actions
    }

    #[tokio::test]
    async fn test_enter_loads_first_page() {
        let (mut screen, _) = screen(4);
        screen.on_enter();
        assert!(screen.table.is_loading());
        settle(&mut screen).await;

        assert_eq!(screen.table.rows().len(), 4);
        assert_eq!(screen.table.pagination().map(|p| p.total_pages()), Some(2));
    }

    #[tokio::test]
    async fn test_sort_key_reorders_through_repository() {
        let (mut screen, _) = screen(10);
        screen.on_enter();
        settle(&mut screen).await;

        // focus "Price" then sort
        screen.handle_key_event(key(KeyCode::Right));
        screen.handle_key_event(key(KeyCode::Right));
        screen.handle_key_event(key(KeyCode::Char('s')));
        assert_eq!(
            screen.query().sort,
            Some(("price".to_string(), SortDirection::Asc))
        );
        settle(&mut screen).await;
        assert_eq!(screen.table.rows()[0].name, "Creatine Monohydrate");
    }

    #[tokio::test]
    async fn test_search_resets_page() {
        let (mut screen, _) = screen(4);
        screen.on_enter();
        settle(&mut screen).await;
        screen.handle_key_event(key(KeyCode::Char(']')));
        assert_eq!(screen.query().page, 2);
        settle(&mut screen).await;

        screen.handle_key_event(key(KeyCode::Char('/')));
        assert!(screen.captures_input());
        for c in "protein".chars() {
            screen.handle_key_event(key(KeyCode::Char(c)));
        }
        screen.handle_key_event(key(KeyCode::Enter));
        assert_eq!(screen.query().page, 1);
        assert_eq!(screen.query().search.as_deref(), Some("protein"));
        settle(&mut screen).await;
        assert_eq!(screen.table.rows().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (mut screen, repository) = screen(10);
        screen.on_enter();
        settle(&mut screen).await;

        screen.handle_key_event(key(KeyCode::Char('d')));
        assert!(screen.pending_delete.is_some());
        screen.handle_key_event(key(KeyCode::Esc));
        assert!(screen.pending_delete.is_none());
        assert_eq!(repository.list().await.unwrap().len(), 6);

        screen.handle_key_event(key(KeyCode::Char('d')));
        screen.handle_key_event(key(KeyCode::Enter));
        let actions = settle(&mut screen).await;
        assert!(actions.contains(&ScreenAction::SetStatus(
            "Deleted Supplement \"Whey Protein Pro\"".to_string()
        )));
        assert_eq!(screen.table.rows().len(), 5);
        assert_eq!(repository.list().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_edit_keeps_id_and_updates_row() {
        let (mut screen, repository) = screen(10);
        screen.on_enter();
        settle(&mut screen).await;

        screen.handle_key_event(key(KeyCode::Char('e')));
        assert!(screen.captures_input());
        // clear the name field and type a new one
        for _ in 0.."Whey Protein Pro".len() {
            screen.handle_key_event(key(KeyCode::Backspace));
        }
        for c in "Whey Isolate".chars() {
            screen.handle_key_event(key(KeyCode::Char(c)));
        }
        let action = screen.handle_key_event(key(KeyCode::Enter));
        assert!(matches!(action, ScreenAction::SetStatus(_)));
        settle(&mut screen).await;

        let updated = repository.get("1").await.unwrap();
        assert_eq!(updated.name, "Whey Isolate");
        assert_eq!(repository.list().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_invalid_new_record_keeps_modal_open() {
        let (mut screen, _) = screen(10);
        screen.on_enter();
        settle(&mut screen).await;

        screen.handle_key_event(key(KeyCode::Char('n')));
        let action = screen.handle_key_event(key(KeyCode::Enter));
        assert_eq!(action, ScreenAction::None);
        assert!(screen.modal.is_some());
    }

    #[tokio::test]
    async fn test_preview_opens_and_closes() {
        let (mut screen, _) = screen(10);
        screen.on_enter();
        settle(&mut screen).await;

        screen.handle_key_event(key(KeyCode::Char('p')));
        let preview = screen.preview.as_ref().map(|p| p.title.clone());
        assert_eq!(preview.as_deref(), Some("Whey Protein Pro"));
        screen.handle_key_event(key(KeyCode::Esc));
        assert!(screen.preview.is_none());
    }
}
