//! Modal form for creating and editing records

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::form_field::Form;
use crate::forms::{Editable, FormValues, ValidationErrors};
use crate::tui::ui::{centered_rect, Styles};

/// Result of a key press inside the modal
#[derive(Debug, Clone, PartialEq)]
pub enum ModalOutcome {
    /// Still editing
    Pending,
    Cancelled,
    /// Field-level checks passed; the owner builds the entity from these values
    Submitted(FormValues),
}

pub struct AddEditModal {
    pub title: String,
    pub is_edit: bool,
    pub form: Form,
    /// Row being edited
    pub record_id: Option<String>,
}

impl AddEditModal {
    /// Empty modal for a new record
    pub fn for_new<T: Editable>() -> Self {
        Self {
            title: T::add_title(),
            is_edit: false,
            form: Form::from_specs(T::form_fields(), None),
            record_id: None,
        }
    }

    /// Modal pre-filled from an existing record
    pub fn for_edit<T: Editable>(record: &T, record_id: &str) -> Self {
        Self {
            title: T::edit_title(),
            is_edit: true,
            form: Form::from_specs(T::form_fields(), Some(&record.to_values())),
            record_id: Some(record_id.to_string()),
        }
    }

    pub fn subtitle(&self) -> &'static str {
        if self.is_edit {
            "Update the information below"
        } else {
            "Fill in the details to create a new item"
        }
    }

    pub fn show_errors(&mut self, errors: &ValidationErrors) {
        self.form.apply_errors(errors);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ModalOutcome {
        match key.code {
            KeyCode::Esc => return ModalOutcome::Cancelled,
            KeyCode::Enter => {
                if self.form.validate_all() {
                    return ModalOutcome::Submitted(self.form.values());
                }
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.form.validate_all() {
                    return ModalOutcome::Submitted(self.form.values());
                }
            }
            KeyCode::Char(' ') if self.current_is_select() => self.cycle(true),
            KeyCode::Right if self.current_is_select() => self.cycle(true),
            KeyCode::Left if self.current_is_select() => self.cycle(false),
            KeyCode::Left => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_right();
                }
            }
            KeyCode::Char(c) => self.form.insert_char(c),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Delete => self.form.delete_forward(),
            _ => {}
        }
        ModalOutcome::Pending
    }

    fn current_is_select(&self) -> bool {
        self.form
            .fields
            .get(self.form.current_field)
            .map(|field| field.is_select())
            .unwrap_or(false)
    }

    fn cycle(&mut self, forward: bool) {
        if let Some(field) = self.form.get_current_field_mut() {
            field.cycle_option(forward);
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 85, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_style(Styles::active_border());
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        f.render_widget(
            Paragraph::new(Span::styled(self.subtitle(), Styles::inactive())),
            chunks[0],
        );
        self.form.render(f, chunks[1]);

        let submit = if self.is_edit { "Update" } else { "Create" };
        let hints = Line::from(vec![
            Span::styled(format!("Enter: {}", submit), Styles::success()),
            Span::raw("  Tab/↑↓: Field  ←→/Space: Option  "),
            Span::styled("Esc: Cancel", Styles::inactive()),
        ]);
        f.render_widget(Paragraph::new(hints), chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealPlan;
    use crate::sample;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_titles() {
        let modal = AddEditModal::for_new::<MealPlan>();
        assert_eq!(modal.title, "Add New Meal Plan");
        assert!(!modal.is_edit);

        let plan = sample::meal_plans().remove(0);
        let modal = AddEditModal::for_edit(&plan, &plan.id);
        assert_eq!(modal.title, "Edit Meal Plan");
        assert_eq!(modal.record_id.as_deref(), Some("1"));
        assert_eq!(modal.form.values().get("name"), "Fat Loss Accelerator");
    }

    #[test]
    fn test_submit_blocked_until_valid() {
        let mut modal = AddEditModal::for_new::<MealPlan>();
        assert_eq!(modal.handle_key(key(KeyCode::Enter)), ModalOutcome::Pending);
        assert!(modal.form.fields[0].validation_error.is_some());

        for c in "Keto".chars() {
            modal.handle_key(key(KeyCode::Char(c)));
        }
        let specs = [("calories", "1800"), ("duration", "30"), ("price", "49")];
        for (name, value) in specs {
            let field = modal
                .form
                .fields
                .iter_mut()
                .find(|field| field.spec.name == name)
                .unwrap();
            *field = field.clone().with_value(value);
        }

        match modal.handle_key(key(KeyCode::Enter)) {
            ModalOutcome::Submitted(values) => {
                assert_eq!(values.get("name"), "Keto");
                assert_eq!(values.get("type"), "weight-loss");
                let plan = MealPlan::from_values(&values, None).unwrap();
                assert_eq!(plan.calories, 1800);
            }
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn test_escape_cancels() {
        let mut modal = AddEditModal::for_new::<MealPlan>();
        assert_eq!(modal.handle_key(key(KeyCode::Esc)), ModalOutcome::Cancelled);
    }

    #[test]
    fn test_space_cycles_select() {
        let mut modal = AddEditModal::for_new::<MealPlan>();
        modal.handle_key(key(KeyCode::Tab));
        modal.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(modal.form.values().get("type"), "muscle-gain");
    }
}
