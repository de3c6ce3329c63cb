//! Form field component for user input

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::forms::{FieldKind, FieldSpec, FormValues, ValidationErrors};
use crate::tui::ui::Styles;

/// Individual form field bound to a [`FieldSpec`]
#[derive(Debug, Clone)]
pub struct FormField {
    pub spec: FieldSpec,
    pub value: String,
    pub is_focused: bool,
    /// Cursor position in characters
    pub cursor_position: usize,
    /// Render the value as `*` (password input)
    pub masked: bool,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(spec: FieldSpec) -> Self {
        let value = spec.options().first().cloned().unwrap_or_default();
        let cursor_position = value.chars().count();
        Self {
            spec,
            value,
            is_focused: false,
            cursor_position,
            masked: false,
            validation_error: None,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor_position = self.value.chars().count();
        self
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn is_select(&self) -> bool {
        matches!(self.spec.kind, FieldKind::Select(_))
    }

    /// Rows the field occupies when rendered, including borders
    pub fn height(&self) -> u16 {
        match self.spec.kind {
            FieldKind::TextArea => 5,
            _ => 3,
        }
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if self.is_select() {
            return;
        }
        let idx = self.byte_index(self.cursor_position);
        self.value.insert(idx, c);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn delete_char(&mut self) {
        if self.is_select() || self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let idx = self.byte_index(self.cursor_position);
        self.value.remove(idx);
        self.validation_error = None;
    }

    pub fn delete_char_forward(&mut self) {
        if self.is_select() || self.cursor_position >= self.value.chars().count() {
            return;
        }
        let idx = self.byte_index(self.cursor_position);
        self.value.remove(idx);
        self.validation_error = None;
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.value.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
        self.validation_error = None;
    }

    /// Step through select options; `forward` picks the next one
    pub fn cycle_option(&mut self, forward: bool) {
        let options = self.spec.options();
        if options.is_empty() {
            return;
        }
        let current = options.iter().position(|option| *option == self.value);
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) | (None, false) => options.len() - 1,
            (Some(i), false) => i - 1,
            (None, true) => 0,
        };
        self.value = options[next].clone();
        self.cursor_position = self.value.chars().count();
        self.validation_error = None;
    }

    /// Validate field value against its spec
    pub fn validate(&mut self) -> bool {
        self.validation_error = self.spec.check(&self.value);
        self.validation_error.is_none()
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.is_focused {
            Styles::active_border()
        } else if self.validation_error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };

        let required = if self.spec.required { " *" } else { "" };
        let title = match self.validation_error {
            Some(ref error) => format!("{}{} - {}", self.spec.label, required, error),
            None => format!("{}{}", self.spec.label, required),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let line = if self.value.is_empty() {
            Line::from(Span::styled(self.spec.placeholder.clone(), Styles::inactive()))
        } else if self.masked {
            Line::from("*".repeat(self.value.chars().count()))
        } else if self.is_select() {
            Line::from(vec![
                Span::raw("◀ "),
                Span::styled(self.value.clone(), Styles::info()),
                Span::raw(" ▶"),
            ])
        } else {
            Line::from(self.value.clone())
        };

        let paragraph = Paragraph::new(line)
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);

        // Render cursor if focused and not a select
        if self.is_focused && !self.is_select() {
            let cursor_x = area.x + 1 + self.cursor_position as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Form container that manages multiple fields
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            current_field: 0,
        };
        form.update_focus();
        form
    }

    /// Build a form from a schema, pre-filled with `values` when editing
    pub fn from_specs(specs: Vec<FieldSpec>, values: Option<&FormValues>) -> Self {
        let fields = specs
            .into_iter()
            .map(|spec| {
                let field = FormField::new(spec);
                match values {
                    Some(values) => {
                        let value = values.get(&field.spec.name).to_string();
                        field.with_value(&value)
                    }
                    None => field,
                }
            })
            .collect();
        Self::new(fields)
    }

    fn update_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(i == self.current_field);
        }
    }

    pub fn get_field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.spec.name == name)
    }

    pub fn get_current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    /// Move focus to the next field, wrapping to the first
    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.current_field = (self.current_field + 1) % self.fields.len();
            self.update_focus();
        }
    }

    pub fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.current_field = self
                .current_field
                .checked_sub(1)
                .unwrap_or(self.fields.len() - 1);
            self.update_focus();
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.get_current_field_mut() {
            field.insert_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char();
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char_forward();
        }
    }

    pub fn values(&self) -> FormValues {
        let mut values = FormValues::new();
        for field in &self.fields {
            values.set(&field.spec.name, field.value.as_str());
        }
        values
    }

    /// Validate all fields, marking each with its own error
    pub fn validate_all(&mut self) -> bool {
        let mut all_valid = true;
        for field in &mut self.fields {
            if !field.validate() {
                all_valid = false;
            }
        }
        all_valid
    }

    /// Show errors reported after submission
    pub fn apply_errors(&mut self, errors: &ValidationErrors) {
        for field in &mut self.fields {
            field.validation_error = errors.get(&field.spec.name).map(str::to_string);
        }
    }

    /// Height needed to render every field
    pub fn height(&self) -> u16 {
        self.fields.iter().map(FormField::height).sum()
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|field| Constraint::Length(field.height()))
            .chain(std::iter::once(Constraint::Min(0)))
            .collect();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (field, chunk) in self.fields.iter().zip(chunks.iter()) {
            field.render(f, *chunk);
        }
    }
}
