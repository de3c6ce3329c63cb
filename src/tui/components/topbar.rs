//! Page title bar with a search box

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::form_field::FormField;
use crate::forms::FieldSpec;
use crate::tui::ui::Styles;

/// What the owner should do after a key reached the search box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// Run the search with this query (may be empty)
    Submit(String),
    /// Leave the search box without searching
    Dismiss,
}

pub struct Topbar {
    pub title: String,
    pub search: FormField,
    pub searching: bool,
    pub show_add: bool,
}

impl Topbar {
    pub fn new(title: &str, placeholder: &str) -> Self {
        Self {
            title: title.to_string(),
            search: FormField::new(
                FieldSpec::text("search", "Search").with_placeholder(placeholder),
            ),
            searching: false,
            show_add: true,
        }
    }

    pub fn without_add(mut self) -> Self {
        self.show_add = false;
        self
    }

    pub fn focus_search(&mut self) {
        self.searching = true;
        self.search.set_focus(true);
    }

    fn blur(&mut self) {
        self.searching = false;
        self.search.set_focus(false);
    }

    pub fn query(&self) -> &str {
        self.search.value.trim()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchEvent> {
        match key.code {
            KeyCode::Enter => {
                self.blur();
                Some(SearchEvent::Submit(self.query().to_string()))
            }
            KeyCode::Esc => {
                self.blur();
                Some(SearchEvent::Dismiss)
            }
            KeyCode::Char(c) => {
                self.search.insert_char(c);
                None
            }
            KeyCode::Backspace => {
                self.search.delete_char();
                None
            }
            KeyCode::Delete => {
                self.search.delete_char_forward();
                None
            }
            KeyCode::Left => {
                self.search.move_cursor_left();
                None
            }
            KeyCode::Right => {
                self.search.move_cursor_right();
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, description: &str) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(36)])
            .split(area);

        let mut hint = vec![Span::styled(description.to_string(), Styles::inactive())];
        if self.show_add {
            hint.push(Span::raw("  "));
            hint.push(Span::styled("[n] Add New", Styles::success()));
        }
        let heading = Paragraph::new(vec![
            Line::from(Span::styled(self.title.clone(), Styles::title())),
            Line::from(hint),
        ])
        .block(Block::default().borders(Borders::BOTTOM).border_style(Styles::inactive_border()));
        f.render_widget(heading, chunks[0]);

        self.search.render(f, chunks[1]);
    }
}
