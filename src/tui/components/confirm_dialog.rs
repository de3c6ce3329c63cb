//! Yes/no confirmation popup

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::ui::{centered_rect, Styles};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogVariant {
    #[default]
    Danger,
    Warning,
    Info,
}

impl DialogVariant {
    fn icon(&self) -> &'static str {
        match self {
            DialogVariant::Danger => "✗",
            DialogVariant::Warning => "⚠",
            DialogVariant::Info => "ℹ",
        }
    }

    fn style(&self) -> Style {
        match self {
            DialogVariant::Danger => Styles::error(),
            DialogVariant::Warning => Styles::warning(),
            DialogVariant::Info => Styles::info(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub description: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub variant: DialogVariant,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            title: "Confirm Action".to_string(),
            description: "Are you sure you want to proceed with this action?".to_string(),
            confirm_text: "Confirm".to_string(),
            cancel_text: "Cancel".to_string(),
            variant: DialogVariant::Danger,
        }
    }
}

impl ConfirmDialog {
    /// Dialog asking to delete a named record
    pub fn delete(entity: &str, name: &str) -> Self {
        Self {
            title: format!("Delete {}", entity),
            description: format!(
                "Are you sure you want to delete \"{}\"? This action cannot be undone.",
                name
            ),
            confirm_text: "Delete".to_string(),
            ..Default::default()
        }
    }

    pub fn with_variant(mut self, variant: DialogVariant) -> Self {
        self.variant = variant;
        self
    }

    /// `Some(true)` on confirm, `Some(false)` on cancel, `None` otherwise
    pub fn handle_key(&self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Some(false),
            _ => None,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 30, area);
        f.render_widget(Clear, popup_area);

        let style = self.variant.style();
        let text = vec![
            Line::from(Span::styled(
                format!("{} {}", self.variant.icon(), self.title),
                style,
            )),
            Line::from(""),
            Line::from(self.description.clone()),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("[Enter/y] {}", self.confirm_text), style),
                Span::raw("   "),
                Span::styled(format!("[Esc/n] {}", self.cancel_text), Styles::inactive()),
            ]),
        ];

        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style),
            );
        f.render_widget(paragraph, popup_area);
    }
}
