//! Read-only detail popup for any table row

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::ui::{centered_rect, pad, Styles};

/// Label/value pairs captured from a row when the preview opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPreview {
    pub title: String,
    pub fields: Vec<(String, String)>,
}

impl RecordPreview {
    pub fn new(title: &str, fields: Vec<(String, String)>) -> Self {
        Self {
            title: title.to_string(),
            fields,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 60, area);
        f.render_widget(Clear, popup_area);

        let label_width = self
            .fields
            .iter()
            .map(|(label, _)| unicode_width::UnicodeWidthStr::width(label.as_str()))
            .max()
            .unwrap_or(0);

        let lines: Vec<Line> = self
            .fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(pad(label, label_width), Styles::header()),
                    Span::raw("  "),
                    Span::raw(value.clone()),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(format!("{} (Esc to close)", self.title))
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );
        f.render_widget(paragraph, popup_area);
    }
}
