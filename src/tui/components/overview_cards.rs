//! Headline metric cards on the admin overview

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::OverviewCard;
use crate::tui::ui::Styles;

/// Thousands-separated value, e.g. `1,234`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn render_cards(f: &mut Frame, area: Rect, cards: &[OverviewCard]) {
    if cards.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, chunk) in cards.iter().zip(chunks.iter()) {
        let delta_style = if card.delta.starts_with('-') {
            Styles::error()
        } else {
            Styles::success()
        };
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(format_count(card.value), Styles::title())),
            Line::from(vec![
                Span::styled(card.delta.clone(), delta_style),
                Span::styled(" from last month", Styles::inactive()),
            ]),
        ])
        .block(
            Block::default()
                .title(card.title.as_str())
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(paragraph, *chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(86), "86");
        assert_eq!(format_count(1234), "1,234");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
