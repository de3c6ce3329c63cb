//! Read-only meal detail popup

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::Meal;
use crate::tui::ui::{centered_rect, status_badge, Styles};

pub struct MealPreview {
    pub meal: Meal,
    pub scroll: u16,
}

impl MealPreview {
    pub fn new(meal: Meal) -> Self {
        Self { meal, scroll: 0 }
    }

    /// Returns `true` when the preview should close
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        false
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let meal = &self.meal;
        let facts = &meal.nutrition_facts;

        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("{} PLAN", meal.plan.as_str().to_uppercase()), Styles::warning()),
                Span::raw("  "),
                status_badge(meal.status),
            ]),
            Line::from(""),
            Line::from(meal.description.clone()),
            Line::from(""),
            Line::from(format!(
                "⏱ {} min   ⚇ {} serving(s)   {} level   {}   {} cal",
                meal.cooking_time,
                meal.servings,
                meal.difficulty,
                meal.category,
                meal.calories
            )),
            Line::from(""),
            Line::from(Span::styled("Nutrition Facts", Styles::header())),
            Line::from(format!(
                "Protein {}g   Carbs {}g   Fats {}g   Fiber {}g",
                facts.protein, facts.carbs, facts.fats, facts.fiber
            )),
            Line::from(""),
            Line::from(Span::styled("Ingredients", Styles::header())),
        ];
        lines.extend(
            meal.ingredients
                .iter()
                .map(|ingredient| Line::from(format!("  • {}", ingredient))),
        );
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Preparation", Styles::header())));
        lines.extend(
            meal.preparation_method
                .lines()
                .map(|step| Line::from(format!("  {}", step))),
        );
        lines
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 80, area);
        f.render_widget(Clear, popup_area);

        let paragraph = Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .block(
                Block::default()
                    .title(format!("{} (Esc to close)", self.meal.name))
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            );
        f.render_widget(paragraph, popup_area);
    }
}
