//! Workout library list with a detail popup

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::models::{ProgramLevel, Workout};
use crate::tui::{
    traits::Navigable,
    ui::{centered_rect, Styles},
};

pub struct WorkoutList {
    pub workouts: Vec<Workout>,
    pub state: ListState,
    /// Index of the workout shown in the popup
    pub detail: Option<usize>,
    pub scroll: u16,
}

fn level_style(level: ProgramLevel) -> ratatui::style::Style {
    match level {
        ProgramLevel::Beginner => Styles::success(),
        ProgramLevel::Intermediate => Styles::warning(),
        ProgramLevel::Advanced => Styles::error(),
    }
}

impl WorkoutList {
    pub fn new(workouts: Vec<Workout>) -> Self {
        let mut state = ListState::default();
        if !workouts.is_empty() {
            state.select(Some(0));
        }
        Self {
            workouts,
            state,
            detail: None,
            scroll: 0,
        }
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail.is_some()
    }

    pub fn selected_workout(&self) -> Option<&Workout> {
        self.state.selected().and_then(|i| self.workouts.get(i))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.detail.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                    self.detail = None;
                    self.scroll = 0;
                }
                KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
                KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.highlight_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.highlight_next(),
            KeyCode::Home => self.highlight_first(),
            KeyCode::End => self.highlight_last(),
            KeyCode::Enter => self.detail = self.state.selected(),
            _ => {}
        }
    }

    pub fn detail_lines(workout: &Workout) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(workout.level.as_str().to_uppercase(), level_style(workout.level)),
                Span::raw(format!(
                    "   ⏱ {} min   🔥 {} cal",
                    workout.duration, workout.calories
                )),
            ]),
            Line::from(""),
            Line::from(Span::styled("About This Workout", Styles::header())),
            Line::from(
                workout
                    .full_description
                    .clone()
                    .unwrap_or_else(|| workout.description.clone()),
            ),
            Line::from(""),
            Line::from(Span::styled("Exercises Included", Styles::header())),
        ];
        lines.extend(
            workout
                .exercises
                .iter()
                .enumerate()
                .map(|(i, exercise)| Line::from(format!("  {}. {}", i + 1, exercise))),
        );
        lines
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .workouts
            .iter()
            .map(|workout| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(workout.title.clone(), Styles::title()),
                        Span::raw("  "),
                        Span::styled(workout.level.as_str(), level_style(workout.level)),
                    ]),
                    Line::from(Span::styled(
                        format!(
                            "  {}  ·  {} min  ·  {} cal  ·  {} exercises",
                            workout.description,
                            workout.duration,
                            workout.calories,
                            workout.exercises.len()
                        ),
                        Styles::inactive(),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("Workouts ({})", self.workouts.len()))
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected())
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, area, &mut self.state);

        if let Some(workout) = self.detail.and_then(|i| self.workouts.get(i)) {
            let popup_area = centered_rect(70, 70, area);
            f.render_widget(Clear, popup_area);
            let paragraph = Paragraph::new(Self::detail_lines(workout))
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0))
                .block(
                    Block::default()
                        .title(format!("{} (Esc to close)", workout.title))
                        .borders(Borders::ALL)
                        .border_style(Styles::active_border()),
                );
            f.render_widget(paragraph, popup_area);
        }
    }
}

impl Navigable for WorkoutList {
    fn highlighted(&self) -> Option<usize> {
        self.state.selected()
    }

    fn highlight(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    fn item_count(&self) -> usize {
        self.workouts.len()
    }
}
