//! Home screen for members: profile, workouts, plan meals and subscription

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use std::sync::Arc;

use crate::models::Meal;
use crate::repository::{PageQuery, Repository};
use crate::sample;
use crate::session::SessionUser;
use crate::table::{ActionsConfig, DataTable, DataTableConfig, EmptyState, RowAction, TableEvent};
use crate::tui::{
    components::{MealPreview, PlanDetails, SearchEvent, TraineeInfo, Topbar, WorkoutList},
    entities::TableEntity,
    operations::{LoaderMessage, PageLoader},
    traits::{ScreenAction, ScreenHandler},
    ui::Styles,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberTab {
    Info,
    Workouts,
    Meals,
    Plan,
}

impl MemberTab {
    pub const ALL: [MemberTab; 4] = [
        MemberTab::Info,
        MemberTab::Workouts,
        MemberTab::Meals,
        MemberTab::Plan,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            MemberTab::Info => "Trainee Info",
            MemberTab::Workouts => "Workouts",
            MemberTab::Meals => "Meals",
            MemberTab::Plan => "Plan",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct MemberDashboardScreen {
    pub user: Option<SessionUser>,
    pub tab: MemberTab,
    pub table: DataTable<Meal>,
    pub info: TraineeInfo,
    pub workouts: WorkoutList,
    pub plan: PlanDetails,
    topbar: Topbar,
    loader: PageLoader<Meal>,
    preview: Option<MealPreview>,
}

impl MemberDashboardScreen {
    pub fn new(repository: Arc<dyn Repository<Meal>>, page_size: usize) -> Self {
        let config = DataTableConfig::new(Meal::TITLE)
            .compact()
            .with_empty_state(
                EmptyState::new("No meals yet", "Your plan has no meals assigned.").with_icon("◍"),
            );
        Self {
            user: None,
            tab: MemberTab::Info,
            table: DataTable::new(Meal::columns(), config).with_actions(ActionsConfig::preview_only()),
            info: TraineeInfo::new(sample::trainee()),
            workouts: WorkoutList::new(sample::workouts()),
            plan: PlanDetails::new(sample::subscription_plan(Local::now().date_naive())),
            topbar: Topbar::new("Dashboard", Meal::SEARCH_PLACEHOLDER).without_add(),
            loader: PageLoader::new(repository, PageQuery::new(page_size)),
            preview: None,
        }
    }

    /// Show `user` in the welcome panel and on the Info tab
    pub fn set_user(&mut self, user: Option<SessionUser>) {
        if let Some(user) = &user {
            self.info.profile.full_name = user.name.clone();
            self.info.profile.email = user.email.clone();
        }
        self.user = user;
    }

    pub fn select_tab(&mut self, tab: MemberTab) {
        self.tab = tab;
        self.topbar.searching = false;
    }

    fn tab_bar(&self) -> Tabs<'static> {
        let titles: Vec<Line> = MemberTab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
            .collect();
        Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).border_style(Styles::inactive_border()))
            .select(self.tab.index())
            .highlight_style(Styles::title())
            .divider("│")
    }

    fn handle_meals_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Char('/') => {
                self.topbar.focus_search();
                ScreenAction::None
            }
            KeyCode::Enter => match self.table.cursor().and_then(|idx| {
                self.table.trigger_action(idx, RowAction::Preview)
            }) {
                Some(event) => self.handle_table_event(event),
                None => ScreenAction::None,
            },
            _ => match self.table.handle_key(key) {
                Some(event) => self.handle_table_event(event),
                None => ScreenAction::None,
            },
        }
    }

    fn open_preview(&mut self, row_id: &str) -> ScreenAction {
        match self.table.row_by_id(row_id) {
            Some(meal) => {
                self.preview = Some(MealPreview::new(meal.clone()));
                ScreenAction::None
            }
            None => ScreenAction::SetError(format!("Meal {} is no longer listed", row_id)),
        }
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
                self.loader.load(&mut self.table);
                ScreenAction::None
            }
            TableEvent::PageChange(page) => {
                self.loader.query.page = page;
                self.loader.load(&mut self.table);
                ScreenAction::None
            }
            TableEvent::RowAction {
                action: RowAction::Preview,
                row_id,
            } => self.open_preview(&row_id),
            // preview is the only action shown here
            TableEvent::RowAction { .. } => ScreenAction::None,
        }
    }

    fn welcome(&self) -> Paragraph<'static> {
        let name = self
            .user
            .as_ref()
            .map(|user| user.name.clone())
            .unwrap_or_else(|| "there".to_string());
        let email = self
            .user
            .as_ref()
            .map(|user| user.email.clone())
            .unwrap_or_default();

        Paragraph::new(vec![
            Line::from(Span::styled(format!("Welcome back, {}!", name), Styles::title())),
            Line::from(Span::styled(
                "Track your fitness journey and stay on top of your goals.",
                Styles::inactive(),
            )),
            Line::from(vec![
                Span::styled("Signed in as ", Styles::inactive()),
                Span::styled(email, Styles::info()),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).border_style(Styles::inactive_border()))
    }
}

impl ScreenHandler for MemberDashboardScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(5),
            ])
            .split(area);

        f.render_widget(self.welcome(), chunks[0]);
        f.render_widget(self.tab_bar(), chunks[1]);

        let body = chunks[2];
        match self.tab {
            MemberTab::Info => self.info.render(f, body),
            MemberTab::Workouts => self.workouts.render(f, body),
            MemberTab::Meals => {
                let meal_chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(5)])
                    .split(body);
                self.topbar.render(f, meal_chunks[0], Meal::DESCRIPTION);
                let table_focused = !self.topbar.searching;
                self.table.render(f, meal_chunks[1], table_focused);
            }
            MemberTab::Plan => self.plan.render(f, body, Local::now().date_naive()),
        }

        if let Some(preview) = &self.preview {
            preview.render(f, area);
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        if let Some(preview) = self.preview.as_mut() {
            if preview.handle_key(key) {
                self.preview = None;
            }
            return ScreenAction::None;
        }
        if self.topbar.searching {
            if let Some(SearchEvent::Submit(search)) = self.topbar.handle_key(key) {
                self.loader.query = self.loader.query.clone().with_search(&search).with_page(1);
                self.loader.load(&mut self.table);
            }
            return ScreenAction::None;
        }
        if self.workouts.is_detail_open() {
            self.workouts.handle_key(key);
            return ScreenAction::None;
        }

        match key.code {
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.select_tab(MemberTab::ALL[index]);
                ScreenAction::None
            }
            KeyCode::Tab => {
                self.select_tab(self.tab.next());
                ScreenAction::None
            }
            KeyCode::BackTab => {
                self.select_tab(self.tab.previous());
                ScreenAction::None
            }
            _ => match self.tab {
                MemberTab::Meals => self.handle_meals_key(key),
                MemberTab::Workouts => {
                    self.workouts.handle_key(key);
                    ScreenAction::None
                }
                MemberTab::Info | MemberTab::Plan => ScreenAction::None,
            },
        }
    }

    fn on_enter(&mut self) {
        self.loader.load(&mut self.table);
    }

    fn on_tick(&mut self) -> Vec<ScreenAction> {
        let mut actions = Vec::new();
        while let Some(message) = self.loader.try_next() {
            if let LoaderMessage::Loaded { result, .. } = message {
                if let Err(e) = self.loader.show_page(&mut self.table, result) {
                    actions.push(ScreenAction::SetError(format!("Failed to load meals: {}", e)));
                }
            }
        }
        actions
    }

    fn captures_input(&self) -> bool {
        self.topbar.searching || self.preview.is_some() || self.workouts.is_detail_open()
    }

    fn help_text(&self) -> &'static str {
        "My Dashboard:\n\
        1-4 / Tab - Switch tab (Info, Workouts, Meals, Plan)\n\
        Workouts: ↑/↓ move, Enter opens details, Esc closes\n\
        Meals: ↑/↓ - Move between meals\n\
        Enter / p - Preview meal\n\
        ←/→ - Focus column, s - Sort by it\n\
        [ / ] - Previous/next page\n\
        / - Search meals"
    }
}
