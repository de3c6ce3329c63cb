//! Admin home: headline cards, quick navigation and the newest users

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;

use crate::models::{Member, OverviewCard};
use crate::repository::{PageQuery, Repository};
use crate::sample;
use crate::table::{DataTable, DataTableConfig, SortDirection};
use crate::tui::{
    app::Screen,
    components::{overview_cards::render_cards, Topbar},
    entities::TableEntity,
    operations::{LoaderMessage, PageLoader},
    traits::{ScreenAction, ScreenHandler},
    ui::Styles,
};

/// Rows in the recent users table
const RECENT_USERS: usize = 5;

/// Number keys that jump to a management page
const QUICK_LINKS: [(char, &str, Screen); 4] = [
    ('1', "Supplements", Screen::Supplements),
    ('2', "Meal Plans", Screen::MealPlans),
    ('3', "Training", Screen::Training),
    ('4', "Users", Screen::Users),
];

pub struct OverviewScreen {
    pub cards: Vec<OverviewCard>,
    pub recent_users: DataTable<Member>,
    topbar: Topbar,
    loader: PageLoader<Member>,
}

impl OverviewScreen {
    pub fn new(members: Arc<dyn Repository<Member>>) -> Self {
        let config = DataTableConfig::new("Recently Joined").compact().without_sorting();
        let query = PageQuery::new(RECENT_USERS).with_sort("joinedAt", SortDirection::Desc);
        Self {
            cards: sample::overview(),
            recent_users: DataTable::new(Member::columns(), config),
            topbar: Topbar::new("Dashboard", "Search...").without_add(),
            loader: PageLoader::new(members, query),
        }
    }

    fn welcome(&self) -> Paragraph<'static> {
        let mut links: Vec<Span> = vec![Span::styled("Jump to: ", Styles::inactive())];
        for (shortcut, label, _) in QUICK_LINKS.iter() {
            links.push(Span::styled(format!("[{}] ", shortcut), Styles::success()));
            links.push(Span::raw(format!("{}   ", label)));
        }

        Paragraph::new(vec![
            Line::from(Span::styled("Welcome to Trainify Dashboard", Styles::title())),
            Line::from(
                "Manage your supplements, meal plans, training programs, and users from this \
                 central dashboard. Use the sidebar navigation to access different sections.",
            ),
            Line::from(""),
            Line::from(links),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Styles::inactive_border()))
    }
}

impl ScreenHandler for OverviewScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(7),
                Constraint::Min(5),
            ])
            .split(area);

        self.topbar.render(f, chunks[0], "Overview of the platform");
        render_cards(f, chunks[1], &self.cards);
        f.render_widget(self.welcome(), chunks[2]);
        self.recent_users.render(f, chunks[3], true);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Char(c) => QUICK_LINKS
                .iter()
                .find(|(shortcut, _, _)| *shortcut == c)
                .map(|(_, _, screen)| ScreenAction::NavigateTo(screen.clone()))
                .unwrap_or(ScreenAction::None),
            KeyCode::Up | KeyCode::Down => {
                self.recent_users.handle_key(key);
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn on_enter(&mut self) {
        self.loader.load(&mut self.recent_users);
    }

    fn on_tick(&mut self) -> Vec<ScreenAction> {
        let mut actions = Vec::new();
        while let Some(message) = self.loader.try_next() {
            if let LoaderMessage::Loaded { result, .. } = message {
                if let Err(e) = self.loader.show_page(&mut self.recent_users, result) {
                    actions.push(ScreenAction::SetError(format!("Failed to load users: {}", e)));
                }
            }
        }
        actions
    }

    fn help_text(&self) -> &'static str {
        "Overview:\n\
        1 - Supplements\n\
        2 - Meal Plans\n\
        3 - Training Programs\n\
        4 - Users\n\
        ↑/↓ - Move through recent users"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crossterm::event::KeyModifiers;

    #[tokio::test]
    async fn test_recent_users_newest_first() {
        let repository = InMemoryRepository::new(sample::members());
        let mut screen = OverviewScreen::new(Arc::new(repository));
        screen.on_enter();
        if let Some(LoaderMessage::Loaded { result, .. }) = screen.loader.next().await {
            screen.loader.show_page(&mut screen.recent_users, result).unwrap();
        }

        let joined: Vec<_> = screen.recent_users.rows().iter().map(|m| m.joined_at).collect();
        let mut sorted = joined.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(joined, sorted);
        assert!(joined.len() <= RECENT_USERS);
    }

    #[test]
    fn test_quick_links_navigate() {
        let repository = InMemoryRepository::new(Vec::<Member>::new());
        let mut screen = OverviewScreen::new(Arc::new(repository));
        let action = screen.handle_key_event(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE));
        assert_eq!(action, ScreenAction::NavigateTo(Screen::Training));
        let action = screen.handle_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(action, ScreenAction::None);
        assert_eq!(screen.cards.len(), 4);
    }
}
