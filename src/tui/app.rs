//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::sync::Arc;
use tracing::{error, info, warn};

use super::screens::*;
use crate::config::Config;
use crate::models::{Meal, MealPlan, Member, Supplement, TrainingProgram};
use crate::repository::InMemoryRepository;
use crate::session::{Access, AuthSession, SessionRole};
use crate::tui::{
    components::{Sidebar, StatusDisplay},
    entities::TableEntity,
    traits::{Navigable, ScreenAction, ScreenHandler},
    ui::{centered_rect, Styles},
};

/// Application screens
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login,
    Register,
    Overview,
    Supplements,
    MealPlans,
    Training,
    Users,
    MemberDashboard,
}

impl Screen {
    /// Role a session needs to open this screen; `None` for sign-in and sign-up
    pub fn required_role(&self) -> Option<SessionRole> {
        match self {
            Screen::Login | Screen::Register => None,
            Screen::MemberDashboard => Some(SessionRole::User),
            _ => Some(SessionRole::Admin),
        }
    }

    /// Landing screen after signing in with `role`
    pub fn home_for(role: SessionRole) -> Self {
        match role {
            SessionRole::Admin => Screen::Overview,
            SessionRole::User => Screen::MemberDashboard,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Sign In",
            Screen::Register => "Create Account",
            Screen::Overview => "Overview",
            Screen::Supplements => "Supplements",
            Screen::MealPlans => "Meal Plans",
            Screen::Training => "Training Programs",
            Screen::Users => "Users",
            Screen::MemberDashboard => "My Dashboard",
        }
    }

    /// Admin screens are laid out next to the sidebar
    pub fn has_sidebar(&self) -> bool {
        self.required_role() == Some(SessionRole::Admin)
    }
}

/// Which pane receives keys on admin screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Application configuration
    pub config: Config,
    pub session: AuthSession,

    pub sidebar: Sidebar,
    pub focus: Focus,

    // Screen states
    pub login: LoginScreen,
    pub register: RegisterScreen,
    pub overview: OverviewScreen,
    pub supplements: ManagementScreen<Supplement>,
    pub meal_plans: ManagementScreen<MealPlan>,
    pub training: ManagementScreen<TrainingProgram>,
    pub users: ManagementScreen<Member>,
    pub member_dashboard: MemberDashboardScreen,

    // Global application state
    pub status: StatusDisplay,
    pub should_quit: bool,
    pub show_help_popup: bool,
}

fn repository<T: TableEntity>(config: &Config) -> InMemoryRepository<T> {
    InMemoryRepository::new(T::seed()).with_latency(config.mock_latency())
}

impl App {
    /// Create a new TUI application over a restored session
    pub fn new(config: Config, session: AuthSession) -> Self {
        let page_size = config.page_size;
        // overview and users page share one member list
        let members = Arc::new(repository::<Member>(&config));

        Self {
            current_screen: Screen::Login,
            session,
            sidebar: Sidebar::new(),
            focus: Focus::Content,

            login: LoginScreen::new(),
            register: RegisterScreen::new(),
            overview: OverviewScreen::new(members.clone()),
            supplements: ManagementScreen::new(
                Arc::new(repository::<Supplement>(&config)),
                page_size,
            ),
            meal_plans: ManagementScreen::new(Arc::new(repository::<MealPlan>(&config)), page_size),
            training: ManagementScreen::new(
                Arc::new(repository::<TrainingProgram>(&config)),
                page_size,
            ),
            users: ManagementScreen::new(members, page_size),
            member_dashboard: MemberDashboardScreen::new(
                Arc::new(repository::<Meal>(&config)),
                page_size,
            ),

            status: StatusDisplay::new(),
            should_quit: false,
            show_help_popup: false,
            config,
        }
    }

    /// Open the screen the restored session lands on
    pub fn start(&mut self) {
        let home = match self.session.user() {
            Some(user) => {
                self.status.set_info(format!("Welcome back, {}", user.name));
                Screen::home_for(user.role)
            }
            None => Screen::Login,
        };
        self.navigate_to_screen(home);
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.start();
        let tick_rate = self.config.tick_rate();

        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            self.on_tick();

            if self.should_quit {
                break;
            }
        }

        info!("Leaving trainify TUI");
        Ok(())
    }

    fn handler(&self, screen: &Screen) -> &dyn ScreenHandler {
        match screen {
            Screen::Login => &self.login,
            Screen::Register => &self.register,
            Screen::Overview => &self.overview,
            Screen::Supplements => &self.supplements,
            Screen::MealPlans => &self.meal_plans,
            Screen::Training => &self.training,
            Screen::Users => &self.users,
            Screen::MemberDashboard => &self.member_dashboard,
        }
    }

    fn handler_mut(&mut self, screen: &Screen) -> &mut dyn ScreenHandler {
        match screen {
            Screen::Login => &mut self.login,
            Screen::Register => &mut self.register,
            Screen::Overview => &mut self.overview,
            Screen::Supplements => &mut self.supplements,
            Screen::MealPlans => &mut self.meal_plans,
            Screen::Training => &mut self.training,
            Screen::Users => &mut self.users,
            Screen::MemberDashboard => &mut self.member_dashboard,
        }
    }

    /// Screen actually shown when `screen` is requested with the current session
    pub fn resolve(&self, screen: Screen) -> Screen {
        if matches!(screen, Screen::Login | Screen::Register) {
            return match self.session.user() {
                Some(user) => Screen::home_for(user.role),
                None => screen,
            };
        }

        match self.session.guard(screen.required_role()) {
            Access::Allowed => screen,
            Access::RedirectToLogin => {
                info!("{} needs a session, showing login", screen.title());
                Screen::Login
            }
            Access::RedirectToHome(role) => {
                warn!("{} is not available to the {} role", screen.title(), role.as_str());
                Screen::home_for(role)
            }
        }
    }

    /// Navigate to a specific screen, subject to the session guard
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        let target = self.resolve(screen);
        if target == Screen::MemberDashboard {
            self.member_dashboard.set_user(self.session.user().cloned());
        }
        self.sidebar.sync_with(&target);
        self.focus = Focus::Content;
        self.current_screen = target.clone();
        self.handler_mut(&target).on_enter();
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help_popup = false;
            }
            return;
        }
        if key.code == KeyCode::F(1) {
            self.show_help_popup = true;
            return;
        }

        let current = self.current_screen.clone();
        if !self.handler(&current).captures_input() && self.handle_global_key(key, &current) {
            return;
        }

        if self.focus == Focus::Sidebar && current.has_sidebar() {
            self.handle_sidebar_key(key);
            return;
        }

        let action = self.handler_mut(&current).handle_key_event(key);
        self.apply_action(action);
    }

    /// Global shortcuts; returns `true` when the key was consumed
    fn handle_global_key(&mut self, key: KeyEvent, current: &Screen) -> bool {
        match key.code {
            KeyCode::Char('?') => self.show_help_popup = true,
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('L') if self.session.is_authenticated() => {
                self.apply_action(ScreenAction::Logout)
            }
            KeyCode::Tab if current.has_sidebar() => {
                self.focus = match self.focus {
                    Focus::Sidebar => Focus::Content,
                    Focus::Content => Focus::Sidebar,
                };
            }
            KeyCode::Char('b') if current.has_sidebar() => self.sidebar.toggle_collapsed(),
            _ => return false,
        }
        true
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.sidebar.highlight_previous(),
            KeyCode::Down => self.sidebar.highlight_next(),
            KeyCode::Home => self.sidebar.highlight_first(),
            KeyCode::End => self.sidebar.highlight_last(),
            KeyCode::Enter | KeyCode::Right => {
                if let Some(screen) = self.sidebar.selected_screen() {
                    self.navigate_to_screen(screen);
                }
            }
            KeyCode::Esc => self.focus = Focus::Content,
            _ => {}
        }
    }

    /// Carry out what a screen asked for
    pub fn apply_action(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::NavigateTo(screen) => self.navigate_to_screen(screen),
            ScreenAction::Login { email, password } => {
                let result = self
                    .session
                    .login(&email, &password)
                    .map(|user| (user.role, user.name.clone()));
                match result {
                    Ok((role, name)) => {
                        self.status.set_success(format!("Signed in as {}", name));
                        self.navigate_to_screen(Screen::home_for(role));
                    }
                    Err(e) => {
                        warn!("Login rejected: {}", e);
                        self.login.set_error(e.to_string());
                    }
                }
            }
            ScreenAction::Register(registration) => {
                let result = self
                    .session
                    .register(&registration)
                    .map(|user| (user.role, user.name.clone()));
                match result {
                    Ok((role, name)) => {
                        self.register.reset();
                        self.status.set_success(format!("Welcome to Trainify, {}", name));
                        self.navigate_to_screen(Screen::home_for(role));
                    }
                    Err(e) => {
                        warn!("Registration rejected: {}", e);
                        self.register.set_error(e.to_string());
                    }
                }
            }
            ScreenAction::Logout => match self.session.logout() {
                Ok(()) => {
                    self.login.reset();
                    self.register.reset();
                    self.status.set_info("Signed out".to_string());
                    self.navigate_to_screen(Screen::Login);
                }
                Err(e) => {
                    error!("Logout failed: {}", e);
                    self.status.set_error(format!("Logout failed: {}", e));
                }
            },
            ScreenAction::Quit => self.should_quit = true,
            ScreenAction::SetStatus(message) => self.status.set_info(message),
            ScreenAction::SetError(message) => {
                error!("{}", message);
                self.status.set_error(message);
            }
            ScreenAction::None => {}
        }
    }

    /// Drain finished background work of every screen
    pub fn on_tick(&mut self) {
        let mut actions = Vec::new();
        actions.extend(self.overview.on_tick());
        actions.extend(self.supplements.on_tick());
        actions.extend(self.meal_plans.on_tick());
        actions.extend(self.training.on_tick());
        actions.extend(self.users.on_tick());
        actions.extend(self.member_dashboard.on_tick());
        for action in actions {
            self.apply_action(action);
        }

        if self.status.should_auto_clear() {
            self.status.clear();
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        let current = self.current_screen.clone();
        let content = if current.has_sidebar() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(self.sidebar.width()), Constraint::Min(0)])
                .split(chunks[0]);
            let sidebar_focused = self.focus == Focus::Sidebar;
            self.sidebar.render(f, columns[0], sidebar_focused, &current);
            columns[1]
        } else {
            chunks[0]
        };

        self.handler_mut(&current).draw(f, content);
        self.status.render(f, chunks[1], &self.hints());

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    fn hints(&self) -> String {
        let shortcuts = if self.current_screen == Screen::Login {
            "Enter: Sign in | F2: Create account | Esc: Quit | F1: Help"
        } else if self.current_screen == Screen::Register {
            "Enter: Next / Create | Esc: Back to sign in | F1: Help"
        } else if self.current_screen == Screen::MemberDashboard {
            "1-4/Tab: Switch tab | L: Logout | q: Quit | F1/?: Help"
        } else if self.current_screen.has_sidebar() {
            "Tab: Sidebar | b: Collapse | L: Logout | q: Quit | F1/?: Help"
        } else {
            "L: Logout | q: Quit | F1/?: Help"
        };
        format!("Trainify - {} | {}", self.current_screen.title(), shortcuts)
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 70, area);
        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help()).block(
            Block::default()
                .title("Help - Context Shortcuts")
                .borders(Borders::ALL)
                .border_style(Styles::warning()),
        );
        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    pub fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            Ctrl+C / q - Quit\n\
            F1 / ? - Toggle this help\n\
            Tab - Switch between sidebar and content\n\
            b - Collapse sidebar\n\
            L - Sign out\n\n";

        format!(
            "{}{}",
            global_help,
            self.handler(&self.current_screen).help_text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::Registration;
    use crate::session::MemorySessionStore;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let config = Config {
            mock_latency_ms: 0,
            ..Config::default()
        };
        let session = AuthSession::restore(Box::new(MemorySessionStore::new())).unwrap();
        App::new(config, session)
    }

    fn login(app: &mut App, email: &str) {
        app.apply_action(ScreenAction::Login {
            email: email.to_string(),
            password: "secret1".to_string(),
        });
    }

    #[tokio::test]
    async fn test_starts_at_login_without_session() {
        let mut app = app();
        app.start();
        assert_eq!(app.current_screen, Screen::Login);

        app.navigate_to_screen(Screen::Users);
        assert_eq!(app.current_screen, Screen::Login);
    }

    #[tokio::test]
    async fn test_admin_login_and_role_guard() {
        let mut app = app();
        app.start();
        login(&mut app, "admin@trainify.com");
        assert_eq!(app.current_screen, Screen::Overview);

        app.navigate_to_screen(Screen::Supplements);
        assert_eq!(app.current_screen, Screen::Supplements);

        app.navigate_to_screen(Screen::MemberDashboard);
        assert_eq!(app.current_screen, Screen::Overview);

        app.navigate_to_screen(Screen::Login);
        assert_eq!(app.current_screen, Screen::Overview);
    }

    #[tokio::test]
    async fn test_member_login_cannot_open_admin_pages() {
        let mut app = app();
        app.start();
        login(&mut app, "user@trainify.com");
        assert_eq!(app.current_screen, Screen::MemberDashboard);
        assert_eq!(
            app.member_dashboard.user.as_ref().map(|u| u.name.as_str()),
            Some("user")
        );

        app.navigate_to_screen(Screen::Users);
        assert_eq!(app.current_screen, Screen::MemberDashboard);
    }

    #[tokio::test]
    async fn test_logout_returns_to_login() {
        let mut app = app();
        app.start();
        login(&mut app, "admin@trainify.com");
        app.handle_key_event(KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT));
        assert_eq!(app.current_screen, Screen::Login);
        assert!(!app.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_typing_q_on_login_does_not_quit() {
        let mut app = app();
        app.start();
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.login.form.fields[0].value, "q");

        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_sidebar_navigation() {
        let mut app = app();
        app.start();
        login(&mut app, "admin@trainify.com");

        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Sidebar);
        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.current_screen, Screen::Supplements);
        assert_eq!(app.focus, Focus::Content);

        app.handle_key_event(key(KeyCode::Char('b')));
        assert!(app.sidebar.collapsed);
    }

    #[tokio::test]
    async fn test_help_popup_toggles() {
        let mut app = app();
        app.start();
        app.handle_key_event(key(KeyCode::F(1)));
        assert!(app.show_help_popup);
        assert!(app.get_context_help().contains("Sign In:"));
        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.show_help_popup);
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_draw_admin_layout() {
        let mut app = app();
        app.start();
        login(&mut app, "admin@trainify.com");

        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|(x, y)| buffer.get(x, y).symbol().to_string())
            .collect();
        assert!(text.contains("Trainify"));
        assert!(text.contains("Supplements"));
    }

    #[tokio::test]
    async fn test_register_routes_by_chosen_role() {
        let mut app = app();
        app.start();
        app.handle_key_event(key(KeyCode::F(2)));
        assert_eq!(app.current_screen, Screen::Register);

        // q is typed into the form, not treated as quit
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(!app.should_quit);

        let registration = Registration {
            full_name: "Sam Rivera".to_string(),
            email: "sam@example.com".to_string(),
            phone: "5551234567".to_string(),
            role: SessionRole::Admin,
            password: "Strong1pass".to_string(),
        };
        app.apply_action(ScreenAction::Register(registration.clone()));
        assert_eq!(app.current_screen, Screen::Overview);

        app.apply_action(ScreenAction::Logout);
        app.apply_action(ScreenAction::Register(Registration {
            role: SessionRole::User,
            ..registration
        }));
        assert_eq!(app.current_screen, Screen::MemberDashboard);
        assert_eq!(
            app.member_dashboard.user.as_ref().map(|u| u.name.as_str()),
            Some("Sam Rivera")
        );

        app.navigate_to_screen(Screen::Register);
        assert_eq!(app.current_screen, Screen::MemberDashboard);
    }

    #[tokio::test]
    async fn test_register_error_stays_on_form() {
        let mut app = app();
        app.start();
        app.navigate_to_screen(Screen::Register);
        app.apply_action(ScreenAction::Register(Registration {
            full_name: "Sam Rivera".to_string(),
            email: "sam@example.com".to_string(),
            phone: "5551234567".to_string(),
            role: SessionRole::User,
            password: "abc".to_string(),
        }));
        assert_eq!(app.current_screen, Screen::Register);
        assert_eq!(
            app.register.error.as_deref(),
            Some("Password must be at least 6 characters")
        );

        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.current_screen, Screen::Login);
    }
}
