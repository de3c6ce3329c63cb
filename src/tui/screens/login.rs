//! Sign-in screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::forms::FieldSpec;
use crate::session::MIN_PASSWORD_LEN;
use crate::tui::{
    app::Screen,
    components::{Form, FormField},
    traits::{ScreenAction, ScreenHandler},
    ui::{centered_rect, Styles},
};

pub struct LoginScreen {
    pub form: Form,
    pub error: Option<String>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        let form = Form::new(vec![
            FormField::new(
                FieldSpec::email("email", "Email Address")
                    .required()
                    .with_placeholder("you@example.com"),
            ),
            FormField::new(
                FieldSpec::text("password", "Password")
                    .required()
                    .with_placeholder("••••••••"),
            )
            .masked(),
        ]);
        Self { form, error: None }
    }

    /// Show a rejected login
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Forget typed credentials, e.g. after signing out
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn submit(&mut self) -> ScreenAction {
        self.error = None;
        if !self.form.validate_all() {
            return ScreenAction::None;
        }

        let values = self.form.values();
        let password = values.get("password");
        if password.chars().count() < MIN_PASSWORD_LEN {
            if let Some(field) = self.form.fields.iter_mut().find(|f| f.spec.name == "password") {
                field.validation_error = Some(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LEN
                ));
            }
            return ScreenAction::None;
        }

        ScreenAction::Login {
            email: values.text("email"),
            password: password.to_string(),
        }
    }

    fn banner() -> Paragraph<'static> {
        Paragraph::new(vec![
            Line::from(Span::styled("T R A I N I F Y", Styles::title())),
            Line::from(""),
            Line::from(Span::styled("Welcome Back!", Styles::header())),
            Line::from(Span::styled(
                "Sign in to continue your fitness journey",
                Styles::inactive(),
            )),
        ])
        .alignment(Alignment::Center)
    }

    fn demo_accounts() -> Paragraph<'static> {
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Admin: ", Styles::header()),
                Span::raw("admin@trainify.com"),
            ]),
            Line::from(vec![
                Span::styled("User: ", Styles::header()),
                Span::raw("user@trainify.com"),
            ]),
            Line::from(vec![
                Span::styled("Password: ", Styles::header()),
                Span::raw("any 6+ characters"),
            ]),
            Line::from(Span::styled(
                "New here? Press F2 to create an account",
                Styles::info(),
            )),
        ])
        .block(
            Block::default()
                .title("Demo Credentials")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        )
    }
}

impl ScreenHandler for LoginScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let panel = centered_rect(50, 80, area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(self.form.height()),
                Constraint::Length(1),
                Constraint::Length(6),
                Constraint::Min(0),
            ])
            .split(panel);

        f.render_widget(Self::banner(), chunks[0]);
        self.form.render(f, chunks[1]);
        if let Some(error) = &self.error {
            f.render_widget(
                Paragraph::new(Span::styled(error.clone(), Styles::error()))
                    .alignment(Alignment::Center),
                chunks[2],
            );
        }
        f.render_widget(Self::demo_accounts(), chunks[3]);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Enter => {
                if self.form.current_field + 1 < self.form.fields.len() {
                    self.form.next_field();
                    ScreenAction::None
                } else {
                    self.submit()
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.next_field();
                ScreenAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.previous_field();
                ScreenAction::None
            }
            KeyCode::Esc => ScreenAction::Quit,
            KeyCode::F(2) => ScreenAction::NavigateTo(Screen::Register),
            KeyCode::Left => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_left();
                }
                ScreenAction::None
            }
            KeyCode::Right => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_right();
                }
                ScreenAction::None
            }
            KeyCode::Char(c) => {
                self.form.insert_char(c);
                ScreenAction::None
            }
            KeyCode::Backspace => {
                self.form.backspace();
                ScreenAction::None
            }
            KeyCode::Delete => {
                self.form.delete_forward();
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn help_text(&self) -> &'static str {
        "Sign In:\n\
        Tab / ↑/↓ - Switch field\n\
        Enter - Next field, sign in on the last one\n\
        F2 - Create an account\n\
        Esc - Quit\n\
        Emails containing \"admin\" open the admin dashboard"
    }
}
