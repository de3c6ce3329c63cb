//! Account sign-up screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::forms::{registration_fields, Registration};
use crate::tui::{
    app::Screen,
    components::{Form, FormField},
    traits::{ScreenAction, ScreenHandler},
    ui::{centered_rect, Styles},
};

pub struct RegisterScreen {
    pub form: Form,
    pub error: Option<String>,
}

impl Default for RegisterScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterScreen {
    pub fn new() -> Self {
        let fields: Vec<FormField> = registration_fields()
            .into_iter()
            .map(|spec| {
                let secret = matches!(spec.name.as_str(), "password" | "confirmPassword");
                let field = FormField::new(spec);
                if secret {
                    field.masked()
                } else {
                    field
                }
            })
            .collect();
        Self {
            form: Form::new(fields),
            error: None,
        }
    }

    /// Show an account the session refused to create
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn submit(&mut self) -> ScreenAction {
        self.error = None;
        let schema_ok = self.form.validate_all();
        match Registration::from_values(&self.form.values()) {
            Ok(registration) if schema_ok => ScreenAction::Register(registration),
            Ok(_) => ScreenAction::None,
            Err(errors) => {
                self.form.apply_errors(&errors);
                ScreenAction::None
            }
        }
    }

    fn current_is_select(&self) -> bool {
        self.form
            .fields
            .get(self.form.current_field)
            .map(|field| field.is_select())
            .unwrap_or(false)
    }

    fn banner() -> Paragraph<'static> {
        Paragraph::new(vec![
            Line::from(Span::styled("Create Account", Styles::title())),
            Line::from(Span::styled(
                "Start your fitness transformation today",
                Styles::inactive(),
            )),
        ])
        .alignment(Alignment::Center)
    }
}

impl ScreenHandler for RegisterScreen {
    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let panel = centered_rect(60, 100, area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(self.form.height()),
                Constraint::Length(1),
                Constraint::Length(1),
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
        f.render_widget(
            Paragraph::new(Span::styled(
                "Already have an account? Press Esc to sign in instead",
                Styles::inactive(),
            ))
            .alignment(Alignment::Center),
            chunks[3],
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Esc => return ScreenAction::NavigateTo(Screen::Login),
            KeyCode::Enter => {
                if self.form.current_field + 1 < self.form.fields.len() {
                    self.form.next_field();
                } else {
                    return self.submit();
                }
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Char(' ') | KeyCode::Right if self.current_is_select() => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.cycle_option(true);
                }
            }
            KeyCode::Left if self.current_is_select() => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.cycle_option(false);
                }
            }
            KeyCode::Left => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.form.get_current_field_mut() {
                    field.move_cursor_right();
                }
            }
            KeyCode::Char(c) => self.form.insert_char(c),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Delete => self.form.delete_forward(),
            _ => {}
        }
        ScreenAction::None
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn help_text(&self) -> &'static str {
        "Create Account:\n\
        Tab / ↑/↓ - Switch field\n\
        ←/→ / Space - Change account type and terms\n\
        Enter - Next field, create the account on the last one\n\
        Esc - Back to sign in"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionRole;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut RegisterScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    /// Fill every field, moving on with Enter
    fn fill(screen: &mut RegisterScreen, password: &str, confirm: &str) -> ScreenAction {
        type_text(screen, "Jordan Lee");
        screen.handle_key_event(key(KeyCode::Enter));
        type_text(screen, "jordan@example.com");
        screen.handle_key_event(key(KeyCode::Enter));
        type_text(screen, "555-123-4567");
        screen.handle_key_event(key(KeyCode::Enter));
        // account type stays "user"
        screen.handle_key_event(key(KeyCode::Enter));
        type_text(screen, password);
        screen.handle_key_event(key(KeyCode::Enter));
        type_text(screen, confirm);
        screen.handle_key_event(key(KeyCode::Enter));
        screen.handle_key_event(key(KeyCode::Right));
        screen.handle_key_event(key(KeyCode::Enter))
    }

    #[test]
    fn test_complete_form_registers_member() {
        let mut screen = RegisterScreen::new();
        let action = fill(&mut screen, "Strong1pass", "Strong1pass");
        match action {
            ScreenAction::Register(registration) => {
                assert_eq!(registration.full_name, "Jordan Lee");
                assert_eq!(registration.email, "jordan@example.com");
                assert_eq!(registration.role, SessionRole::User);
                assert_eq!(registration.password, "Strong1pass");
            }
            other => panic!("expected a registration, got {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_confirmation_stays_on_form() {
        let mut screen = RegisterScreen::new();
        let action = fill(&mut screen, "Strong1pass", "Strong2pass");
        assert_eq!(action, ScreenAction::None);
        let error = screen
            .form
            .get_field("confirmPassword")
            .and_then(|field| field.validation_error.clone());
        assert_eq!(error.as_deref(), Some("Passwords do not match"));
    }

    #[test]
    fn test_passwords_are_masked_and_terms_cycle() {
        let mut screen = RegisterScreen::new();
        assert!(screen.form.get_field("password").map(|f| f.masked).unwrap_or(false));
        assert!(screen.form.get_field("confirmPassword").map(|f| f.masked).unwrap_or(false));
        assert_eq!(screen.form.get_field("terms").map(|f| f.value.as_str()), Some("no"));

        screen.handle_key_event(key(KeyCode::BackTab));
        screen.handle_key_event(key(KeyCode::Char(' ')));
        assert_eq!(screen.form.get_field("terms").map(|f| f.value.as_str()), Some("yes"));
    }

    #[test]
    fn test_esc_goes_back_to_login() {
        let mut screen = RegisterScreen::new();
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Esc)),
            ScreenAction::NavigateTo(Screen::Login)
        );
    }
}
