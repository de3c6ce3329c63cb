//! Core traits shared by the TUI screens and components

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::forms::Registration;
use crate::tui::app::Screen;

/// Actions that can be returned from screen event handling
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// Navigate to a different screen
    NavigateTo(Screen),
    /// Sign in with the submitted credentials
    Login { email: String, password: String },
    /// Create an account from a validated sign-up form
    Register(Registration),
    /// Sign the current user out
    Logout,
    /// Quit the application
    Quit,
    /// Set status message
    SetStatus(String),
    /// Set error message
    SetError(String),
    /// No action taken
    None,
}

/// Common surface of every content screen
pub trait ScreenHandler {
    /// Draw the screen content
    fn draw(&mut self, f: &mut Frame, area: Rect);

    /// Handle keyboard input and return an action for the app
    fn handle_key_event(&mut self, key: KeyEvent) -> ScreenAction;

    /// Called when the screen becomes active
    fn on_enter(&mut self) {}

    /// Called on every loop tick; returns actions produced by finished background work
    fn on_tick(&mut self) -> Vec<ScreenAction> {
        Vec::new()
    }

    /// Whether keys should go to the screen before global shortcuts
    fn captures_input(&self) -> bool {
        false
    }

    /// Screen-specific lines for the help popup
    fn help_text(&self) -> &'static str;
}

/// Highlight movement over a list of items, wrapping at both ends.
///
/// Shared by the sidebar and the data table.
pub trait Navigable {
    fn highlighted(&self) -> Option<usize>;

    fn highlight(&mut self, index: Option<usize>);

    fn item_count(&self) -> usize;

    fn highlight_previous(&mut self) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        let index = match self.highlighted() {
            Some(0) | None => count - 1,
            Some(index) => index - 1,
        };
        self.highlight(Some(index));
    }

    fn highlight_next(&mut self) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        let index = self.highlighted().map(|index| (index + 1) % count).unwrap_or(0);
        self.highlight(Some(index));
    }

    fn highlight_first(&mut self) {
        if self.item_count() > 0 {
            self.highlight(Some(0));
        }
    }

    fn highlight_last(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.highlight(Some(count - 1));
        }
    }
}
