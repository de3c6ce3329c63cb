//! Status bar showing the latest message or the key hints

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::ui::Styles;

/// Types of status messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Info,
    Success,
    Error,
    Loading,
}

/// Status message with type and content
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub message: String,
    pub status_type: StatusType,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl StatusMessage {
    pub fn new(message: String, status_type: StatusType) -> Self {
        Self {
            message,
            status_type,
            timestamp: chrono::Local::now(),
        }
    }

    fn prefix(&self) -> &'static str {
        match self.status_type {
            StatusType::Info => "ℹ",
            StatusType::Success => "✓",
            StatusType::Error => "✗",
            StatusType::Loading => "⟳",
        }
    }
}

/// Status display component
pub struct StatusDisplay {
    pub current_message: Option<StatusMessage>,
    pub auto_clear_timeout: Option<std::time::Duration>,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self {
            current_message: None,
            auto_clear_timeout: Some(std::time::Duration::from_secs(5)),
        }
    }
}

impl StatusDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: StatusMessage) {
        self.current_message = Some(message);
    }

    pub fn set_info(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Info));
    }

    pub fn set_success(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Success));
    }

    pub fn set_error(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Error));
    }

    pub fn set_loading(&mut self, message: String) {
        self.set_message(StatusMessage::new(message, StatusType::Loading));
    }

    pub fn clear(&mut self) {
        self.current_message = None;
    }

    pub fn get_current(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref()
    }

    /// Check if we should auto-clear the current message.
    /// Errors and loading messages stay until replaced.
    pub fn should_auto_clear(&self) -> bool {
        match (self.auto_clear_timeout, &self.current_message) {
            (Some(timeout), Some(message))
                if matches!(message.status_type, StatusType::Info | StatusType::Success) =>
            {
                let elapsed = chrono::Local::now().signed_duration_since(message.timestamp);
                elapsed.to_std().unwrap_or_default() > timeout
            }
            _ => false,
        }
    }

    /// Render the current message, or `hints` when there is none
    pub fn render(&self, f: &mut Frame, area: Rect, hints: &str) {
        let line = match &self.current_message {
            Some(message) => {
                let style = match message.status_type {
                    StatusType::Info => Styles::info(),
                    StatusType::Success => Styles::success(),
                    StatusType::Error => Styles::error(),
                    StatusType::Loading => Styles::warning(),
                };
                Line::from(Span::styled(
                    format!("{} {}", message.prefix(), message.message),
                    style,
                ))
            }
            None => Line::from(Span::styled(hints.to_string(), Styles::inactive())),
        };

        let paragraph = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_clear_only_for_transient_messages() {
        let mut status = StatusDisplay::new();
        status.auto_clear_timeout = Some(std::time::Duration::ZERO);

        status.set_error("boom".to_string());
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(!status.should_auto_clear());

        status.set_success("saved".to_string());
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(status.should_auto_clear());

        status.clear();
        assert!(status.get_current().is_none());
    }
}
