//! Collapsible admin navigation sidebar

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::tui::{app::Screen, traits::Navigable, ui::Styles};

/// Width of the expanded sidebar
pub const EXPANDED_WIDTH: u16 = 24;
/// Width of the collapsed (icon-only) sidebar
pub const COLLAPSED_WIDTH: u16 = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct SidebarItem {
    pub icon: &'static str,
    pub label: &'static str,
    pub screen: Screen,
}

pub struct Sidebar {
    pub items: Vec<SidebarItem>,
    pub state: ListState,
    pub collapsed: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

impl Sidebar {
    pub fn new() -> Self {
        let items = vec![
            SidebarItem { icon: "◆", label: "Overview", screen: Screen::Overview },
            SidebarItem { icon: "✚", label: "Supplements", screen: Screen::Supplements },
            SidebarItem { icon: "◍", label: "Meal Plans", screen: Screen::MealPlans },
            SidebarItem { icon: "▲", label: "Training", screen: Screen::Training },
            SidebarItem { icon: "☺", label: "Users", screen: Screen::Users },
        ];
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            items,
            state,
            collapsed: false,
        }
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn width(&self) -> u16 {
        if self.collapsed {
            COLLAPSED_WIDTH
        } else {
            EXPANDED_WIDTH
        }
    }

    pub fn selected_screen(&self) -> Option<Screen> {
        self.state
            .selected()
            .and_then(|i| self.items.get(i))
            .map(|item| item.screen.clone())
    }

    /// Keep the highlight in sync when the screen changes elsewhere
    pub fn sync_with(&mut self, screen: &Screen) {
        if let Some(index) = self.items.iter().position(|item| &item.screen == screen) {
            self.state.select(Some(index));
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool, current: &Screen) {
        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| {
                let style = if &item.screen == current {
                    Styles::title()
                } else {
                    Styles::default()
                };
                let line = if self.collapsed {
                    Line::from(Span::styled(item.icon, style))
                } else {
                    Line::from(vec![
                        Span::styled(item.icon, style),
                        Span::raw(" "),
                        Span::styled(item.label, style),
                    ])
                };
                ListItem::new(line)
            })
            .collect();

        let border_style = if focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };
        let title = if self.collapsed { "" } else { "Trainify" };
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(if focused {
                Styles::selected()
            } else {
                Styles::default()
            });

        f.render_stateful_widget(list, area, &mut self.state);
    }
}

impl Navigable for Sidebar {
    fn highlighted(&self) -> Option<usize> {
        self.state.selected()
    }

    fn highlight(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut sidebar = Sidebar::new();
        sidebar.highlight_previous();
        assert_eq!(sidebar.selected_screen(), Some(Screen::Users));
        sidebar.highlight_next();
        assert_eq!(sidebar.selected_screen(), Some(Screen::Overview));
        sidebar.highlight_last();
        assert_eq!(sidebar.highlighted(), Some(4));
    }

    #[test]
    fn test_collapse_and_sync() {
        let mut sidebar = Sidebar::new();
        assert_eq!(sidebar.width(), EXPANDED_WIDTH);
        sidebar.toggle_collapsed();
        assert_eq!(sidebar.width(), COLLAPSED_WIDTH);

        sidebar.sync_with(&Screen::MealPlans);
        assert_eq!(sidebar.selected_screen(), Some(Screen::MealPlans));
        sidebar.sync_with(&Screen::Login);
        assert_eq!(sidebar.selected_screen(), Some(Screen::MealPlans));
    }
}
