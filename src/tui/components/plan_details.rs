//! Subscription summary with time-used gauge

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::models::{PlanStatus, SubscriptionPlan};
use crate::sample::{format_date, format_price};
use crate::tui::ui::Styles;

pub struct PlanDetails {
    pub plan: SubscriptionPlan,
}

impl PlanDetails {
    pub fn new(plan: SubscriptionPlan) -> Self {
        Self { plan }
    }

    pub fn summary_lines(&self, today: NaiveDate) -> Vec<Line<'static>> {
        let plan = &self.plan;
        let status = plan.status(today);
        let status_style = match status {
            PlanStatus::Active => Styles::success(),
            PlanStatus::ExpiringSoon => Styles::warning(),
            PlanStatus::Expired => Styles::error(),
        };

        vec![
            Line::from(vec![
                Span::styled(plan.name(), Styles::title()),
                Span::raw("  "),
                Span::styled(status.as_str(), status_style),
            ]),
            Line::from(""),
            Line::from(format!(
                "{} Months   {} Days Left   {} Total Price   {:.0}% Completed",
                plan.duration_months,
                plan.remaining_days(today),
                format_price(plan.price),
                plan.progress_percent(today)
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Start Date  ", Styles::inactive()),
                Span::raw(format_date(plan.start_date)),
            ]),
            Line::from(vec![
                Span::styled("End Date    ", Styles::inactive()),
                Span::raw(format_date(plan.end_date)),
            ]),
        ]
    }

    pub fn feature_lines(&self) -> Vec<Line<'static>> {
        self.plan
            .features
            .iter()
            .map(|feature| {
                Line::from(vec![
                    Span::styled("  ✓ ", Styles::success()),
                    Span::raw(feature.clone()),
                ])
            })
            .collect()
    }

    pub fn render(&self, f: &mut Frame, area: Rect, today: NaiveDate) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(area);

        let summary = Paragraph::new(self.summary_lines(today)).block(
            Block::default()
                .title("Plan Details")
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );
        f.render_widget(summary, chunks[0]);

        let percent = self.plan.progress_percent(today);
        let gauge = Gauge::default()
            .block(Block::default().title("Plan Progress").borders(Borders::ALL))
            .gauge_style(Styles::info())
            .ratio(percent / 100.0)
            .label(format!("{:.0}%", percent));
        f.render_widget(gauge, chunks[1]);

        let features = Paragraph::new(self.feature_lines()).block(
            Block::default()
                .title("Plan Features")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(features, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::table::plain_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_summary_lines() {
        let details = PlanDetails::new(sample::subscription_plan(today()));
        let text: Vec<String> = details.summary_lines(today()).iter().map(plain_text).collect();
        assert_eq!(text[0], "Platinum Plan  Active");
        assert_eq!(
            text[2],
            "6 Months   120 Days Left   $299.99 Total Price   33% Completed"
        );
        assert_eq!(text[4], "Start Date  Jan 1, 2024");
    }

    #[test]
    fn test_expiring_plan_is_flagged() {
        let mut plan = sample::subscription_plan(today());
        plan.end_date = today() + chrono::Duration::days(3);
        let details = PlanDetails::new(plan);
        let text = plain_text(&details.summary_lines(today())[0]);
        assert!(text.ends_with("Expiring Soon"));
    }

    #[test]
    fn test_render_shows_features() {
        let details = PlanDetails::new(sample::subscription_plan(today()));
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                details.render(f, area, today());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|(x, y)| buffer.get(x, y).symbol().to_string())
            .collect();
        assert!(text.contains("Plan Features"));
        assert!(text.contains("Weekly trainer check-ins"));
    }
}
