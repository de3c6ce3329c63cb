//! Trainee profile and derived health metrics

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::{BmiCategory, TraineeProfile};
use crate::sample::format_date;
use crate::tui::ui::Styles;

pub struct TraineeInfo {
    pub profile: TraineeProfile,
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Styles::inactive()),
        Span::raw(value),
    ])
}

impl TraineeInfo {
    pub fn new(profile: TraineeProfile) -> Self {
        Self { profile }
    }

    pub fn profile_lines(&self) -> Vec<Line<'static>> {
        let p = &self.profile;
        vec![
            field("Name", p.full_name.clone()),
            field("Email", p.email.clone()),
            field("Phone", p.phone.clone()),
            field("Gender", p.gender.to_string()),
            field("Age", format!("{} years", p.age)),
            field("Height", format!("{} cm", p.height_cm)),
            field("Weight", format!("{} kg", p.weight_kg)),
            field("Joined", format_date(p.joined_at)),
        ]
    }

    pub fn metric_lines(&self) -> Vec<Line<'static>> {
        let p = &self.profile;
        let category = p.bmi_category();
        let category_style = match category {
            BmiCategory::Normal => Styles::success(),
            BmiCategory::Underweight | BmiCategory::Overweight => Styles::warning(),
            BmiCategory::Obese => Styles::error(),
        };
        let (low, high) = p.ideal_weight_range();

        vec![
            Line::from(vec![
                Span::styled(format!("{:<14}", "BMI"), Styles::inactive()),
                Span::raw(format!("{:.1} ", p.bmi())),
                Span::styled(category.as_str(), category_style),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<14}", "Ideal weight"), Styles::inactive()),
                Span::raw(format!("{}-{} kg", low, high)),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<14}", "BMR"), Styles::inactive()),
                Span::raw(format!("{} kcal/day", p.bmr())),
            ]),
        ]
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let profile = Paragraph::new(self.profile_lines()).block(
            Block::default()
                .title("Trainee Info")
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );
        f.render_widget(profile, chunks[0]);

        let metrics = Paragraph::new(self.metric_lines()).block(
            Block::default()
                .title("Health Metrics")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(metrics, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::table::plain_text;

    #[test]
    fn test_metric_lines() {
        let info = TraineeInfo::new(sample::trainee());
        let lines: Vec<String> = info.metric_lines().iter().map(plain_text).collect();
        assert_eq!(lines[0], "BMI           24.0 Normal");
        assert_eq!(lines[1], "Ideal weight  59-79 kg");
        assert_eq!(lines[2], "BMR           1796 kcal/day");
    }

    #[test]
    fn test_profile_lines() {
        let info = TraineeInfo::new(sample::trainee());
        let lines: Vec<String> = info.profile_lines().iter().map(plain_text).collect();
        assert!(lines.contains(&"Email     trainee@trainify.com".to_string()));
        assert!(lines.contains(&"Height    178 cm".to_string()));
        assert!(lines.contains(&"Joined    Jan 10, 2024".to_string()));
    }
}
