//! Per-entity table layouts shared by the TUI screens and `trainify list`

use ratatui::text::Line;

use crate::models::{Meal, MealPlan, Member, Record, Supplement, TrainingProgram};
use crate::sample::{self, format_date, format_price};
use crate::table::{plain_text, Align, Column};
use crate::tui::ui::status_badge;

/// An entity that can be listed in a data table
pub trait TableEntity: Record + Clone + Send + Sync + 'static {
    /// Page heading, e.g. "Supplements"
    const TITLE: &'static str;
    const DESCRIPTION: &'static str;
    const SEARCH_PLACEHOLDER: &'static str;

    /// Column layout; hidden columns only show up in the row preview
    fn columns() -> Vec<Column<Self>>;

    /// Name used in dialogs and status messages
    fn display_name(&self) -> &str;

    /// Seed rows for the in-memory repository
    fn seed() -> Vec<Self>;

    /// Label/value pairs for the detail popup, including hidden columns
    fn preview_fields(&self) -> Vec<(String, String)> {
        Self::columns()
            .iter()
            .map(|column| (column.title.clone(), plain_text(&column.cell(self))))
            .collect()
    }
}

fn status_column<T: TableEntity>(status: fn(&T) -> crate::models::Status) -> Column<T> {
    Column::new("status", "Status")
        .with_width(12)
        .with_render(move |row: &T| Line::from(status_badge(status(row))))
}

fn price_column<T: TableEntity>(price: fn(&T) -> f64) -> Column<T> {
    Column::new("price", "Price")
        .sortable()
        .with_width(10)
        .align(Align::Right)
        .with_render(move |row: &T| Line::from(format_price(price(row))))
}

impl TableEntity for Supplement {
    const TITLE: &'static str = "Supplements";
    const DESCRIPTION: &'static str = "Manage your supplement products, inventory, and pricing.";
    const SEARCH_PLACEHOLDER: &'static str = "Search supplements...";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("category", "Category").sortable().with_width(14),
            price_column(|row: &Supplement| row.price),
            Column::new("stock", "Stock")
                .sortable()
                .with_width(7)
                .align(Align::Center),
            status_column(|row: &Supplement| row.status),
            Column::new("createdAt", "Created")
                .sortable()
                .with_width(13)
                .with_render(|row: &Supplement| Line::from(format_date(row.created_at))),
            Column::new("description", "Description").hidden(),
        ]
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn seed() -> Vec<Self> {
        sample::supplements()
    }
}

impl TableEntity for MealPlan {
    const TITLE: &'static str = "Meal Plans";
    const DESCRIPTION: &'static str = "Create and manage nutrition plans for different fitness goals.";
    const SEARCH_PLACEHOLDER: &'static str = "Search meal plans...";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("type", "Type").sortable().with_width(12),
            Column::new("calories", "Calories")
                .sortable()
                .with_width(9)
                .align(Align::Center),
            Column::new("duration", "Duration (days)")
                .sortable()
                .with_width(16)
                .align(Align::Center),
            price_column(|row: &MealPlan| row.price),
            status_column(|row: &MealPlan| row.status),
        ]
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn seed() -> Vec<Self> {
        sample::meal_plans()
    }
}

impl TableEntity for TrainingProgram {
    const TITLE: &'static str = "Training Programs";
    const DESCRIPTION: &'static str =
        "Create and manage workout programs for different fitness levels and goals.";
    const SEARCH_PLACEHOLDER: &'static str = "Search training programs...";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("level", "Level").sortable().with_width(13),
            Column::new("duration", "Duration (weeks)")
                .sortable()
                .with_width(17)
                .align(Align::Center),
            Column::new("workoutsPerWeek", "Workouts/Week")
                .sortable()
                .with_width(14)
                .align(Align::Center),
            price_column(|row: &TrainingProgram| row.price),
            status_column(|row: &TrainingProgram| row.status),
        ]
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn seed() -> Vec<Self> {
        sample::training_programs()
    }
}

impl TableEntity for Member {
    const TITLE: &'static str = "Users";
    const DESCRIPTION: &'static str =
        "Manage user accounts, roles, and permissions for the platform.";
    const SEARCH_PLACEHOLDER: &'static str = "Search users...";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("email", "Email").sortable(),
            Column::new("role", "Role").sortable().with_width(9),
            status_column(|row: &Member| row.status),
            Column::new("joinedAt", "Joined")
                .sortable()
                .with_width(13)
                .with_render(|row: &Member| Line::from(format_date(row.joined_at))),
            Column::new("lastActive", "Last Active")
                .sortable()
                .with_width(13)
                .with_render(|row: &Member| Line::from(format_date(row.last_active))),
        ]
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn seed() -> Vec<Self> {
        sample::members()
    }
}

impl TableEntity for Meal {
    const TITLE: &'static str = "My Meals";
    const DESCRIPTION: &'static str = "Meals included in your nutrition plan.";
    const SEARCH_PLACEHOLDER: &'static str = "Search meals...";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Meal").sortable(),
            Column::new("category", "Category").sortable().with_width(10),
            Column::new("calories", "Calories")
                .sortable()
                .with_width(9)
                .align(Align::Right),
            Column::new("cookingTime", "Time")
                .sortable()
                .with_width(8)
                .align(Align::Right)
                .with_render(|row: &Meal| Line::from(format!("{} min", row.cooking_time))),
            Column::new("difficulty", "Difficulty").sortable().with_width(11),
            Column::new("plan", "Plan").with_width(9),
        ]
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn seed() -> Vec<Self> {
        sample::meals()
    }
}
