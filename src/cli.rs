use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use unicode_width::UnicodeWidthStr;

use crate::error::TrainifyError;
use crate::models::{Meal, MealPlan, Member, Supplement, TrainingProgram};
use crate::repository::{InMemoryRepository, PageQuery, Repository};
use crate::table::{plain_text, widget::pagination_line, DataTable, DataTableConfig, TableView};
use crate::tui::entities::TableEntity;
use crate::tui::ui::{pad, truncate};

/// Widest a flexible column may grow in plain-text output
const MAX_TEXT_COLUMN_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "trainify")]
#[command(about = "Terminal admin and member dashboard for the Trainify fitness platform")]
#[command(version)]
pub struct Cli {
    /// Defaults to the interactive dashboard
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard
    Tui,

    /// Print one page of an entity table
    List {
        /// Entity to list (supplements, meal-plans, meals, programs, users)
        entity: String,

        /// Page to print (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Rows per page; defaults to TRAINIFY_PAGE_SIZE
        #[arg(long, value_parser = parse_page_size)]
        page_size: Option<usize>,

        /// Column key to sort by, e.g. price or createdAt
        #[arg(short, long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,

        /// Case-insensitive search over the entity's text fields
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Clear the stored session
    Logout,

    /// Show the signed-in user
    Whoami,
}

fn parse_page_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}

/// Entities reachable from `trainify list`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Supplements,
    MealPlans,
    Meals,
    Programs,
    Users,
}

impl EntityKind {
    pub fn parse(entity: &str) -> Result<Self, TrainifyError> {
        match entity.trim().to_lowercase().as_str() {
            "supplements" => Ok(EntityKind::Supplements),
            "meal-plans" | "mealplans" => Ok(EntityKind::MealPlans),
            "meals" => Ok(EntityKind::Meals),
            "programs" | "training" => Ok(EntityKind::Programs),
            "users" | "members" => Ok(EntityKind::Users),
            _ => Err(TrainifyError::UnknownEntity(entity.to_string())),
        }
    }

    /// Print one page of this entity as plain text
    pub async fn render(&self, query: &PageQuery) -> Result<String> {
        match self {
            EntityKind::Supplements => render_page::<Supplement>(query).await,
            EntityKind::MealPlans => render_page::<MealPlan>(query).await,
            EntityKind::Meals => render_page::<Meal>(query).await,
            EntityKind::Programs => render_page::<TrainingProgram>(query).await,
            EntityKind::Users => render_page::<Member>(query).await,
        }
    }
}

/// Fetch a page from the sample data and lay it out as a text table
pub async fn render_page<T: TableEntity>(query: &PageQuery) -> Result<String> {
    if query.page_size == 0 {
        bail!("Page size must be at least 1");
    }
    if let Some((key, _)) = &query.sort {
        let columns = T::columns();
        if !columns.iter().any(|column| &column.key == key && column.sortable) {
            let sortable: Vec<String> = columns
                .iter()
                .filter(|column| column.sortable)
                .map(|column| column.key.clone())
                .collect();
            bail!(
                "Column '{}' cannot be sorted. Sortable columns: {}",
                key,
                sortable.join(", ")
            );
        }
    }

    let repository = InMemoryRepository::new(T::seed());
    let page = repository.page(query).await?;

    let mut table = DataTable::new(T::columns(), DataTableConfig::new(T::TITLE))
        .with_rows(page.rows);
    table.set_pagination(Some(page.pagination));

    let mut out = format!("{}\n\n", T::TITLE);
    match table.view() {
        TableView::Rows(view) => {
            let cells: Vec<Vec<String>> = view
                .rows
                .iter()
                .map(|row| row.cells.iter().map(plain_text).collect())
                .collect();
            let widths: Vec<usize> = view
                .headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let content = cells
                        .iter()
                        .map(|row| row[i].width())
                        .chain(std::iter::once(header.column.title.width()))
                        .max()
                        .unwrap_or(0);
                    content.min(MAX_TEXT_COLUMN_WIDTH)
                })
                .collect();

            let header_line: Vec<String> = view
                .headers
                .iter()
                .zip(&widths)
                .map(|(header, width)| pad(&header.column.title, *width))
                .collect();
            out.push_str(header_line.join("  ").trim_end());
            out.push('\n');
            out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
            out.push('\n');

            for row in &cells {
                let line: Vec<String> = row
                    .iter()
                    .zip(&widths)
                    .map(|(cell, width)| pad(&truncate(cell, *width), *width))
                    .collect();
                out.push_str(line.join("  ").trim_end());
                out.push('\n');
            }

            match &view.pagination {
                Some(controls) => {
                    out.push('\n');
                    out.push_str(&plain_text(&pagination_line(controls)));
                    out.push('\n');
                }
                None => out.push_str(&format!("\nTotal: {}\n", page.pagination.total)),
            }
        }
        TableView::Empty(empty) => {
            out.push_str(&format!("{}\n{}\n", empty.title, empty.description));
        }
        TableView::Loading { .. } => {}
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SortDirection;

    #[test]
    fn test_parse_entity() {
        assert_eq!(EntityKind::parse("Meal-Plans").unwrap(), EntityKind::MealPlans);
        assert_eq!(EntityKind::parse("users").unwrap(), EntityKind::Users);
        assert!(matches!(
            EntityKind::parse("workouts"),
            Err(TrainifyError::UnknownEntity(_))
        ));
    }

    #[tokio::test]
    async fn test_render_sorted_page() {
        let query = PageQuery::new(3).with_sort("price", SortDirection::Desc);
        let out = EntityKind::Supplements.render(&query).await.unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Supplements");
        assert!(lines[2].starts_with("Name"));
        assert!(lines[4].starts_with("Casein Protein"));
        assert!(lines[4].contains("$54.99"));
        assert!(out.contains("Next ›"));
    }

    #[tokio::test]
    async fn test_render_single_page_has_total() {
        let query = PageQuery::new(10);
        let out = EntityKind::Programs.render(&query).await.unwrap();
        assert!(out.contains("Total: 4"));
        assert!(!out.contains("Prev"));
    }

    #[tokio::test]
    async fn test_render_rejects_unsortable_column() {
        let query = PageQuery::new(10).with_sort("status", SortDirection::Asc);
        let err = EntityKind::Users.render(&query).await.unwrap_err();
        assert!(err.to_string().contains("cannot be sorted"));
    }

    #[test]
    fn test_zero_page_size_rejected_at_parse() {
        let parsed = Cli::try_parse_from(["trainify", "list", "supplements", "--page-size", "0"]);
        assert!(parsed.is_err());

        let parsed =
            Cli::try_parse_from(["trainify", "list", "supplements", "--page-size", "3"]).unwrap();
        assert!(matches!(
            parsed.command,
            Some(Commands::List { page_size: Some(3), .. })
        ));
    }

    #[tokio::test]
    async fn test_render_rejects_zero_page_size() {
        let err = EntityKind::Supplements
            .render(&PageQuery::new(0))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[tokio::test]
    async fn test_render_empty_search() {
        let query = PageQuery::new(10).with_search("no such meal");
        let out = EntityKind::Meals.render(&query).await.unwrap();
        assert!(out.contains("No data available"));
    }
}
