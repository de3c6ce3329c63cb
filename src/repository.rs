//! In-memory entity repositories and caller-side querying
//!
//! The data table never reorders or slices rows itself. Screens ask a
//! repository for a [`Page`] built by [`query_page`], which applies search,
//! sort and pagination the way a backend would.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Result, TrainifyError};
use crate::models::Record;
use crate::table::{Pagination, SortDirection};

/// Search, sort and paging parameters for one table page
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub search: Option<String>,
    pub sort: Option<(String, SortDirection)>,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl PageQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: None,
            sort: None,
            page: 1,
            page_size,
        }
    }

    pub fn with_search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self
    }

    pub fn with_sort(mut self, column_key: &str, direction: SortDirection) -> Self {
        self.sort = Some((column_key.to_string(), direction));
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// One page of rows plus the pagination descriptor for the footer
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub pagination: Pagination,
}

fn matches_search<T: Record>(row: &T, needle: &str) -> bool {
    T::searchable_fields().iter().any(|key| {
        row.field(key)
            .map(|value| value.to_string().to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

/// Filter, sort and slice `rows` for display.
///
/// Search is a case-insensitive substring match over the record's searchable
/// fields. Sorting is stable and keeps rows without the sort field last in
/// either direction. Pages past the end yield no rows.
pub fn query_page<T: Record>(rows: Vec<T>, query: &PageQuery) -> Page<T> {
    let mut rows: Vec<T> = match &query.search {
        Some(search) => {
            let needle = search.to_lowercase();
            rows.into_iter()
                .filter(|row| matches_search(row, &needle))
                .collect()
        }
        None => rows,
    };

    if let Some((key, direction)) = &query.sort {
        rows.sort_by(|a, b| match (a.field(key), b.field(key)) {
            (Some(a), Some(b)) => {
                let ordering = a.compare(&b);
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    let pagination = Pagination::new(query.page, query.page_size, rows.len());
    let range = pagination.offset_range();
    let rows = rows
        .into_iter()
        .skip(range.start)
        .take(range.end - range.start)
        .collect();

    Page { rows, pagination }
}

/// Async access to one entity collection
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Record + Clone + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<T>>;

    async fn get(&self, id: &str) -> Result<T>;

    /// Insert a new record or replace the one with the same id
    async fn upsert(&self, record: T) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<T>;

    async fn page(&self, query: &PageQuery) -> Result<Page<T>> {
        let rows = self.list().await?;
        Ok(query_page(rows, query))
    }
}

/// Repository over a shared vector with optional simulated latency
pub struct InMemoryRepository<T> {
    rows: Arc<RwLock<Vec<T>>>,
    latency: Duration,
    row_key: String,
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            latency: self.latency,
            row_key: self.row_key.clone(),
        }
    }
}

impl<T> InMemoryRepository<T>
where
    T: Record + Clone + Send + Sync + 'static,
{
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            latency: Duration::ZERO,
            row_key: "id".to_string(),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn id_of(&self, row: &T) -> String {
        row.row_id(&self.row_key)
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Record + Clone + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<T>> {
        self.simulate_latency().await;
        let rows = self.rows.read().await;
        debug!("Listing {} records", rows.len());
        Ok(rows.clone())
    }

    async fn get(&self, id: &str) -> Result<T> {
        let rows = self.rows.read().await;
        rows.iter()
            .find(|row| self.id_of(row) == id)
            .cloned()
            .ok_or_else(|| TrainifyError::NotFound(id.to_string()))
    }

    async fn upsert(&self, record: T) -> Result<()> {
        self.simulate_latency().await;
        let id = self.id_of(&record);
        let mut rows = self.rows.write().await;
        match rows.iter().position(|row| self.id_of(row) == id) {
            Some(index) => {
                rows[index] = record;
                info!("Updated record {}", id);
            }
            None => {
                rows.push(record);
                info!("Created record {}", id);
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<T> {
        self.simulate_latency().await;
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|row| self.id_of(row) == id)
            .ok_or_else(|| TrainifyError::NotFound(id.to_string()))?;
        info!("Deleted record {}", id);
        Ok(rows.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Supplement;
    use crate::sample;

    fn names(rows: &[Supplement]) -> Vec<&str> {
        rows.iter().map(|row| row.name.as_str()).collect()
    }

    #[test]
    fn test_query_page_sorts_numerically() {
        let query = PageQuery::new(10).with_sort("price", SortDirection::Asc);
        let page = query_page(sample::supplements(), &query);
        let prices: Vec<f64> = page.rows.iter().map(|row| row.price).collect();
        assert_eq!(prices, vec![19.99, 24.99, 29.99, 39.99, 49.99, 54.99]);

        let query = PageQuery::new(10).with_sort("stock", SortDirection::Desc);
        let page = query_page(sample::supplements(), &query);
        assert_eq!(page.rows[0].stock, 200);
        assert_eq!(page.rows[5].stock, 45);
    }

    #[test]
    fn test_query_page_slices_pages() {
        let query = PageQuery::new(4).with_sort("name", SortDirection::Asc).with_page(2);
        let page = query_page(sample::supplements(), &query);
        assert_eq!(page.pagination.total, 6);
        assert_eq!(page.pagination.total_pages(), 2);
        assert_eq!(names(&page.rows), vec!["Pre-Workout Max", "Whey Protein Pro"]);

        let beyond = query_page(sample::supplements(), &query.clone().with_page(9));
        assert!(beyond.rows.is_empty());
    }

    #[test]
    fn test_query_page_search_is_case_insensitive() {
        let query = PageQuery::new(10).with_search("PROTEIN");
        let page = query_page(sample::supplements(), &query);
        assert_eq!(page.pagination.total, 2);
        assert!(names(&page.rows).contains(&"Casein Protein"));

        let blank = PageQuery::new(10).with_search("   ");
        assert_eq!(blank.search, None);
    }

    #[test]
    fn test_missing_sort_values_go_last() {
        let mut rows = sample::supplements();
        rows[0].description = None;
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let query = PageQuery::new(10).with_sort("description", direction);
            let page = query_page(rows.clone(), &query);
            assert_eq!(page.rows[5].id, "1");
        }
    }

    #[tokio::test]
    async fn test_repository_crud() {
        let repo = InMemoryRepository::new(sample::supplements());
        assert_eq!(repo.list().await.unwrap().len(), 6);

        let mut first = repo.get("1").await.unwrap();
        first.price = 1.0;
        repo.upsert(first).await.unwrap();
        assert_eq!(repo.get("1").await.unwrap().price, 1.0);
        assert_eq!(repo.list().await.unwrap().len(), 6);

        let removed = repo.delete("2").await.unwrap();
        assert_eq!(removed.name, "BCAA Energy");
        assert!(matches!(repo.get("2").await, Err(TrainifyError::NotFound(_))));
        assert!(matches!(repo.delete("2").await, Err(TrainifyError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_clones_share_rows() {
        let repo = InMemoryRepository::new(sample::supplements());
        let other = repo.clone();
        other.delete("3").await.unwrap();
        let page = repo.page(&PageQuery::new(10)).await.unwrap();
        assert_eq!(page.rows.len(), 5);
    }

    #[tokio::test]
    async fn test_latency_is_simulated() {
        let repo = InMemoryRepository::new(sample::members()).with_latency(Duration::from_millis(30));
        let start = tokio::time::Instant::now();
        repo.list().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
