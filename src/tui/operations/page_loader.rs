//! Background repository calls for a screen's table
//!
//! Calls run on spawned tokio tasks and report back over an unbounded
//! channel; the screen drains it on every tick. Loads carry a generation so
//! a slow response never overwrites a newer page.

use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::Record;
use crate::repository::{Page, PageQuery, Repository};
use crate::table::DataTable;

/// A finished background operation
#[derive(Debug)]
pub enum LoaderMessage<T> {
    Loaded {
        generation: u64,
        result: Result<Page<T>>,
    },
    Saved {
        name: String,
        created: bool,
        result: Result<()>,
    },
    Deleted(Result<T>),
}

pub struct PageLoader<T> {
    repository: Arc<dyn Repository<T>>,
    pub query: PageQuery,
    generation: u64,
    tx: UnboundedSender<LoaderMessage<T>>,
    rx: UnboundedReceiver<LoaderMessage<T>>,
}

impl<T> PageLoader<T>
where
    T: Record + Clone + Send + Sync + 'static,
{
    pub fn new(repository: Arc<dyn Repository<T>>, query: PageQuery) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            repository,
            query,
            generation: 0,
            tx,
            rx,
        }
    }

    /// Fetch the page described by `query`, showing the skeleton meanwhile
    pub fn load(&mut self, table: &mut DataTable<T>) {
        self.generation += 1;
        table.set_loading(true);

        let generation = self.generation;
        let repository = Arc::clone(&self.repository);
        let query = self.query.clone();
        let tx = self.tx.clone();
        debug!("Loading page {} (generation {})", query.page, generation);

        tokio::spawn(async move {
            let result = repository.page(&query).await;
            if tx.send(LoaderMessage::Loaded { generation, result }).is_err() {
                debug!("Screen closed before page load finished");
            }
        });
    }

    pub fn save(&self, record: T, name: String, created: bool) {
        let repository = Arc::clone(&self.repository);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = repository.upsert(record).await;
            let _ = tx.send(LoaderMessage::Saved {
                name,
                created,
                result,
            });
        });
    }

    pub fn delete(&self, id: String) {
        let repository = Arc::clone(&self.repository);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = repository.delete(&id).await;
            let _ = tx.send(LoaderMessage::Deleted(result));
        });
    }

    fn is_current(&self, message: &LoaderMessage<T>) -> bool {
        match message {
            LoaderMessage::Loaded { generation, .. } => *generation == self.generation,
            _ => true,
        }
    }

    /// Next finished operation, skipping superseded loads
    pub fn try_next(&mut self) -> Option<LoaderMessage<T>> {
        loop {
            match self.rx.try_recv() {
                Ok(message) if self.is_current(&message) => return Some(message),
                Ok(_) => debug!("Dropping superseded page load"),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Wait for the next finished operation
    #[cfg(test)]
    pub async fn next(&mut self) -> Option<LoaderMessage<T>> {
        loop {
            let message = self.rx.recv().await?;
            if self.is_current(&message) {
                return Some(message);
            }
        }
    }

    /// Put a finished load into the table.
    ///
    /// A page that emptied out (e.g. its last row was deleted) falls back to
    /// the last page that still has rows.
    pub fn show_page(&mut self, table: &mut DataTable<T>, result: Result<Page<T>>) -> Result<()> {
        let page = match result {
            Ok(page) => page,
            Err(e) => {
                warn!("Page load failed: {}", e);
                table.set_loading(false);
                return Err(e);
            }
        };

        let pagination = page.pagination;
        if page.rows.is_empty() && pagination.page > 1 && pagination.total > 0 {
            self.query.page = pagination.total_pages();
            self.load(table);
            return Ok(());
        }

        table.set_rows(page.rows);
        table.set_pagination(Some(pagination));
        table.set_loading(false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Supplement;
    use crate::repository::InMemoryRepository;
    use crate::sample;
    use crate::table::{Column, DataTableConfig, TableView};

    fn setup(page_size: usize) -> (PageLoader<Supplement>, DataTable<Supplement>) {
        let repository = InMemoryRepository::new(sample::supplements());
        let loader = PageLoader::new(Arc::new(repository), PageQuery::new(page_size));
        let table = DataTable::new(vec![Column::new("name", "Name")], DataTableConfig::default());
        (loader, table)
    }

    #[tokio::test]
    async fn test_load_shows_skeleton_until_page_arrives() {
        let (mut loader, mut table) = setup(4);
        loader.load(&mut table);
        assert!(matches!(table.view(), TableView::Loading { rows: 5, .. }));

        match loader.next().await {
            Some(LoaderMessage::Loaded { result, .. }) => {
                loader.show_page(&mut table, result).unwrap();
            }
            other => panic!("unexpected message: {:?}", other),
        }
        assert!(!table.is_loading());
        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.pagination().map(|p| p.total), Some(6));
    }

    #[tokio::test]
    async fn test_superseded_loads_are_dropped() {
        let (mut loader, mut table) = setup(10);
        loader.load(&mut table);
        loader.query = loader.query.clone().with_search("monohydrate");
        loader.load(&mut table);

        // let both spawned loads finish
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let mut loaded = Vec::new();
        while let Some(message) = loader.try_next() {
            if let LoaderMessage::Loaded { result, .. } = message {
                loaded.push(result.unwrap());
            }
        }
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].pagination.total, 1);
        assert_eq!(loaded[0].rows[0].name, "Creatine Monohydrate");
    }

    #[tokio::test]
    async fn test_empty_trailing_page_falls_back() {
        let (mut loader, mut table) = setup(4);
        loader.query.page = 2;
        let repository = InMemoryRepository::new(sample::supplements()[..4].to_vec());
        let page = repository.page(&loader.query).await;
        loader.show_page(&mut table, page).unwrap();

        assert_eq!(loader.query.page, 1);
        assert!(table.is_loading());
    }
}
