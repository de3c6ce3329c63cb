//! Generic data table: column model, sort state, row selection, pagination,
//! loading/empty states and the terminal renderer.
//!
//! The table is a pure function of the rows and configuration handed to it
//! plus its own UI state (cursor, selection, sort indicator). It never
//! fetches, reorders or mutates rows; interactions come back to the owner as
//! [`TableEvent`]s.

pub mod actions;
pub mod column;
pub mod pagination;
pub mod selection;
pub mod sort;
pub mod view;
pub mod widget;

pub use actions::{ActionsConfig, RowAction};
pub use column::{plain_text, Align, Column, ColumnHeader};
pub use pagination::{PageItem, Pagination, PaginationControls};
pub use selection::{CheckState, Selection};
pub use sort::{SortDirection, SortState};
pub use view::{DataTable, DataTableConfig, EmptyState, TableEvent, TableView};
