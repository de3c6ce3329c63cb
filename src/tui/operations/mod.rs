//! Background operations driven by the screens

pub mod page_loader;

pub use page_loader::{LoaderMessage, PageLoader};
