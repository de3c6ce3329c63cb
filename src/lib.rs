//! Trainify: admin and member dashboard for a fitness subscription service
//!
//! The core is a generic [`table::DataTable`] that renders typed records with
//! sorting, selection, pagination and row actions. Screens in [`tui`] wire it
//! to async repositories seeded with sample data.

pub mod cli;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod repository;
pub mod sample;
pub mod session;
pub mod table;
pub mod tui;
