//! Stockbook Inventory Register
//!
//! A single-user inventory register: items with quantities, locations,
//! responsible users and embedded photos, persisted wholesale to a local
//! JSON file, searchable by free text, and exportable as a spreadsheet
//! bundled with its images in a zip archive.

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
