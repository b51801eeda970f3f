//! Interactive 1-100 number grid.
//!
//! [`controller::HighlightController`] holds the highlight state and
//! publishes snapshots; the remaining modules drive it from a terminal.

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod terminal;
pub mod theme;
pub mod ui;
pub mod utils;

pub use controller::HighlightController;
pub use error::HighlightError;
pub use models::{CellNumber, GridSnapshot, HighlightSet};
