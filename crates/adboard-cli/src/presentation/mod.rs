//! Presentation layer
//!
//! - `view_models`: serializable data shaped for output, no terminal code
//! - `renderers`: console (plain/json/csv) and the ratatui dashboard loop
//! - `views`: stateless ratatui widgets over view models
//! - `components`: stateful dashboard widgets (UI state + input + render)

pub mod components;
pub mod renderers;
pub mod view_models;
pub mod views;

pub use renderers::{ConsoleRenderer, TuiRenderer};
pub use view_models::{ConfigViewModel, ReportViewModel};
