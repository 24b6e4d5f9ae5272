//! Dashboard components
//!
//! Each component owns its UI state, turns key events into state changes,
//! and returns an action when its parent has to act on the result.
//!
//! ```rust,ignore
//! impl FooComponent {
//!     pub fn handle_input(&mut self, key: KeyEvent) -> Option<FooAction>;
//!     pub fn render(&mut self, f: &mut Frame, area: Rect, ...);
//! }
//! ```

pub mod column_picker;
pub mod date_range;
pub mod report_table;
pub mod sort_popup;

pub use column_picker::{ColumnPickerAction, ColumnPickerComponent};
pub use date_range::{DateField, DateRangeAction, DateRangeComponent};
pub use report_table::{ReportTableComponent, TableAction};
pub use sort_popup::{SortPopup, SortPopupAction};
