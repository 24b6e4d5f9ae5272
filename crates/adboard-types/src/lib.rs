pub mod column;
pub mod error;
pub mod report;
pub mod view;
pub mod wire;

pub use column::{ColumnKey, ParseColumnKeyError};
pub use error::{Error, Result};
pub use report::{AppDirectoryEntry, AppId, DateRange, ReportRow, parse_date};
pub use view::{FilterState, SortDirection, SortSpec};
pub use wire::{NOT_AVAILABLE, decode_apps, decode_report};
