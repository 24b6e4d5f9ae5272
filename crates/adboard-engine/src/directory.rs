use std::collections::HashMap;

use adboard_types::{AppDirectoryEntry, AppId, NOT_AVAILABLE};

/// Id → name lookup over the fetched app directory.
/// Duplicate ids keep the first entry.
#[derive(Debug, Clone, Default)]
pub struct AppDirectory {
    names: HashMap<AppId, String>,
}

impl AppDirectory {
    pub fn new(entries: &[AppDirectoryEntry]) -> Self {
        let mut names = HashMap::with_capacity(entries.len());
        for entry in entries {
            names
                .entry(entry.app_id.clone())
                .or_insert_with(|| entry.app_name.clone());
        }
        Self { names }
    }

    /// Resolve an id to its name, "N/A" when unknown or absent
    pub fn resolve(&self, app_id: Option<&AppId>) -> &str {
        app_id
            .and_then(|id| self.names.get(id))
            .map(String::as_str)
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
