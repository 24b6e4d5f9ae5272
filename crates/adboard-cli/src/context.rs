use adboard_runtime::{Config, HttpReportApi};
use adboard_types::DateRange;
use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

use crate::types::OutputFormat;

pub struct ExecutionContext {
    data_dir: PathBuf,
    config: OnceCell<Config>,
    base_url: Option<String>,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn new(data_dir: PathBuf, base_url: Option<String>, format: OutputFormat) -> Self {
        Self {
            data_dir,
            config: OnceCell::new(),
            base_url,
            format,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        Config::path_in(&self.data_dir)
    }

    /// Config file merged with `--base-url` / `ADBOARD_BASE_URL`
    pub fn config(&self) -> Result<&Config> {
        self.config.get_or_try_init(|| {
            let path = self.config_path();
            let config = Config::load_from(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            Ok(config.with_base_url_override(self.base_url.clone())?)
        })
    }

    pub fn api(&self) -> Result<HttpReportApi> {
        Ok(HttpReportApi::from_config(self.config()?)?)
    }

    /// Range from optional command-line dates, each falling back to the
    /// configured default
    pub fn resolve_range(&self, start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
        let default = self.config()?.default_range()?;
        let start = match start {
            Some(value) => adboard_types::parse_date(value)?,
            None => default.start(),
        };
        let end = match end {
            Some(value) => adboard_types::parse_date(value)?,
            None => default.end(),
        };
        Ok(DateRange::new(start, end)?)
    }
}
