use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::presentation::view_models::report::{EMPTY_MESSAGE, is_numeric_column};
use crate::presentation::view_models::{ConfigViewModel, ReportViewModel};
use crate::types::OutputFormat;

pub struct ConsoleRenderer {
    format: OutputFormat,
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_color(format, io::stdout().is_terminal())
    }

    pub fn with_color(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }

    pub fn render_report(&self, report: &ReportViewModel) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_report(&mut out, report)?;
        out.flush()?;
        Ok(())
    }

    pub fn render_config(&self, config: &ConfigViewModel) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_config(&mut out, config)?;
        out.flush()?;
        Ok(())
    }

    pub fn write_report<W: Write>(&self, out: &mut W, report: &ReportViewModel) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, report)?;
                writeln!(out)?;
            }
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(out);
                writer.write_record(report.headers())?;
                for cells in report.cells() {
                    writer.write_record(&cells)?;
                }
                writer.flush()?;
            }
            OutputFormat::Plain => self.write_table(out, report)?,
        }
        Ok(())
    }

    fn write_table<W: Write>(&self, out: &mut W, report: &ReportViewModel) -> Result<()> {
        let summary = report.summary();
        if self.color {
            writeln!(out, "{}", summary.dimmed())?;
        } else {
            writeln!(out, "{}", summary)?;
        }
        writeln!(out)?;

        if report.is_empty() {
            writeln!(out, "{}", EMPTY_MESSAGE)?;
            return Ok(());
        }

        let headers = report.headers();
        let rows = report.cells();
        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                rows.iter()
                    .map(|cells| cells[i].chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let header_line = self.layout_line(report, &widths, headers.iter().map(|h| h.to_string()));
        if self.color {
            writeln!(out, "{}", header_line.bold())?;
        } else {
            writeln!(out, "{}", header_line)?;
        }

        for cells in rows {
            writeln!(out, "{}", self.layout_line(report, &widths, cells.into_iter()))?;
        }

        Ok(())
    }

    /// Pad cells to their column width; the last cell is never padded on
    /// the right so lines carry no trailing whitespace
    fn layout_line(
        &self,
        report: &ReportViewModel,
        widths: &[usize],
        cells: impl Iterator<Item = String>,
    ) -> String {
        let last = widths.len().saturating_sub(1);
        cells
            .enumerate()
            .map(|(i, cell)| {
                let width = widths[i];
                if is_numeric_column(report.columns[i]) {
                    format!("{:>width$}", cell)
                } else if i == last {
                    cell
                } else {
                    format!("{:<width$}", cell)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }

    pub fn write_config<W: Write>(&self, out: &mut W, view: &ConfigViewModel) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, view)?;
                writeln!(out)?;
            }
            OutputFormat::Plain | OutputFormat::Csv => {
                let source = if view.exists {
                    view.path.clone()
                } else {
                    format!("{} (not found, showing defaults)", view.path)
                };
                if self.color {
                    writeln!(out, "# {}", source.dimmed())?;
                } else {
                    writeln!(out, "# {}", source)?;
                }
                write!(out, "{}", toml::to_string_pretty(&view.config)?)?;
            }
        }
        Ok(())
    }
}
