// src/builder.rs
use crate::error::PrinterError;
use crate::printer::ElectionPrinter;
use ballotpress_layout::{LayoutEnvironment, LayoutSettings};
use ballotpress_traits::{BuiltinFontMetrics, SharedFontMetrics};
use ballotpress_types::PageSize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// A builder for creating an `ElectionPrinter`.
#[derive(Clone)]
pub struct PrinterBuilder {
    settings: LayoutSettings,
    metrics: SharedFontMetrics,
}

impl Default for PrinterBuilder {
    fn default() -> Self {
        Self {
            settings: LayoutSettings::default(),
            metrics: Arc::new(BuiltinFontMetrics::new()),
        }
    }
}

impl PrinterBuilder {
    /// Creates a builder with the reference settings and built-in Helvetica metrics.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_settings(mut self, settings: LayoutSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the settings with ones parsed from JSON. Missing fields keep their
    /// defaults.
    pub fn with_settings_json(self, json: &str) -> Result<Self, PrinterError> {
        let settings = LayoutSettings::from_json(json)?;
        Ok(self.with_settings(settings))
    }

    pub fn with_settings_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PrinterError> {
        let path_ref = path.as_ref();
        let source = fs::read_to_string(path_ref).map_err(|e| {
            PrinterError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read settings from '{}': {}", path_ref.display(), e),
            ))
        })?;
        self.with_settings_json(&source)
    }

    /// Uses a custom metrics provider, e.g. an `InMemoryFontMetrics` with TrueType faces.
    pub fn with_font_metrics(mut self, metrics: SharedFontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.settings.page_size = page_size;
        self
    }

    pub fn with_column_count(mut self, columns: usize) -> Self {
        self.settings.column_count = columns;
        self
    }

    pub fn with_column_margin(mut self, margin: f32) -> Self {
        self.settings.column_margin = margin;
        self
    }

    pub fn with_page_margin(mut self, margin: f32) -> Self {
        self.settings.page_margin = margin;
        self
    }

    pub fn with_debug_outline(mut self, enabled: bool) -> Self {
        self.settings.show_debug_outline = enabled;
        self
    }

    pub fn with_generated_timestamp(mut self, enabled: bool) -> Self {
        self.settings.show_generated_timestamp = enabled;
        self
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Builds a printer for the first election of `report`.
    pub fn build(&self, report: &Value) -> Result<ElectionPrinter, PrinterError> {
        self.build_for(report, 0)
    }

    /// Builds a printer for the election at `election` in the report's `Election` list.
    pub fn build_for(&self, report: &Value, election: usize) -> Result<ElectionPrinter, PrinterError> {
        self.settings.validate()?;
        LayoutEnvironment::new(&self.settings, self.metrics.as_ref()).check_fonts()?;
        ElectionPrinter::new(report, election, self.settings.clone(), self.metrics.clone())
    }
}

/// Number of elections in a raw report.
pub fn election_count(report: &Value) -> usize {
    report
        .get("Election")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
