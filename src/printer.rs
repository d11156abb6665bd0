// src/printer.rs
use crate::error::PrinterError;
use ballotpress_layout::{
    BallotStyle, BubbleMap, BubbleReport, LayoutEnvironment, LayoutSettings, LayoutWarning,
    Resolver,
};
use ballotpress_model::{DocumentError, Election, ElectionIndex, ElectionReport, parse_record};
use ballotpress_render_core::DrawingSurface;
use ballotpress_render_lopdf::PdfSurface;
use ballotpress_traits::SharedFontMetrics;
use chrono::Utc;
use itertools::Itertools;
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Renders the ballot styles of one election and keeps their bubble maps.
///
/// Owns the resolver for its report, so drawables shared between styles are built
/// once. Settings are fixed for the printer's lifetime.
pub struct ElectionPrinter {
    election: Election,
    settings: LayoutSettings,
    metrics: SharedFontMetrics,
    resolver: Resolver,
    styles: Vec<BallotStyle>,
    bubbles: Vec<Option<BubbleMap>>,
    warnings: Vec<LayoutWarning>,
}

impl ElectionPrinter {
    pub(crate) fn new(
        report: &Value,
        position: usize,
        settings: LayoutSettings,
        metrics: SharedFontMetrics,
    ) -> Result<Self, PrinterError> {
        let envelope: ElectionReport = parse_record(report)?;
        let election = envelope
            .election
            .into_iter()
            .nth(position)
            .ok_or_else(|| DocumentError::missing("ElectionReport", format!("Election[{}]", position)))?;
        // validates Type / OtherType up front
        election.type_title()?;

        let index = ElectionIndex::build(report)?;
        let mut resolver = Resolver::new(index);
        let styles = election
            .ballot_style
            .iter()
            .map(|record| BallotStyle::build(&mut resolver, &election, record))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            "Loaded election '{}' with {} ballot style(s), {} drawables",
            election.name,
            styles.len(),
            resolver.cached()
        );

        Ok(Self {
            bubbles: vec![None; styles.len()],
            election,
            settings,
            metrics,
            resolver,
            styles,
            warnings: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.election.name
    }

    pub fn election(&self) -> &Election {
        &self.election
    }

    pub fn styles(&self) -> &[BallotStyle] {
        &self.styles
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Overflow warnings from every render so far.
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    /// Per style bubble maps plus the settings they were drawn with. Styles not yet
    /// rendered are `None`.
    pub fn bubble_report(&self) -> Result<BubbleReport, PrinterError> {
        Ok(BubbleReport::new(&self.settings, self.bubbles.clone())?)
    }

    fn stamp() -> String {
        Utc::now().format("generated %Y-%m-%d %H:%M:%S UTC").to_string()
    }

    /// Renders every style accepted by `predicate` onto `surface`, one after another.
    /// Returns the number of styles drawn.
    ///
    /// Bubble maps and warnings are only recorded when every style succeeds.
    pub fn render_with_surface<S, F>(
        &mut self,
        surface: &mut S,
        predicate: F,
    ) -> Result<usize, PrinterError>
    where
        S: DrawingSurface,
        F: Fn(&BallotStyle) -> bool,
    {
        self.draw_styles(surface, |_, style| predicate(style))
    }

    fn draw_styles<S, F>(&mut self, surface: &mut S, predicate: F) -> Result<usize, PrinterError>
    where
        S: DrawingSurface,
        F: Fn(usize, &BallotStyle) -> bool,
    {
        let env = LayoutEnvironment::new(&self.settings, self.metrics.as_ref());
        let stamp = Self::stamp();
        let mut results = Vec::new();
        for (i, style) in self.styles.iter().enumerate() {
            if !predicate(i, style) {
                debug!("Skipping ballot style {} '{}'", i, style.name());
                continue;
            }
            if !results.is_empty() {
                surface.new_page()?;
            }
            let layout = style.render(&env, surface, &stamp)?;
            results.push((i, layout));
        }

        let drawn = results.len();
        for (i, layout) in results {
            self.bubbles[i] = Some(layout.bubbles);
            self.warnings.extend(layout.warnings);
        }
        Ok(drawn)
    }

    /// Renders the accepted styles into one in-memory PDF.
    fn render_pdf<F>(&mut self, predicate: F) -> Result<Vec<u8>, PrinterError>
    where
        F: Fn(usize, &BallotStyle) -> bool,
    {
        let mut surface = PdfSurface::in_memory(self.settings.page_dimensions())?;
        let drawn = self.draw_styles(&mut surface, predicate)?;
        if drawn == 0 {
            return Err(PrinterError::NoBallotStyles(Vec::new()));
        }
        let bytes = surface.finish()?.into_inner();
        info!("Rendered {} ballot style(s), {} bytes", drawn, bytes.len());
        Ok(bytes)
    }

    /// Renders the accepted styles into one PDF and writes it to `writer`. Nothing is
    /// written unless rendering succeeds.
    pub fn render_where<W, F>(&mut self, mut writer: W, predicate: F) -> Result<(), PrinterError>
    where
        W: Write,
        F: Fn(&BallotStyle) -> bool,
    {
        let bytes = self.render_pdf(|_, style| predicate(style))?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Renders every style into one PDF.
    pub fn render<W: Write>(&mut self, writer: W) -> Result<(), PrinterError> {
        self.render_where(writer, |_| true)
    }

    /// Renders the styles matching any selector (external identifier or image URI).
    pub fn render_filtered<W: Write, S: AsRef<str>>(
        &mut self,
        writer: W,
        selectors: &[S],
    ) -> Result<(), PrinterError> {
        match self.render_where(writer, |style| style.matches_any(selectors)) {
            Err(PrinterError::NoBallotStyles(_)) => Err(PrinterError::NoBallotStyles(
                selectors.iter().map(|s| s.as_ref().to_string()).collect(),
            )),
            other => other,
        }
    }

    /// Renders one style into its own PDF.
    pub fn render_style(&mut self, index: usize) -> Result<Vec<u8>, PrinterError> {
        if index >= self.styles.len() {
            return Err(PrinterError::NoBallotStyles(vec![index.to_string()]));
        }
        self.render_pdf(|i, _| i == index)
    }

    /// File name for style `index`: `{prefix}{index}_{names}.pdf` when the election
    /// has several styles, else `{prefix}{names}.pdf`.
    pub fn file_name(&self, index: usize, prefix: &str) -> Option<String> {
        let style = self.styles.get(index)?;
        let names = style
            .gpunit_names
            .iter()
            .map(|n| slug::slugify(n))
            .join(",");
        Some(if self.styles.len() > 1 {
            format!("{}{}_{}.pdf", prefix, index, names)
        } else {
            format!("{}{}.pdf", prefix, names)
        })
    }

    /// Default output prefix: the slugified election name and an underscore.
    pub fn default_prefix(&self) -> String {
        format!("{}_", slug::slugify(&self.election.name))
    }

    /// Writes one PDF per selected style into `outdir` and returns the paths written.
    /// All selected styles are rendered before any file is created.
    pub fn render_to_dir<S: AsRef<str>>(
        &mut self,
        outdir: &Path,
        prefix: Option<&str>,
        selectors: Option<&[S]>,
    ) -> Result<Vec<PathBuf>, PrinterError> {
        let prefix = prefix
            .map(str::to_string)
            .unwrap_or_else(|| self.default_prefix());
        let selected: Vec<usize> = self
            .styles
            .iter()
            .enumerate()
            .filter(|(_, style)| selectors.is_none_or(|sel| style.matches_any(sel)))
            .map(|(i, _)| i)
            .collect();
        if selected.is_empty() {
            let wanted = selectors
                .map(|sel| sel.iter().map(|s| s.as_ref().to_string()).collect())
                .unwrap_or_default();
            return Err(PrinterError::NoBallotStyles(wanted));
        }

        let mut outputs = Vec::with_capacity(selected.len());
        for i in selected {
            let bytes = self.render_style(i)?;
            let name = self
                .file_name(i, &prefix)
                .ok_or_else(|| PrinterError::NoBallotStyles(vec![i.to_string()]))?;
            outputs.push((outdir.join(name), bytes));
        }

        fs::create_dir_all(outdir)?;
        let mut paths = Vec::with_capacity(outputs.len());
        for (path, bytes) in outputs {
            fs::write(&path, bytes)?;
            info!("Wrote {}", path.display());
            paths.push(path);
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PrinterBuilder;
    use serde_json::json;

    fn report(styles: Vec<Value>) -> Value {
        json!({
            "GpUnit": [
                {"@type": "ElectionResults.ReportingUnit", "@id": "ru1", "Name": "North Ward"},
                {"@type": "ElectionResults.ReportingUnit", "@id": "ru2", "Name": "South Ward"}
            ],
            "Election": [{
                "Name": "City Election",
                "Type": "general",
                "StartDate": "2026-11-03",
                "EndDate": "2026-11-03",
                "BallotStyle": styles
            }]
        })
    }

    #[test]
    fn file_names_follow_style_count() {
        let one = PrinterBuilder::new()
            .build(&report(vec![json!({"GpUnitIds": ["ru1"]})]))
            .unwrap();
        assert_eq!(one.file_name(0, "x_").as_deref(), Some("x_north-ward.pdf"));
        assert_eq!(one.default_prefix(), "city-election_");

        let two = PrinterBuilder::new()
            .build(&report(vec![
                json!({"GpUnitIds": ["ru1"]}),
                json!({"GpUnitIds": ["ru1", "ru2"]}),
            ]))
            .unwrap();
        assert_eq!(two.file_name(1, "").as_deref(), Some("1_north-ward,south-ward.pdf"));
        assert_eq!(two.file_name(2, ""), None);
    }

    #[test]
    fn missing_election_is_a_document_error() {
        let result = PrinterBuilder::new().build_for(&report(vec![]), 3);
        assert!(matches!(result, Err(PrinterError::Document(_))));
    }

    #[test]
    fn no_styles_is_reported() {
        let mut printer = PrinterBuilder::new().build(&report(vec![])).unwrap();
        let mut out = Vec::new();
        assert!(matches!(
            printer.render(&mut out),
            Err(PrinterError::NoBallotStyles(_))
        ));
        assert!(out.is_empty());
    }
}
