pub mod fixtures;

use ballotpress::{ElectionPrinter, LayoutSettings, PrinterBuilder, PrinterError};
use lopdf::Document as LopdfDocument;
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Settings without page furniture.
pub fn plain_settings() -> LayoutSettings {
    LayoutSettings {
        show_debug_outline: false,
        show_generated_timestamp: false,
        ..LayoutSettings::default()
    }
}

pub fn plain_printer(report: &Value) -> Result<ElectionPrinter, PrinterError> {
    PrinterBuilder::new().with_settings(plain_settings()).build(report)
}

/// Renders every style of `report` with plain settings.
#[allow(dead_code)]
pub fn render_plain(report: &Value) -> Result<(ElectionPrinter, GeneratedPdf), Box<dyn std::error::Error>> {
    let mut printer = plain_printer(report)?;
    let mut bytes = Vec::new();
    printer.render(&mut bytes)?;
    Ok((printer, GeneratedPdf::from_bytes(bytes)?))
}
