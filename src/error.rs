// src/error.rs
use ballotpress_layout::LayoutError;
use ballotpress_model::DocumentError;
use ballotpress_render_core::RenderError;
use ballotpress_traits::FontError;
use thiserror::Error;

/// Coarse error classes for callers that only need to decide what to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed election input.
    Document,
    /// Settings, fonts or drawable registry.
    Configuration,
    Render,
    Io,
}

/// A comprehensive error type for ballot printing. Every variant is fatal; layout
/// overflow is reported as a warning instead.
#[derive(Error, Debug)]
pub enum PrinterError {
    #[error("Invalid election document: {0}")]
    Document(#[from] DocumentError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No ballot styles matched the selectors {0:?}")]
    NoBallotStyles(Vec<String>),
}

impl PrinterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PrinterError::Document(_) | PrinterError::Json(_) | PrinterError::NoBallotStyles(_) => {
                ErrorKind::Document
            }
            PrinterError::Configuration(_) => ErrorKind::Configuration,
            PrinterError::Render(_) => ErrorKind::Render,
            PrinterError::Io(_) => ErrorKind::Io,
        }
    }

    /// True when the input document, not the environment, is at fault.
    pub fn is_fatal_input(&self) -> bool {
        self.kind() == ErrorKind::Document
    }
}

impl From<FontError> for PrinterError {
    fn from(e: FontError) -> Self {
        PrinterError::Configuration(e.to_string())
    }
}

impl From<LayoutError> for PrinterError {
    fn from(e: LayoutError) -> Self {
        match e {
            LayoutError::Document(e) => PrinterError::Document(e),
            LayoutError::Render(e) => PrinterError::Render(e),
            LayoutError::Font(e) => e.into(),
            LayoutError::KindMismatch { id, expected, actual } => {
                PrinterError::Document(DocumentError::Malformed {
                    context: format!("object '{}'", id),
                    message: format!("expected {}, got {}", expected, actual),
                })
            }
            e @ (LayoutError::UnsupportedType(_) | LayoutError::InvalidSettings(_)) => {
                PrinterError::Configuration(e.to_string())
            }
            e @ LayoutError::PassMismatch { .. } => {
                PrinterError::Render(RenderError::Other(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_errors_map_to_taxonomy() {
        let doc: PrinterError = LayoutError::Document(DocumentError::NotFound("x".into())).into();
        assert_eq!(doc.kind(), ErrorKind::Document);
        assert!(doc.is_fatal_input());

        let unsupported: PrinterError = LayoutError::UnsupportedType("T".into()).into();
        assert_eq!(unsupported.kind(), ErrorKind::Configuration);

        let font: PrinterError = LayoutError::Font(FontError::UnknownFont("Nope".into())).into();
        assert_eq!(font.kind(), ErrorKind::Configuration);
        assert!(!font.is_fatal_input());

        let mismatch: PrinterError = LayoutError::KindMismatch {
            id: "s1".into(),
            expected: "contest",
            actual: "selection",
        }
        .into();
        assert!(matches!(mismatch, PrinterError::Document(DocumentError::Malformed { .. })));
    }
}
