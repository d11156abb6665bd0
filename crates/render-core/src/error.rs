use thiserror::Error;

/// Failures while drawing onto or finishing a surface.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode PDF content: {0}")]
    Pdf(String),
    /// Layout-level failure reported through the render path, e.g. the two passes
    /// disagreeing on the page count.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
