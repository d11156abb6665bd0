//! Streaming PDF drawing surface using lopdf.
//!
//! Page content streams are written as soon as a page is closed; only the page
//! tree, catalog, font resources and document info are held until `finish`.

mod helpers;
mod surface;
mod writer;

pub use helpers::{STANDARD_FONTS, to_win_ansi};
pub use surface::PdfSurface;
pub use writer::StreamingPdfWriter;
