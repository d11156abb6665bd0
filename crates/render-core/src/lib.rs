//! Core rendering abstractions for ballot output.
//!
//! This crate provides the drawing seam between layout and backends:
//! - `DrawingSurface` trait for page-level vector and text primitives
//! - `MeasureSurface`, a discarding surface for the pagination pass
//! - `RecordingSurface`, which keeps every operation for inspection
//! - Error types for rendering operations

mod error;
mod measure;
mod recording;
mod traits;
mod types;
pub mod utils;

pub use error::RenderError;
pub use measure::MeasureSurface;
pub use recording::{Recording, RecordingSurface};
pub use traits::DrawingSurface;
pub use types::{DrawOp, Paint, TextBlock};
