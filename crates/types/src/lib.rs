pub mod color;
pub mod geometry;
pub mod ids;
pub mod page;

pub use color::Color;
pub use geometry::{Point, Rect};
pub use ids::ObjectId;
pub use page::PageSize;

/// Points per inch.
pub const INCH: f32 = 72.0;
/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;
