use ballotpress_types::{Color, Point, Rect};

use crate::error::RenderError;
use crate::types::{Paint, TextBlock};

/// Page-level vector and text primitives.
///
/// Coordinates are PDF page space: points, origin at the bottom-left corner.
/// A fresh surface has page 1 open. `new_page` closes the current page and opens
/// the next one; `finish` closes the last page.
pub trait DrawingSurface {
    type Output;

    /// Page size in points as `(width, height)`.
    fn page_size(&self) -> (f32, f32);

    /// 1-based number of the page currently open.
    fn page_number(&self) -> usize;

    fn set_title(&mut self, title: &str);

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);

    /// Dash pattern for subsequent strokes. An empty pattern is a solid line.
    fn set_dash(&mut self, pattern: &[f32]);

    fn line(&mut self, from: Point, to: Point);

    /// Strokes a connected polyline through `points`.
    fn stroke_path(&mut self, points: &[Point], closed: bool);

    fn rect(&mut self, rect: Rect, paint: Paint);
    fn rounded_rect(&mut self, rect: Rect, radius: f32, paint: Paint);

    fn draw_text(&mut self, block: &TextBlock) -> Result<(), RenderError>;

    fn new_page(&mut self) -> Result<(), RenderError>;

    fn finish(self) -> Result<Self::Output, RenderError>;
}
