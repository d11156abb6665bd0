use ballotpress_types::{Color, Point, Rect};

use crate::error::RenderError;
use crate::traits::DrawingSurface;
use crate::types::{Paint, TextBlock};

/// A surface that draws nothing and only counts pages.
///
/// Used for the pagination pass, whose output is discarded.
#[derive(Debug, Clone)]
pub struct MeasureSurface {
    width: f32,
    height: f32,
    pages: usize,
}

impl MeasureSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pages: 1,
        }
    }
}

impl DrawingSurface for MeasureSurface {
    type Output = usize;

    fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn page_number(&self) -> usize {
        self.pages
    }

    fn set_title(&mut self, _title: &str) {}
    fn set_stroke_color(&mut self, _color: Color) {}
    fn set_fill_color(&mut self, _color: Color) {}
    fn set_line_width(&mut self, _width: f32) {}
    fn set_dash(&mut self, _pattern: &[f32]) {}
    fn line(&mut self, _from: Point, _to: Point) {}
    fn stroke_path(&mut self, _points: &[Point], _closed: bool) {}
    fn rect(&mut self, _rect: Rect, _paint: Paint) {}
    fn rounded_rect(&mut self, _rect: Rect, _radius: f32, _paint: Paint) {}

    fn draw_text(&mut self, _block: &TextBlock) -> Result<(), RenderError> {
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        self.pages += 1;
        Ok(())
    }

    fn finish(self) -> Result<usize, RenderError> {
        Ok(self.pages)
    }
}
