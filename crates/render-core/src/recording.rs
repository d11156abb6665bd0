use ballotpress_types::{Color, Point, Rect};

use crate::error::RenderError;
use crate::traits::DrawingSurface;
use crate::types::{DrawOp, Paint, TextBlock};

/// Everything drawn on a [`RecordingSurface`], grouped by page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    pub title: Option<String>,
    pub pages: Vec<Vec<DrawOp>>,
}

impl Recording {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text lines on a 0-based page, in drawing order.
    pub fn text_lines(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .into_iter()
            .flatten()
            .filter_map(|op| match op {
                DrawOp::Text(block) => Some(block),
                _ => None,
            })
            .flat_map(|block| block.lines.iter().map(String::as_str))
            .collect()
    }

    pub fn rounded_rects(&self, page: usize) -> Vec<Rect> {
        self.pages
            .get(page)
            .into_iter()
            .flatten()
            .filter_map(|op| match op {
                DrawOp::RoundedRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

/// A surface that keeps every call, for tests and debugging.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    recording: Recording,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            recording: Recording {
                title: None,
                pages: vec![Vec::new()],
            },
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.recording.pages.last_mut() {
            page.push(op);
        }
    }
}

impl DrawingSurface for RecordingSurface {
    type Output = Recording;

    fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn page_number(&self) -> usize {
        self.recording.pages.len()
    }

    fn set_title(&mut self, title: &str) {
        self.recording.title = Some(title.to_string());
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.push(DrawOp::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.push(DrawOp::FillColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.push(DrawOp::LineWidth(width));
    }

    fn set_dash(&mut self, pattern: &[f32]) {
        self.push(DrawOp::Dash(pattern.to_vec()));
    }

    fn line(&mut self, from: Point, to: Point) {
        self.push(DrawOp::Line { from, to });
    }

    fn stroke_path(&mut self, points: &[Point], closed: bool) {
        self.push(DrawOp::Path {
            points: points.to_vec(),
            closed,
        });
    }

    fn rect(&mut self, rect: Rect, paint: Paint) {
        self.push(DrawOp::Rect { rect, paint });
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f32, paint: Paint) {
        self.push(DrawOp::RoundedRect {
            rect,
            radius,
            paint,
        });
    }

    fn draw_text(&mut self, block: &TextBlock) -> Result<(), RenderError> {
        self.push(DrawOp::Text(block.clone()));
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        self.recording.pages.push(Vec::new());
        Ok(())
    }

    fn finish(self) -> Result<Recording, RenderError> {
        Ok(self.recording)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_ops_per_page() {
        let mut surface = RecordingSurface::new(612.0, 792.0);
        surface.set_title("t");
        surface.rounded_rect(Rect::new(1.0, 2.0, 3.0, 4.0), 2.0, Paint::FillStroke);
        surface
            .draw_text(&TextBlock::new(10.0, 10.0, "Helvetica", 12.0).text("a\nb"))
            .unwrap();
        surface.new_page().unwrap();
        surface
            .draw_text(&TextBlock::new(10.0, 10.0, "Helvetica", 12.0).text("c"))
            .unwrap();

        let recording = surface.finish().unwrap();
        assert_eq!(recording.title.as_deref(), Some("t"));
        assert_eq!(recording.page_count(), 2);
        assert_eq!(recording.text_lines(0), vec!["a", "b"]);
        assert_eq!(recording.text_lines(1), vec!["c"]);
        assert_eq!(recording.rounded_rects(0), vec![Rect::new(1.0, 2.0, 3.0, 4.0)]);
        assert!(recording.rounded_rects(1).is_empty());
        assert!(recording.text_lines(5).is_empty());
    }
}
