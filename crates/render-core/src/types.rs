use ballotpress_types::{Color, Point, Rect};

use crate::utils::split_lines;

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Stroke,
    Fill,
    FillStroke,
}

impl Paint {
    pub fn fills(&self) -> bool {
        matches!(self, Paint::Fill | Paint::FillStroke)
    }

    pub fn strokes(&self) -> bool {
        matches!(self, Paint::Stroke | Paint::FillStroke)
    }
}

/// A block of single-font text lines.
///
/// `y` is the baseline of the first line; each following line sits `leading` lower.
/// Text is filled with the surface's current fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub x: f32,
    pub y: f32,
    pub font: String,
    pub size: f32,
    pub leading: f32,
    pub lines: Vec<String>,
}

impl TextBlock {
    pub fn new(x: f32, y: f32, font: impl Into<String>, size: f32) -> Self {
        Self {
            x,
            y,
            font: font.into(),
            size,
            leading: size * 1.2,
            lines: Vec::new(),
        }
    }

    pub fn leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.lines = split_lines(text);
        self
    }

    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    StrokeColor(Color),
    FillColor(Color),
    LineWidth(f32),
    Dash(Vec<f32>),
    Line { from: Point, to: Point },
    Path { points: Vec<Point>, closed: bool },
    Rect { rect: Rect, paint: Paint },
    RoundedRect { rect: Rect, radius: f32, paint: Paint },
    Text(TextBlock),
}
