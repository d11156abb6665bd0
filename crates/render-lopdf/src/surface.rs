use crate::helpers::{
    STANDARD_FONTS, color_operation, dash_operation, font_resources, paint_operator,
    rounded_rect_path, to_win_ansi,
};
use crate::writer::StreamingPdfWriter;
use ballotpress_render_core::{DrawingSurface, Paint, RenderError, TextBlock};
use ballotpress_types::{Color, Point, Rect};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::{Cursor, Seek, Write};

#[derive(Debug, Clone, PartialEq)]
struct GraphicsState {
    stroke: Color,
    fill: Color,
    line_width: f32,
    dash: Vec<f32>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            stroke: Color::BLACK,
            fill: Color::BLACK,
            line_width: 1.0,
            dash: Vec::new(),
        }
    }
}

/// A [`DrawingSurface`] producing a PDF document.
///
/// Every page shares one resource dictionary; fonts get resource names `F1`, `F2`, ...
/// in first-use order and are referenced as unembedded Type1 fonts.
pub struct PdfSurface<W: Write + Seek> {
    writer: StreamingPdfWriter<W>,
    width: f32,
    height: f32,
    operations: Vec<Operation>,
    fonts: BTreeMap<String, String>,
    state: GraphicsState,
    title: Option<String>,
}

impl<W: Write + Seek> PdfSurface<W> {
    pub fn new(writer: W, page_size: (f32, f32)) -> Result<Self, RenderError> {
        let writer = StreamingPdfWriter::new(writer, "1.7")?;
        Ok(Self {
            writer,
            width: page_size.0,
            height: page_size.1,
            operations: Vec::new(),
            fonts: BTreeMap::new(),
            state: GraphicsState::default(),
            title: None,
        })
    }

    fn font_resource(&mut self, font: &str) -> String {
        if let Some(name) = self.fonts.get(font) {
            return name.clone();
        }
        if !STANDARD_FONTS.contains(&font) {
            log::warn!(
                "Font '{}' is not a standard PDF font; readers will substitute it",
                font
            );
        }
        let name = format!("F{}", self.fonts.len() + 1);
        self.fonts.insert(font.to_string(), name.clone());
        name
    }

    /// Replays non-default graphics state at the top of a fresh content stream.
    fn restore_state(&mut self) {
        let defaults = GraphicsState::default();
        if self.state.stroke != defaults.stroke {
            self.operations.push(color_operation("RG", self.state.stroke));
        }
        if self.state.fill != defaults.fill {
            self.operations.push(color_operation("rg", self.state.fill));
        }
        if self.state.line_width != defaults.line_width {
            self.operations
                .push(Operation::new("w", vec![self.state.line_width.into()]));
        }
        if !self.state.dash.is_empty() {
            self.operations.push(dash_operation(&self.state.dash));
        }
    }

    fn close_page(&mut self) -> Result<(), RenderError> {
        let content = Content {
            operations: std::mem::take(&mut self.operations),
        };
        let content_id = self.writer.write_content_stream(content.encode()?)?;
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.writer.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), self.width.into(), self.height.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => self.writer.resources_id,
        };
        let page_id = self.writer.write_object(page_dict.into())?;
        self.writer.push_page_id(page_id);
        Ok(())
    }
}

impl PdfSurface<Cursor<Vec<u8>>> {
    pub fn in_memory(page_size: (f32, f32)) -> Result<Self, RenderError> {
        Self::new(Cursor::new(Vec::new()), page_size)
    }
}

impl<W: Write + Seek> DrawingSurface for PdfSurface<W> {
    type Output = W;

    fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn page_number(&self) -> usize {
        self.writer.page_count() + 1
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
        self.operations.push(color_operation("RG", color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
        self.operations.push(color_operation("rg", color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
        self.operations.push(Operation::new("w", vec![width.into()]));
    }

    fn set_dash(&mut self, pattern: &[f32]) {
        self.state.dash = pattern.to_vec();
        self.operations.push(dash_operation(pattern));
    }

    fn line(&mut self, from: Point, to: Point) {
        self.operations
            .push(Operation::new("m", vec![from.x.into(), from.y.into()]));
        self.operations
            .push(Operation::new("l", vec![to.x.into(), to.y.into()]));
        self.operations.push(Operation::new("S", vec![]));
    }

    fn stroke_path(&mut self, points: &[Point], closed: bool) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.operations
            .push(Operation::new("m", vec![first.x.into(), first.y.into()]));
        for p in rest {
            self.operations
                .push(Operation::new("l", vec![p.x.into(), p.y.into()]));
        }
        let operator = if closed { "s" } else { "S" };
        self.operations.push(Operation::new(operator, vec![]));
    }

    fn rect(&mut self, rect: Rect, paint: Paint) {
        self.operations.push(Operation::new(
            "re",
            vec![
                rect.x.into(),
                rect.y.into(),
                rect.width.into(),
                rect.height.into(),
            ],
        ));
        self.operations
            .push(Operation::new(paint_operator(paint), vec![]));
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f32, paint: Paint) {
        self.operations.extend(rounded_rect_path(rect, radius));
        self.operations
            .push(Operation::new(paint_operator(paint), vec![]));
    }

    fn draw_text(&mut self, block: &TextBlock) -> Result<(), RenderError> {
        if block.is_empty() {
            return Ok(());
        }
        let resource = self.font_resource(&block.font);
        self.operations.push(Operation::new("BT", vec![]));
        self.operations.push(Operation::new(
            "Tf",
            vec![Object::Name(resource.into_bytes()), block.size.into()],
        ));
        self.operations
            .push(Operation::new("TL", vec![block.leading.into()]));
        self.operations
            .push(Operation::new("Td", vec![block.x.into(), block.y.into()]));
        for (i, line) in block.lines.iter().enumerate() {
            if i > 0 {
                self.operations.push(Operation::new("T*", vec![]));
            }
            self.operations.push(Operation::new(
                "Tj",
                vec![Object::String(to_win_ansi(line), StringFormat::Literal)],
            ));
        }
        self.operations.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        self.close_page()?;
        self.restore_state();
        Ok(())
    }

    fn finish(mut self) -> Result<W, RenderError> {
        self.close_page()?;
        let fonts = font_resources(self.fonts.iter());
        self.writer.set_resources(dictionary! { "Font" => fonts });
        if let Some(title) = self.title.take() {
            self.writer.set_info(dictionary! {
                "Title" => Object::String(to_win_ansi(&title), StringFormat::Literal),
                "Producer" => Object::String(b"ballotpress".to_vec(), StringFormat::Literal),
            });
        }
        log::debug!("Finished PDF with {} pages", self.writer.page_count());
        Ok(self.writer.finish()?)
    }
}
