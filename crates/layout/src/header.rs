use std::sync::Arc;

use ballotpress_model::{Header, OrderedHeaderRecord, parse_record};
use ballotpress_render_core::{DrawingSurface, TextBlock};
use ballotpress_types::{Color, ObjectId};
use serde_json::Value;

use crate::LayoutError;
use crate::contest::{BarStyle, FRAME_ALLOWANCE, draw_bar, draw_border};
use crate::interface::LayoutEnvironment;
use crate::registry::{Drawable, Resolver};

const DEFAULT_INSTRUCTIONS: [&str; 6] = [
    "Completely fill in the oval",
    "next to each choice.",
    "Use a black or blue pen.",
    "To vote for a person not listed,",
    "fill in the write-in oval and",
    "print the name on the line.",
];

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderKind {
    ColumnBreak,
    PageBreak,
    /// A framed block with a shaded title and plain body lines.
    Instructions { title: String, lines: Vec<String> },
}

/// A named marker in a ballot style's content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBlock {
    pub id: ObjectId,
    pub kind: HeaderKind,
}

impl HeaderBlock {
    pub fn from_record(header: Header) -> Self {
        let kind = match header.name.as_str() {
            "ColumnBreak" => HeaderKind::ColumnBreak,
            "PageBreak" => HeaderKind::PageBreak,
            _ => {
                let lines = match (&header.text, header.name.as_str()) {
                    (Some(text), _) => text.lines().map(str::to_string).collect(),
                    (None, "Instructions") => {
                        DEFAULT_INSTRUCTIONS.iter().map(|l| l.to_string()).collect()
                    }
                    (None, _) => Vec::new(),
                };
                HeaderKind::Instructions {
                    title: header.name,
                    lines,
                }
            }
        };
        Self {
            id: header.id,
            kind,
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self.kind, HeaderKind::Instructions { .. })
    }

    /// Breaks occupy no space.
    pub fn height(&self, env: &LayoutEnvironment, _width: f32) -> Result<f32, LayoutError> {
        let s = env.settings;
        Ok(match &self.kind {
            HeaderKind::ColumnBreak | HeaderKind::PageBreak => 0.0,
            HeaderKind::Instructions { lines, .. } => {
                FRAME_ALLOWANCE
                    + s.title_leading
                    + 2.0 * s.row_padding
                    + s.subtext_leading * lines.len() as f32
            }
        })
    }

    pub fn draw<S: DrawingSurface>(
        &self,
        env: &LayoutEnvironment,
        surface: &mut S,
        x: f32,
        y: f32,
        width: f32,
    ) -> Result<(), LayoutError> {
        let HeaderKind::Instructions { title, lines } = &self.kind else {
            return Ok(());
        };
        let s = env.settings;
        let mut pos = y - 3.0;
        draw_bar(
            env,
            surface,
            BarStyle {
                x,
                top: pos,
                width,
                height: s.title_leading,
                background: s.title_background,
                font: &s.title_font,
                size: s.title_font_size,
            },
            title,
        )?;
        pos -= s.title_leading;
        pos -= s.row_padding;

        if !lines.is_empty() {
            surface.set_fill_color(Color::BLACK);
            surface.draw_text(
                &TextBlock::new(
                    x + 1.0 + s.row_padding,
                    pos - s.subtext_font_size,
                    &s.subtext_font,
                    s.subtext_font_size,
                )
                .leading(s.subtext_leading)
                .lines(lines.iter().map(String::as_str)),
            )?;
            pos -= s.subtext_leading * lines.len() as f32;
        }
        pos -= s.row_padding;

        draw_border(surface, x, y, width, pos);
        Ok(())
    }
}

pub(crate) fn build_header(_resolver: &mut Resolver, raw: &Value) -> Result<Drawable, LayoutError> {
    let record: Header = parse_record(raw)?;
    Ok(Drawable::Header(Arc::new(HeaderBlock::from_record(record))))
}

pub(crate) fn build_ordered_header(
    resolver: &mut Resolver,
    raw: &Value,
) -> Result<Drawable, LayoutError> {
    let record: OrderedHeaderRecord = parse_record(raw)?;
    let header = resolver
        .resolve_typed(record.header_id.as_str())?
        .into_header(record.header_id.as_str())?;
    Ok(Drawable::Header(header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LayoutSettings;
    use crate::test_utils::env_with;
    use ballotpress_render_core::RecordingSurface;
    use ballotpress_traits::BuiltinFontMetrics;

    fn header(name: &str, text: Option<&str>) -> HeaderBlock {
        HeaderBlock::from_record(Header {
            id: ObjectId::from("h1"),
            name: name.to_string(),
            text: text.map(str::to_string),
        })
    }

    #[test]
    fn break_names_become_breaks() {
        assert_eq!(header("ColumnBreak", None).kind, HeaderKind::ColumnBreak);
        assert_eq!(header("PageBreak", None).kind, HeaderKind::PageBreak);
        assert!(header("PageBreak", None).is_break());
        assert!(!header("Instructions", None).is_break());
    }

    #[test]
    fn instructions_default_body() {
        match header("Instructions", None).kind {
            HeaderKind::Instructions { title, lines } => {
                assert_eq!(title, "Instructions");
                assert_eq!(lines.len(), DEFAULT_INSTRUCTIONS.len());
            }
            other => panic!("unexpected {:?}", other),
        }
        match header("Notice", Some("line one\nline two")).kind {
            HeaderKind::Instructions { lines, .. } => assert_eq!(lines, vec!["line one", "line two"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn drawn_extent_matches_height() {
        let settings = LayoutSettings::default();
        let metrics = BuiltinFontMetrics::new();
        let env = env_with(&settings, &metrics);
        let block = header("Notice", Some("a\nb\nc"));
        let h = block.height(&env, 200.0).unwrap();
        assert!((h - (4.0 + 16.8 + 14.4 + 39.0)).abs() < 1e-3);

        let mut surface = RecordingSurface::new(612.0, 792.0);
        block.draw(&env, &mut surface, 0.0, 700.0, 200.0).unwrap();
        let recording = surface.finish().unwrap();
        assert_eq!(recording.text_lines(0), vec!["Notice", "a", "b", "c"]);
    }

    #[test]
    fn breaks_draw_nothing() {
        let settings = LayoutSettings::default();
        let metrics = BuiltinFontMetrics::new();
        let env = env_with(&settings, &metrics);
        let block = header("ColumnBreak", None);
        assert_eq!(block.height(&env, 200.0).unwrap(), 0.0);
        let mut surface = RecordingSurface::new(612.0, 792.0);
        block.draw(&env, &mut surface, 0.0, 700.0, 200.0).unwrap();
        assert!(surface.finish().unwrap().pages[0].is_empty());
    }
}
