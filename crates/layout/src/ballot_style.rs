//! Ballot styles and the two-pass column/page flow.

use std::collections::HashSet;
use std::sync::Arc;

use ballotpress_model::{BallotStyleRecord, DocumentError, Election, GpUnit, Party, tags};
use ballotpress_render_core::{DrawingSurface, MeasureSurface, Paint, TextBlock};
use ballotpress_types::{Color, ObjectId, Point, Rect};
use log::{debug, info, warn};
use serde_json::Value;

use crate::LayoutError;
use crate::algorithms::pagination::{Advance, ColumnFlow};
use crate::bubbles::{BubbleMap, SelectionBubbles};
use crate::config::DEBUG_OUTLINE_COLOR;
use crate::contest::OrderedContest;
use crate::header::{HeaderBlock, HeaderKind};
use crate::interface::LayoutEnvironment;
use crate::registry::{Drawable, Resolver};
use crate::warning::LayoutWarning;

/// Placeholder printed for the page total before it is known.
const UNKNOWN_TOTAL: &str = "X";

/// One entry of a ballot style's content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum BallotContent {
    Contest(Arc<OrderedContest>),
    Header(Arc<HeaderBlock>),
}

impl BallotContent {
    pub fn id(&self) -> &ObjectId {
        match self {
            BallotContent::Contest(c) => c.id(),
            BallotContent::Header(h) => &h.id,
        }
    }

    pub fn height(&self, env: &LayoutEnvironment, width: f32) -> Result<f32, LayoutError> {
        match self {
            BallotContent::Contest(c) => c.height(env, width),
            BallotContent::Header(h) => h.height(env, width),
        }
    }

    fn draw<S: DrawingSurface>(
        &self,
        env: &LayoutEnvironment,
        surface: &mut S,
        x: f32,
        y: f32,
        width: f32,
    ) -> Result<Option<SelectionBubbles>, LayoutError> {
        match self {
            BallotContent::Contest(c) => c.draw(env, surface, x, y, width).map(Some),
            BallotContent::Header(h) => h.draw(env, surface, x, y, width).map(|_| None),
        }
    }
}

/// Result of laying out one ballot style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleLayout {
    pub pages: usize,
    pub bubbles: BubbleMap,
    pub warnings: Vec<LayoutWarning>,
}

/// The content of one printed ballot and the reporting units it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct BallotStyle {
    pub id: Option<ObjectId>,
    pub gpunit_names: Vec<String>,
    pub external_ids: Vec<String>,
    pub image_uris: Vec<String>,
    pub party_ids: Vec<ObjectId>,
    pub content: Vec<BallotContent>,
    header_template: String,
}

impl BallotStyle {
    pub fn build(
        resolver: &mut Resolver,
        election: &Election,
        record: &BallotStyleRecord,
    ) -> Result<Self, LayoutError> {
        let gpunit_names = record
            .gp_unit_ids
            .iter()
            .map(|id| -> Result<String, LayoutError> {
                let unit: GpUnit = resolver.index().resolve_any(
                    id.as_str(),
                    &[tags::REPORTING_UNIT, tags::REPORTING_DEVICE],
                )?;
                Ok(unit.display_name()?)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let style_name = record
            .id
            .as_ref()
            .map(ObjectId::to_string)
            .unwrap_or_else(|| format!("'{}'", gpunit_names.join(",")));

        for party_id in &record.party_ids {
            resolver
                .index()
                .resolve_as::<Party>(party_id.as_str(), tags::PARTY)?;
        }

        let mut seen = HashSet::new();
        let mut content = Vec::with_capacity(record.ordered_content.len());
        for raw in &record.ordered_content {
            let item = content_item(resolver, raw)?;
            if let BallotContent::Contest(c) = &item {
                if !seen.insert(c.id().clone()) {
                    return Err(DocumentError::RepeatedContest {
                        contest: c.id().to_string(),
                        style: style_name,
                    }
                    .into());
                }
            }
            content.push(item);
        }

        let header_template = match &record.page_header {
            Some(template) => template.clone(),
            None => format!(
                "Ballot for {}\n{}\n{} - page {{PAGE}} of {{PAGES}}",
                election.type_title()?,
                gpunit_names.join(", "),
                election.date_part()
            ),
        };
        debug!(
            "Built ballot style {} with {} content items",
            style_name,
            content.len()
        );

        Ok(Self {
            id: record.id.clone(),
            gpunit_names,
            external_ids: record
                .external_identifier
                .iter()
                .map(|e| e.value().to_string())
                .collect(),
            image_uris: record.image_uri.clone(),
            party_ids: record.party_ids.clone(),
            content,
            header_template,
        })
    }

    /// Reporting unit names joined with commas.
    pub fn name(&self) -> String {
        self.gpunit_names.join(",")
    }

    /// True when any selector equals one of the style's external identifiers or image
    /// URIs.
    pub fn matches_any<S: AsRef<str>>(&self, selectors: &[S]) -> bool {
        selectors.iter().map(AsRef::as_ref).any(|sel| {
            self.external_ids.iter().any(|e| e == sel) || self.image_uris.iter().any(|u| u == sel)
        })
    }

    pub fn header_template(&self) -> &str {
        &self.header_template
    }

    /// Header text for `page`. An unknown total prints as `X`.
    pub fn page_header_text(&self, page: usize, total: Option<usize>) -> String {
        let total = total
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN_TOTAL.to_string());
        self.header_template
            .replace("{PAGES}", &total)
            .replace("{PAGE}", &page.to_string())
    }

    /// Pass 1: lays the style out on a discarding surface and returns its page count.
    pub fn paginate(
        &self,
        env: &LayoutEnvironment,
        page_size: (f32, f32),
        stamp: &str,
    ) -> Result<usize, LayoutError> {
        let mut surface = MeasureSurface::new(page_size.0, page_size.1);
        let layout = self.draw(env, &mut surface, None, stamp)?;
        Ok(layout.pages)
    }

    /// Both passes: counts pages, then draws onto `surface` with the real total.
    pub fn render<S: DrawingSurface>(
        &self,
        env: &LayoutEnvironment,
        surface: &mut S,
        stamp: &str,
    ) -> Result<StyleLayout, LayoutError> {
        let name = self.name();
        info!("[PASS 1] Paginating ballot style '{}'", name);
        let total = self.paginate(env, surface.page_size(), stamp)?;
        info!("[PASS 1] Ballot style '{}' needs {} page(s)", name, total);

        info!("[PASS 2] Drawing ballot style '{}'", name);
        let layout = self.draw(env, surface, Some(total), stamp)?;
        if layout.pages != total {
            return Err(LayoutError::PassMismatch {
                pass1: total,
                pass2: layout.pages,
            });
        }
        for warning in &layout.warnings {
            warn!("[PAGINATE] {}", warning);
        }
        info!(
            "[PASS 2] Ballot style '{}' drawn: {} page(s), {} contests",
            name,
            layout.pages,
            layout.bubbles.len()
        );
        Ok(layout)
    }

    /// Flows the content into columns and pages, starting on the surface's current
    /// page. Page numbers are local to this style.
    pub fn draw<S: DrawingSurface>(
        &self,
        env: &LayoutEnvironment,
        surface: &mut S,
        total: Option<usize>,
        stamp: &str,
    ) -> Result<StyleLayout, LayoutError> {
        let s = env.settings;
        let (width, _) = surface.page_size();
        surface.set_title(&format!("ballot {} {}", self.name(), stamp));

        let mut page = 1;
        let mut flow = ColumnFlow::new(
            s.page_margin,
            width - s.page_margin,
            s.column_count,
            s.column_margin,
        );
        let (top, bottom) = self.start_page(env, surface, page, total, stamp)?;
        flow.start_page(top, bottom);
        let column_width = flow.column_width();

        let mut layout = StyleLayout::default();
        for item in &self.content {
            if let BallotContent::Header(header) = item {
                let advance = match header.kind {
                    HeaderKind::ColumnBreak => flow.column_has_content(),
                    HeaderKind::PageBreak => flow.page_has_content(),
                    HeaderKind::Instructions { .. } => false,
                };
                if advance {
                    match header.kind {
                        HeaderKind::PageBreak => {
                            self.next_page(env, surface, &mut flow, &mut page, total, stamp)?
                        }
                        _ => self.next_column(env, surface, &mut flow, &mut page, total, stamp)?,
                    }
                }
                if header.is_break() {
                    continue;
                }
            }

            let height = item.height(env, column_width)?;
            if flow.fits(height).should_break && flow.column_has_content() {
                self.next_column(env, surface, &mut flow, &mut page, total, stamp)?;
            }
            let fit = flow.fits(height);
            if fit.should_break {
                layout.warnings.push(LayoutWarning::Overflow {
                    item: item.id().to_string(),
                    page,
                    column: flow.column() + 1,
                    height,
                    available: fit.remaining_height,
                });
            }

            let (x, y) = (flow.x(), flow.y());
            debug!(
                "Placing '{}' (h={:.2}) on page {} column {} at ({:.2}, {:.2})",
                item.id(),
                height,
                page,
                flow.column() + 1,
                x,
                y
            );
            if let Some(bubbles) = item.draw(env, surface, x, y, column_width)? {
                layout.bubbles.insert(item.id().clone(), bubbles);
            }
            flow.commit(height);
        }

        layout.pages = page;
        Ok(layout)
    }

    fn next_column<S: DrawingSurface>(
        &self,
        env: &LayoutEnvironment,
        surface: &mut S,
        flow: &mut ColumnFlow,
        page: &mut usize,
        total: Option<usize>,
        stamp: &str,
    ) -> Result<(), LayoutError> {
        match flow.next_column() {
            Advance::Column => Ok(()),
            Advance::Page => self.next_page(env, surface, flow, page, total, stamp),
        }
    }

    fn next_page<S: DrawingSurface>(
        &self,
        env: &LayoutEnvironment,
        surface: &mut S,
        flow: &mut ColumnFlow,
        page: &mut usize,
        total: Option<usize>,
        stamp: &str,
    ) -> Result<(), LayoutError> {
        surface.new_page()?;
        *page += 1;
        let (top, bottom) = self.start_page(env, surface, *page, total, stamp)?;
        flow.start_page(top, bottom);
        Ok(())
    }

    /// Draws page furniture and the page header. Returns the content band
    /// `(top, bottom)` left for items.
    fn start_page<S: DrawingSurface>(
        &self,
        env: &LayoutEnvironment,
        surface: &mut S,
        page: usize,
        total: Option<usize>,
        stamp: &str,
    ) -> Result<(f32, f32), LayoutError> {
        let s = env.settings;
        let (width, height) = surface.page_size();
        let left = s.page_margin;
        let right = width - s.page_margin;
        let mut top = height - s.page_margin;
        let mut bottom = s.page_margin;

        if s.show_debug_outline {
            surface.set_line_width(0.2);
            surface.set_fill_color(Color::WHITE);
            surface.set_stroke_color(DEBUG_OUTLINE_COLOR);
            surface.rect(
                Rect::new(left, bottom, right - left, top - bottom),
                Paint::Stroke,
            );
            surface.set_line_width(1.0);
        }

        if s.show_generated_timestamp {
            surface.set_fill_color(Color::BLACK);
            surface.set_stroke_color(Color::BLACK);
            let stamp_width = env.string_width(stamp, &s.timestamp_font, s.timestamp_font_size)?;
            surface.draw_text(
                &TextBlock::new(
                    right - stamp_width,
                    bottom + s.timestamp_font_size * 0.2,
                    &s.timestamp_font,
                    s.timestamp_font_size,
                )
                .text(stamp),
            )?;
            bottom += s.timestamp_font_size * 1.2;
        }

        surface.set_stroke_color(Color::BLACK);
        surface.set_fill_color(Color::BLACK);
        surface.set_line_width(1.0);
        surface.line(Point::new(left, top), Point::new(right, top));
        let text = self.page_header_text(page, total);
        let block = TextBlock::new(
            left + s.row_padding,
            top - s.header_font_size,
            &s.header_font,
            s.header_font_size,
        )
        .leading(s.header_leading)
        .text(&text);
        top -= s.header_leading * block.lines.len() as f32 + s.row_padding;
        surface.draw_text(&block)?;

        Ok((top, bottom))
    }
}

fn content_item(resolver: &mut Resolver, raw: &Value) -> Result<BallotContent, LayoutError> {
    let drawable = match raw {
        Value::String(id) => resolver.resolve_typed(id)?,
        record => resolver.make_drawable(record)?,
    };
    match drawable {
        Drawable::OrderedContest(c) => Ok(BallotContent::Contest(c)),
        Drawable::Header(h) => Ok(BallotContent::Header(h)),
        Drawable::Contest(contest) => Ok(BallotContent::Contest(Arc::new(OrderedContest {
            selections: contest.selections().to_vec(),
            contest,
        }))),
        other => Err(LayoutError::KindMismatch {
            id: raw
                .get("@id")
                .and_then(Value::as_str)
                .or_else(|| raw.as_str())
                .unwrap_or_default()
                .to_string(),
            expected: "contest or header",
            actual: other.kind_name(),
        }),
    }
}
