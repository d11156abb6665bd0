//! Contest frames and the per-style ordered view of a contest.

use std::collections::HashSet;
use std::sync::Arc;

use ballotpress_model::{
    BallotMeasureContest, CandidateContest, DocumentError, GpUnit, Office, OrderedContestRecord,
    VoteVariation, parse_record, tags,
};
use ballotpress_render_core::{DrawingSurface, Paint, TextBlock};
use ballotpress_types::{Color, ObjectId, Point, Rect};
use log::debug;
use serde_json::Value;

use crate::LayoutError;
use crate::bubbles::SelectionBubbles;
use crate::interface::LayoutEnvironment;
use crate::registry::{Drawable, Resolver};
use crate::selection::Selection;

/// Top rule (3pt) plus bottom rule (1pt).
pub(crate) const FRAME_ALLOWANCE: f32 = 4.0;
const TOP_RULE_WIDTH: f32 = 3.0;

/// Fields shared by every contest kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestBody {
    pub id: ObjectId,
    pub title: String,
    pub subtitle: Option<String>,
    pub selections: Vec<Arc<Selection>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Contest {
    Candidate {
        body: ContestBody,
        /// Names of the offices being filled.
        offices: Vec<String>,
        votes_allowed: u32,
        number_elected: Option<u32>,
        vote_variation: Option<VoteVariation>,
    },
    Measure {
        body: ContestBody,
        measure_type: Option<String>,
        summary_text: Option<String>,
        pro_statement: Option<String>,
        con_statement: Option<String>,
    },
}

impl Contest {
    pub fn body(&self) -> &ContestBody {
        match self {
            Contest::Candidate { body, .. } | Contest::Measure { body, .. } => body,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.body().id
    }

    pub fn title(&self) -> &str {
        &self.body().title
    }

    pub fn selections(&self) -> &[Arc<Selection>] {
        &self.body().selections
    }

    /// Row height shared by the non-write-in selections: the tallest of them.
    pub fn typical_height(
        env: &LayoutEnvironment,
        width: f32,
        selections: &[Arc<Selection>],
    ) -> Result<f32, LayoutError> {
        let mut typical = 0.0f32;
        for selection in selections.iter().filter(|s| !s.is_write_in()) {
            typical = typical.max(selection.height(env, width)?);
        }
        Ok(typical)
    }

    pub fn height(&self, env: &LayoutEnvironment, width: f32) -> Result<f32, LayoutError> {
        self.height_with(env, width, self.selections())
    }

    /// Height of this contest showing `selections` in the given order.
    pub fn height_with(
        &self,
        env: &LayoutEnvironment,
        width: f32,
        selections: &[Arc<Selection>],
    ) -> Result<f32, LayoutError> {
        let s = env.settings;
        let inner = width - 1.0;
        let typical = Self::typical_height(env, inner, selections)?;
        let mut rows = 0.0;
        for selection in selections {
            rows += typical.max(selection.height(env, inner)?);
        }
        Ok(rows
            + FRAME_ALLOWANCE
            + s.title_leading
            + s.subtitle_leading
            + 2.0 * s.row_padding)
    }

    pub fn draw<S: DrawingSurface>(
        &self,
        env: &LayoutEnvironment,
        surface: &mut S,
        x: f32,
        y: f32,
        width: f32,
    ) -> Result<SelectionBubbles, LayoutError> {
        self.draw_with(env, surface, x, y, width, self.selections())
    }

    /// Draws the frame and `selections` with the top-left corner at `(x, y)`.
    /// Returns each selection's bubble keyed by selection id.
    pub fn draw_with<S: DrawingSurface>(
        &self,
        env: &LayoutEnvironment,
        surface: &mut S,
        x: f32,
        y: f32,
        width: f32,
        selections: &[Arc<Selection>],
    ) -> Result<SelectionBubbles, LayoutError> {
        let s = env.settings;
        let body = self.body();
        let mut pos = y - TOP_RULE_WIDTH;

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
            &body.title,
        )?;
        pos -= s.title_leading;
        draw_bar(
            env,
            surface,
            BarStyle {
                x,
                top: pos,
                width,
                height: s.subtitle_leading,
                background: s.subtitle_background,
                font: &s.subtitle_font,
                size: s.subtitle_font_size,
            },
            body.subtitle.as_deref().unwrap_or_default(),
        )?;
        pos -= s.subtitle_leading;
        pos -= s.row_padding;

        let inner = width - 1.0;
        let typical = Self::typical_height(env, inner, selections)?;
        let mut bubbles = SelectionBubbles::new();
        for selection in selections {
            let h = selection.height(env, inner)?;
            let bubble = selection.draw(env, surface, x + 1.0, pos, inner)?;
            bubbles.insert(selection.id().clone(), bubble);
            pos -= typical.max(h);
        }
        pos -= s.row_padding;

        draw_border(surface, x, y, width, pos);
        debug!(
            "Drew contest '{}' with {} selections at ({:.2}, {:.2})",
            body.id,
            selections.len(),
            x,
            y
        );
        Ok(bubbles)
    }
}

pub(crate) struct BarStyle<'a> {
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub font: &'a str,
    pub size: f32,
}

/// Shaded band with one or more text lines inset from its left edge.
pub(crate) fn draw_bar<S: DrawingSurface>(
    env: &LayoutEnvironment,
    surface: &mut S,
    bar: BarStyle<'_>,
    text: &str,
) -> Result<(), LayoutError> {
    surface.set_stroke_color(bar.background);
    surface.set_fill_color(bar.background);
    surface.rect(
        Rect::new(bar.x, bar.top - bar.height, bar.width, bar.height),
        Paint::Fill,
    );
    surface.set_fill_color(Color::BLACK);
    surface.set_stroke_color(Color::BLACK);
    surface.draw_text(
        &TextBlock::new(
            bar.x + 1.0 + env.settings.row_padding,
            bar.top - bar.size,
            bar.font,
            bar.size,
        )
        .text(text),
    )?;
    Ok(())
}

/// Heavy top rule, then the left, bottom and right edges as one open path ending at
/// `bottom` (the cursor after the last row and padding).
pub(crate) fn draw_border<S: DrawingSurface>(
    surface: &mut S,
    x: f32,
    y: f32,
    width: f32,
    bottom: f32,
) {
    surface.set_stroke_color(Color::BLACK);
    surface.set_line_width(TOP_RULE_WIDTH);
    let rule_y = y - TOP_RULE_WIDTH / 2.0;
    surface.line(Point::new(x, rule_y), Point::new(x + width, rule_y));

    surface.set_line_width(1.0);
    let left = x + 0.5;
    let right = x + width - 0.5;
    let base = bottom - 0.5;
    surface.stroke_path(
        &[
            Point::new(left, rule_y),
            Point::new(left, base),
            Point::new(right, base),
            Point::new(right, rule_y),
        ],
        false,
    );
}

/// A contest as placed in one ballot style: the shared contest plus the selections
/// shown, in presentation order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedContest {
    pub contest: Arc<Contest>,
    pub selections: Vec<Arc<Selection>>,
}

impl OrderedContest {
    pub fn id(&self) -> &ObjectId {
        self.contest.id()
    }

    pub fn height(&self, env: &LayoutEnvironment, width: f32) -> Result<f32, LayoutError> {
        self.contest.height_with(env, width, &self.selections)
    }

    pub fn draw<S: DrawingSurface>(
        &self,
        env: &LayoutEnvironment,
        surface: &mut S,
        x: f32,
        y: f32,
        width: f32,
    ) -> Result<SelectionBubbles, LayoutError> {
        self.contest
            .draw_with(env, surface, x, y, width, &self.selections)
    }
}

/// Selections may be inline records or `@id` strings.
fn contest_selections(
    resolver: &mut Resolver,
    raw: &[Value],
) -> Result<Vec<Arc<Selection>>, LayoutError> {
    raw.iter()
        .map(|value| match value {
            Value::String(id) => resolver.resolve_typed(id)?.into_selection(id),
            record => {
                let drawable = resolver.make_drawable(record)?;
                let id = record
                    .get("@id")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                drawable.into_selection(&id)
            }
        })
        .collect()
}

fn check_district(resolver: &Resolver, id: &ObjectId) -> Result<(), LayoutError> {
    resolver
        .index()
        .resolve_any::<GpUnit>(id.as_str(), &[tags::REPORTING_UNIT, tags::REPORTING_DEVICE])?;
    Ok(())
}

pub(crate) fn build_candidate_contest(
    resolver: &mut Resolver,
    raw: &Value,
) -> Result<Drawable, LayoutError> {
    let record: CandidateContest = parse_record(raw)?;
    check_district(resolver, &record.election_district_id)?;

    let offices = record
        .office_ids
        .iter()
        .map(|id| -> Result<String, LayoutError> {
            let office: Office = resolver.index().resolve_as(id.as_str(), tags::OFFICE)?;
            Ok(office.name.unwrap_or_else(|| id.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let selections = contest_selections(resolver, &record.contest_selection)?;

    let subtitle = record.ballot_sub_title.clone().or_else(|| {
        record
            .vote_variation
            .and_then(|v| v.instruction(Some(record.votes_allowed)))
    });
    Ok(Drawable::Contest(Arc::new(Contest::Candidate {
        body: ContestBody {
            title: record.ballot_title.unwrap_or(record.name),
            id: record.id,
            subtitle,
            selections,
        },
        offices,
        votes_allowed: record.votes_allowed,
        number_elected: record.number_elected,
        vote_variation: record.vote_variation,
    })))
}

pub(crate) fn build_measure_contest(
    resolver: &mut Resolver,
    raw: &Value,
) -> Result<Drawable, LayoutError> {
    let record: BallotMeasureContest = parse_record(raw)?;
    check_district(resolver, &record.election_district_id)?;
    let selections = contest_selections(resolver, &record.contest_selection)?;

    let subtitle = record.ballot_sub_title.clone().or_else(|| {
        record
            .vote_variation
            .and_then(|v| v.instruction(record.votes_allowed))
    });
    Ok(Drawable::Contest(Arc::new(Contest::Measure {
        body: ContestBody {
            title: record.ballot_title.unwrap_or(record.name),
            id: record.id,
            subtitle,
            selections,
        },
        measure_type: record.measure_type,
        summary_text: record.summary_text,
        pro_statement: record.pro_statement,
        con_statement: record.con_statement,
    })))
}

pub(crate) fn build_ordered_contest(
    resolver: &mut Resolver,
    raw: &Value,
) -> Result<Drawable, LayoutError> {
    let record: OrderedContestRecord = parse_record(raw)?;
    let contest = resolver
        .resolve_typed(record.contest_id.as_str())?
        .into_contest(record.contest_id.as_str())?;

    let selections = if record.ordered_contest_selection_ids.is_empty() {
        contest.selections().to_vec()
    } else {
        let mut seen = HashSet::new();
        record
            .ordered_contest_selection_ids
            .iter()
            .map(|id| {
                if !seen.insert(id) {
                    return Err(DocumentError::Malformed {
                        context: format!("OrderedContest for '{}'", record.contest_id),
                        message: format!("selection '{}' is listed twice", id),
                    });
                }
                contest
                    .selections()
                    .iter()
                    .find(|s| s.id() == id)
                    .cloned()
                    .ok_or_else(|| DocumentError::UnknownSelection {
                        contest: record.contest_id.to_string(),
                        selection: id.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Drawable::OrderedContest(Arc::new(OrderedContest {
        contest,
        selections,
    })))
}
