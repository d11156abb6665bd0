//! Markable choices: one bubble plus its label.

use ballotpress_model::{
    BallotMeasureSelection, Candidate, CandidateSelection, DocumentError, Party, Person,
    parse_record, tags,
};
use ballotpress_render_core::{DrawingSurface, Paint, TextBlock};
use ballotpress_types::{Color, ObjectId, Point, Rect};
use serde_json::Value;

use crate::LayoutError;
use crate::interface::LayoutEnvironment;
use crate::registry::{Drawable, Resolver};

const WRITE_IN_LABEL: &str = "write-in:";
const WRITE_IN_DASH: [f32; 2] = [4.0, 4.0];

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSelectionView {
    pub id: ObjectId,
    /// One ballot name per ticket member.
    pub names: Vec<String>,
    /// Endorsing parties, else the candidates' parties.
    pub subtext: Option<String>,
    pub is_write_in: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasureSelectionView {
    pub id: ObjectId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Candidate(CandidateSelectionView),
    Measure(MeasureSelectionView),
}

impl Selection {
    pub fn id(&self) -> &ObjectId {
        match self {
            Selection::Candidate(c) => &c.id,
            Selection::Measure(m) => &m.id,
        }
    }

    /// Write-ins do not count toward a contest's typical row height.
    pub fn is_write_in(&self) -> bool {
        matches!(self, Selection::Candidate(c) if c.is_write_in)
    }

    pub fn height(&self, env: &LayoutEnvironment, _width: f32) -> Result<f32, LayoutError> {
        let s = env.settings;
        let height = match self {
            Selection::Candidate(c) => {
                let mut h = s.candidate_leading * c.names.len() as f32;
                if c.subtext.is_some() {
                    h += s.subtext_leading;
                }
                if c.is_write_in {
                    h += s.subtext_leading + s.write_in_height;
                }
                h
            }
            Selection::Measure(_) => s.candidate_leading,
        };
        Ok(height + s.row_padding)
    }

    /// Draws the bubble and label with the top-left corner at `(x, y)` and returns
    /// the bubble rectangle in page space.
    pub fn draw<S: DrawingSurface>(
        &self,
        env: &LayoutEnvironment,
        surface: &mut S,
        x: f32,
        y: f32,
        width: f32,
    ) -> Result<Rect, LayoutError> {
        let s = env.settings;
        let bubble = draw_bubble(env, surface, x, y)?;
        let text_x = x + s.bubble_left_pad + s.bubble_width + s.bubble_right_pad;
        let right = x + width;

        surface.set_fill_color(Color::BLACK);
        let mut ypos = y;
        match self {
            Selection::Candidate(c) => {
                if !c.names.is_empty() {
                    surface.draw_text(
                        &TextBlock::new(
                            text_x,
                            y - s.candidate_font_size,
                            &s.candidate_font,
                            s.candidate_font_size,
                        )
                        .leading(s.candidate_leading)
                        .lines(c.names.iter().map(String::as_str)),
                    )?;
                    ypos -= s.candidate_leading * c.names.len() as f32;
                }
                if let Some(subtext) = &c.subtext {
                    surface.draw_text(
                        &TextBlock::new(
                            text_x,
                            ypos - s.subtext_font_size,
                            &s.subtext_font,
                            s.subtext_font_size,
                        )
                        .leading(s.subtext_leading)
                        .text(subtext),
                    )?;
                    ypos -= s.subtext_leading;
                }
                if c.is_write_in {
                    surface.draw_text(
                        &TextBlock::new(
                            text_x,
                            ypos - s.subtext_font_size,
                            &s.subtext_font,
                            s.subtext_font_size,
                        )
                        .leading(s.subtext_leading)
                        .text(WRITE_IN_LABEL),
                    )?;
                    ypos -= s.subtext_leading + s.write_in_height;
                    surface.set_stroke_color(Color::BLACK);
                    surface.set_dash(&WRITE_IN_DASH);
                    surface.set_line_width(0.5);
                    surface.line(Point::new(text_x, ypos), Point::new(right, ypos));
                    surface.set_dash(&[]);
                }
            }
            Selection::Measure(m) => {
                surface.draw_text(
                    &TextBlock::new(
                        text_x,
                        y - s.candidate_font_size,
                        &s.candidate_font,
                        s.candidate_font_size,
                    )
                    .leading(s.candidate_leading)
                    .text(&m.label),
                )?;
                ypos -= s.candidate_leading;
            }
        }

        // separator
        surface.set_stroke_color(Color::BLACK);
        surface.set_line_width(0.25);
        let sep_y = ypos - s.row_padding;
        surface.line(Point::new(text_x, sep_y), Point::new(right, sep_y));
        Ok(bubble)
    }
}

/// Rounded bubble sized from the candidate font's cap height, vertically centered on
/// the first text line's capitals.
fn draw_bubble<S: DrawingSurface>(
    env: &LayoutEnvironment,
    surface: &mut S,
    x: f32,
    y: f32,
) -> Result<Rect, LayoutError> {
    let s = env.settings;
    let cap_height = env.cap_height(&s.candidate_font, s.candidate_font_size)?;
    let bubble_height = s.bubble_max_height.min(cap_height);
    let shim = (cap_height - bubble_height) / 2.0;
    let bottom = y - s.candidate_font_size + shim;
    let rect = Rect::new(x + s.bubble_left_pad, bottom, s.bubble_width, bubble_height);

    surface.set_stroke_color(Color::BLACK);
    surface.set_line_width(1.0);
    surface.set_fill_color(Color::WHITE);
    surface.rounded_rect(rect, bubble_height / 2.0, Paint::FillStroke);
    Ok(rect)
}

fn party_name(resolver: &Resolver, id: &ObjectId) -> Result<String, LayoutError> {
    let party: Party = resolver.index().resolve_as(id.as_str(), tags::PARTY)?;
    party
        .name
        .ok_or_else(|| DocumentError::missing(format!("Party '{}'", id), "Name").into())
}

/// Party affiliation of a candidate: its person's party, else the candidate's own.
fn candidate_party(resolver: &Resolver, candidate: &Candidate) -> Result<Option<String>, LayoutError> {
    let mut party_id = None;
    if let Some(person_id) = &candidate.person_id {
        let person: Person = resolver.index().resolve_as(person_id.as_str(), tags::PERSON)?;
        party_id = person.party_id;
    }
    match party_id.or_else(|| candidate.party_id.clone()) {
        Some(id) => party_name(resolver, &id).map(Some),
        None => Ok(None),
    }
}

pub(crate) fn build_candidate_selection(
    resolver: &mut Resolver,
    raw: &Value,
) -> Result<Drawable, LayoutError> {
    let record: CandidateSelection = parse_record(raw)?;
    if record.candidate_ids.is_empty() && !record.is_write_in {
        return Err(DocumentError::missing(
            format!("CandidateSelection '{}'", record.id),
            "CandidateIds",
        )
        .into());
    }

    let mut names = Vec::with_capacity(record.candidate_ids.len());
    let mut candidate_parties = Vec::new();
    for candidate_id in &record.candidate_ids {
        let candidate: Candidate = resolver
            .index()
            .resolve_as(candidate_id.as_str(), tags::CANDIDATE)?;
        let name = candidate.ballot_name.clone().ok_or_else(|| {
            DocumentError::missing(format!("Candidate '{}'", candidate_id), "BallotName")
        })?;
        names.push(name);
        if let Some(party) = candidate_party(resolver, &candidate)? {
            candidate_parties.push(party);
        }
    }

    let subtext = if !record.endorsement_party_ids.is_empty() {
        let endorsed = record
            .endorsement_party_ids
            .iter()
            .map(|id| party_name(resolver, id))
            .collect::<Result<Vec<_>, _>>()?;
        Some(endorsed.join(", "))
    } else if !candidate_parties.is_empty() {
        Some(candidate_parties.join(", "))
    } else {
        None
    };

    Ok(Drawable::Selection(std::sync::Arc::new(Selection::Candidate(
        CandidateSelectionView {
            id: record.id,
            names,
            subtext,
            is_write_in: record.is_write_in,
        },
    ))))
}

pub(crate) fn build_measure_selection(
    _resolver: &mut Resolver,
    raw: &Value,
) -> Result<Drawable, LayoutError> {
    let record: BallotMeasureSelection = parse_record(raw)?;
    Ok(Drawable::Selection(std::sync::Arc::new(Selection::Measure(
        MeasureSelectionView {
            id: record.id,
            label: record.selection,
        },
    ))))
}
