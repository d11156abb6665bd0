use ballotpress_model::tags;

use crate::registry::Constructor;
use crate::{contest, header, selection};

/// Represents the specific type of a drawable election object.
///
/// Each kind maps one-to-one to a `@type` tag and to the constructor that builds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawableKind {
    CandidateSelection,
    BallotMeasureSelection,
    CandidateContest,
    BallotMeasureContest,
    OrderedContest,
    OrderedHeader,
    Header,
}

impl DrawableKind {
    pub const ALL: [DrawableKind; 7] = [
        DrawableKind::CandidateSelection,
        DrawableKind::BallotMeasureSelection,
        DrawableKind::CandidateContest,
        DrawableKind::BallotMeasureContest,
        DrawableKind::OrderedContest,
        DrawableKind::OrderedHeader,
        DrawableKind::Header,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// The `@type` tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawableKind::CandidateSelection => tags::CANDIDATE_SELECTION,
            DrawableKind::BallotMeasureSelection => tags::BALLOT_MEASURE_SELECTION,
            DrawableKind::CandidateContest => tags::CANDIDATE_CONTEST,
            DrawableKind::BallotMeasureContest => tags::BALLOT_MEASURE_CONTEST,
            DrawableKind::OrderedContest => tags::ORDERED_CONTEST,
            DrawableKind::OrderedHeader => tags::ORDERED_HEADER,
            DrawableKind::Header => tags::HEADER,
        }
    }

    pub fn constructor(&self) -> Constructor {
        match self {
            DrawableKind::CandidateSelection => selection::build_candidate_selection,
            DrawableKind::BallotMeasureSelection => selection::build_measure_selection,
            DrawableKind::CandidateContest => contest::build_candidate_contest,
            DrawableKind::BallotMeasureContest => contest::build_measure_contest,
            DrawableKind::OrderedContest => contest::build_ordered_contest,
            DrawableKind::OrderedHeader => header::build_ordered_header,
            DrawableKind::Header => header::build_header,
        }
    }
}
