//! Typed views of the raw JSON records.
//!
//! Only the fields that printing consumes are modeled; unknown fields are ignored.
//! Nested polymorphic content (contest selections, ordered content) stays as raw
//! `serde_json::Value` so the layout registry can dispatch on its `@type`.

use std::fmt;
use std::str::FromStr;

use ballotpress_types::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DocumentError;

/// An external identifier. Accepts both a bare string and the structured
/// `{"Type": .., "Value": ..}` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalIdentifier {
    Plain(String),
    Typed {
        #[serde(rename = "Value")]
        value: String,
        #[serde(rename = "Type", default)]
        kind: Option<String>,
    },
}

impl ExternalIdentifier {
    pub fn value(&self) -> &str {
        match self {
            ExternalIdentifier::Plain(v) => v,
            ExternalIdentifier::Typed { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Party {
    #[serde(rename = "@id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    #[serde(rename = "@id")]
    pub id: ObjectId,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub party_id: Option<ObjectId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Office {
    #[serde(rename = "@id")]
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Candidate {
    #[serde(rename = "@id")]
    pub id: ObjectId,
    #[serde(default)]
    pub ballot_name: Option<String>,
    #[serde(default)]
    pub person_id: Option<ObjectId>,
    #[serde(default)]
    pub party_id: Option<ObjectId>,
}

/// A geopolitical unit: a reporting unit or reporting device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GpUnit {
    #[serde(rename = "@id")]
    pub id: ObjectId,
    #[serde(rename = "@type")]
    pub type_tag: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub external_identifier: Vec<ExternalIdentifier>,
}

impl GpUnit {
    /// Display name: `Name`, else the external identifiers joined with commas.
    pub fn display_name(&self) -> Result<String, DocumentError> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }
        if !self.external_identifier.is_empty() {
            let parts: Vec<&str> = self
                .external_identifier
                .iter()
                .map(ExternalIdentifier::value)
                .collect();
            return Ok(parts.join(","));
        }
        Err(DocumentError::missing(
            format!("{} '{}'", self.type_tag, self.id),
            "Name",
        ))
    }
}

/// A named break marker in a ballot style's content stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Header {
    #[serde(rename = "@id")]
    pub id: ObjectId,
    pub name: String,
    /// Extension: instruction body, one line per `\n`.
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CandidateSelection {
    #[serde(rename = "@id")]
    pub id: ObjectId,
    #[serde(default)]
    pub candidate_ids: Vec<ObjectId>,
    #[serde(default)]
    pub endorsement_party_ids: Vec<ObjectId>,
    #[serde(default)]
    pub is_write_in: bool,
    #[serde(default)]
    pub sequence_order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BallotMeasureSelection {
    #[serde(rename = "@id")]
    pub id: ObjectId,
    pub selection: String,
    #[serde(default)]
    pub sequence_order: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoteVariation {
    Approval,
    Borda,
    Cumulative,
    Majority,
    NOfM,
    Plurality,
    Proportional,
    Range,
    Rcv,
    SuperMajority,
    Other,
}

impl VoteVariation {
    /// Voter instruction used when a contest has no explicit subtitle.
    pub fn instruction(&self, votes_allowed: Option<u32>) -> Option<String> {
        match self {
            VoteVariation::Approval => Some("Vote for as many as you like".to_string()),
            VoteVariation::Plurality => Some("Vote for one".to_string()),
            VoteVariation::NOfM => {
                votes_allowed.map(|n| format!("Vote for up to {}", n))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CandidateContest {
    #[serde(rename = "@id")]
    pub id: ObjectId,
    pub name: String,
    pub election_district_id: ObjectId,
    pub votes_allowed: u32,
    #[serde(default)]
    pub ballot_title: Option<String>,
    #[serde(default)]
    pub ballot_sub_title: Option<String>,
    #[serde(default)]
    pub vote_variation: Option<VoteVariation>,
    #[serde(default)]
    pub number_elected: Option<u32>,
    #[serde(default)]
    pub office_ids: Vec<ObjectId>,
    #[serde(default)]
    pub primary_party_ids: Vec<ObjectId>,
    #[serde(default)]
    pub contest_selection: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BallotMeasureContest {
    #[serde(rename = "@id")]
    pub id: ObjectId,
    pub name: String,
    pub election_district_id: ObjectId,
    #[serde(default)]
    pub ballot_title: Option<String>,
    #[serde(default)]
    pub ballot_sub_title: Option<String>,
    #[serde(default)]
    pub vote_variation: Option<VoteVariation>,
    #[serde(default)]
    pub votes_allowed: Option<u32>,
    #[serde(default)]
    pub con_statement: Option<String>,
    #[serde(default)]
    pub pro_statement: Option<String>,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub summary_text: Option<String>,
    #[serde(default, rename = "Type")]
    pub measure_type: Option<String>,
    #[serde(default)]
    pub contest_selection: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderedContestRecord {
    pub contest_id: ObjectId,
    #[serde(default)]
    pub ordered_contest_selection_ids: Vec<ObjectId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderedHeaderRecord {
    pub header_id: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BallotStyleRecord {
    #[serde(rename = "@id", default)]
    pub id: Option<ObjectId>,
    #[serde(alias = "ReportingUnitIds")]
    pub gp_unit_ids: Vec<ObjectId>,
    #[serde(default)]
    pub external_identifier: Vec<ExternalIdentifier>,
    #[serde(default)]
    pub image_uri: Vec<String>,
    #[serde(default)]
    pub ordered_content: Vec<Value>,
    #[serde(default)]
    pub party_ids: Vec<ObjectId>,
    /// Extension: page header template with `{PAGE}` and `{PAGES}` placeholders.
    #[serde(default)]
    pub page_header: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectionType {
    General,
    PartisanPrimaryClosed,
    PartisanPrimaryOpen,
    Primary,
    Runoff,
    Special,
    Other,
}

impl ElectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElectionType::General => "general",
            ElectionType::PartisanPrimaryClosed => "partisan-primary-closed",
            ElectionType::PartisanPrimaryOpen => "partisan-primary-open",
            ElectionType::Primary => "primary",
            ElectionType::Runoff => "runoff",
            ElectionType::Special => "special",
            ElectionType::Other => "other",
        }
    }

    /// English title for page headers. `other` uses the election's `OtherType`.
    pub fn title(&self, other_type: Option<&str>) -> Result<String, DocumentError> {
        let title = match self {
            ElectionType::General => "General Election",
            ElectionType::PartisanPrimaryClosed
            | ElectionType::PartisanPrimaryOpen
            | ElectionType::Primary => "Primary Election",
            ElectionType::Runoff => "Runoff Election",
            ElectionType::Special => "Special Election",
            ElectionType::Other => {
                return other_type
                    .map(str::to_string)
                    .ok_or_else(|| DocumentError::missing("Election of type 'other'", "OtherType"));
            }
        };
        Ok(title.to_string())
    }
}

impl FromStr for ElectionType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(ElectionType::General),
            "partisan-primary-closed" => Ok(ElectionType::PartisanPrimaryClosed),
            "partisan-primary-open" => Ok(ElectionType::PartisanPrimaryOpen),
            "primary" => Ok(ElectionType::Primary),
            "runoff" => Ok(ElectionType::Runoff),
            "special" => Ok(ElectionType::Special),
            "other" => Ok(ElectionType::Other),
            unknown => Err(DocumentError::UnknownElectionType(unknown.to_string())),
        }
    }
}

impl fmt::Display for ElectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Election {
    pub name: String,
    #[serde(rename = "Type")]
    pub election_type: String,
    #[serde(default)]
    pub other_type: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub election_scope_id: Option<ObjectId>,
    #[serde(default)]
    pub ballot_style: Vec<BallotStyleRecord>,
}

impl Election {
    pub fn kind(&self) -> Result<ElectionType, DocumentError> {
        self.election_type.parse()
    }

    pub fn type_title(&self) -> Result<String, DocumentError> {
        self.kind()?.title(self.other_type.as_deref())
    }

    /// `StartDate`, or `StartDate - EndDate` for multi-day elections.
    pub fn date_part(&self) -> String {
        if self.start_date == self.end_date {
            self.start_date.clone()
        } else {
            format!("{} - {}", self.start_date, self.end_date)
        }
    }
}

/// The report envelope. Only the election list is typed; flat record arrays are
/// reached through the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ElectionReport {
    #[serde(default)]
    pub election: Vec<Election>,
    #[serde(default)]
    pub external_identifier: Vec<ExternalIdentifier>,
    #[serde(default)]
    pub issuer: Option<String>,
}
