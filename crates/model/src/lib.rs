//! Election data model.
//!
//! Records mirror the NIST SP 1500-100 v2 JSON encoding. Objects are looked up through
//! [`ElectionIndex`], which is built once per report and keyed by `@id`.

pub mod error;
pub mod index;
pub mod records;
pub mod tags;

pub use error::DocumentError;
pub use index::{ElectionIndex, parse_record, type_tag};
pub use records::{
    BallotMeasureContest, BallotMeasureSelection, BallotStyleRecord, Candidate, CandidateContest,
    CandidateSelection, Election, ElectionReport, ElectionType, ExternalIdentifier, GpUnit, Header,
    Office, OrderedContestRecord, OrderedHeaderRecord, Party, Person, VoteVariation,
};
