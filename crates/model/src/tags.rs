//! `@type` tags used by the JSON encoding.

pub const ELECTION_REPORT: &str = "ElectionReport";
pub const ELECTION: &str = "ElectionResults.Election";
pub const BALLOT_STYLE: &str = "ElectionResults.BallotStyle";
pub const BALLOT_MEASURE_CONTEST: &str = "ElectionResults.BallotMeasureContest";
pub const BALLOT_MEASURE_SELECTION: &str = "ElectionResults.BallotMeasureSelection";
pub const CANDIDATE: &str = "ElectionResults.Candidate";
pub const CANDIDATE_CONTEST: &str = "ElectionResults.CandidateContest";
pub const CANDIDATE_SELECTION: &str = "ElectionResults.CandidateSelection";
pub const HEADER: &str = "ElectionResults.Header";
pub const OFFICE: &str = "ElectionResults.Office";
pub const ORDERED_CONTEST: &str = "ElectionResults.OrderedContest";
pub const ORDERED_HEADER: &str = "ElectionResults.OrderedHeader";
pub const PARTY: &str = "ElectionResults.Party";
pub const PERSON: &str = "ElectionResults.Person";
pub const REPORTING_UNIT: &str = "ElectionResults.ReportingUnit";
pub const REPORTING_DEVICE: &str = "ElectionResults.ReportingDevice";
