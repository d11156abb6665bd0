use crate::LayoutSettings;
use crate::interface::LayoutEnvironment;
use crate::registry::Resolver;
use crate::selection::{CandidateSelectionView, MeasureSelectionView, Selection};
use ballotpress_model::ElectionIndex;
use ballotpress_traits::FontMetrics;
use ballotpress_types::ObjectId;
use serde_json::{Value, json};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn env_with<'a>(settings: &'a LayoutSettings, metrics: &'a dyn FontMetrics) -> LayoutEnvironment<'a> {
    LayoutEnvironment::new(settings, metrics)
}

/// Settings without page furniture, so only the header reduces the content band.
pub fn plain_settings() -> LayoutSettings {
    LayoutSettings {
        show_debug_outline: false,
        show_generated_timestamp: false,
        ..LayoutSettings::default()
    }
}

pub fn candidate(id: &str, names: &[&str], subtext: Option<&str>, write_in: bool) -> Selection {
    Selection::Candidate(CandidateSelectionView {
        id: ObjectId::from(id),
        names: names.iter().map(|n| n.to_string()).collect(),
        subtext: subtext.map(str::to_string),
        is_write_in: write_in,
    })
}

pub fn measure(id: &str, label: &str) -> Selection {
    Selection::Measure(MeasureSelectionView {
        id: ObjectId::from(id),
        label: label.to_string(),
    })
}

pub fn resolver_for(report: &Value) -> Resolver {
    Resolver::new(ElectionIndex::build(report).unwrap())
}

/// A candidate contest `id` in district `ru1` with one candidate per name.
/// Selection ids are `{id}-s{n}`, candidate ids `{id}-c{n}`.
pub fn candidate_contest(id: &str, names: &[&str]) -> (Value, Vec<Value>) {
    let mut candidates = Vec::new();
    let mut selections = Vec::new();
    for (n, name) in names.iter().enumerate() {
        let cid = format!("{}-c{}", id, n);
        candidates.push(json!({
            "@type": "ElectionResults.Candidate",
            "@id": cid,
            "BallotName": name
        }));
        selections.push(json!({
            "@type": "ElectionResults.CandidateSelection",
            "@id": format!("{}-s{}", id, n),
            "CandidateIds": [cid]
        }));
    }
    let contest = json!({
        "@type": "ElectionResults.CandidateContest",
        "@id": id,
        "Name": format!("Contest {}", id),
        "ElectionDistrictId": "ru1",
        "VotesAllowed": 1,
        "VoteVariation": "plurality",
        "ContestSelection": selections
    });
    (contest, candidates)
}

/// A report with one election and one ballot style showing `contests` in order.
pub fn report_with(contests: &[(&str, Vec<&str>)], content: Vec<Value>) -> Value {
    let mut all_contests = Vec::new();
    let mut all_candidates = Vec::new();
    for (id, names) in contests {
        let (contest, candidates) = candidate_contest(id, names);
        all_contests.push(contest);
        all_candidates.extend(candidates);
    }
    json!({
        "@type": "ElectionReport",
        "Party": [
            {"@type": "ElectionResults.Party", "@id": "p1", "Name": "Blue Party"}
        ],
        "GpUnit": [
            {"@type": "ElectionResults.ReportingUnit", "@id": "ru1", "Name": "Springfield"}
        ],
        "Header": [
            {"@type": "ElectionResults.Header", "@id": "hcol", "Name": "ColumnBreak"},
            {"@type": "ElectionResults.Header", "@id": "hpage", "Name": "PageBreak"},
            {"@type": "ElectionResults.Header", "@id": "hins", "Name": "Instructions"}
        ],
        "Election": [{
            "@type": "ElectionResults.Election",
            "Name": "Test Election",
            "Type": "general",
            "StartDate": "2026-11-03",
            "EndDate": "2026-11-03",
            "Candidate": all_candidates,
            "Contest": all_contests,
            "BallotStyle": [{
                "@type": "ElectionResults.BallotStyle",
                "GpUnitIds": ["ru1"],
                "ExternalIdentifier": ["bs-1"],
                "OrderedContent": content
            }]
        }]
    })
}

pub fn ordered(contest_id: &str) -> Value {
    json!({"@type": "ElectionResults.OrderedContest", "ContestId": contest_id})
}

pub fn ordered_header(header_id: &str) -> Value {
    json!({"@type": "ElectionResults.OrderedHeader", "HeaderId": header_id})
}
