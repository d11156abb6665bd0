use serde_json::{Value, json};

/// A reporting unit record.
pub fn reporting_unit(id: &str, name: &str) -> Value {
    json!({"@type": "ElectionResults.ReportingUnit", "@id": id, "Name": name})
}

pub fn party(id: &str, name: &str) -> Value {
    json!({"@type": "ElectionResults.Party", "@id": id, "Name": name})
}

/// A candidate contest in district `district` with one candidate per name.
/// Candidate ids are `{id}-c{n}`, selection ids `{id}-s{n}`.
/// Returns the contest and its candidate records.
pub fn candidate_contest(id: &str, district: &str, names: &[&str]) -> (Value, Vec<Value>) {
    let mut candidates = Vec::new();
    let mut selections = Vec::new();
    for (n, name) in names.iter().enumerate() {
        let candidate_id = format!("{}-c{}", id, n);
        candidates.push(json!({
            "@type": "ElectionResults.Candidate",
            "@id": candidate_id,
            "BallotName": name
        }));
        selections.push(json!({
            "@type": "ElectionResults.CandidateSelection",
            "@id": format!("{}-s{}", id, n),
            "CandidateIds": [candidate_id]
        }));
    }
    let contest = json!({
        "@type": "ElectionResults.CandidateContest",
        "@id": id,
        "Name": format!("Contest {}", id),
        "ElectionDistrictId": district,
        "VotesAllowed": 1,
        "VoteVariation": "plurality",
        "ContestSelection": selections
    });
    (contest, candidates)
}

/// A yes/no ballot measure in district `district`.
pub fn measure_contest(id: &str, district: &str) -> Value {
    json!({
        "@type": "ElectionResults.BallotMeasureContest",
        "@id": id,
        "Name": format!("Measure {}", id),
        "ElectionDistrictId": district,
        "SummaryText": "Shall the city issue bonds?",
        "ContestSelection": [
            {"@type": "ElectionResults.BallotMeasureSelection", "@id": format!("{}-yes", id), "Selection": "Yes"},
            {"@type": "ElectionResults.BallotMeasureSelection", "@id": format!("{}-no", id), "Selection": "No"}
        ]
    })
}

pub fn ordered(contest_id: &str) -> Value {
    json!({"@type": "ElectionResults.OrderedContest", "ContestId": contest_id})
}

pub fn ordered_subset(contest_id: &str, selection_ids: &[&str]) -> Value {
    json!({
        "@type": "ElectionResults.OrderedContest",
        "ContestId": contest_id,
        "OrderedContestSelectionIds": selection_ids
    })
}

pub fn ordered_header(header_id: &str) -> Value {
    json!({"@type": "ElectionResults.OrderedHeader", "HeaderId": header_id})
}

/// A ballot style for `units` identified externally by `external_id`.
pub fn ballot_style(units: &[&str], external_id: &str, content: Vec<Value>) -> Value {
    json!({
        "@type": "ElectionResults.BallotStyle",
        "GpUnitIds": units,
        "ExternalIdentifier": [external_id],
        "OrderedContent": content
    })
}

/// A complete report: reporting units `ru1` (North Ward) and `ru2` (South Ward),
/// party `p1`, break and instruction headers, then one general election holding
/// `contests`, their candidates and `styles`.
pub fn election_report(contests: Vec<(Value, Vec<Value>)>, styles: Vec<Value>) -> Value {
    let mut contest_records = Vec::new();
    let mut candidates = Vec::new();
    for (contest, contest_candidates) in contests {
        contest_records.push(contest);
        candidates.extend(contest_candidates);
    }
    json!({
        "@type": "ElectionReport",
        "Format": "precinct-level",
        "GeneratedDate": "2026-10-01T00:00:00Z",
        "Issuer": "City Clerk",
        "Party": [party("p1", "Blue Party")],
        "GpUnit": [
            reporting_unit("ru1", "North Ward"),
            reporting_unit("ru2", "South Ward")
        ],
        "Header": [
            {"@type": "ElectionResults.Header", "@id": "hcol", "Name": "ColumnBreak"},
            {"@type": "ElectionResults.Header", "@id": "hpage", "Name": "PageBreak"},
            {"@type": "ElectionResults.Header", "@id": "hins", "Name": "Instructions"}
        ],
        "Election": [{
            "@type": "ElectionResults.Election",
            "Name": "City Election",
            "Type": "general",
            "StartDate": "2026-11-03",
            "EndDate": "2026-11-03",
            "Candidate": candidates,
            "Contest": contest_records,
            "BallotStyle": styles
        }]
    })
}

/// `count` contests of `rows` candidates each, all in one style for `ru1`.
pub fn tall_report(count: usize, rows: usize) -> Value {
    let names: Vec<String> = (0..rows).map(|n| format!("Candidate {}", n)).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let ids: Vec<String> = (0..count).map(|i| format!("k{}", i)).collect();
    let contests = ids
        .iter()
        .map(|id| candidate_contest(id, "ru1", &names))
        .collect();
    let content = ids.iter().map(|id| ordered(id)).collect();
    election_report(contests, vec![ballot_style(&["ru1"], "bs-tall", content)])
}
