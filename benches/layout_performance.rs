//! Ballot layout benchmarks
//!
//! Measures the two-pass render of a single ballot style as the contest count grows,
//! on both the recording surface and the PDF surface.

use ballotpress::{LayoutSettings, PrinterBuilder, RecordingSurface};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;

/// One style for one reporting unit with `contests` contests of `rows` candidates.
fn report(contests: usize, rows: usize) -> Value {
    let mut candidates = Vec::new();
    let mut records = Vec::new();
    let mut content = Vec::new();
    for c in 0..contests {
        let contest_id = format!("contest-{}", c);
        let mut selections = Vec::new();
        for r in 0..rows {
            let candidate_id = format!("{}-cand-{}", contest_id, r);
            candidates.push(json!({
                "@type": "ElectionResults.Candidate",
                "@id": candidate_id,
                "BallotName": format!("Candidate {} {}", c, r),
                "PartyId": "p1"
            }));
            selections.push(json!({
                "@type": "ElectionResults.CandidateSelection",
                "@id": format!("{}-sel-{}", contest_id, r),
                "CandidateIds": [candidate_id]
            }));
        }
        records.push(json!({
            "@type": "ElectionResults.CandidateContest",
            "@id": contest_id,
            "Name": format!("Office {}", c),
            "ElectionDistrictId": "ru1",
            "VotesAllowed": 1,
            "VoteVariation": "plurality",
            "ContestSelection": selections
        }));
        content.push(json!({"@type": "ElectionResults.OrderedContest", "ContestId": contest_id}));
    }
    json!({
        "Party": [{"@type": "ElectionResults.Party", "@id": "p1", "Name": "Blue Party"}],
        "GpUnit": [{"@type": "ElectionResults.ReportingUnit", "@id": "ru1", "Name": "Springfield"}],
        "Election": [{
            "Name": "Benchmark Election",
            "Type": "general",
            "StartDate": "2026-11-03",
            "EndDate": "2026-11-03",
            "Candidate": candidates,
            "Contest": records,
            "BallotStyle": [{"GpUnitIds": ["ru1"], "OrderedContent": content}]
        }]
    })
}

fn benchmark_recording_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_recording");
    let builder = PrinterBuilder::new();
    let (width, height) = LayoutSettings::default().page_dimensions();

    for contest_count in [5, 25, 100] {
        let data = report(contest_count, 6);
        group.bench_with_input(
            BenchmarkId::new("contests", contest_count),
            &contest_count,
            |b, _| {
                b.iter(|| {
                    let mut printer = builder.build(&data).expect("Failed to build printer");
                    let mut surface = RecordingSurface::new(width, height);
                    printer
                        .render_with_surface(&mut surface, |_| true)
                        .expect("Failed to render");
                    black_box(surface)
                });
            },
        );
    }

    group.finish();
}

fn benchmark_pdf_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pdf");
    let builder = PrinterBuilder::new();

    for contest_count in [5, 25, 100] {
        let data = report(contest_count, 6);
        group.bench_with_input(
            BenchmarkId::new("contests", contest_count),
            &contest_count,
            |b, _| {
                b.iter(|| {
                    let mut printer = builder.build(&data).expect("Failed to build printer");
                    let mut bytes = Vec::new();
                    printer.render(&mut bytes).expect("Failed to render PDF");
                    black_box(bytes)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_recording_render, benchmark_pdf_render);
criterion_main!(benches);
