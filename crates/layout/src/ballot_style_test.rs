use crate::LayoutError;
use crate::ballot_style::BallotStyle;
use crate::registry::Resolver;
use crate::test_utils::{
    env_with, init_logger, ordered, ordered_header, plain_settings, report_with, resolver_for,
};
use crate::{LayoutSettings, LayoutWarning};
use ballotpress_model::{DocumentError, ElectionReport};
use ballotpress_render_core::{DrawOp, DrawingSurface, Paint, RecordingSurface};
use ballotpress_traits::BuiltinFontMetrics;
use serde_json::{Value, json};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const STAMP: &str = "generated 2026-10-19 12:00:00 UTC";

fn build(report: &Value) -> Result<(Resolver, BallotStyle), LayoutError> {
    let mut resolver = resolver_for(report);
    let parsed: ElectionReport = serde_json::from_value(report.clone()).expect("report parses");
    let election = &parsed.election[0];
    let style = BallotStyle::build(&mut resolver, election, &election.ballot_style[0])?;
    Ok((resolver, style))
}

fn names(n: usize) -> Vec<&'static str> {
    const POOL: [&str; 8] = ["Ada", "Ben", "Cy", "Dee", "Eve", "Flo", "Gus", "Hal"];
    (0..n).map(|i| POOL[i % POOL.len()]).collect()
}

/// Contests of `rows` candidates, one ordered entry each.
fn tall_report(count: usize, rows: usize) -> Value {
    let ids: Vec<String> = (0..count).map(|i| format!("c{}", i)).collect();
    let contests: Vec<(&str, Vec<&str>)> = ids.iter().map(|id| (id.as_str(), names(rows))).collect();
    let content = ids.iter().map(|id| ordered(id)).collect();
    report_with(&contests, content)
}

#[test]
fn test_default_header_template() -> TestResult {
    let (_, style) = build(&report_with(&[("c1", vec!["A"])], vec![ordered("c1")]))?;
    assert_eq!(
        style.header_template(),
        "Ballot for General Election\nSpringfield\n2026-11-03 - page {PAGE} of {PAGES}"
    );
    assert!(style.page_header_text(2, Some(5)).ends_with("page 2 of 5"));
    assert!(style.page_header_text(1, None).ends_with("page 1 of X"));
    assert_eq!(style.name(), "Springfield");
    Ok(())
}

#[test]
fn test_page_header_extension_overrides_template() -> TestResult {
    let mut report = report_with(&[("c1", vec!["A"])], vec![ordered("c1")]);
    report["Election"][0]["BallotStyle"][0]["PageHeader"] = json!("Sample {PAGE}/{PAGES}");
    let (_, style) = build(&report)?;
    assert_eq!(style.page_header_text(1, Some(1)), "Sample 1/1");
    Ok(())
}

#[test]
fn test_selectors_match_external_ids_and_image_uris() -> TestResult {
    let mut report = report_with(&[("c1", vec!["A"])], vec![ordered("c1")]);
    report["Election"][0]["BallotStyle"][0]["ImageUri"] = json!(["https://example.org/bs1.png"]);
    let (_, style) = build(&report)?;
    assert!(style.matches_any(&["bs-1"]));
    assert!(style.matches_any(&["nope", "https://example.org/bs1.png"]));
    assert!(!style.matches_any(&["nope"]));
    assert!(!style.matches_any::<&str>(&[]));
    Ok(())
}

#[test]
fn test_one_tall_contest_per_column() -> TestResult {
    init_logger();
    let settings = plain_settings();
    let metrics = BuiltinFontMetrics::new();
    let env = env_with(&settings, &metrics);

    // 25 rows: taller than half a column, so each contest takes a column.
    for (count, pages) in [(1, 1), (2, 1), (3, 2), (4, 2), (5, 3)] {
        let (_, style) = build(&tall_report(count, 25))?;
        assert_eq!(style.paginate(&env, (612.0, 792.0), STAMP)?, pages, "{} contests", count);
    }
    Ok(())
}

#[test]
fn test_render_prints_total_and_matches_pass_one() -> TestResult {
    let settings = plain_settings();
    let metrics = BuiltinFontMetrics::new();
    let env = env_with(&settings, &metrics);
    let (_, style) = build(&tall_report(5, 25))?;

    let mut surface = RecordingSurface::new(612.0, 792.0);
    let layout = style.render(&env, &mut surface, STAMP)?;
    assert_eq!(layout.pages, 3);
    assert!(layout.warnings.is_empty());
    assert_eq!(layout.bubbles.len(), 5);

    let recording = surface.finish()?;
    assert_eq!(recording.page_count(), 3);
    assert_eq!(
        &recording.text_lines(0)[..3],
        &["Ballot for General Election", "Springfield", "2026-11-03 - page 1 of 3"]
    );
    assert_eq!(recording.text_lines(2)[2], "2026-11-03 - page 3 of 3");
    assert_eq!(
        recording.title.as_deref(),
        Some("ballot Springfield generated 2026-10-19 12:00:00 UTC")
    );
    Ok(())
}

#[test]
fn test_render_is_deterministic() -> TestResult {
    let settings = plain_settings();
    let metrics = BuiltinFontMetrics::new();
    let env = env_with(&settings, &metrics);
    let (_, style) = build(&tall_report(7, 9))?;

    let mut first = RecordingSurface::new(612.0, 792.0);
    let mut second = RecordingSurface::new(612.0, 792.0);
    let a = style.render(&env, &mut first, STAMP)?;
    let b = style.render(&env, &mut second, STAMP)?;
    assert_eq!(a, b);
    assert_eq!(first.finish()?, second.finish()?);
    Ok(())
}

#[test]
fn test_column_break_moves_to_next_column() -> TestResult {
    let settings = plain_settings();
    let metrics = BuiltinFontMetrics::new();
    let env = env_with(&settings, &metrics);
    let report = report_with(
        &[("c1", vec!["A"]), ("c2", vec!["B"])],
        vec![ordered_header("hcol"), ordered("c1"), ordered_header("hcol"), ordered("c2")],
    );
    let (_, style) = build(&report)?;

    let mut surface = RecordingSurface::new(612.0, 792.0);
    let layout = style.render(&env, &mut surface, STAMP)?;
    assert_eq!(layout.pages, 1);
    let first = layout.bubbles["c1"]["c1-s0"];
    let second = layout.bubbles["c2"]["c2-s0"];
    assert!((first.x - (36.0 + 8.2)).abs() < 1e-3);
    assert!((second.x - (36.0 + 266.4 + 7.2 + 8.2)).abs() < 1e-3);
    assert!((first.y - second.y).abs() < 1e-3);
    Ok(())
}

#[test]
fn test_page_break_skips_empty_page() -> TestResult {
    let settings = plain_settings();
    let metrics = BuiltinFontMetrics::new();
    let env = env_with(&settings, &metrics);
    let report = report_with(
        &[("c1", vec!["A"]), ("c2", vec!["B"])],
        vec![
            ordered_header("hpage"),
            ordered("c1"),
            ordered_header("hpage"),
            ordered_header("hpage"),
            ordered("c2"),
        ],
    );
    let (_, style) = build(&report)?;
    assert_eq!(style.paginate(&env, (612.0, 792.0), STAMP)?, 2);
    Ok(())
}

#[test]
fn test_instructions_header_takes_space() -> TestResult {
    let settings = plain_settings();
    let metrics = BuiltinFontMetrics::new();
    let env = env_with(&settings, &metrics);
    let with_header = report_with(&[("c1", vec!["A"])], vec![ordered_header("hins"), ordered("c1")]);
    let without = report_with(&[("c1", vec!["A"])], vec![ordered("c1")]);
    let (_, a) = build(&with_header)?;
    let (_, b) = build(&without)?;

    let mut sa = RecordingSurface::new(612.0, 792.0);
    let mut sb = RecordingSurface::new(612.0, 792.0);
    let la = a.render(&env, &mut sa, STAMP)?;
    let lb = b.render(&env, &mut sb, STAMP)?;
    let header_height = a.content[0].height(&env, 266.4)?;
    let drop = lb.bubbles["c1"]["c1-s0"].y - la.bubbles["c1"]["c1-s0"].y;
    assert!((drop - (header_height - 1.0)).abs() < 1e-3);
    assert!(sa.finish()?.text_lines(0).contains(&"Instructions"));
    Ok(())
}

#[test]
fn test_oversized_contest_overflows_with_warning() -> TestResult {
    let settings = plain_settings();
    let metrics = BuiltinFontMetrics::new();
    let env = env_with(&settings, &metrics);
    let (_, style) = build(&tall_report(2, 40))?;

    let mut surface = RecordingSurface::new(612.0, 792.0);
    let layout = style.render(&env, &mut surface, STAMP)?;
    assert_eq!(layout.pages, 1);
    assert_eq!(layout.bubbles.len(), 2);
    assert_eq!(layout.warnings.len(), 2);
    match &layout.warnings[1] {
        LayoutWarning::Overflow { item, column, page, height, available } => {
            assert_eq!(item, "c1");
            assert_eq!((*page, *column), (1, 2));
            assert!(height > available);
        }
    }
    Ok(())
}

#[test]
fn test_repeated_contest_is_rejected() {
    let report = report_with(&[("c1", vec!["A"])], vec![ordered("c1"), ordered("c1")]);
    assert!(matches!(
        build(&report),
        Err(LayoutError::Document(DocumentError::RepeatedContest { .. }))
    ));
}

#[test]
fn test_selection_in_content_is_a_kind_mismatch() {
    let report = report_with(&[("c1", vec!["A"])], vec![json!("c1-s0")]);
    assert!(matches!(
        build(&report),
        Err(LayoutError::KindMismatch { expected: "contest or header", .. })
    ));
}

#[test]
fn test_unnamed_reporting_unit_is_an_error() {
    let mut report = report_with(&[("c1", vec!["A"])], vec![ordered("c1")]);
    report["GpUnit"][0].as_object_mut().unwrap().remove("Name");
    assert!(matches!(
        build(&report),
        Err(LayoutError::Document(DocumentError::MissingField { .. }))
    ));
}

#[test]
fn test_furniture_on_every_page() -> TestResult {
    let settings = LayoutSettings::default();
    let metrics = BuiltinFontMetrics::new();
    let env = env_with(&settings, &metrics);
    let (_, style) = build(&tall_report(3, 25))?;

    let mut surface = RecordingSurface::new(612.0, 792.0);
    let layout = style.render(&env, &mut surface, STAMP)?;
    let recording = surface.finish()?;
    assert_eq!(recording.page_count(), layout.pages);
    for page in 0..recording.page_count() {
        assert!(recording.text_lines(page).contains(&STAMP));
        let outlines = recording.pages[page]
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { paint: Paint::Stroke, .. }))
            .count();
        assert_eq!(outlines, 1);
    }
    Ok(())
}

#[test]
fn test_timestamp_raises_content_bottom() -> TestResult {
    let metrics = BuiltinFontMetrics::new();
    let stamped = LayoutSettings {
        show_debug_outline: false,
        ..LayoutSettings::default()
    };
    let plain = plain_settings();
    // 30 rows (658pt) fit the plain band (667.2pt) but not the stamped one (655.2pt).
    let (_, style) = build(&tall_report(1, 30))?;
    let mut a = RecordingSurface::new(612.0, 792.0);
    let mut b = RecordingSurface::new(612.0, 792.0);
    let with_stamp = style.render(&env_with(&stamped, &metrics), &mut a, STAMP)?;
    let without = style.render(&env_with(&plain, &metrics), &mut b, STAMP)?;
    assert_eq!(with_stamp.warnings.len(), 1);
    assert!(without.warnings.is_empty());
    Ok(())
}
