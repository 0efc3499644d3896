//! Golden tests over realistic response bodies stored in `tests/fixtures`.

use respdiff::reports::{create_reporter, ReportFormat, ReportMetadata};
use respdiff::{compare, DiffFragment, Response, Strategy};
use std::path::{Path, PathBuf};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn fixture_response(name: &str) -> respdiff::FetchOutcome {
    let body = std::fs::read(fixture_path(name)).expect("fixture should exist");
    Ok(Response::from_bytes(200, "200 OK", body))
}

#[test]
fn test_status_documents_json_diff() {
    let result = compare(
        fixture_response("json/status_a.json"),
        fixture_response("json/status_b.json"),
        None,
    )
    .unwrap();

    assert_eq!(result.strategy, Strategy::Json);
    assert_eq!(
        result.fragments,
        vec![
            DiffFragment::deletion(r#"  "version": "1.4.2","#),
            DiffFragment::insertion(r#"  "version": "1.5.0","#),
            DiffFragment::insertion(r#"    "ap-south-1""#),
            DiffFragment::insertion(r#"  "canary": false"#),
        ]
    );
}

#[test]
fn test_status_documents_swapped() {
    let result = compare(
        fixture_response("json/status_b.json"),
        fixture_response("json/status_a.json"),
        None,
    )
    .unwrap();

    assert_eq!(result.deletions(), 3);
    assert_eq!(result.insertions(), 1);
    assert!(result
        .fragments
        .contains(&DiffFragment::deletion(r#"  "canary": false"#)));
}

#[test]
fn test_store_pages_html_diff() {
    let selectors: Vec<String> = ["title", "h1", "p.price", "footer"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let result = compare(
        fixture_response("html/page_a.html"),
        fixture_response("html/page_b.html"),
        Some(selectors.as_slice()),
    )
    .unwrap();

    assert_eq!(result.strategy, Strategy::Html);
    assert_eq!(
        result.fragments,
        vec![
            DiffFragment::deletion("0"),
            DiffFragment::insertion("2"),
            DiffFragment::deletion("1"),
            DiffFragment::insertion("2"),
        ]
    );
}

#[test]
fn test_fixture_json_report() {
    let result = compare(
        fixture_response("json/status_a.json"),
        fixture_response("json/status_b.json"),
        None,
    )
    .unwrap();
    let metadata = ReportMetadata::new("https://staging/status", "https://prod/status");
    let report = create_reporter(ReportFormat::Json)
        .generate_report(&result, &metadata)
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(parsed["summary"]["strategy"], "json");
    assert_eq!(parsed["summary"]["insertions"], 3);
    assert_eq!(parsed["summary"]["deletions"], 1);
    assert_eq!(parsed["fragments"].as_array().map(Vec::len), Some(4));
    assert_eq!(parsed["fragments"][0]["kind"], "deletion");
}
