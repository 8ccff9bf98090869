//! Unit tests for the `pagecraft` CLI entrypoint module.

use super::{normalize, preview_svg, read_input, run, validate_report, write_output};
use super::{Cli, Commands};
use clap::Parser;
use serde_json::Value;
use std::path::Path;

const SCENARIO: &str = r#"{"version":1,"canvas":{"minHeight":600},"blocks":[{"id":"b1","type":"card","x":10,"y":10,"w":40,"h":20,"content":{"title":"Hi","body":"There","buttons":[{"label":"Go","url":"/go"}]}}]}"#;

#[test]
fn parses_subcommands() {
    let cli = Cli::try_parse_from(["pagecraft", "preview", "layout.json", "--width", "800", "-o", "out.svg"])
        .expect("parse");
    match cli.command {
        Commands::Preview {
            file,
            width,
            height,
            handles,
            output,
        } => {
            assert_eq!(file, Path::new("layout.json"));
            assert_eq!(width, 800.0);
            assert_eq!(height, None);
            assert!(!handles);
            assert_eq!(output.as_deref(), Some(Path::new("out.svg")));
        }
        _ => panic!("expected preview"),
    }

    let cli = Cli::try_parse_from(["pagecraft", "validate", "-", "--strict"]).expect("parse");
    assert!(matches!(cli.command, Commands::Validate { strict: true, .. }));
    assert!(Cli::try_parse_from(["pagecraft", "explode"]).is_err());
}

#[test]
fn validate_accepts_clean_layout() {
    let report = validate_report(SCENARIO, true).expect("clean layout");
    assert!(report.starts_with("1 block(s), 0 finding(s)"));
}

#[test]
fn validate_lists_repairs() {
    let raw = r#"{"blocks":[{"id":"a","type":"card","x":120,"y":0,"w":40,"h":20},{"type":"video"}]}"#;
    let report = validate_report(raw, false).expect("lenient validate");
    assert!(report.contains("unknown type"));
    assert!(report.contains("clamped"));
    let err = validate_report(raw, true).unwrap_err();
    assert!(err.to_string().contains("needs repair"));
}

#[test]
fn validate_rejects_non_layouts() {
    assert!(validate_report("{not json", false).is_err());
    assert!(validate_report(r#"{"version":1}"#, false).is_err());
    assert!(validate_report("[]", false).is_err());
}

#[test]
fn normalize_is_canonical() {
    let out = normalize(SCENARIO, false).expect("normalize");
    let json: Value = serde_json::from_str(&out).expect("json");
    assert_eq!(json["blocks"][0]["content"]["title"], "Hi");
    assert_eq!(json["blocks"][0]["content"]["buttons"].as_array().map(Vec::len), Some(2));
    assert_eq!(normalize(&out, false).expect("normalize twice"), out);

    let fallback = normalize("{not json", false).expect("normalize garbage");
    let json: Value = serde_json::from_str(&fallback).expect("json");
    assert_eq!(json["blocks"], Value::Array(Vec::new()));
}

#[test]
fn preview_renders_blocks() {
    let svg = preview_svg(SCENARIO, 1000.0, None, true).expect("svg");
    assert!(svg.contains(r#"width="1000" height="600""#));
    assert!(svg.contains(r#"data-id="b1""#));
    assert!(svg.contains("pb-handle"));
    assert!(preview_svg(SCENARIO, 0.0, Some(0.0), false).is_err());
}

#[test]
fn files_round_trip_through_commands() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("layout.json");
    let output = dir.path().join("preview.svg");
    let normalized = dir.path().join("normalized.json");
    std::fs::write(&input, SCENARIO).expect("write input");

    assert_eq!(read_input(&input).expect("read"), SCENARIO);
    assert!(read_input(&dir.path().join("missing.json")).is_err());

    run(Cli::try_parse_from([
        "pagecraft",
        "preview",
        input.to_str().expect("utf8 path"),
        "--output",
        output.to_str().expect("utf8 path"),
    ])
    .expect("parse"))
    .expect("preview");
    let svg = std::fs::read_to_string(&output).expect("read svg");
    assert!(svg.starts_with("<?xml"));

    run(Cli::try_parse_from([
        "pagecraft",
        "normalize",
        input.to_str().expect("utf8 path"),
        "--pretty",
        "-o",
        normalized.to_str().expect("utf8 path"),
    ])
    .expect("parse"))
    .expect("normalize");
    let text = std::fs::read_to_string(&normalized).expect("read normalized");
    assert!(text.contains("\n  \"blocks\""));

    write_output(Some(&dir.path().join("plain.txt")), "hello").expect("write");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("plain.txt")).expect("read"),
        "hello"
    );
}
