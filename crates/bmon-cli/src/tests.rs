use std::path::Path;

use bmon_core::FixedClock;

use super::*;

#[test]
fn parses_normalize_command() {
    let cli = Cli::try_parse_from([
        "bmon-cli",
        "normalize",
        "--brand",
        "acme",
        "--input",
        "mentions.json",
        "--now-ms",
        "1000",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Normalize {
            ref brand,
            input: Some(_),
            now_ms: Some(1000),
        }) if brand == "acme"
    ));
}

#[test]
fn parses_keys_command_with_bucket() {
    let cli = Cli::try_parse_from([
        "bmon-cli", "keys", "--brand", "acme", "--date", "2024-01-01", "--hour", "14",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Keys {
            date: Some(_),
            hour: Some(_),
            ..
        })
    ));
}

#[test]
fn keys_date_without_hour_is_rejected() {
    let result = Cli::try_parse_from(["bmon-cli", "keys", "--brand", "acme", "--date", "2024-01-01"]);
    assert!(result.is_err());
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["bmon-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn normalize_writes_one_line_per_mention() {
    let input = r#"[
        {"id":"m1","text":" hello ","timestamp":"2024-03-01T10:00:00Z","platform":"twitter","author":"","score":null},
        {"id":"m2","text":"bad ts","timestamp":"not-a-date","platform":"rss"}
    ]"#;
    let raws = normalize::parse_raw_mentions(input).expect("parse");

    let mut out = Vec::new();
    let count = normalize::write_normalized(&raws, "acme", &FixedClock(0), &mut out)
        .expect("write");
    assert_eq!(count, 2);

    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    assert_eq!(lines[0]["key"], "data:acme:2024-03-01:10");
    assert_eq!(lines[0]["mention"]["text"], "hello");
    assert_eq!(lines[0]["mention"]["metadata"]["author"], "unknown");
    assert_eq!(lines[1]["mention"]["timestamp"], 0);
    assert_eq!(lines[1]["key"], "data:acme:1970-01-01:00");
}

#[test]
fn normalize_accepts_single_object() {
    let raws = normalize::parse_raw_mentions(
        r#"{"id":"m1","text":"x","timestamp":0,"platform":"rss"}"#,
    )
    .expect("parse");
    assert_eq!(raws.len(), 1);
}

#[test]
fn normalize_rejects_non_mention_json() {
    assert!(normalize::parse_raw_mentions(r#"{"hello":"world"}"#).is_err());
}

#[test]
fn normalize_error_names_the_bad_field() {
    let err = normalize::parse_raw_mentions(
        r#"[{"id":"m1","text":"x","platform":"rss"},{"id":"m2","text":"y"}]"#,
    )
    .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("array of raw mentions"), "{message}");
    assert!(message.contains("missing field `platform`"), "{message}");
}

#[test]
fn keys_prints_every_purpose() {
    let mut out = Vec::new();
    keys::run("acme", Some("2024-01-01"), Some("14"), &mut out).expect("keys");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("queue\tqueue:acme\n"));
    assert!(text.contains("processed_queue\tqueue:acme:processed\n"));
    assert!(text.contains("time_bucket\tdata:acme:2024-01-01:14\n"));
    assert!(text.ends_with("tracked_brands\tbrands:set\n"));
    assert_eq!(text.lines().count(), 9);
}

#[test]
fn keys_rejects_invalid_bucket() {
    let mut out = Vec::new();
    assert!(keys::run("acme", Some("2024-01-01"), Some("25"), &mut out).is_err());
}

#[test]
fn brands_lists_seed_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("brands.yaml");
    let mut out = Vec::new();
    brands::run(&path, &mut out).expect("brands");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("acme\tbrand:acme:meta\t"));
}
