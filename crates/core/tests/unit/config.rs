//! # Configuration Tests
//!
//! Defaults, partial JSON and decoding failures.

use std::io::Write;
use std::path::PathBuf;

use pipeviz_core::common::ConfigError;
use pipeviz_core::config::*;
use rstest::rstest;
use tempfile::NamedTempFile;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.playback.rate_hz, 5);
    assert!(config.playback.autoplay);
    assert_eq!(config.catalog.root, PathBuf::from("program"));
    assert_eq!(config.catalog.default_program, "fib");
    assert_eq!(config.catalog.listing_file, "assembly_code.txt");
    assert_eq!(config.catalog.trace_file, "pc_stages.txt");
    assert_eq!(config.catalog.catalog_file, PathBuf::from("programs.json"));
}

#[test]
fn test_empty_object_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.playback.rate_hz, 5);
    assert_eq!(config.catalog.default_program, "fib");
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let config = Config::from_json(
        r#"{ "playback": { "autoplay": false }, "catalog": { "root": "traces", "default_program": "sort" } }"#,
    )
    .unwrap();
    assert!(!config.playback.autoplay);
    assert_eq!(config.playback.rate_hz, 5);
    assert_eq!(config.catalog.root, PathBuf::from("traces"));
    assert_eq!(config.catalog.default_program, "sort");
    assert_eq!(config.catalog.trace_file, "pc_stages.txt");
}

#[rstest]
#[case("-2", 1)]
#[case("0", 1)]
#[case(r#""fast""#, 1)]
#[case("null", 1)]
#[case(r#""12""#, 12)]
#[case("7.5", 7)]
#[case("2000000000", 1000)]
fn test_rate_is_read_leniently(#[case] raw: &str, #[case] hz: u32) {
    let json = format!(r#"{{ "playback": {{ "rate_hz": {raw} }} }}"#);
    let config = Config::from_json(&json).unwrap();
    assert_eq!(config.playback.rate_hz, hz);
}

#[test]
fn test_wrong_section_type_is_rejected() {
    let err = Config::from_json(r#"{ "playback": { "autoplay": "yes" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "playback": { "rate_hz": 20 } }"#).unwrap();
    file.flush().unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.playback.rate_hz, 20);
}

#[test]
fn test_missing_file_reports_path() {
    let err = Config::from_file(std::path::Path::new("/nonexistent/pipeviz.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/pipeviz.json"));
}
