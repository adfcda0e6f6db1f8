//! # Loader Tests
//!
//! Catalog lookup, path resolution and join semantics of the two-file read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pipeviz_core::common::LoadError;
use pipeviz_core::config::CatalogConfig;
use pipeviz_core::sim::*;
use tempfile::TempDir;

use crate::common::fixtures;
use crate::common::mocks::{self, MockSource};

fn config_at(root: &Path) -> CatalogConfig {
    CatalogConfig {
        root: root.to_path_buf(),
        ..CatalogConfig::default()
    }
}

#[test]
fn request_paths_follow_the_layout() {
    let request = ProgramRequest::new(&CatalogConfig::default(), "fib");
    assert_eq!(request.listing_path, PathBuf::from("program/fib/assembly_code.txt"));
    assert_eq!(request.trace_path, PathBuf::from("program/fib/pc_stages.txt"));
}

#[test]
fn catalog_decodes_programs_json() {
    let catalog = Catalog::from_json(r#"{ "programs": ["fib", "sort", "gcd"] }"#).unwrap();
    assert_eq!(catalog.programs, vec!["fib", "sort", "gcd"]);
    assert!(catalog.contains("sort"));
    assert!(!catalog.contains("qsort"));
}

#[test]
fn unknown_program_is_rejected() {
    let catalog = Catalog::from_json(r#"{ "programs": ["fib"] }"#).unwrap();
    let err = catalog.request(&CatalogConfig::default(), "sort").unwrap_err();
    assert!(matches!(err, LoadError::UnknownProgram(name) if name == "sort"));
}

#[test]
fn empty_catalog_accepts_any_name() {
    let catalog = Catalog::default();
    assert!(catalog.request(&CatalogConfig::default(), "anything").is_ok());
}

#[test]
fn loads_from_a_directory() {
    let dir = TempDir::new().unwrap();
    let program_dir = dir.path().join("fib");
    fs::create_dir(&program_dir).unwrap();
    fs::write(program_dir.join("assembly_code.txt"), fixtures::LISTING).unwrap();
    fs::write(program_dir.join("pc_stages.txt"), fixtures::straight_line_trace()).unwrap();

    let request = ProgramRequest::new(&config_at(dir.path()), "fib");
    let program = load_program(&DirSource, &request).unwrap();

    assert_eq!(program.name, "fib");
    assert_eq!(program.title, "fib/assembly_code.txt --> RV32I 4 STAGE CORE");
    assert_eq!(program.instructions.len(), 4);
    assert_eq!(program.total_cycles(), fixtures::CYCLES);
    assert_eq!(program.index.row(8), Some(2));
    assert_eq!(program.index.row(400), None);
}

#[test]
fn missing_trace_fails_the_whole_load() {
    let dir = TempDir::new().unwrap();
    let program_dir = dir.path().join("fib");
    fs::create_dir(&program_dir).unwrap();
    fs::write(program_dir.join("assembly_code.txt"), fixtures::LISTING).unwrap();

    let request = ProgramRequest::new(&config_at(dir.path()), "fib");
    let err = load_program(&DirSource, &request).unwrap_err();

    match err {
        LoadError::Read { path, .. } => assert!(path.ends_with("pc_stages.txt")),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn fetch_reads_both_files_through_the_source() {
    let source = mocks::serving(fixtures::LISTING, fixtures::straight_line_trace());
    let request = ProgramRequest::new(&CatalogConfig::default(), "fib");

    let text = ProgramText::fetch(&source, &request).unwrap();
    assert_eq!(text.listing, fixtures::LISTING);
    assert_eq!(text.trace, fixtures::straight_line_trace());
}

#[test]
fn listing_failure_skips_the_trace_read() {
    let mut source = MockSource::new();
    let _ = source
        .expect_read_to_string()
        .times(1)
        .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "404")));

    let request = ProgramRequest::new(&CatalogConfig::default(), "fib");
    let err = ProgramText::fetch(&source, &request).unwrap_err();
    assert!(err.to_string().contains("assembly_code.txt"));
}
