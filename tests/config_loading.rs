// tests/config_loading.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};
use tripcheck::config::{ConfigFile, load_and_validate, load_or_default};
use tripcheck::errors::TripcheckError;
use tripcheck::store_dir;
use tripcheck::types::GatingDepth;

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(contents: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{contents}")?;
    Ok(file)
}

#[test]
fn full_config_is_parsed() -> TestResult {
    init_tracing();
    let file = write_config(
        r#"
[store]
dir = "data"

[tasks]
gating = "direct"
default_category = "packing"
"#,
    )?;

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.store.dir, PathBuf::from("data"));
    assert_eq!(cfg.tasks.gating, GatingDepth::Direct);
    assert_eq!(cfg.tasks.default_category, "packing");
    assert_eq!(cfg.task_manager().gating(), GatingDepth::Direct);
    Ok(())
}

#[test]
fn empty_config_uses_defaults() -> TestResult {
    init_tracing();
    let file = write_config("")?;

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.store.dir, PathBuf::from(".tripcheck"));
    assert_eq!(cfg.tasks.gating, GatingDepth::Transitive);
    assert_eq!(cfg.tasks.default_category, "general");
    Ok(())
}

#[test]
fn unknown_gating_mode_is_a_toml_error() -> TestResult {
    init_tracing();
    let file = write_config("[tasks]\ngating = \"sideways\"\n")?;

    assert!(matches!(
        load_and_validate(file.path()),
        Err(TripcheckError::TomlError(_))
    ));
    Ok(())
}

#[test]
fn blank_default_category_is_a_config_error() -> TestResult {
    init_tracing();
    let file = write_config("[tasks]\ndefault_category = \"  \"\n")?;

    match load_and_validate(file.path()) {
        Err(TripcheckError::ConfigError(msg)) => assert!(msg.contains("default_category")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
    Ok(())
}

#[test]
fn empty_store_dir_is_a_config_error() -> TestResult {
    init_tracing();
    let file = write_config("[store]\ndir = \"\"\n")?;

    assert!(matches!(
        load_and_validate(file.path()),
        Err(TripcheckError::ConfigError(_))
    ));
    Ok(())
}

#[test]
fn missing_file_falls_back_only_when_asked() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let missing = dir.path().join("Tripcheck.toml");

    assert!(matches!(
        load_and_validate(&missing),
        Err(TripcheckError::IoError(_))
    ));

    let cfg = load_or_default(&missing)?;
    assert_eq!(cfg.tasks.gating, GatingDepth::Transitive);
    Ok(())
}

#[test]
fn relative_store_dir_follows_the_config_file() {
    init_tracing();
    let cfg = ConfigFile::default();

    assert_eq!(
        store_dir(Path::new("trips/Tripcheck.toml"), &cfg),
        PathBuf::from("trips/.tripcheck")
    );
    assert_eq!(
        store_dir(Path::new("Tripcheck.toml"), &cfg),
        PathBuf::from(".tripcheck")
    );
}

#[test]
fn gating_depth_parses_from_strings() {
    assert_eq!(" Direct ".parse::<GatingDepth>(), Ok(GatingDepth::Direct));
    assert_eq!("transitive".parse::<GatingDepth>(), Ok(GatingDepth::Transitive));
    assert!("deep".parse::<GatingDepth>().is_err());
}
