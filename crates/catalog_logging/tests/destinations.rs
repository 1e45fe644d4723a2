use catalog_logging::{build_loggers, LogDestination};
use log::LevelFilter;
use tempfile::TempDir;

#[test]
fn file_destination_creates_log_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.log");

    let loggers = build_loggers(LogDestination::File(path.clone()), LevelFilter::Info);

    assert_eq!(loggers.len(), 1);
    assert!(path.is_file());
}

#[test]
fn both_destination_keeps_terminal_when_file_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing_dir").join("catalog.log");

    let loggers = build_loggers(LogDestination::Both(path.clone()), LevelFilter::Info);

    assert_eq!(loggers.len(), 1);
    assert!(!path.exists());
}

#[test]
fn both_destination_builds_two_loggers() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.log");

    let loggers = build_loggers(LogDestination::Both(path), LevelFilter::Debug);

    assert_eq!(loggers.len(), 2);
}

#[test]
fn unwritable_file_destination_yields_no_loggers() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing_dir").join("catalog.log");

    let loggers = build_loggers(LogDestination::File(path), LevelFilter::Info);

    assert!(loggers.is_empty());
}
