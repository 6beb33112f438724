use flate2::Compression;
use flate2::write::GzEncoder;
use jsonl_validate::builders::reporter::summary_lines;
use jsonl_validate::builders::validator::JsonRecordValidator;
use jsonl_validate::core::config::{ConfigManager, ConfigProvider, LogLevel};
use jsonl_validate::core::error::ValidateError;
use jsonl_validate::core::pipeline::ValidationTally;
use jsonl_validate::core::runner::ValidationRun;
use jsonl_validate::core::source::{Encoding, FileType, SourceDescriptor};
use jsonl_validate::utils;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use url::Url;

const TWO_GOOD_RECORDS: &str = concat!(
    "{\"RECORD_ID\":\"1\",\"DATA_SOURCE\":\"TEST\"}\n",
    "{\"RECORD_ID\":\"2\",\"DATA_SOURCE\":\"TEST\"}\n",
);

fn file_url(path: &Path) -> String {
    Url::from_file_path(path).unwrap().to_string()
}

fn write_gz(path: &Path, content: &[u8]) {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content).unwrap();
    fs::write(path, encoder.finish().unwrap()).unwrap();
}

fn run(locator: &str, file_type: Option<FileType>) -> Result<ValidationTally, ValidateError> {
    let descriptor = SourceDescriptor::resolve_with(locator, file_type, true)?;
    ValidationRun::new(descriptor).execute(&JsonRecordValidator::new())
}

#[test]
fn test_valid_file_with_blank_line() {
    let td = TempDir::new().unwrap();
    let path = td.path().join("good.jsonl");
    fs::write(&path, "{\"RECORD_ID\":\"1\",\"DATA_SOURCE\":\"TEST\"}\n\n").unwrap();

    let tally = run(&file_url(&path), None).unwrap();
    assert_eq!(tally.total_lines, 2);
    assert_eq!(tally.bad_lines(), 0);
    assert_eq!(summary_lines(&tally), vec!["Validated 2 lines, 0 were bad."]);
}

#[test]
fn test_file_missing_record_id() {
    let td = TempDir::new().unwrap();
    let path = td.path().join("bad.jsonl");
    fs::write(&path, "{\"DATA_SOURCE\":\"TEST\"}\n").unwrap();

    let tally = run(&file_url(&path), None).unwrap();
    assert_eq!(tally.missing_record_id, 1);
    assert_eq!(
        summary_lines(&tally),
        vec![
            "1 line(s) had no RECORD_ID field.",
            "Validated 1 lines, 1 were bad.",
        ]
    );
}

#[test]
fn test_file_malformed_line_does_not_stop_the_scan() {
    let td = TempDir::new().unwrap();
    let path = td.path().join("mixed.jsonl");
    fs::write(
        &path,
        format!("not json at all\n{TWO_GOOD_RECORDS}{{\"RECORD_ID\":\"9\"}}\n"),
    )
    .unwrap();

    let tally = run(&file_url(&path), None).unwrap();
    assert_eq!(tally.total_lines, 4);
    assert_eq!(tally.malformed, 1);
    assert_eq!(tally.missing_data_source, 1);
    assert_eq!(tally.bad_lines(), 2);
}

#[test]
fn test_gzip_matches_plain() {
    let td = TempDir::new().unwrap();
    let plain = td.path().join("records.jsonl");
    let gz = td.path().join("records.jsonl.gz");
    fs::write(&plain, TWO_GOOD_RECORDS).unwrap();
    write_gz(&gz, TWO_GOOD_RECORDS.as_bytes());

    let descriptor = SourceDescriptor::resolve_with(&file_url(&gz), None, true).unwrap();
    assert_eq!(descriptor.encoding, Encoding::Gzip);

    let from_gz = run(&file_url(&gz), None).unwrap();
    let from_plain = run(&file_url(&plain), None).unwrap();
    assert_eq!(from_gz.total_lines, 2);
    assert_eq!(from_gz.bad_lines(), 0);
    assert_eq!(from_gz, from_plain);
}

#[test]
fn test_gzip_override_on_unknown_extension() {
    let td = TempDir::new().unwrap();
    let path = td.path().join("records.dat");
    write_gz(&path, TWO_GOOD_RECORDS.as_bytes());

    let err = run(&file_url(&path), None).unwrap_err();
    assert!(matches!(err, ValidateError::UnrecognizedType { .. }));

    let tally = run(&file_url(&path), Some(FileType::Gz)).unwrap();
    assert_eq!(tally.total_lines, 2);
}

#[test]
fn test_runs_are_idempotent() {
    let td = TempDir::new().unwrap();
    let path = td.path().join("repeat.jsonl");
    fs::write(&path, format!("{TWO_GOOD_RECORDS}\n[]\n{{}}\n")).unwrap();

    let first = run(&file_url(&path), None).unwrap();
    let second = run(&file_url(&path), None).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.total_lines, 5);
}

#[test]
fn test_corrupt_gzip_is_a_decompression_error() {
    let td = TempDir::new().unwrap();
    let path = td.path().join("broken.gz");
    fs::write(&path, TWO_GOOD_RECORDS).unwrap();

    let err = run(&file_url(&path), None).unwrap_err();
    assert!(matches!(err, ValidateError::Decompression { .. }), "got {err:?}");
    assert_eq!(err.message_id(), 3006);
}

#[test]
fn test_missing_file_is_a_source_open_error() {
    let td = TempDir::new().unwrap();
    let path = td.path().join("absent.jsonl");

    let err = run(&file_url(&path), None).unwrap_err();
    assert!(matches!(err, ValidateError::SourceOpen { .. }));
    assert!(!err.wants_usage());
}

#[test]
fn test_locator_errors_happen_before_io() {
    assert!(matches!(
        run("ht", None).unwrap_err(),
        ValidateError::InvalidLocator(_)
    ));
    assert!(matches!(
        run("ftp://host/file.jsonl", None).unwrap_err(),
        ValidateError::UnsupportedScheme { .. }
    ));
    assert!(matches!(run("", None).unwrap_err(), ValidateError::NoPipe));
}

#[test]
fn test_yaml_settings_file() {
    let td = TempDir::new().unwrap();
    let config_path = td.path().join("config.yaml");
    fs::write(
        &config_path,
        "inputURL: \"file:///tmp/records.json\"\nfileType: jsonl\nlogLevel: debug\n",
    )
    .unwrap();

    let manager = ConfigManager::new(Some(config_path.clone()));
    assert_eq!(manager.get_config_path(), Some(config_path.as_path()));
    let config = manager.load_config().unwrap();
    assert_eq!(config.locator(), "file:///tmp/records.json");
    assert_eq!(config.file_type, Some(FileType::Jsonl));
    assert_eq!(config.log_level(), LogLevel::Debug);
}

#[test]
fn test_toml_settings_file_with_cli_override() {
    let td = TempDir::new().unwrap();
    let config_path = td.path().join("config.toml");
    fs::write(
        &config_path,
        "input_url = \"file:///tmp/from-file.jsonl\"\nfile_type = \"GZ\"\n",
    )
    .unwrap();

    let overrides = jsonl_validate::core::config::ValidateConfig {
        input_url: Some("file:///tmp/from-cli.jsonl".to_string()),
        ..Default::default()
    };
    let config = utils::load_settings(Some(config_path), overrides).unwrap();
    assert_eq!(config.locator(), "file:///tmp/from-cli.jsonl");
    assert_eq!(config.file_type, Some(FileType::Gz));
    assert_eq!(config.log_level(), LogLevel::Info);
}

#[test]
fn test_bad_settings_file() {
    let td = TempDir::new().unwrap();

    let unknown = td.path().join("config.ini");
    fs::write(&unknown, "inputURL=x").unwrap();
    let err = ConfigManager::new(Some(unknown)).load_config().unwrap_err();
    assert!(matches!(err, ValidateError::Config { .. }));

    let missing = td.path().join("missing.yaml");
    let err = ConfigManager::new(Some(missing)).load_config().unwrap_err();
    assert_eq!(err.message_id(), 3009);

    let no_file = ConfigManager::new(None).load_config().unwrap();
    assert_eq!(no_file.locator(), "");
}
