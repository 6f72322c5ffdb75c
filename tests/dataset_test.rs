//! Integration tests for the directory-backed data provider.

use std::fs;
use std::sync::Arc;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use isic4::util::testing;
use isic4::{ApplicationError, Classifier, DataProvider, DirectoryDataset, DomainError, Settings};

const VALID: &str = r#"{"sections": [
  {"section": "A", "description": "Agriculture", "divisions": [
    {"division": "01", "description": "Crops", "groups": [
      {"group": "011", "description": "Non-perennial crops", "classes": [
        {"class": "0111", "description": "Cereals"},
        {"class": "0112", "description": "Rice"}]}]}]},
  {"section": "B", "description": "Mining", "divisions": [
    {"division": "05", "description": "Coal", "groups": [
      {"group": "051", "description": "Hard coal", "classes": [
        {"class": "0510", "description": "Hard coal mining"}]}]}]}]}"#;

#[fixture]
fn data_dir() -> TempDir {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), VALID).unwrap();
    fs::write(dir.path().join("FR.json"), VALID).unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("de.json"), VALID).unwrap();
    dir
}

// ============================================================
// Discovery
// ============================================================

#[rstest]
fn given_data_dir_when_discovering_then_only_top_level_json_files_count(data_dir: TempDir) {
    let provider = DirectoryDataset::new(data_dir.path()).unwrap();

    let languages: Vec<String> = provider.supported_languages().into_iter().collect();
    assert_eq!(languages, vec!["en".to_string(), "fr".to_string()]);
    assert_eq!(provider.dir(), data_dir.path());
}

#[rstest]
fn given_data_dir_when_loading_then_classifier_serves_it(data_dir: TempDir) {
    let provider = Arc::new(DirectoryDataset::new(data_dir.path()).unwrap());
    let classifier = Classifier::with_provider(provider, "FR", false).unwrap();

    assert_eq!(classifier.language(), "fr");
    assert_eq!(classifier.get_class("0112").map(|c| c.description.as_str()), Some("Rice"));
    assert_eq!(classifier.search("mining").len(), 2);
}

#[rstest]
fn given_settings_with_data_dir_when_building_then_directory_is_used(data_dir: TempDir) {
    let settings = Settings {
        language: "en".into(),
        case_sensitive: false,
        data_dir: Some(data_dir.path().to_path_buf()),
    };

    let classifier = Classifier::from_settings(&settings).unwrap();

    assert_eq!(classifier.sections().len(), 2);
    assert!(classifier.supported_languages().contains("fr"));
}

#[cfg(unix)]
#[test]
fn given_symlinked_dataset_when_discovering_then_link_is_followed() {
    testing::init_test_setup();
    let store = TempDir::new().unwrap();
    let target = store.path().join("isic-en.json");
    fs::write(&target, VALID).unwrap();
    let dir = TempDir::new().unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("en.json")).unwrap();

    let provider = Arc::new(DirectoryDataset::new(dir.path()).unwrap());

    assert!(provider.supported_languages().contains("en"));
    let classifier = Classifier::with_provider(provider, "en", false).unwrap();
    assert_eq!(classifier.get_class("0112").map(|c| c.description.as_str()), Some("Rice"));
}

#[test]
fn given_stems_differing_only_in_case_when_discovering_then_config_error() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), VALID).unwrap();
    fs::write(dir.path().join("EN.json"), VALID).unwrap();
    if fs::read_dir(dir.path()).unwrap().count() < 2 {
        // case-insensitive filesystem: only one file exists
        return;
    }

    let err = DirectoryDataset::new(dir.path()).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("ambiguous datasets for language 'en'"));
}

#[test]
fn given_missing_dir_when_discovering_then_config_error() {
    testing::init_test_setup();
    let err = DirectoryDataset::new("/nonexistent/isic4/data").unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));
}

// ============================================================
// Load failures
// ============================================================

#[rstest]
fn given_file_removed_after_discovery_when_loading_then_dataset_unavailable(data_dir: TempDir) {
    let provider = Arc::new(DirectoryDataset::new(data_dir.path()).unwrap());
    let mut classifier = Classifier::with_provider(provider, "en", false).unwrap();
    fs::remove_file(data_dir.path().join("FR.json")).unwrap();

    let err = classifier.set_language("fr").unwrap_err();

    assert!(matches!(err, ApplicationError::DatasetUnavailable { ref language, .. } if language == "fr"));
    assert_eq!(classifier.language(), "en");
    assert!(classifier.get_class("0111").is_some());
}

#[rstest]
fn given_unknown_language_when_loading_then_unsupported_lists_discovered(data_dir: TempDir) {
    let provider = Arc::new(DirectoryDataset::new(data_dir.path()).unwrap());
    let err = Classifier::with_provider(provider, "ar", false).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid language specified: 'ar'. Supported languages: en, fr"
    );
}

#[rstest]
#[case::not_json("{ this is not json")]
#[case::missing_description(r#"{"sections": [{"section": "A"}]}"#)]
fn given_malformed_file_when_loading_then_invalid_dataset(#[case] content: &str) {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), content).unwrap();
    let provider = Arc::new(DirectoryDataset::new(dir.path()).unwrap());

    let err = Classifier::with_provider(provider, "en", false).unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidDataset { .. }));
}

#[rstest]
#[case::class_outside_group(
    r#"{"sections": [{"section": "A", "description": "a", "divisions": [
        {"division": "01", "description": "d", "groups": [
          {"group": "011", "description": "g", "classes": [
            {"class": "0121", "description": "c"}]}]}]}]}"#
)]
#[case::group_outside_division(
    r#"{"sections": [{"section": "A", "description": "a", "divisions": [
        {"division": "01", "description": "d", "groups": [
          {"group": "021", "description": "g"}]}]}]}"#
)]
fn given_prefix_violation_when_loading_then_domain_error(#[case] content: &str) {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), content).unwrap();
    let provider = Arc::new(DirectoryDataset::new(dir.path()).unwrap());

    let err = Classifier::with_provider(provider, "en", false).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::PrefixMismatch { .. })
    ));
}

#[test]
fn given_duplicate_section_when_loading_then_domain_error() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("en.json"),
        r#"{"sections": [{"section": "A", "description": "x"}, {"section": "a", "description": "y"}]}"#,
    )
    .unwrap();
    let provider = Arc::new(DirectoryDataset::new(dir.path()).unwrap());

    let err = Classifier::with_provider(provider, "en", false).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::DuplicateCode { .. })
    ));
}
