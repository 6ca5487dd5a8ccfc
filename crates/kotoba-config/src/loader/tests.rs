//! Tests for layered configuration loading.

use super::*;
use crate::{LoggingConfig, ReviewConfig, StorageConfig};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// An empty document yields every default.
#[test]
fn parse_minimal_config() {
    let config = KotobaConfig::load_from_str("{}").expect("config");
    assert_eq!(config, KotobaConfig::default());
    assert_eq!(config.storage.path, "words_data.json");
    assert_eq!(config.review.count, 10);
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.max_bytes, 1024 * 1024);
    assert_eq!(config.logging.max_files, 5);
}

/// JSON5 syntax (comments, unquoted keys, trailing commas) is accepted.
#[test]
fn parse_json5_features() {
    let json5 = r#"{
        // where words live
        storage: { path: "data/words.json", },
        review: { count: 25 },
    }"#;
    let config = KotobaConfig::load_from_str(json5).expect("config");
    assert_eq!(config.storage.path, "data/words.json");
    assert_eq!(config.review.count, 25);
}

#[test]
fn rejects_unknown_top_level_key() {
    let err = KotobaConfig::load_from_str("{ unexpected: true }").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("unknown key"));
    assert!(msg.contains("unexpected"));
}

#[test]
fn rejects_wrong_type_with_path() {
    let err = KotobaConfig::load_from_str(r#"{ review: { count: "ten" } }"#).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("review.count"));
}

#[test]
fn rejects_zero_review_count() {
    let err = KotobaConfig::load_from_str("{ review: { count: 0 } }").unwrap_err();
    assert!(format!("{err}").contains("review.count"));
}

#[test]
fn rejects_unknown_log_level() {
    let err = KotobaConfig::load_from_str(r#"{ logging: { level: "loud" } }"#).unwrap_err();
    assert!(format!("{err}").contains("logging.level"));
}

#[test]
fn malformed_json5_is_a_parse_error() {
    let err = KotobaConfig::load_from_str("{ storage: ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseFailed { .. }));
}

#[test]
fn load_from_path_reads_a_single_file() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("custom.json5");
    write_json5(&path, "{ logging: { level: 'info', max_files: 2 } }");

    let config = KotobaConfig::load_from_path(&path).expect("config");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.max_files, 2);
    assert_eq!(config.storage, StorageConfig::default());

    let err = KotobaConfig::load_from_path(temp.path().join("absent.json5")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed { .. }));
}

#[test]
fn missing_runtime_file_is_a_read_error() {
    let temp = TempDir::new().expect("tmp");
    let options = LayeredConfigOptions::new(temp.path())
        .with_user_path(None)
        .with_runtime_path(temp.path().join("missing.json5"));
    let err = KotobaConfig::load_layered_with_options(options).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed { .. }));
}

/// Later layers override earlier ones key by key.
#[test]
fn layers_apply_user_then_cwd_then_runtime() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let cwd = root.join("work");
    fs::create_dir_all(&cwd).expect("cwd");

    let user_config = root.join("home").join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE);
    write_json5(
        &user_config,
        r#"{ storage: { path: "user.json" }, logging: { level: "warn", dir: "user-logs" } }"#,
    );
    write_json5(
        &cwd.join(DEFAULT_CONFIG_FILE),
        r#"{ storage: { path: "cwd.json" }, review: { count: 3 } }"#,
    );
    let runtime = root.join("runtime.json5");
    write_json5(&runtime, r#"{ logging: { level: "debug" } }"#);

    let options = LayeredConfigOptions::new(&cwd)
        .with_user_path(Some(user_config.clone()))
        .with_runtime_path(&runtime);
    let layered = KotobaConfig::load_layered_with_options(options).expect("layered");

    let expected = KotobaConfig::builder()
        .storage(StorageConfig {
            path: "cwd.json".to_string(),
        })
        .review(ReviewConfig { count: 3 })
        .logging(LoggingConfig {
            level: "debug".to_string(),
            dir: "user-logs".to_string(),
            ..LoggingConfig::default()
        })
        .build();
    assert_eq!(layered.config, expected);

    let sources: Vec<ConfigLayerSource> =
        layered.layers.iter().map(|layer| layer.source).collect();
    assert_eq!(
        sources,
        vec![
            ConfigLayerSource::User,
            ConfigLayerSource::Cwd,
            ConfigLayerSource::Runtime
        ]
    );
}

/// A user config that is also the cwd config is loaded once.
#[test]
fn same_file_is_not_loaded_twice() {
    let temp = TempDir::new().expect("tmp");
    let cwd_config = temp.path().join(DEFAULT_CONFIG_FILE);
    write_json5(&cwd_config, "{ review: { count: 4 } }");

    let options = LayeredConfigOptions::new(temp.path()).with_user_path(Some(cwd_config));
    let layered = KotobaConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.layers.len(), 1);
    assert_eq!(layered.config.review.count, 4);
}

#[test]
fn no_layers_yields_defaults() {
    let temp = TempDir::new().expect("tmp");
    let options = LayeredConfigOptions::new(temp.path()).with_user_path(None);
    let layered = KotobaConfig::load_layered_with_options(options).expect("layered");
    assert!(layered.layers.is_empty());
    assert_eq!(layered.config, KotobaConfig::default());
}

#[test]
fn relative_paths_resolve_against_base() {
    let config = KotobaConfig::default();
    let base = Path::new("/srv/kotoba");
    assert_eq!(
        config.storage.resolve_path(base),
        PathBuf::from("/srv/kotoba/words_data.json")
    );
    assert_eq!(
        config.logging.log_path(base),
        PathBuf::from("/srv/kotoba/logs/app.log")
    );
}
