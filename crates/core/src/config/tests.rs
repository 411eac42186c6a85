//! Tests for configuration module

use super::*;
use crate::error::{Error, Result};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn create_temp_config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|e| Error::config(format!("Failed to create temp file: {e}")))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write temp file: {e}")))?;
    file.flush()
        .map_err(|e| Error::config(format!("Failed to flush temp file: {e}")))?;
    Ok(file)
}

fn with_env_var<F, T>(key: &str, value: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    std::env::set_var(key, value);
    let result = f();
    std::env::remove_var(key);
    result
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.client.endpoint, "http://127.0.0.1:8000/search");
    assert_eq!(config.client.topk, 10);
    assert_eq!(config.client.timeout_secs, None);
    assert_eq!(config.client.overlap_policy, OverlapPolicy::LastResponseWins);
    assert_eq!(config.client.mode, None);
    assert_eq!(config.client.sort, None);
    assert_eq!(config.render.format, RenderFormat::Html);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_toml_str_valid() {
    let toml = r#"
        [client]
        endpoint = "http://search.internal:9000/search"
        topk = 25
        timeout_secs = 5
        overlap_policy = "latest_request_wins"
        mode = "hybrid"
        sort = "newest"

        [render]
        format = "text"
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse valid TOML");
    assert_eq!(config.client.endpoint, "http://search.internal:9000/search");
    assert_eq!(config.client.topk, 25);
    assert_eq!(config.client.timeout_secs, Some(5));
    assert_eq!(
        config.client.overlap_policy,
        OverlapPolicy::LatestRequestWins
    );
    assert_eq!(config.client.mode, Some(SearchMode::Hybrid));
    assert_eq!(config.client.sort, Some(SortOrder::Newest));
    assert_eq!(config.render.format, RenderFormat::Text);
}

#[test]
fn test_from_toml_str_empty_uses_defaults() {
    let config = Config::from_toml_str("").expect("Failed to parse empty TOML");
    assert_eq!(config.client.topk, 10);
    assert_eq!(config.render.format, RenderFormat::Html);
}

#[test]
fn test_from_toml_str_invalid_syntax() {
    let toml = r#"
        [client
        topk = 3
    "#;

    let result = Config::from_toml_str(toml);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse TOML"));
}

#[test]
fn test_from_toml_str_unknown_policy() {
    let toml = r#"
        [client]
        overlap_policy = "first_wins"
    "#;

    assert!(Config::from_toml_str(toml).is_err());
}

#[test]
fn test_from_file_reads_values() {
    let file = create_temp_config_file(
        r#"
        [client]
        topk = 3
        mode = "keyword"

        [render]
        format = "json"
        "#,
    )
    .expect("temp config");

    let config = Config::from_file(file.path()).expect("Failed to load config file");
    assert_eq!(config.client.topk, 3);
    assert_eq!(config.client.mode, Some(SearchMode::Keyword));
    assert_eq!(config.render.format, RenderFormat::Json);
    // Keys not present in the file keep their defaults
    assert_eq!(config.client.overlap_policy, OverlapPolicy::LastResponseWins);
}

#[test]
fn test_from_file_missing_path_uses_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("does-not-exist.toml");

    let config = Config::from_file(&path).expect("defaults should load");
    assert_eq!(config.client.topk, 10);
    assert_eq!(config.render.format, RenderFormat::Html);
}

#[test]
fn test_env_overrides_file() {
    let file = create_temp_config_file(
        r#"
        [client]
        timeout_secs = 30
        "#,
    )
    .expect("temp config");

    let config = with_env_var("ARTICLESEARCH_CLIENT__TIMEOUT_SECS", "7", || {
        Config::from_file(file.path())
    })
    .expect("Failed to load config with env override");

    assert_eq!(config.client.timeout_secs, Some(7));
}

#[test]
fn test_validate_rejects_non_http_endpoint() {
    let mut config = Config::default();
    config.client.endpoint = "ftp://127.0.0.1/search".to_string();

    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("client.endpoint must be an http(s) URL"));

    config.client.endpoint = "HTTPS://search.example.com/search".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_topk() {
    let mut config = Config::default();
    config.client.topk = 0;

    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("client.topk must be greater than 0"));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut config = Config::default();
    config.client.timeout_secs = Some(0);
    assert!(config.validate().is_err());

    config.client.timeout_secs = Some(1);
    assert!(config.validate().is_ok());
}
