/*!
 * Tests for application configuration functionality
 */

use std::path::PathBuf;
use anyhow::Result;
use log::LevelFilter;
use cutup::app_config::{Config, LogLevel, ToolsConfig};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.language, "S");
    assert_eq!(config.work_dir, None);
    assert_eq!(config.tools.ffprobe, "ffprobe");
    assert_eq!(config.tools.probe_timeout_secs, 60);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.language = "".to_string();
    assert!(config.validate().is_err());
    config.language = "S/../E".to_string();
    assert!(config.validate().is_err());
    config.language = "pt-PT".to_string();
    assert!(config.validate().is_ok());

    config.tools.probe_timeout_secs = 0;
    assert!(config.validate().is_err());
    config.tools.probe_timeout_secs = 30;

    config.tools.ffprobe = " ".to_string();
    assert!(config.validate().is_err());
}

/// Test that missing fields fall back to defaults
#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"language": "E", "log_level": "debug"}"#)?;

    assert_eq!(config.language, "E");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.tools, ToolsConfig::default());
    Ok(())
}

#[test]
fn test_config_work_dir_withOverride_shouldUseIt() {
    let mut config = Config::default();
    config.work_dir = Some(PathBuf::from("/srv/cutup"));
    assert_eq!(config.work_dir(), PathBuf::from("/srv/cutup"));

    config.work_dir = None;
    assert!(config.work_dir().ends_with("cutup"));
}

/// Test that a default file is written when none exists
#[test]
fn test_config_load_or_create_withMissingFile_shouldWriteDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.language, "S");
    assert!(path.is_file());

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.tools, config.tools);
    Ok(())
}

#[test]
fn test_config_load_or_create_withInvalidFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_log_level_conversion_shouldMapToLevelFilter() {
    assert_eq!(LevelFilter::from(&LogLevel::Error), LevelFilter::Error);
    assert_eq!(LevelFilter::from(&LogLevel::Trace), LevelFilter::Trace);
}
