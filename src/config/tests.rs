use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_loading() {
    let config = StepConfig::load(None);
    assert!(config.is_ok(), "Should load default config successfully");
}

#[test]
fn test_config_loads_defaults() {
    let config = StepConfig::load(None).expect("Should load default config");
    let settings = config.settings().unwrap();

    assert_eq!(settings.service.bbtools_version, "beta");
    assert_eq!(settings.service.datafileutil_version, "release");
    assert!(!settings.filter.local_pack);

    let full = config.get_full_config().unwrap();
    assert!(full["filter"].get("scratch_dir").is_some());
}

#[test]
fn test_custom_config_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(
        &config_path,
        r#"
[service]
bbtools_version = "1.0.3"

[filter]
scratch_dir = "/data/scratch"
skip_rqcfilter = true
"#,
    )
    .unwrap();

    let config = StepConfig::load(config_path.to_str()).unwrap();
    let settings = config.settings().unwrap();

    assert_eq!(settings.service.bbtools_version, "1.0.3");
    assert_eq!(settings.service.datafileutil_version, "release");
    assert_eq!(settings.filter.scratch_dir, PathBuf::from("/data/scratch"));
    assert!(settings.filter.skip_rqcfilter);
}

#[test]
fn test_custom_json_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.json");
    fs::write(&config_path, r#"{"filter": {"local_pack": true}}"#).unwrap();

    let config = StepConfig::load(config_path.to_str()).unwrap();

    assert!(config.settings().unwrap().filter.local_pack);
}

#[test]
fn test_custom_config_loading_missing_file() {
    let config = StepConfig::load(Some("non_existent.toml"));
    assert!(config.is_ok(), "Should handle missing custom config gracefully");
}

#[test]
fn test_filter_config_from_settings() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.yaml");
    fs::write(
        &config_path,
        "service:\n  callback_url: http://callback:9999\nfilter:\n  scratch_dir: /data/scratch\n  debug: true\n",
    )
    .unwrap();

    let settings = StepConfig::load(config_path.to_str())
        .unwrap()
        .settings()
        .unwrap();
    let filter_config = settings.filter_config();

    assert_eq!(filter_config.scratch_dir, PathBuf::from("/data/scratch"));
    assert!(filter_config.options.debug);
    assert!(!filter_config.options.skip_rqcfilter);
}

fn sdk_env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |name: &str| {
        vars.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }
}

#[test]
fn test_sdk_env_overrides_service() {
    let settings = StepConfig::load_with_env(
        None,
        sdk_env(&[
            ("SDK_CALLBACK_URL", "http://callback:5000"),
            ("KB_AUTH_TOKEN", "ABCDEF123"),
        ]),
    )
    .unwrap()
    .settings()
    .unwrap();

    assert_eq!(settings.service.callback_url, "http://callback:5000");
    assert_eq!(settings.service.token.as_deref(), Some("ABCDEF123"));
}

#[test]
fn test_numeric_token_stays_a_string() {
    let config = StepConfig::load_with_env(
        None,
        sdk_env(&[
            ("KB_AUTH_TOKEN", "12345678901234567890"),
            ("SDK_CALLBACK_URL", "true"),
        ]),
    )
    .unwrap();
    let settings = config.settings().unwrap();

    assert_eq!(settings.service.token.as_deref(), Some("12345678901234567890"));
    assert_eq!(settings.service.callback_url, "true");
}

#[test]
fn test_scalar_values_read_as_strings() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(
        &config_path,
        "[service]\ntoken = 987654\nbbtools_version = 2\ndatafileutil_version = false\n",
    )
    .unwrap();

    let settings = StepConfig::load_with_env(config_path.to_str(), |_| None)
        .unwrap()
        .settings()
        .unwrap();

    assert_eq!(settings.service.token.as_deref(), Some("987654"));
    assert_eq!(settings.service.bbtools_version, "2");
    assert_eq!(settings.service.datafileutil_version, "false");
}
