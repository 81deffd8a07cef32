//! Configuration loader
//!
//! Loads application configuration from a file and layers environment
//! variable overrides on top.
//!
//! ## Loading Strategy
//! 1. An explicit path is loaded as given
//! 2. Otherwise the standard locations are probed
//! 3. If no file exists the built-in defaults are used
//! 4. Environment overrides are applied last
//!
//! ## Environment Variables
//! - `SITECODE_OUTPUT_DIR`: Directory for generated files
//! - `SITECODE_WRITE_CSV`: Whether to write the flat `_new.csv` (true/false)
//! - `SITECODE_MAX_CONCURRENCY`: Files converted concurrently (positive integer)
//! - `SITECODE_LOG_LEVEL`: Log level or filter directive
//! - `SITECODE_LOG_JSON`: Emit logs as JSON lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./sitecode.toml`, `./sitecode.json` (current working directory)
//! 2. `./config.toml`, `./config.json` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use sitecode_domain::{Config, Result, SiteCodeError};

use crate::errors::map_infra_error;

/// File names probed in each candidate directory, in priority order
const CONFIG_FILE_NAMES: [&str; 4] =
    ["sitecode.toml", "sitecode.json", "config.toml", "config.json"];

pub const ENV_OUTPUT_DIR: &str = "SITECODE_OUTPUT_DIR";
pub const ENV_WRITE_CSV: &str = "SITECODE_WRITE_CSV";
pub const ENV_MAX_CONCURRENCY: &str = "SITECODE_MAX_CONCURRENCY";
pub const ENV_LOG_LEVEL: &str = "SITECODE_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "SITECODE_LOG_JSON";

/// Load configuration with automatic fallback strategy
///
/// Uses `path` when given, otherwise the first probed config file, otherwise
/// the defaults. Environment overrides are applied; the result is not
/// validated, callers run [`Config::validate`] after their own overrides.
///
/// # Errors
/// Returns `SiteCodeError::Config` if:
/// - The explicit file does not exist or cannot be parsed
/// - An environment override has an invalid value
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path.or_else(probe_config_paths) {
        Some(path) => load_from_file(&path)?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;

    if let Some(tables) = &config.tables {
        tracing::info!(
            buildings = tables.buildings.len(),
            floors = tables.floors.len(),
            areas = tables.areas.len(),
            "Using custom reference tables"
        );
    }

    Ok(config)
}

/// Load configuration from a file
///
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SiteCodeError::Config` if the file does not exist, cannot be read
/// or its format is invalid.
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(SiteCodeError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| SiteCodeError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `SiteCodeError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| invalid_config(path, map_infra_error(e))),
        "json" => {
            serde_json::from_str(contents).map_err(|e| invalid_config(path, map_infra_error(e)))
        }
        _ => Err(SiteCodeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

fn invalid_config(path: &Path, err: SiteCodeError) -> SiteCodeError {
    SiteCodeError::Config(format!("Invalid config file {}: {}", path.display(), err))
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Apply `SITECODE_*` environment overrides to `config`
///
/// Unset variables leave the corresponding field untouched.
///
/// # Errors
/// Returns `SiteCodeError::Config` if `SITECODE_MAX_CONCURRENCY` is not a
/// positive integer.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(dir) = env_var(ENV_OUTPUT_DIR) {
        config.output.directory = Some(PathBuf::from(dir));
    }
    config.output.write_flat_csv = env_bool(ENV_WRITE_CSV, config.output.write_flat_csv);

    if let Some(raw) = env_var(ENV_MAX_CONCURRENCY) {
        let jobs = raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                SiteCodeError::Config(format!(
                    "Invalid {}: '{}' (expected a positive integer)",
                    ENV_MAX_CONCURRENCY, raw
                ))
            })?;
        config.batch.max_concurrent_files = jobs;
    }

    if let Some(level) = env_var(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }
    config.logging.json = env_bool(ENV_LOG_JSON, config.logging.json);

    Ok(())
}

/// Get a non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::{Builder, NamedTempFile};

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_OVERRIDES: [&str; 5] =
        [ENV_OUTPUT_DIR, ENV_WRITE_CSV, ENV_MAX_CONCURRENCY, ENV_LOG_LEVEL, ENV_LOG_JSON];

    fn clear_overrides() {
        for key in ALL_OVERRIDES {
            std::env::remove_var(key);
        }
    }

    fn temp_config(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for value in ["1", "true", "yes", "on", "TRUE", " On "] {
            std::env::set_var("SITECODE_TEST_BOOL", value);
            assert!(env_bool("SITECODE_TEST_BOOL", false), "{value:?} should be true");
        }
        for value in ["0", "false", "no", "off", "maybe"] {
            std::env::set_var("SITECODE_TEST_BOOL", value);
            assert!(!env_bool("SITECODE_TEST_BOOL", true), "{value:?} should be false");
        }

        std::env::remove_var("SITECODE_TEST_BOOL");
        assert!(env_bool("SITECODE_TEST_BOOL", true));
        assert!(!env_bool("SITECODE_TEST_BOOL", false));
    }

    #[test]
    fn test_env_overrides_apply() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        std::env::set_var(ENV_OUTPUT_DIR, "/tmp/sitecode-out");
        std::env::set_var(ENV_WRITE_CSV, "no");
        std::env::set_var(ENV_MAX_CONCURRENCY, "8");
        std::env::set_var(ENV_LOG_LEVEL, "debug");
        std::env::set_var(ENV_LOG_JSON, "1");

        let mut config = Config::default();
        let result = apply_env_overrides(&mut config);
        clear_overrides();

        assert!(result.is_ok(), "overrides should apply: {:?}", result.err());
        assert_eq!(config.output.directory, Some(PathBuf::from("/tmp/sitecode-out")));
        assert!(!config.output.write_flat_csv);
        assert_eq!(config.batch.max_concurrent_files, 8);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_env_overrides_leave_unset_fields() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        let mut config = Config::default();
        config.batch.max_concurrent_files = 2;
        apply_env_overrides(&mut config).unwrap();

        assert_eq!(config.batch.max_concurrent_files, 2);
        assert!(config.output.write_flat_csv);
        assert!(config.output.directory.is_none());
    }

    #[test]
    fn test_invalid_concurrency_is_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        for value in ["zero", "0", "-3"] {
            std::env::set_var(ENV_MAX_CONCURRENCY, value);
            let result = apply_env_overrides(&mut Config::default());
            assert!(
                matches!(result, Err(SiteCodeError::Config(_))),
                "{value:?} should be rejected"
            );
        }
        clear_overrides();
    }

    #[test]
    fn test_load_from_file_json() {
        let file = temp_config(
            ".json",
            r#"{
                "output": { "directory": "out", "pretty_json": false },
                "batch": { "max_concurrent_files": 2 }
            }"#,
        );

        let config = load_from_file(file.path()).unwrap();

        assert_eq!(config.output.directory, Some(PathBuf::from("out")));
        assert!(!config.output.pretty_json);
        assert!(config.output.write_flat_csv);
        assert_eq!(config.batch.max_concurrent_files, 2);
    }

    #[test]
    fn test_load_from_file_toml_with_tables() {
        let file = temp_config(
            ".toml",
            r#"
[output]
write_flat_csv = false

[tables]
buildings = [{ code = "T1", label = "Tower 1" }]
floors = [{ code = "L1", label = "Level 1" }]
"#,
        );

        let config = load_from_file(file.path()).unwrap();

        assert!(!config.output.write_flat_csv);
        let tables = config.tables.expect("custom tables");
        assert_eq!(tables.buildings[0].label, "Tower 1");
        assert_eq!(tables.floors.len(), 1);
        assert!(tables.areas.is_empty());
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Path::new("/nonexistent/sitecode.toml"));
        assert!(matches!(result, Err(SiteCodeError::Config(_))));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let file = temp_config(".json", r#"{ "output": "#);
        let result = load_from_file(file.path());

        assert!(matches!(result, Err(SiteCodeError::Config(msg)) if msg.contains("JSON")));
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let file = temp_config(".toml", "[batch\nmax_concurrent_files = 2\n");
        let result = load_from_file(file.path());

        assert!(matches!(result, Err(SiteCodeError::Config(msg)) if msg.contains("TOML")));
    }

    #[test]
    fn test_load_leaves_validation_to_the_caller() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_overrides();

        let file = temp_config(".toml", "[batch]\nmax_concurrent_files = 0\n");
        let mut config = load(Some(file.path().to_path_buf())).unwrap();
        assert!(matches!(config.validate(), Err(SiteCodeError::Config(_))));

        config.batch.max_concurrent_files = 4;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("output: {}", Path::new("sitecode.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_parse_config_defaults_to_json_without_extension() {
        let config = parse_config("{}", Path::new("sitecode")).unwrap();
        assert_eq!(config, Config::default());
    }
}
