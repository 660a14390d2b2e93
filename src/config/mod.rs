mod schema;
mod validation;

pub use schema::{Config, RangeConfig, ThemeMode, TimingConfig};
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/wellcoach/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("wellcoach"))
}

/// Get the default config file path (~/.config/wellcoach/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/wellcoach/config.yaml)
///
/// A missing file at the default path yields the built-in defaults. An
/// explicitly given path must exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config path does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config in {}", config_path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let temp_path = env::temp_dir().join("wellcoach_test_missing_config.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_config(Some(temp_path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_from_file() {
        let temp_path = env::temp_dir().join("wellcoach_test_config.yaml");
        fs::write(&temp_path, "timing:\n  disabled: true\ntheme: dark\n").unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert!(config.timing_disabled());
        assert_eq!(config.theme, ThemeMode::Dark);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_path = env::temp_dir().join("wellcoach_test_bad_config.yaml");
        fs::write(&temp_path, "timing: [unclosed\n").unwrap();

        let err = load_config(Some(temp_path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&temp_path);
    }
}
