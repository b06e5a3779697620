pub mod init;
mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/sprint-verify/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("sprint-verify")
}

/// Get the default config file path (~/.config/sprint-verify/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/sprint-verify/config.yaml)
///
/// A missing file at the default path is not an error: every section has
/// defaults and the max HR can come from the command line. A missing file
/// at an explicitly given path is.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Save configuration as YAML atomically
///
/// Creates parent directories as needed. The file is either fully written
/// or left untouched.
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileConfig;
    use crate::scoring::ScoringConfig;
    use std::env;

    #[test]
    fn test_explicit_missing_path_is_error() {
        let temp_path = env::temp_dir().join("sprint_verify_test_missing_config.yaml");
        let _ = fs::remove_file(&temp_path);

        assert!(load_config(Some(temp_path)).is_err());
    }

    #[test]
    fn test_parse_full_config() {
        let temp_path = env::temp_dir().join("sprint_verify_test_full_config.yaml");
        let yaml = r#"
profile:
  age: 34
scoring:
  pass_threshold: 65
  weights:
    heart_rate: 0.6
    cadence: 0.3
    hrd: 0.1
"#;
        fs::write(&temp_path, yaml).unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.profile.unwrap().age, Some(34));
        let scoring = config.scoring.unwrap();
        assert_eq!(scoring.pass_threshold, 65.0);
        assert_eq!(scoring.weights.heart_rate, 0.6);
        assert_eq!(scoring.cadence_target_spm, 160.0);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let temp_path = env::temp_dir().join("sprint_verify_test_bad_config.yaml");
        fs::write(&temp_path, "profile: [not, a, map").unwrap();

        let err = load_config(Some(temp_path.clone())).unwrap_err();
        assert!(format!("{:#}", err).contains("sprint_verify_test_bad_config.yaml"));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = env::temp_dir().join("sprint_verify_test_save");
        let temp_path = dir.join("config.yaml");
        let _ = fs::remove_file(&temp_path);

        let config = Config {
            profile: Some(ProfileConfig {
                age: None,
                max_hr: Some(188),
            }),
            scoring: Some(ScoringConfig::default()),
        };
        save_config(&temp_path, &config).unwrap();

        let loaded = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(&dir);
    }
}
