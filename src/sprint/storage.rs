use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::types::SprintData;

/// On-disk form of a recorded sprint.
///
/// Example JSON:
/// ```json
/// {
///   "label": "tuesday-intervals-3",
///   "start_time": "2026-10-14T07:30:00Z",
///   "target_duration": "30s",
///   "baseline_hr": 118,
///   "hr_samples": [118, 124, 131, 140],
///   "cadence_samples": [150, 152, 171]
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SprintRecord {
    /// Display name; defaults to the file stem when absent
    #[serde(default)]
    pub label: Option<String>,

    pub start_time: DateTime<Utc>,

    /// Planned interval length in humantime form ("30s", "1m 30s")
    pub target_duration: String,

    pub baseline_hr: u32,

    #[serde(default)]
    pub hr_samples: Vec<f64>,

    #[serde(default)]
    pub cadence_samples: Vec<f64>,
}

impl SprintRecord {
    /// Convert into an immutable [`SprintData`], deriving the peaks.
    pub fn into_sprint_data(self) -> Result<SprintData> {
        let target_duration = humantime::parse_duration(self.target_duration.trim())
            .with_context(|| format!("Invalid target_duration '{}'", self.target_duration))?;

        Ok(SprintData::new(
            self.start_time,
            target_duration,
            self.baseline_hr,
            self.hr_samples,
            self.cadence_samples,
        ))
    }
}

/// A sprint read from disk, ready to validate.
#[derive(Debug, Clone)]
pub struct LoadedSprint {
    pub label: String,
    pub data: SprintData,
}

/// Load a sprint recording from a JSON or YAML file.
///
/// `.yaml` and `.yml` files are read as YAML; anything else as JSON.
pub fn load_sprint(path: &Path) -> Result<LoadedSprint> {
    if !path.exists() {
        anyhow::bail!("Sprint file not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sprint file at {}", path.display()))?;

    let record: SprintRecord = if is_yaml(path) {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse sprint: invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse sprint: invalid JSON in {}", path.display()))?
    };

    let label = record.label.clone().unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    });

    let data = record
        .into_sprint_data()
        .with_context(|| format!("Invalid sprint in {}", path.display()))?;

    Ok(LoadedSprint { label, data })
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::time::Duration;

    #[test]
    fn test_load_json_sprint() {
        let temp_path = env::temp_dir().join("sprint_verify_test_load.json");
        let json = r#"{
            "start_time": "2026-10-14T07:30:00Z",
            "target_duration": "30s",
            "baseline_hr": 118,
            "hr_samples": [118, 124, 131, 140],
            "cadence_samples": [150, 152, 171]
        }"#;
        std::fs::write(&temp_path, json).unwrap();

        let loaded = load_sprint(&temp_path).unwrap();
        assert_eq!(loaded.label, "sprint_verify_test_load");
        assert_eq!(loaded.data.baseline_hr(), 118);
        assert_eq!(loaded.data.target_duration(), Duration::from_secs(30));
        assert_eq!(loaded.data.peak_hr(), 140.0);
        assert_eq!(loaded.data.peak_cadence(), 171.0);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_yaml_sprint_with_label() {
        let temp_path = env::temp_dir().join("sprint_verify_test_load.yaml");
        let yaml = r#"
label: hill-repeat-2
start_time: "2026-10-14T07:30:00Z"
target_duration: "1m 30s"
baseline_hr: 120
hr_samples: [120, 130, 150]
"#;
        std::fs::write(&temp_path, yaml).unwrap();

        let loaded = load_sprint(&temp_path).unwrap();
        assert_eq!(loaded.label, "hill-repeat-2");
        assert_eq!(loaded.data.target_duration(), Duration::from_secs(90));
        assert!(loaded.data.cadence_samples().is_empty());

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_missing_file() {
        let temp_path = env::temp_dir().join("sprint_verify_test_missing.json");
        let _ = std::fs::remove_file(&temp_path);

        let err = load_sprint(&temp_path).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_duration() {
        let record = SprintRecord {
            label: None,
            start_time: Utc::now(),
            target_duration: "soon".to_string(),
            baseline_hr: 120,
            hr_samples: vec![],
            cadence_samples: vec![],
        };
        assert!(record.into_sprint_data().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{
            "start_time": "2026-10-14T07:30:00Z",
            "target_duration": "30s",
            "baseline_hr": 118,
            "peak_hr": 190
        }"#;
        let result: Result<SprintRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
