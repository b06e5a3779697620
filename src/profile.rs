use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Age-predicted maximum heart rate: `220 - age`.
pub fn estimate_max_hr(age: u32) -> u32 {
    220u32.saturating_sub(age)
}

/// Athlete profile section of the config file.
///
/// Either field may be set; an explicit `max_hr` wins over `age`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    #[serde(default)]
    pub age: Option<u32>,

    #[serde(default)]
    pub max_hr: Option<u32>,
}

/// Where the max HR used for a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxHrSource {
    Flag(u32),
    AgeFlag { age: u32, max_hr: u32 },
    Config(u32),
    ConfigAge { age: u32, max_hr: u32 },
}

impl MaxHrSource {
    pub fn max_hr(&self) -> u32 {
        match self {
            MaxHrSource::Flag(hr) | MaxHrSource::Config(hr) => *hr,
            MaxHrSource::AgeFlag { max_hr, .. } | MaxHrSource::ConfigAge { max_hr, .. } => *max_hr,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            MaxHrSource::Flag(hr) => format!("{} BPM (--max-hr)", hr),
            MaxHrSource::AgeFlag { age, max_hr } => format!("{} BPM (220 - age {}, --age)", max_hr, age),
            MaxHrSource::Config(hr) => format!("{} BPM (profile.max_hr)", hr),
            MaxHrSource::ConfigAge { age, max_hr } => {
                format!("{} BPM (220 - age {}, profile.age)", max_hr, age)
            }
        }
    }
}

/// Pick the max HR for a run. Command-line values beat the config file, and
/// within each an explicit max HR beats an age estimate.
///
/// Returns `Ok(None)` when nothing is configured, and an error when the
/// chosen source yields a max HR of 0 (e.g. `--age 230`).
pub fn resolve_max_hr(
    flag_max_hr: Option<u32>,
    flag_age: Option<u32>,
    profile: Option<&ProfileConfig>,
) -> Result<Option<MaxHrSource>> {
    let source = pick_source(flag_max_hr, flag_age, profile);
    if let Some(source) = source {
        if source.max_hr() == 0 {
            anyhow::bail!(
                "Max HR must be greater than 0 (got {})",
                source.describe()
            );
        }
    }
    Ok(source)
}

fn pick_source(
    flag_max_hr: Option<u32>,
    flag_age: Option<u32>,
    profile: Option<&ProfileConfig>,
) -> Option<MaxHrSource> {
    if let Some(hr) = flag_max_hr {
        return Some(MaxHrSource::Flag(hr));
    }
    if let Some(age) = flag_age {
        return Some(MaxHrSource::AgeFlag {
            age,
            max_hr: estimate_max_hr(age),
        });
    }
    let profile = profile?;
    if let Some(hr) = profile.max_hr {
        return Some(MaxHrSource::Config(hr));
    }
    profile.age.map(|age| MaxHrSource::ConfigAge {
        age,
        max_hr: estimate_max_hr(age),
    })
}

/// Hint printed when no max HR is available, naming the config file in use.
pub fn missing_profile_hint(config_path: &Path) -> String {
    format!(
        "Pass --max-hr or --age, or add a profile to {}:\n  profile:\n    age: 30",
        config_path.display()
    )
}
