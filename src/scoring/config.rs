use serde::{Deserialize, Serialize};

/// Weight of the heart-rate sub-score in the composite.
pub const HR_WEIGHT: f64 = 0.50;
/// Weight of the cadence sub-score in the composite.
pub const CADENCE_WEIGHT: f64 = 0.35;
/// Weight of the heart-rate derivative sub-score in the composite.
pub const HRD_WEIGHT: f64 = 0.15;

/// Composite score a sprint must reach to count.
pub const PASS_THRESHOLD: f64 = 60.0;

/// Rise over baseline (BPM) that earns full increase credit.
pub const HR_INCREASE_TARGET_BPM: f64 = 20.0;
/// Share of max HR that defines the target zone.
pub const ZONE_FRACTION: f64 = 0.80;
/// Offset over baseline (BPM) that counts as elevated.
pub const ELEVATED_OFFSET_BPM: f64 = 10.0;
/// Multiplier applied to the HR base score when no sample is elevated.
pub const ELEVATED_TIME_FLOOR: f64 = 0.5;

/// Relative cadence rise over the warm-up average that earns full credit.
pub const CADENCE_INCREASE_TARGET: f64 = 0.15;
/// Peak cadence (steps/min) that earns full peak credit.
pub const CADENCE_TARGET_SPM: f64 = 160.0;
/// Leading cadence samples averaged into the warm-up cadence.
pub const CADENCE_BASELINE_SAMPLES: usize = 3;

/// Leading HR samples considered for the derivative.
pub const HRD_WINDOW: usize = 10;
/// Fewest HR samples that yield a derivative score.
pub const HRD_MIN_SAMPLES: usize = 3;
/// Rise per sample interval (BPM) that earns full derivative credit.
pub const HRD_TARGET_BPM_PER_SAMPLE: f64 = 3.0;

/// Tunables for sprint effort scoring.
///
/// Every field has a default, so a config file only needs to name what it
/// changes. Example YAML:
/// ```yaml
/// scoring:
///   pass_threshold: 65
///   weights:
///     heart_rate: 0.5
///     cadence: 0.3
///     hrd: 0.2
///   cadence_target_spm: 170
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Sub-score weights; must sum to 1.0
    pub weights: ScoreWeights,

    /// Composite score at or above which a sprint is valid
    pub pass_threshold: f64,

    pub hr_increase_target_bpm: f64,
    pub zone_fraction: f64,
    pub elevated_offset_bpm: f64,
    pub elevated_time_floor: f64,

    pub cadence_increase_target: f64,
    pub cadence_target_spm: f64,
    pub cadence_baseline_samples: usize,

    pub hrd_window: usize,
    pub hrd_min_samples: usize,
    pub hrd_target_bpm_per_sample: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            pass_threshold: PASS_THRESHOLD,
            hr_increase_target_bpm: HR_INCREASE_TARGET_BPM,
            zone_fraction: ZONE_FRACTION,
            elevated_offset_bpm: ELEVATED_OFFSET_BPM,
            elevated_time_floor: ELEVATED_TIME_FLOOR,
            cadence_increase_target: CADENCE_INCREASE_TARGET,
            cadence_target_spm: CADENCE_TARGET_SPM,
            cadence_baseline_samples: CADENCE_BASELINE_SAMPLES,
            hrd_window: HRD_WINDOW,
            hrd_min_samples: HRD_MIN_SAMPLES,
            hrd_target_bpm_per_sample: HRD_TARGET_BPM_PER_SAMPLE,
        }
    }
}

/// Composite weights for the three sub-scores.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    pub heart_rate: f64,
    pub cadence: f64,
    pub hrd: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            heart_rate: HR_WEIGHT,
            cadence: CADENCE_WEIGHT,
            hrd: HRD_WEIGHT,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.heart_rate + self.cadence + self.hrd
    }

    /// Weighted composite of the three sub-scores.
    pub fn combine(&self, hr: f64, cadence: f64, hrd: f64) -> f64 {
        self.heart_rate * hr + self.cadence * cadence + self.hrd * hrd
    }
}
