use serde::Serialize;

use super::config::ScoringConfig;
use crate::sprint::{mean, SprintData};

/// One scored component of a sub-score, kept for explaining a verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentScore {
    pub label: String,       // e.g. "HR increase", "Peak cadence"
    pub description: String, // e.g. "+55 BPM over baseline (target 20)"
    pub value: f64,          // Credit in [0, 1]
}

/// A sub-score in [0, 100] together with the components behind it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubScore {
    pub score: f64,
    pub components: Vec<ComponentScore>,
}

impl SubScore {
    fn zero(reason: &str, label: &str) -> Self {
        Self {
            score: 0.0,
            components: vec![ComponentScore {
                label: label.to_string(),
                description: reason.to_string(),
                value: 0.0,
            }],
        }
    }
}

/// Heart-rate sub-score: rise over baseline and reach into the target zone,
/// scaled by how much of the interval was spent elevated.
pub fn hr_score(data: &SprintData, max_hr: u32, config: &ScoringConfig) -> SubScore {
    let samples = data.hr_samples();
    if samples.is_empty() {
        return SubScore::zero("no heart-rate samples", "Heart rate");
    }

    let baseline = data.baseline_hr() as f64;
    let peak = data.peak_hr();
    let rise = peak - baseline;

    let increase = unit(rise / config.hr_increase_target_bpm);
    let target = config.zone_fraction * max_hr as f64;
    let zone = zone_credit(peak, target);
    let fraction = elevated_fraction(samples, baseline + config.elevated_offset_bpm);

    let base = (increase + zone) / 2.0 * 100.0;
    let floor = config.elevated_time_floor;
    let score = clamp_score(base * (floor + (1.0 - floor) * fraction));

    SubScore {
        score,
        components: vec![
            ComponentScore {
                label: "HR increase".to_string(),
                description: format!(
                    "{:+.0} BPM over baseline (target {:.0})",
                    rise, config.hr_increase_target_bpm
                ),
                value: increase,
            },
            ComponentScore {
                label: "Target zone".to_string(),
                description: format!("peak {:.0} BPM vs zone {:.0} BPM", peak, target),
                value: zone,
            },
            ComponentScore {
                label: "Time elevated".to_string(),
                description: format!(
                    "{:.0}% of samples at or above {:.0} BPM",
                    fraction * 100.0,
                    baseline + config.elevated_offset_bpm
                ),
                value: fraction,
            },
        ],
    }
}

/// Cadence sub-score: relative rise over the warm-up average plus reach
/// toward the target cadence, 50 points each.
pub fn cadence_score(data: &SprintData, config: &ScoringConfig) -> SubScore {
    let samples = data.cadence_samples();
    if samples.is_empty() {
        return SubScore::zero("no cadence samples", "Cadence");
    }

    let lead = config.cadence_baseline_samples.min(samples.len());
    let pre_cadence = mean(&samples[..lead]);
    let peak = data.peak_cadence();

    // Zero warm-up cadence leaves nothing to measure the rise against
    let (increase, increase_desc) = if pre_cadence > 0.0 {
        let relative = (peak - pre_cadence) / pre_cadence;
        (
            unit(relative / config.cadence_increase_target),
            format!(
                "{:+.0}% over warm-up {:.0} SPM (target {:.0}%)",
                relative * 100.0,
                pre_cadence,
                config.cadence_increase_target * 100.0
            ),
        )
    } else {
        (0.0, "no warm-up cadence, skipped".to_string())
    };

    let peak_credit = unit(peak / config.cadence_target_spm);
    let score = clamp_score(50.0 * increase + 50.0 * peak_credit);

    SubScore {
        score,
        components: vec![
            ComponentScore {
                label: "Cadence increase".to_string(),
                description: increase_desc,
                value: increase,
            },
            ComponentScore {
                label: "Peak cadence".to_string(),
                description: format!(
                    "peak {:.0} SPM (target {:.0})",
                    peak, config.cadence_target_spm
                ),
                value: peak_credit,
            },
        ],
    }
}

/// Heart-rate derivative sub-score: steepest rise between consecutive
/// samples within the leading window.
pub fn hrd_score(data: &SprintData, config: &ScoringConfig) -> SubScore {
    let samples = data.hr_samples();
    let window = &samples[..config.hrd_window.min(samples.len())];
    if window.len() < config.hrd_min_samples {
        return SubScore::zero(
            &format!(
                "{} samples in window, need {}",
                window.len(),
                config.hrd_min_samples
            ),
            "HR rise rate",
        );
    }

    let rise = max_rise(window).unwrap_or(0.0);
    let credit = unit(rise / config.hrd_target_bpm_per_sample);

    SubScore {
        score: clamp_score(credit * 100.0),
        components: vec![ComponentScore {
            label: "HR rise rate".to_string(),
            description: format!(
                "steepest rise {:+.1} BPM/sample over first {} (target {:.1})",
                rise,
                window.len(),
                config.hrd_target_bpm_per_sample
            ),
            value: credit,
        }],
    }
}

/// Credit for reaching the target zone: full at or above `target`, linear
/// below it. A non-positive target can't be reached meaningfully.
pub fn zone_credit(peak: f64, target: f64) -> f64 {
    if target <= 0.0 || target.is_nan() {
        0.0
    } else if peak >= target {
        1.0
    } else {
        unit(peak / target)
    }
}

/// Share of samples at or above `threshold` (0 when empty).
pub fn elevated_fraction(samples: &[f64], threshold: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let elevated = samples.iter().filter(|&&s| s >= threshold).count();
    elevated as f64 / samples.len() as f64
}

/// Largest difference between consecutive samples, if there are at least two.
pub fn max_rise(samples: &[f64]) -> Option<f64> {
    samples
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| !d.is_nan())
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |m| m.max(d))))
}

/// Clamp a credit to [0, 1]; NaN counts as no credit.
pub fn unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Clamp a score to [0, 100]; NaN counts as zero.
pub fn clamp_score(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 100.0)
    }
}
