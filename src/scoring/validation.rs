use super::config::ScoringConfig;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Weights: each non-negative, together exactly one
    let weights = &config.weights;
    for (name, value) in [
        ("heart_rate", weights.heart_rate),
        ("cadence", weights.cadence),
        ("hrd", weights.hrd),
    ] {
        if value < 0.0 || value.is_nan() {
            errors.push(format!("scoring.weights.{}: must be non-negative", name));
        }
    }
    if (weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE || weights.sum().is_nan() {
        errors.push(format!(
            "scoring.weights: must sum to 1.0 (got {})",
            weights.sum()
        ));
    }

    if !(0.0..=100.0).contains(&config.pass_threshold) {
        errors.push(format!(
            "scoring.pass_threshold: must be between 0 and 100 (got {})",
            config.pass_threshold
        ));
    }

    for (name, value) in [
        ("hr_increase_target_bpm", config.hr_increase_target_bpm),
        ("cadence_increase_target", config.cadence_increase_target),
        ("cadence_target_spm", config.cadence_target_spm),
        ("hrd_target_bpm_per_sample", config.hrd_target_bpm_per_sample),
    ] {
        if value <= 0.0 || !value.is_finite() {
            errors.push(format!("scoring.{}: must be positive (got {})", name, value));
        }
    }

    if config.elevated_offset_bpm < 0.0 || !config.elevated_offset_bpm.is_finite() {
        errors.push(format!(
            "scoring.elevated_offset_bpm: must be non-negative (got {})",
            config.elevated_offset_bpm
        ));
    }

    if config.zone_fraction.is_nan() || config.zone_fraction <= 0.0 || config.zone_fraction > 1.0 {
        errors.push(format!(
            "scoring.zone_fraction: must be in (0, 1] (got {})",
            config.zone_fraction
        ));
    }

    if !(0.0..=1.0).contains(&config.elevated_time_floor) {
        errors.push(format!(
            "scoring.elevated_time_floor: must be in [0, 1] (got {})",
            config.elevated_time_floor
        ));
    }

    if config.cadence_baseline_samples == 0 {
        errors.push("scoring.cadence_baseline_samples: must be at least 1".to_string());
    }

    // A derivative needs at least one pair of samples
    if config.hrd_min_samples < 2 {
        errors.push(format!(
            "scoring.hrd_min_samples: must be at least 2 (got {})",
            config.hrd_min_samples
        ));
    }
    if config.hrd_window < config.hrd_min_samples {
        errors.push(format!(
            "scoring.hrd_window: must be at least hrd_min_samples ({} < {})",
            config.hrd_window, config.hrd_min_samples
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoreWeights;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let config = ScoringConfig {
            weights: ScoreWeights {
                heart_rate: 0.5,
                cadence: 0.5,
                hrd: 0.5,
            },
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.weights"));
    }

    #[test]
    fn test_negative_weight() {
        let config = ScoringConfig {
            weights: ScoreWeights {
                heart_rate: 1.2,
                cadence: -0.2,
                hrd: 0.0,
            },
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.weights.cadence"));
    }

    #[test]
    fn test_pass_threshold_range() {
        let config = ScoringConfig {
            pass_threshold: 120.0,
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("pass_threshold"));
    }

    #[test]
    fn test_zero_target_rejected() {
        let config = ScoringConfig {
            cadence_target_spm: 0.0,
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.cadence_target_spm"));
    }

    #[test]
    fn test_nan_target_rejected() {
        let config = ScoringConfig {
            hrd_target_bpm_per_sample: f64::NAN,
            ..ScoringConfig::default()
        };
        assert!(validate_scoring(&config).is_err());
    }

    #[test]
    fn test_zone_fraction_bounds() {
        let config = ScoringConfig {
            zone_fraction: 1.5,
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("zone_fraction"));
    }

    #[test]
    fn test_hrd_window_smaller_than_minimum() {
        let config = ScoringConfig {
            hrd_window: 2,
            hrd_min_samples: 3,
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.hrd_window"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            pass_threshold: -1.0,           // Error 1
            elevated_time_floor: 2.0,       // Error 2
            cadence_baseline_samples: 0,    // Error 3
            hrd_min_samples: 1,             // Error 4
            ..ScoringConfig::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
