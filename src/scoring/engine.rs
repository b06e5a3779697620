use serde::{Serialize, Serializer};
use std::time::Duration;

use super::config::ScoringConfig;
use super::factors::{cadence_score, clamp_score, hr_score, hrd_score, ComponentScore, SubScore};
use crate::sprint::SprintData;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubScoreBreakdown {
    pub label: String,  // "Heart rate", "Cadence", "HR rise rate"
    pub weight: f64,    // Weight in the composite
    pub score: f64,     // Sub-score in [0, 100]
    pub components: Vec<ComponentScore>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub sub_scores: Vec<SubScoreBreakdown>,
}

/// Verdict for one sprint attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub hr_score: f64,
    pub cadence_score: f64,
    pub hrd_score: f64,
    pub validation_score: f64,
    pub is_valid: bool,
    pub baseline_hr: u32,
    pub peak_hr: f64,
    pub peak_cadence: f64,
    pub average_cadence: f64,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
    pub breakdown: ScoreBreakdown,
}

/// Decides whether a sprint shows genuine sprint-level effort.
///
/// The validator owns nothing but its tunables, so one instance can be
/// shared freely across threads and called any number of times on the same
/// input with the same outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SprintValidator {
    config: ScoringConfig,
}

impl SprintValidator {
    /// Validator with the default tunables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with custom tunables. Run the config through
    /// [`validate_scoring`](super::validate_scoring) first; weights that
    /// don't sum to 1.0 skew the composite.
    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a sprint against the given estimated maximum heart rate.
    ///
    /// Never fails: empty or degenerate series score 0 for the affected
    /// sub-scores and the verdict follows from the composite.
    pub fn validate(&self, data: &SprintData, max_hr: u32) -> ValidationResult {
        let weights = self.config.weights;

        let hr = hr_score(data, max_hr, &self.config);
        let cadence = cadence_score(data, &self.config);
        let hrd = hrd_score(data, &self.config);

        let validation_score = clamp_score(weights.combine(hr.score, cadence.score, hrd.score));
        let is_valid = validation_score >= self.config.pass_threshold;

        ValidationResult {
            hr_score: hr.score,
            cadence_score: cadence.score,
            hrd_score: hrd.score,
            validation_score,
            is_valid,
            baseline_hr: data.baseline_hr(),
            peak_hr: data.peak_hr(),
            peak_cadence: data.peak_cadence(),
            average_cadence: data.average_cadence(),
            duration: data.target_duration(),
            breakdown: ScoreBreakdown {
                sub_scores: vec![
                    sub_breakdown("Heart rate", weights.heart_rate, hr),
                    sub_breakdown("Cadence", weights.cadence, cadence),
                    sub_breakdown("HR rise rate", weights.hrd, hrd),
                ],
            },
        }
    }
}

fn sub_breakdown(label: &str, weight: f64, sub: SubScore) -> SubScoreBreakdown {
    SubScoreBreakdown {
        label: label.to_string(),
        weight,
        score: sub.score,
        components: sub.components,
    }
}

fn serialize_duration<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&humantime::format_duration(*duration).to_string())
}
