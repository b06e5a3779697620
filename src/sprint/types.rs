use chrono::{DateTime, Utc};
use std::time::Duration;

/// One sprint attempt as captured by the device.
///
/// Peaks are derived from the samples when the value is built, so a
/// `SprintData` never carries a peak that disagrees with its samples unless
/// it was built through [`SprintData::with_peak_overrides`].
#[derive(Debug, Clone, PartialEq)]
pub struct SprintData {
    start_time: DateTime<Utc>,
    target_duration: Duration,
    baseline_hr: u32,
    hr_samples: Vec<f64>,
    cadence_samples: Vec<f64>,
    peak_hr: f64,
    peak_cadence: f64,
}

impl SprintData {
    /// Build a sprint from raw samples, deriving both peaks.
    ///
    /// Samples are kept exactly as given: chronological order is the
    /// caller's responsibility and the two streams need not line up.
    pub fn new(
        start_time: DateTime<Utc>,
        target_duration: Duration,
        baseline_hr: u32,
        hr_samples: Vec<f64>,
        cadence_samples: Vec<f64>,
    ) -> Self {
        let peak_hr = peak(&hr_samples);
        let peak_cadence = peak(&cadence_samples);
        Self {
            start_time,
            target_duration,
            baseline_hr,
            hr_samples,
            cadence_samples,
            peak_hr,
            peak_cadence,
        }
    }

    /// Replace the derived peaks with fixed values.
    ///
    /// Intended for tests and mocks that need a peak the samples don't
    /// show. Production callers should rely on [`SprintData::new`].
    pub fn with_peak_overrides(mut self, peak_hr: Option<f64>, peak_cadence: Option<f64>) -> Self {
        if let Some(hr) = peak_hr {
            self.peak_hr = hr;
        }
        if let Some(cadence) = peak_cadence {
            self.peak_cadence = cadence;
        }
        self
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn target_duration(&self) -> Duration {
        self.target_duration
    }

    pub fn baseline_hr(&self) -> u32 {
        self.baseline_hr
    }

    pub fn hr_samples(&self) -> &[f64] {
        &self.hr_samples
    }

    pub fn cadence_samples(&self) -> &[f64] {
        &self.cadence_samples
    }

    pub fn peak_hr(&self) -> f64 {
        self.peak_hr
    }

    pub fn peak_cadence(&self) -> f64 {
        self.peak_cadence
    }

    /// Mean cadence over the whole interval (0 when no samples)
    pub fn average_cadence(&self) -> f64 {
        mean(&self.cadence_samples)
    }
}

/// Largest finite sample, or 0 for an empty (or all-NaN) series.
pub fn peak(samples: &[f64]) -> f64 {
    samples
        .iter()
        .copied()
        .filter(|s| s.is_finite())
        .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |m| m.max(s))))
        .unwrap_or(0.0)
}

/// Arithmetic mean, or 0 for an empty series.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}
