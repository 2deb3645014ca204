//! Road-surface roughness estimation from vertical acceleration and yaw rate.
//!
//! Pipeline per segment: stable time sort, sampling-rate estimation from the
//! median timestamp delta, centered edge-extended sliding-window RMS on each
//! channel, fixed weighted combine, population z-score normalization, and an
//! 85th-percentile summary (sensitive to pothole peaks without being pinned
//! to the single worst sample).

use ndarray::Array1;

use crate::error::{SignalError, SignalResult};
use crate::segment::Segment;

/// Near-zero standard deviation guard for z-score normalization.
const VARIANCE_EPSILON: f64 = 1e-6;

/// Tunables for the roughness pipeline.
///
/// Defaults match mobile IMU trips sampled around 50 Hz with a 1-second
/// analysis window.
#[derive(Debug, Clone)]
pub struct RoughnessConfig {
    /// RMS window length in seconds. Typical: 1.0–2.0.
    pub window_seconds: f64,
    /// Weight of the vertical-acceleration RMS in the combined signal.
    pub accel_weight: f64,
    /// Weight of the |yaw rate| RMS in the combined signal.
    pub gyro_weight: f64,
    /// Percentile of the z-score sequence reported as the segment index.
    pub percentile: f64,
    /// Sampling rate assumed when timestamps are degenerate (all duplicates).
    pub fallback_rate_hz: f64,
}

impl Default for RoughnessConfig {
    fn default() -> Self {
        Self {
            window_seconds: 1.0,
            accel_weight: 0.7,
            gyro_weight: 0.3,
            percentile: 85.0,
            fallback_rate_hz: 50.0,
        }
    }
}

/// Segment roughness result plus the derived pipeline parameters.
#[derive(Debug, Clone, Copy)]
pub struct RoughnessReport {
    /// Percentile z-score of the combined RMS signal. Unbounded, centered
    /// near 0 for an average-quality segment.
    pub index: f64,
    pub sample_rate_hz: f64,
    pub window_samples: usize,
}

/// Estimate the roughness index of a segment.
///
/// Returns `InsufficientData` on segments with fewer than 2 samples; a
/// sampling rate cannot be estimated from a single timestamp. Duplicate
/// timestamps are tolerated (the fallback rate applies when the median delta
/// collapses to zero).
pub fn estimate_roughness(segment: &Segment, config: &RoughnessConfig) -> SignalResult<f64> {
    analyze_segment(segment, config).map(|r| r.index)
}

/// Full pipeline run, keeping the derived sample rate and window for logging.
pub fn analyze_segment(
    segment: &Segment,
    config: &RoughnessConfig,
) -> SignalResult<RoughnessReport> {
    let mut samples = segment.samples().to_vec();
    if samples.len() < 2 {
        return Err(SignalError::InsufficientData);
    }

    // Stable sort: duplicate timestamps keep their original relative order.
    samples.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let deltas: Vec<f64> = samples
        .windows(2)
        .map(|w| w[1].timestamp - w[0].timestamp)
        .collect();
    let median_dt = median(&deltas);
    let sample_rate_hz = if median_dt.is_finite() && median_dt > 0.0 {
        1.0 / median_dt
    } else {
        config.fallback_rate_hz
    };

    let window_samples =
        ((config.window_seconds * sample_rate_hz).round_ties_even() as usize).max(3);

    let accel = Array1::from_iter(samples.iter().map(|s| s.vertical_accel));
    let gyro = Array1::from_iter(samples.iter().map(|s| s.yaw_rate.abs()));

    let accel_rms = sliding_rms(&accel, window_samples);
    let gyro_rms = sliding_rms(&gyro, window_samples);
    let raw = &accel_rms * config.accel_weight + &gyro_rms * config.gyro_weight;

    // Population z-score over the whole segment; flat segments get sigma = 1
    // so the index degrades to 0 instead of blowing up.
    let mean = raw.mean().unwrap_or(0.0);
    let variance = raw.mapv(|v| (v - mean) * (v - mean)).mean().unwrap_or(0.0);
    let std = variance.sqrt();
    let sigma = if std > VARIANCE_EPSILON { std } else { 1.0 };
    let z = raw.mapv(|v| (v - mean) / sigma);

    let index = percentile(z.as_slice().unwrap_or(&[]), config.percentile);

    Ok(RoughnessReport {
        index,
        sample_rate_hz,
        window_samples,
    })
}

/// Centered sliding-window RMS with edge extension: boundary windows clamp
/// indices to the nearest interior sample rather than shrinking or
/// zero-padding. For even windows the center sits at `size / 2`, so the
/// window spans `size / 2` samples back and `size - 1 - size / 2` forward.
fn sliding_rms(signal: &Array1<f64>, window: usize) -> Array1<f64> {
    let n = signal.len();
    let squared = signal.mapv(|v| v * v);
    let left = (window / 2) as isize;
    let right = window as isize - 1 - left;

    let mut out = Array1::zeros(n);
    for i in 0..n {
        let mut acc = 0.0;
        for offset in -left..=right {
            let j = (i as isize + offset).clamp(0, n as isize - 1) as usize;
            acc += squared[j];
        }
        out[i] = (acc / window as f64).sqrt();
    }
    out
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Linear-interpolation percentile over an unsorted slice.
fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = (pct / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SensorSample;
    use approx::assert_relative_eq;

    fn segment_from(accel: &[f64], dt: f64) -> Segment {
        let samples = accel
            .iter()
            .enumerate()
            .map(|(i, &a)| SensorSample {
                timestamp: i as f64 * dt,
                vertical_accel: a,
                yaw_rate: 0.0,
            })
            .collect();
        Segment::new(samples)
    }

    #[test]
    fn test_empty_segment_is_insufficient() {
        let seg = Segment::new(vec![]);
        let err = estimate_roughness(&seg, &RoughnessConfig::default()).unwrap_err();
        assert_eq!(err, SignalError::InsufficientData);
    }

    #[test]
    fn test_single_sample_is_insufficient() {
        let seg = segment_from(&[1.0], 0.02);
        let err = estimate_roughness(&seg, &RoughnessConfig::default()).unwrap_err();
        assert_eq!(err, SignalError::InsufficientData);
    }

    #[test]
    fn test_sample_rate_from_median_delta() {
        let seg = segment_from(&[0.1; 200], 0.02); // 50 Hz spacing
        let report = analyze_segment(&seg, &RoughnessConfig::default()).unwrap();
        assert_relative_eq!(report.sample_rate_hz, 50.0, epsilon = 1e-9);
        assert_eq!(report.window_samples, 50);
    }

    #[test]
    fn test_window_rounds_ties_to_even() {
        // 0.5625 s at 8 Hz is exactly 4.5 samples; ties go to the even
        // neighbor, so the window is 4 samples, not 5.
        let seg = segment_from(&[0.1; 40], 0.125);
        let config = RoughnessConfig {
            window_seconds: 0.5625,
            ..RoughnessConfig::default()
        };
        let report = analyze_segment(&seg, &config).unwrap();
        assert_eq!(report.window_samples, 4);
    }

    #[test]
    fn test_duplicate_timestamps_use_fallback_rate() {
        let samples = vec![
            SensorSample {
                timestamp: 5.0,
                vertical_accel: 0.2,
                yaw_rate: 0.0,
            };
            20
        ];
        let report = analyze_segment(&Segment::new(samples), &RoughnessConfig::default()).unwrap();
        assert_relative_eq!(report.sample_rate_hz, 50.0, epsilon = 1e-9);
        assert!(report.index.is_finite());
    }

    #[test]
    fn test_constant_signal_hits_epsilon_branch() {
        // Flat signal: RMS is constant, std collapses, sigma substitution
        // keeps every z at exactly 0.
        let seg = segment_from(&[0.5; 100], 0.02);
        let index = estimate_roughness(&seg, &RoughnessConfig::default()).unwrap();
        assert!(index.is_finite());
        assert_relative_eq!(index, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_spike_index_matches_hand_computation() {
        // 10 Hz spacing, 0.3 s window -> 3 samples. Spike of 3.0 mid-signal:
        // accel RMS = [0, sqrt(3), sqrt(3), sqrt(3), 0], and the 85th
        // percentile z-score lands on the spiked plateau at ~0.81650.
        let seg = segment_from(&[0.0, 0.0, 3.0, 0.0, 0.0], 0.1);
        let config = RoughnessConfig {
            window_seconds: 0.3,
            ..RoughnessConfig::default()
        };
        let report = analyze_segment(&seg, &config).unwrap();
        assert_eq!(report.window_samples, 3);
        assert_relative_eq!(report.index, 0.816_496_580_927_726, epsilon = 1e-9);
    }

    #[test]
    fn test_rough_segment_scores_above_smooth_segment() {
        // Potholes must be sparser than the RMS window (50 samples at the
        // default 1 s / 50 Hz): with spikes only at two spots in 500 samples,
        // roughly 20% of the centered windows see a spike, so the elevated
        // plateau sits well above the segment mean. Spikes in every window
        // would flatten the RMS sequence and the z-scores with it.
        let smooth: Vec<f64> = (0..500).map(|i| 0.05 * ((i as f64) * 0.3).sin()).collect();
        let rough: Vec<f64> = (0..500)
            .map(|i| {
                let base = 0.05 * ((i as f64) * 0.3).sin();
                if i == 125 || i == 375 {
                    base + 4.0
                } else {
                    base
                }
            })
            .collect();
        let config = RoughnessConfig::default();
        let smooth_idx = estimate_roughness(&segment_from(&smooth, 0.02), &config).unwrap();
        let rough_idx = estimate_roughness(&segment_from(&rough, 0.02), &config).unwrap();
        assert!(rough_idx > smooth_idx);
    }

    #[test]
    fn test_unsorted_samples_are_time_ordered_first() {
        let mut samples: Vec<SensorSample> = (0..50)
            .map(|i| SensorSample {
                timestamp: i as f64 * 0.02,
                vertical_accel: if i == 25 { 2.0 } else { 0.1 },
                yaw_rate: 0.01,
            })
            .collect();
        let sorted_index =
            estimate_roughness(&Segment::new(samples.clone()), &RoughnessConfig::default())
                .unwrap();
        samples.reverse();
        let reversed_index =
            estimate_roughness(&Segment::new(samples), &RoughnessConfig::default()).unwrap();
        assert_relative_eq!(sorted_index, reversed_index, epsilon = 1e-12);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(percentile(&values, 0.0), 1.0);
        assert_relative_eq!(percentile(&values, 100.0), 5.0);
        assert_relative_eq!(percentile(&values, 50.0), 3.0);
        assert_relative_eq!(percentile(&values, 85.0), 4.4, epsilon = 1e-12);
    }

    #[test]
    fn test_sliding_rms_edge_extension() {
        let signal = Array1::from(vec![2.0, 2.0, 2.0, 2.0]);
        let rms = sliding_rms(&signal, 3);
        // Constant signal: edge extension keeps boundary windows full.
        for v in rms.iter() {
            assert_relative_eq!(*v, 2.0, epsilon = 1e-12);
        }
    }
}
