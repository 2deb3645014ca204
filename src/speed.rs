/// Recommended-speed law: a bounded linear reduction from the roughness index.
/// Vehicle-agnostic; the base speed is the posted limit of the segment.
const BASE_SPEED_KMH: f64 = 70.0;
const REDUCTION_PER_SD: f64 = 0.11; // speed fraction shed per roughness std-dev
const MIN_FRACTION: f64 = 0.3; // never drop below 30% of base

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedAdvice {
    pub multiplier: f64,
    pub speed_kmh: f64,
}

/// Map a roughness index to a recommended speed.
///
/// `multiplier = max(0.3, 1 - 0.11 * index)`, monotonically non-increasing in
/// the index and floored so the recommendation never falls below 21 km/h.
/// Pure function; the caller guarantees a finite index.
pub fn recommend_speed(roughness_index: f64) -> SpeedAdvice {
    let multiplier = (1.0 - REDUCTION_PER_SD * roughness_index).max(MIN_FRACTION);
    let speed_kmh = (BASE_SPEED_KMH * multiplier * 100.0).round() / 100.0;

    SpeedAdvice {
        multiplier,
        speed_kmh,
    }
}
