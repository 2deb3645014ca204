use serde::{Deserialize, Serialize};

/// One motion-sensor sample along a road stretch.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SensorSample {
    pub timestamp: f64,
    pub vertical_accel: f64,
    pub yaw_rate: f64,
}

/// One recorded trip row: a sensor sample plus the GPS fix it was taken at.
///
/// Field names match the trip-log contract (`accelerometerZ`, `gyroZ`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TripPoint {
    pub timestamp: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "accelerometerZ")]
    pub vertical_accel: f64,
    #[serde(rename = "gyroZ")]
    pub yaw_rate: f64,
}

impl TripPoint {
    pub fn sample(&self) -> SensorSample {
        SensorSample {
            timestamp: self.timestamp,
            vertical_accel: self.vertical_accel,
            yaw_rate: self.yaw_rate,
        }
    }
}

/// Per-tick inputs to the signal controller.
///
/// Densities are expected in [0, 1]; the irregularity index is typically in
/// [0, 1] but is not hard-clamped.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ControlInputs {
    pub traffic_density: f64,
    pub pedestrian_density: f64,
    pub irregularity_index: f64,
}

impl ControlInputs {
    pub fn is_finite(&self) -> bool {
        self.traffic_density.is_finite()
            && self.pedestrian_density.is_finite()
            && self.irregularity_index.is_finite()
    }
}

/// Per-tick output: suggested signal durations in seconds, 2-decimal precision.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlOutput {
    pub green: f64,
    pub red: f64,
}

/// Remembered durations from the previous tick.
///
/// Single-owner state: the host loop creates one at startup and passes it by
/// exclusive reference into every `step`. One instance per intersection if the
/// loop is ever replicated.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ControlState {
    pub prev_green: f64,
    pub prev_red: f64,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            prev_green: 30.0,
            prev_red: 30.0,
        }
    }
}
