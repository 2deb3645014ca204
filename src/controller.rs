use crate::error::{SignalError, SignalResult};
use crate::types::{ControlInputs, ControlOutput, ControlState};

/// Adaptive signal-duration law with first-order exponential smoothing.
///
/// Each tick maps the current traffic/pedestrian densities and road
/// irregularity to raw green/red durations inside `[s_min, s_max]`, then
/// low-pass filters them against the previous tick's durations to damp
/// input volatility. Heavier traffic and rougher road both lengthen green
/// (slower negotiated speeds need more right-of-way); pedestrian pressure
/// shortens green and lengthens red.
pub struct SignalController {
    pub s_min: f64,
    pub s_max: f64,
    /// Traffic-density weight in the green term (and negative in red).
    pub traffic_weight: f64,
    /// Pedestrian-density weight in the red term (and negative in green).
    pub pedestrian_weight: f64,
    pub irregularity_weight_green: f64,
    pub irregularity_weight_red: f64,
    /// Smoothing factor in [0, 1): weight of the previous duration. Higher
    /// means slower adaptation.
    pub smoothing: f64,
}

impl Default for SignalController {
    fn default() -> Self {
        Self {
            s_min: 30.0,
            s_max: 120.0,
            traffic_weight: 0.8,
            pedestrian_weight: 0.5,
            irregularity_weight_green: 0.6,
            irregularity_weight_red: 0.4,
            smoothing: 0.8,
        }
    }
}

impl SignalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one control tick: compute the next green/red durations and store
    /// them back into `state` as the new previous values.
    ///
    /// Non-finite inputs are rejected with `InvalidInput`; the host loop
    /// should skip the tick and retry on the next one.
    pub fn step(
        &self,
        inputs: &ControlInputs,
        state: &mut ControlState,
    ) -> SignalResult<ControlOutput> {
        if !inputs.is_finite() {
            return Err(SignalError::InvalidInput(format!(
                "non-finite control inputs: traffic={} pedestrian={} irregularity={}",
                inputs.traffic_density, inputs.pedestrian_density, inputs.irregularity_index
            )));
        }

        let span = self.s_max - self.s_min;
        let raw_green = self.s_min
            + span
                * clamp01(
                    self.traffic_weight * inputs.traffic_density
                        - self.pedestrian_weight * inputs.pedestrian_density
                        + self.irregularity_weight_green * inputs.irregularity_index,
                );
        let raw_red = self.s_min
            + span
                * clamp01(
                    self.traffic_weight * inputs.pedestrian_density
                        - self.pedestrian_weight * inputs.traffic_density
                        + self.irregularity_weight_red * inputs.irregularity_index,
                );

        let green = round2(self.smoothing * state.prev_green + (1.0 - self.smoothing) * raw_green);
        let red = round2(self.smoothing * state.prev_red + (1.0 - self.smoothing) * raw_red);

        state.prev_green = green;
        state.prev_red = red;

        Ok(ControlOutput { green, red })
    }
}

/// Restrict a value to the closed interval [0, 1].
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

// Display-grade precision; the durations are published, not integrated.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
