use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ControlOutput;

/// Priority-ordered advisory tag summarizing the latest traffic/road state.
///
/// Exactly one tag applies per tick; road-safety concerns dominate over
/// traffic- or pedestrian-driven re-timing, so the conditions are checked
/// highest severity first and the first match wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryTag {
    PoorRoadCondition,
    HeavyTraffic,
    PedestrianPressure,
    Balanced,
}

/// Thresholds for the advisory cascade.
const ROUGH_ROAD_INDEX: f64 = 0.6;
const LONG_RED_SECS: f64 = 45.0;
const SHORT_GREEN_SECS: f64 = 30.0;

/// Classify the latest computed values into an advisory tag.
pub fn classify(irregularity_index: f64, output: &ControlOutput) -> AdvisoryTag {
    if irregularity_index > ROUGH_ROAD_INDEX {
        return AdvisoryTag::PoorRoadCondition;
    }
    if output.red > LONG_RED_SECS {
        return AdvisoryTag::HeavyTraffic;
    }
    if output.green < SHORT_GREEN_SECS {
        return AdvisoryTag::PedestrianPressure;
    }
    AdvisoryTag::Balanced
}

impl AdvisoryTag {
    pub fn message(&self) -> &'static str {
        match self {
            AdvisoryTag::PoorRoadCondition => "poor road condition, durations safety-adjusted",
            AdvisoryTag::HeavyTraffic => "heavy traffic, longer red needed",
            AdvisoryTag::PedestrianPressure => "more pedestrians, shorter green recommended",
            AdvisoryTag::Balanced => "balanced flow and road conditions",
        }
    }
}

impl fmt::Display for AdvisoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(green: f64, red: f64) -> ControlOutput {
        ControlOutput { green, red }
    }

    #[test]
    fn test_poor_road_wins_over_everything() {
        // red > 45 and green < 30 are both true; irregularity still wins.
        let tag = classify(0.75, &output(20.0, 50.0));
        assert_eq!(tag, AdvisoryTag::PoorRoadCondition);
    }

    #[test]
    fn test_heavy_traffic() {
        let tag = classify(0.3, &output(40.0, 50.0));
        assert_eq!(tag, AdvisoryTag::HeavyTraffic);
    }

    #[test]
    fn test_pedestrian_pressure() {
        let tag = classify(0.3, &output(25.0, 40.0));
        assert_eq!(tag, AdvisoryTag::PedestrianPressure);
    }

    #[test]
    fn test_balanced() {
        let tag = classify(0.3, &output(40.0, 40.0));
        assert_eq!(tag, AdvisoryTag::Balanced);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Boundary values do not trigger: the comparisons are strict.
        assert_eq!(classify(0.6, &output(45.0, 45.0)), AdvisoryTag::Balanced);
        assert_eq!(classify(0.6, &output(30.0, 45.0)), AdvisoryTag::Balanced);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AdvisoryTag::PoorRoadCondition.to_string(),
            "poor road condition, durations safety-adjusted"
        );
        assert_eq!(
            AdvisoryTag::Balanced.to_string(),
            "balanced flow and road conditions"
        );
    }
}
