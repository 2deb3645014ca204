use geo::Rect;

use crate::types::{SensorSample, TripPoint};

/// A geographically-bounded, time-orderable slice of motion-sensor samples
/// representing one road stretch.
#[derive(Clone, Debug, Default)]
pub struct Segment {
    samples: Vec<SensorSample>,
}

impl Segment {
    pub fn new(samples: Vec<SensorSample>) -> Self {
        Self { samples }
    }

    /// Select the samples of `trip` that fall inside `bounds` (x = longitude,
    /// y = latitude, boundary inclusive). If no point falls inside the box the
    /// whole trip is used as the fallback segment, so the result is non-empty
    /// whenever the trip is.
    pub fn select(trip: &[TripPoint], bounds: Rect<f64>) -> Self {
        let samples: Vec<SensorSample> = trip
            .iter()
            .filter(|p| contains_inclusive(&bounds, p.longitude, p.latitude))
            .map(|p| p.sample())
            .collect();

        if samples.is_empty() {
            Self {
                samples: trip.iter().map(|p| p.sample()).collect(),
            }
        } else {
            Self { samples }
        }
    }

    pub fn samples(&self) -> &[SensorSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// geo's Contains excludes the rectangle boundary; trip selection is inclusive.
fn contains_inclusive(rect: &Rect<f64>, x: f64, y: f64) -> bool {
    let min = rect.min();
    let max = rect.max();
    x >= min.x && x <= max.x && y >= min.y && y <= max.y
}
