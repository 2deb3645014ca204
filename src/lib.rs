//! Adaptive traffic-signal timing from live densities and road-sensor data.
//!
//! Two halves:
//! - An offline roughness pipeline turning accelerometer/gyroscope trip
//!   segments into a scalar irregularity index and a recommended speed
//!   ([`roughness`], [`speed`], [`segment`]).
//! - A per-tick control law turning density/irregularity inputs into smoothed
//!   green/red durations plus an advisory tag ([`controller`], [`advisory`]).
//!
//! The crate exposes no loop of its own; the host binaries own cadence, input
//! sourcing, and the lifetime of [`types::ControlState`].

pub mod advisory;
pub mod controller;
pub mod error;
pub mod roughness;
pub mod segment;
pub mod speed;
pub mod status;
pub mod types;

pub use advisory::{classify, AdvisoryTag};
pub use controller::{clamp01, SignalController};
pub use error::{SignalError, SignalResult};
pub use roughness::{analyze_segment, estimate_roughness, RoughnessConfig, RoughnessReport};
pub use segment::Segment;
pub use speed::{recommend_speed, SpeedAdvice};
pub use types::{ControlInputs, ControlOutput, ControlState, SensorSample, TripPoint};
