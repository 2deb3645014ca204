use serde::{Deserialize, Serialize};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::advisory::AdvisoryTag;

/// Snapshot of the latest control tick, written as JSON for external viewers.
#[derive(Serialize, Deserialize, Clone)]
pub struct TickStatus {
    pub timestamp: f64,
    pub tick: u64,
    pub traffic_density: f64,
    pub pedestrian_density: f64,
    pub irregularity_index: f64,
    pub green_secs: f64,
    pub red_secs: f64,
    pub advisory: AdvisoryTag,
    pub advisory_message: String,
    pub recommended_speed_kmh: f64,
}

impl TickStatus {
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

pub fn current_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
