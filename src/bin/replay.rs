use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::Parser;
use flate2::read::GzDecoder;
use geo::{coord, Rect};
use log::info;
use serde::{Deserialize, Serialize};

use traffic_signal_rs::roughness::{analyze_segment, RoughnessConfig};
use traffic_signal_rs::segment::Segment;
use traffic_signal_rs::speed::recommend_speed;
use traffic_signal_rs::types::TripPoint;

#[derive(Parser, Debug)]
#[command(name = "roughness_replay")]
#[command(about = "Offline road-roughness analysis of a recorded trip log", long_about = None)]
struct Args {
    /// Path to a trip log (JSON, or .json.gz)
    #[arg(long)]
    log: PathBuf,

    /// Bounding box around the intersection, in degrees. When any corner is
    /// missing the full trip is analyzed.
    #[arg(long)]
    lat_min: Option<f64>,
    #[arg(long)]
    lat_max: Option<f64>,
    #[arg(long)]
    lon_min: Option<f64>,
    #[arg(long)]
    lon_max: Option<f64>,

    /// RMS window length in seconds
    #[arg(long, default_value = "1.0")]
    window_seconds: f64,

    /// Write the summary JSON here in addition to printing it
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Deserialize)]
struct TripLog {
    points: Vec<TripPoint>,
}

#[derive(Serialize)]
struct RoughnessSummary {
    trip_points: usize,
    segment_samples: usize,
    sample_rate_hz: f64,
    window_samples: usize,
    irregularity_index: f64,
    speed_multiplier: f64,
    recommended_speed_kmh: f64,
}

fn load_log(path: &Path) -> anyhow::Result<TripLog> {
    let file = File::open(path)?;
    if path.extension().map(|e| e == "gz").unwrap_or(false) {
        let gz = GzDecoder::new(file);
        let reader = BufReader::new(gz);
        Ok(serde_json::from_reader(reader)?)
    } else {
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

fn bounding_box(args: &Args) -> Option<Rect<f64>> {
    match (args.lat_min, args.lat_max, args.lon_min, args.lon_max) {
        (Some(lat_min), Some(lat_max), Some(lon_min), Some(lon_max)) => Some(Rect::new(
            coord! { x: lon_min, y: lat_min },
            coord! { x: lon_max, y: lat_max },
        )),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let trip = load_log(&args.log)?;
    info!(
        "Loaded {} trip points from {}",
        trip.points.len(),
        args.log.display()
    );

    let segment = match bounding_box(&args) {
        Some(bounds) => {
            let segment = Segment::select(&trip.points, bounds);
            if segment.len() == trip.points.len() {
                info!("Bounding box matched nothing (or everything), analyzing the full trip");
            } else {
                info!("Segment restricted to {} points inside the box", segment.len());
            }
            segment
        }
        None => {
            info!("No bounding box given, analyzing the full trip");
            Segment::new(trip.points.iter().map(|p| p.sample()).collect())
        }
    };

    let config = RoughnessConfig {
        window_seconds: args.window_seconds,
        ..RoughnessConfig::default()
    };
    let report = analyze_segment(&segment, &config)?;
    let advice = recommend_speed(report.index);

    info!(
        "Estimated sample rate: {:.1} Hz (window {} samples)",
        report.sample_rate_hz, report.window_samples
    );
    info!(
        "Segment roughness (85th percentile z-score): {:.3}",
        report.index
    );
    info!(
        "Recommended speed: {:.2} km/h (multiplier {:.3})",
        advice.speed_kmh, advice.multiplier
    );

    let summary = RoughnessSummary {
        trip_points: trip.points.len(),
        segment_samples: segment.len(),
        sample_rate_hz: report.sample_rate_hz,
        window_samples: report.window_samples,
        irregularity_index: report.index,
        speed_multiplier: advice.multiplier,
        recommended_speed_kmh: advice.speed_kmh,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(path) = args.output {
        std::fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}
