use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use log::{info, warn};
use rand::Rng;
use tokio::time::{interval, Duration};

use traffic_signal_rs::advisory;
use traffic_signal_rs::controller::SignalController;
use traffic_signal_rs::speed::recommend_speed;
use traffic_signal_rs::status::{current_timestamp, TickStatus};
use traffic_signal_rs::types::{ControlInputs, ControlState};

#[derive(Parser, Debug)]
#[command(name = "signal_controller")]
#[command(about = "Adaptive traffic-signal timing loop", long_about = None)]
struct Args {
    /// Number of control ticks (0 = continuous)
    #[arg(value_name = "TICKS", default_value = "0")]
    ticks: u64,

    /// Milliseconds between control ticks
    #[arg(long, default_value = "2000")]
    tick_interval_ms: u64,

    /// Pin the live irregularity index (e.g. from a roughness_replay run).
    /// Without this flag a random placeholder value is used.
    #[arg(long)]
    irregularity: Option<f64>,

    /// Output directory for the live status JSON
    #[arg(long, default_value = "signal_sessions")]
    output_dir: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("[{}] Signal Controller Starting", ts_now());
    info!("  Ticks: {} (0=continuous)", args.ticks);
    info!("  Tick interval: {} ms", args.tick_interval_ms);
    match args.irregularity {
        Some(index) => info!("  Irregularity: pinned to {:.3}", index),
        None => info!("  Irregularity: random placeholder (no live roughness feed)"),
    }

    std::fs::create_dir_all(&args.output_dir)?;

    let controller = SignalController::default();
    // Single-owner control state: created here, mutated only by this loop.
    let mut state = ControlState::default();

    let mut ticker = interval(Duration::from_millis(args.tick_interval_ms));
    let mut tick = 0u64;
    let mut last_advisory = None;

    loop {
        ticker.tick().await;
        tick += 1;

        let inputs = sample_inputs(args.irregularity);

        let output = match controller.step(&inputs, &mut state) {
            Ok(output) => output,
            Err(err) => {
                // Fatal to the tick, not to the process: skip and retry.
                warn!("tick {} skipped: {}", tick, err);
                continue;
            }
        };
        let tag = advisory::classify(inputs.irregularity_index, &output);
        let advice = recommend_speed(inputs.irregularity_index);

        info!(
            "tick {}: green {:.2}s red {:.2}s (traffic {:.2}, pedestrian {:.2}, irregularity {:.2})",
            tick,
            output.green,
            output.red,
            inputs.traffic_density,
            inputs.pedestrian_density,
            inputs.irregularity_index
        );
        if last_advisory != Some(tag) {
            info!("advisory: {}", tag);
            last_advisory = Some(tag);
        }

        let status = TickStatus {
            timestamp: current_timestamp(),
            tick,
            traffic_density: inputs.traffic_density,
            pedestrian_density: inputs.pedestrian_density,
            irregularity_index: inputs.irregularity_index,
            green_secs: output.green,
            red_secs: output.red,
            advisory: tag,
            advisory_message: tag.message().to_string(),
            recommended_speed_kmh: advice.speed_kmh,
        };
        let status_path = format!("{}/live_status.json", args.output_dir);
        if let Err(err) = status.save(&status_path) {
            warn!("failed to write {}: {}", status_path, err);
        }

        if args.ticks > 0 && tick >= args.ticks {
            println!("[{}] Requested tick count reached, stopping", ts_now());
            break;
        }
    }

    Ok(())
}

fn ts_now() -> String {
    Utc::now().format("%H:%M:%S").to_string()
}

/// Per-tick live inputs.
///
/// Densities are placeholder draws standing in for a real counting feed
/// (vision or induction loop). Irregularity uses the pinned value when given;
/// the random fallback mirrors the uninstrumented range of an average trip.
fn sample_inputs(pinned_irregularity: Option<f64>) -> ControlInputs {
    let mut rng = rand::thread_rng();
    ControlInputs {
        traffic_density: rng.gen_range(0.7..1.0),
        pedestrian_density: rng.gen::<f64>(),
        irregularity_index: pinned_irregularity.unwrap_or_else(|| rng.gen_range(0.2..0.8)),
    }
}
