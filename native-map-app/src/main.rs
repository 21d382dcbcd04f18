//! Drives a headless map view with host-style method calls.
//!
//! Reads one `{"method": ..., "arguments": ...}` JSON document per line from
//! stdin and writes one JSON reply per line to stdout.

use anyhow::Context;
use clap::Parser;
use native_map_bridge::{
    core::headless::HeadlessMapControl, LatLng, MapCommand, MapView, MapViewOptions, Size,
};
use serde_json::json;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "native-map-app")]
#[command(about = "Run map commands against a headless native map view", long_about = None)]
struct Args {
    /// View width in screen points
    #[arg(long, default_value = "390")]
    width: f64,

    /// View height in screen points
    #[arg(long, default_value = "844")]
    height: f64,

    /// Initial center latitude
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    lat: f64,

    /// Initial center longitude
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    lng: f64,

    /// View options as JSON, e.g. '{"maxZoomLevel": 18}'
    #[arg(long)]
    options: Option<String>,

    /// Also print the calls made on the native control after each command
    #[arg(long)]
    trace_calls: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let options = match &args.options {
        Some(json) => MapViewOptions::from_json_str(json).context("invalid --options")?,
        None => MapViewOptions::default(),
    };

    let center = LatLng::new(args.lat, args.lng);
    anyhow::ensure!(center.is_valid(), "initial center {:?} is out of range", center);

    let mut control = HeadlessMapControl::new(Size::new(args.width, args.height));
    control.set_center(center);
    let mut map = MapView::with_options(control, options)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match MapCommand::from_json_str(&line).and_then(|command| map.handle(command)) {
            Ok(reply) => json!({ "ok": reply }),
            Err(error) => {
                log::warn!("command failed: {}", error);
                json!({ "error": error.to_string() })
            }
        };
        writeln!(stdout, "{}", response)?;

        let calls = map.control_mut().take_calls();
        if args.trace_calls {
            for call in calls {
                writeln!(stdout, "{}", json!({ "control": call }))?;
            }
        }
    }

    Ok(())
}
