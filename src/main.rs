use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rust_tango_pose::config::ControllerConfig;
use rust_tango_pose::io::{TickWriter, load_pose_log};
use rust_tango_pose::system::Replay;

#[derive(Parser)]
#[command(name = "pose-replay")]
#[command(about = "Replay a recorded pose log through the pose controller")]
struct Args {
    /// Pose log CSV
    #[arg(short, long)]
    log: PathBuf,

    /// Controller config YAML (defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tick output CSV (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr so tick CSV can go to stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ControllerConfig::load(path)?,
        None => ControllerConfig::default(),
    };

    let entries = load_pose_log(&args.log)?;
    info!(
        rows = entries.len(),
        log = %args.log.display(),
        "loaded pose log"
    );

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = TickWriter::new(sink);

    let mut replay = Replay::new(&config);
    for (i, entry) in entries.iter().enumerate() {
        let output = replay.step(entry);
        writer.write(i as u64 + 1, entry.pose.timestamp_s, &output)?;
    }
    writer.flush()?;

    let controller = replay.controller();
    info!(
        ticks = controller.tick_count(),
        poses = controller.pose_slot().received(),
        tracking = ?controller.pose_slot().state(),
        "replay done"
    );

    Ok(())
}
