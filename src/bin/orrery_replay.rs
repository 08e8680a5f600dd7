//! Replay a recorded gesture session through the interpreter.
//!
//! # Usage
//!
//! ```bash
//! # Replay as fast as possible, log events
//! orrery_replay --input session.jsonl
//!
//! # Orbit-follow preset with overrides, paced like the original capture
//! orrery_replay --input session.jsonl --preset orbit-follow --config tuning.toml --live
//!
//! # Machine-readable summary
//! orrery_replay --input session.jsonl --json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use orrery::orrery_core::replay::TimestampedCommand;
use orrery::orrery_core::{BodyCatalog, DetailLevel, EffectSet, NavEvent};
use orrery::orrery_input::GestureInterpreter;
use orrery::{
    deliver, live, settings, LiveDriver, PresentationSink, RecordingSink, SessionRecording,
    TracingSink,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "orrery_replay")]
#[command(version = "0.1.0")]
#[command(about = "Replay a recorded hand-gesture session and report where navigation ended up")]
#[command(long_about = None)]
struct Cli {
    /// Recording: one JSON frame per line
    #[arg(short, long)]
    input: PathBuf,

    /// TOML or JSON file overriding preset values
    #[arg(short, long, env = "ORRERY_CONFIG")]
    config: Option<PathBuf>,

    /// Tuning preset
    #[arg(long, value_enum, default_value = "classic")]
    preset: Preset,

    /// Pace frames by their timestamps through the latest-only live driver,
    /// re-stamping each one with the session clock as it arrives
    #[arg(long)]
    live: bool,

    /// Playback speed multiplier for --live
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    Classic,
    OrbitFollow,
}

impl Preset {
    fn name(self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::OrbitFollow => "orbit-follow",
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    frames: usize,
    processed: u64,
    events: usize,
    focus_index: usize,
    focus_body: String,
    detail: DetailLevel,
    locked: bool,
    zoomed_in: bool,
    calibration_depth: Option<f32>,
    commands: Vec<TimestampedCommand>,
}

/// Logs through tracing and keeps a copy for the summary.
struct TeeSink {
    log: TracingSink,
    record: RecordingSink,
}

impl PresentationSink for TeeSink {
    fn present(&mut self, event: &NavEvent) {
        self.log.present(event);
        self.record.present(event);
    }

    fn frame_done(&mut self, effects: EffectSet) {
        self.log.frame_done(effects);
        self.record.frame_done(effects);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,orrery=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = settings::resolve(Some(cli.preset.name()), cli.config.as_deref())
        .context("resolving interpreter config")?;
    let recording = SessionRecording::load(&cli.input)
        .with_context(|| format!("loading recording {}", cli.input.display()))?;
    let frames = recording.len();

    let interp = GestureInterpreter::new(config).context("building interpreter")?;
    let mut sink = TeeSink {
        log: TracingSink::new(BodyCatalog::solar_system()),
        record: RecordingSink::new(),
    };

    let (interp, processed) = if cli.live {
        replay_live(interp, recording, cli.speed, &mut sink).await?
    } else {
        replay_batch(interp, recording, &mut sink)
    };

    let nav = interp.navigator();
    let summary = Summary {
        frames,
        processed,
        events: sink.record.events.len(),
        focus_index: nav.focus(),
        focus_body: nav
            .focused_body()
            .map(|b| b.name.clone())
            .unwrap_or_default(),
        detail: nav.detail(),
        locked: interp.mode().is_locked(),
        zoomed_in: interp.mode().is_zoomed_in(),
        calibration_depth: interp.calibration_depth(),
        commands: interp.command_log().events.clone(),
    };
    print_summary(&summary, cli.json)
}

fn replay_batch(
    mut interp: GestureInterpreter,
    recording: SessionRecording,
    sink: &mut TeeSink,
) -> (GestureInterpreter, u64) {
    let mut processed = 0;
    for frame in recording {
        let outcome = interp.on_frame(&frame);
        deliver(sink, &outcome);
        processed += 1;
    }
    (interp, processed)
}

async fn replay_live(
    interp: GestureInterpreter,
    recording: SessionRecording,
    speed: f64,
    sink: &mut TeeSink,
) -> Result<(GestureInterpreter, u64)> {
    anyhow::ensure!(
        speed.is_finite() && speed > 0.0,
        "--speed must be positive, got {speed}"
    );

    let (feed, frames) = live::channel();
    let producer = tokio::spawn(async move {
        let mut prev_ms: Option<u64> = None;
        for frame in recording {
            if let Some(prev) = prev_ms {
                let gap = frame.timestamp_ms.saturating_sub(prev) as f64 / speed;
                tokio::time::sleep(Duration::from_secs_f64(gap / 1000.0)).await;
            }
            prev_ms = Some(frame.timestamp_ms);
            if !feed.publish_detection(frame.landmarks, frame.gesture) {
                break;
            }
        }
        feed.published()
    });

    let report = LiveDriver::new(interp).run(frames, sink).await;
    let published = producer.await.context("frame producer task failed")?;
    tracing::info!(
        published,
        processed = report.processed,
        dropped = published.saturating_sub(report.processed),
        "live replay finished"
    );
    Ok((report.interpreter, report.processed))
}

fn print_summary(summary: &Summary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("frames      {} ({} processed)", summary.frames, summary.processed);
    println!("events      {}", summary.events);
    println!("focus       {} (#{})", summary.focus_body, summary.focus_index);
    println!("detail      {}", summary.detail);
    println!(
        "mode        {}{}",
        if summary.locked { "locked" } else { "unlocked" },
        if summary.zoomed_in { ", zoomed in" } else { "" }
    );
    match summary.calibration_depth {
        Some(depth) => println!("calibrated  z = {depth:.4}"),
        None => println!("calibrated  never"),
    }
    println!("commands    {}", summary.commands.len());
    for cmd in &summary.commands {
        println!("  {:>8} ms  {}", cmd.at_ms, cmd.command.name());
    }
    Ok(())
}
