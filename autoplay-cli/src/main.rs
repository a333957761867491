//! Autoplay CLI
//!
//! Loads a chart, runs it through the Frame Synthesizer and Pointer
//! Planner, and writes the resulting touch event timeline to stdout or
//! a file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use autoplay_common::core::Chart;
use autoplay_common::{plan_touch_events, synthesize_frames, DeviceScreen, LogSink};
use clap::Parser;

// ── CLI Arguments ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug, Clone)]
#[command(name = "autoplay-cli", about = "Plans touch events for a chart")]
pub struct Args {
    /// Path to a chart JSON file.
    pub chart: PathBuf,

    /// First pointer id handed out by the planner.
    #[arg(long, default_value_t = 1000)]
    pub begin_pointer_id: i64,

    /// Maximum number of pointers alive at once before the planner
    /// refuses to continue.
    #[arg(long, default_value_t = 15)]
    pub max_pointers: usize,

    /// Write the planned touch timeline as JSON to this path instead of
    /// printing a summary to stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Debug mode: verbose logging.
    #[arg(long)]
    pub debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    log::info!("autoplay-cli starting");
    log::info!("chart: {:?}", args.chart);

    let raw = fs::read_to_string(&args.chart)
        .with_context(|| format!("failed to read chart file {:?}", args.chart))?;
    let mut chart: Chart = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse chart file {:?}", args.chart))?;

    log::info!(
        "loaded chart: {} lines, {} notes",
        chart.lines.len(),
        chart.note_count()
    );

    let screen = DeviceScreen::default();
    let mut sink = LogSink;
    let frames = synthesize_frames(&mut chart.lines, &screen, &mut sink);
    log::info!("synthesized {} distinct frame timestamps", frames.len());

    let touch = plan_touch_events(&frames, args.begin_pointer_id, 1, args.max_pointers)
        .context("pointer planning failed")?;

    let event_count: usize = touch.values().map(|v| v.len()).sum();
    let max_pointer_id = touch
        .values()
        .flatten()
        .map(|e| e.pointer_id)
        .max()
        .unwrap_or(args.begin_pointer_id);

    log::info!(
        "planned {} touch events across {} timestamps, highest pointer id used: {}",
        event_count,
        touch.len(),
        max_pointer_id
    );

    match args.out {
        Some(path) => {
            let json = serde_json::to_string_pretty(&touch)?;
            fs::write(&path, json).with_context(|| format!("failed to write {path:?}"))?;
            log::info!("wrote touch timeline to {path:?}");
        }
        None => {
            println!("{} touch events across {} timestamps", event_count, touch.len());
        }
    }

    Ok(())
}
