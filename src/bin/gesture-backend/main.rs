use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use serde::Serialize;

use hand_gestures::animation::{AnimationClock, SystemClock};
use hand_gestures::classifier::GestureLabel;
use hand_gestures::config::load_config_from_file;
use hand_gestures::replay::{ReplayCamera, ReplayLandmarker};
use hand_gestures::tracker::GestureTracker;

mod cli;

use cli::Cli;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GestureLine {
    frame: u64,
    timestamp_ms: u128,
    gestures: Vec<GestureLabel>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize the logger from the environment

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    debug!("Started; args: {:?}", cli);

    let config = load_config_from_file(&cli.config_path)?;
    let recording_path = PathBuf::from(&cli.recording_path);

    let camera = ReplayCamera::new(&recording_path, config.loop_playback);
    let mut tracker = GestureTracker::new(camera, config);
    tracker.load_detector(|| ReplayLandmarker::open(&recording_path))?;
    tracker.toggle()?;

    let mut output = match &cli.output_path {
        Some(path) => Some(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create output {}", path))?,
        )),
        None => None,
    };

    let clock = SystemClock::new();

    while tracker.is_tracking() {
        let mut work_done = false;

        if tracker.poll(clock.now()) {
            work_done = true;

            for change in tracker.last_changes() {
                info!(
                    "Hand #{}: {} -> {}",
                    change.slot,
                    change.previous.unwrap_or_default(),
                    change.current.unwrap_or_default()
                );
            }

            if let Some(out) = output.as_mut() {
                let line = GestureLine {
                    frame: tracker.frames_processed(),
                    timestamp_ms: clock.now().as_millis(),
                    gestures: tracker.gestures().labels(),
                };
                serde_json::to_writer(&mut *out, &line)?;
                writeln!(out)?;
            }

            if let Some(max_frames) = cli.max_frames {
                if tracker.frames_processed() >= max_frames {
                    info!("Processed {} frames; stopping", max_frames);
                    tracker.stop();
                }
            }
        }

        if !work_done {
            thread::sleep(Duration::from_millis(1));
        }
    }

    if let Some(mut out) = output {
        out.flush()?;
    }

    info!(
        "Done; {} frames processed, final state {:?}",
        tracker.frames_processed(),
        tracker.state()
    );
    tracker.teardown();

    Ok(())
}
