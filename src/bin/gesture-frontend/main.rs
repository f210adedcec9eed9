//! # Gesture Frontend
//!
//! Replays a hand landmark recording through the gesture tracker and paints
//! the result. Detection runs whenever the recording has a new frame; the
//! canvas is repainted continuously so the pulsing effects stay smooth.
//!
use clap::Parser;

use env_logger::Env;
use log::debug;
use model::Model;

mod cli;
mod model;
mod ui;

use cli::Cli;

fn main() -> Result<(), eframe::Error> {
    let cli = Cli::parse();

    // Initialize the logger from the environment

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level))
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("eframe", log::LevelFilter::Warn)
        .filter_module("egui_glow", log::LevelFilter::Warn)
        .init();

    debug!("Started; args: {:?}", cli);

    let model = Model::new(&cli);

    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(1280.0, 960.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Hand Gestures",
        options,
        Box::new(|_cc| Box::new(model)),
    )
}
