pub mod animation;
pub mod classifier;
pub mod config;
pub mod error;
pub mod features;
pub mod geometry_utils;
pub mod gesture_state;
pub mod interfaces;
pub mod landmarks;
pub mod render;
pub mod replay;
pub mod tracker;

pub type Point2D = (f32, f32);
