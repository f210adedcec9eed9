use std::{fs, io::ErrorKind};

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::interfaces::{FrameSize, StreamRequest};

/// Runtime settings. Gesture thresholds and animation timings are fixed
/// constants and deliberately not part of this.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Resolution to request from the camera
    pub video_width: u32,
    pub video_height: u32,

    /// Show the frame mirrored, like looking into a mirror
    pub mirror_view: bool,

    /// Restart a replayed recording from the beginning when it ends
    pub loop_playback: bool,

    pub label_font_size: f32,
    pub banner_font_size: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            video_width: 1280,
            video_height: 720,
            mirror_view: true,
            loop_playback: false,
            label_font_size: 12.,
            banner_font_size: 20.,
        }
    }
}

impl TrackerConfig {
    pub fn stream_request(&self) -> StreamRequest {
        StreamRequest {
            desired_size: FrameSize {
                width: self.video_width,
                height: self.video_height,
            },
        }
    }

    pub fn write_config_to_file(&self, config_file_path: &str) -> Result<()> {
        debug!("Current state of config: {:?}", self);
        let text = serde_json::to_string_pretty(self)?;
        fs::write(config_file_path, text)
            .with_context(|| format!("Error writing config to file {}", config_file_path))?;
        info!("Wrote config to file: {:?}", config_file_path);
        Ok(())
    }
}

/// A missing file is not an error: defaults are used instead
pub fn load_config_from_file(config_file_path: &str) -> Result<TrackerConfig> {
    match fs::read_to_string(config_file_path) {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(
                "Tracker config file not found at {}; using defaults",
                &config_file_path
            );
            Ok(TrackerConfig::default())
        }
        Err(e) => Err(anyhow!(
            "Failed to load tracker config from {}: {}",
            config_file_path,
            e
        )),
        Ok(s) => {
            info!("Loaded tracker config OK from \"{}\"", config_file_path);
            match serde_json::from_str::<TrackerConfig>(&s) {
                Ok(loaded_config) => {
                    debug!("Config parsed data from file: {:?}", &loaded_config);
                    Ok(loaded_config)
                }
                Err(e) => Err(anyhow!("Failed to parse config data: {}", e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config_from_file("./definitely/not/here.json").unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{ "mirrorView": false, "videoWidth": 640 }"#).unwrap();
        assert!(!config.mirror_view);
        assert_eq!(config.video_width, 640);
        assert_eq!(config.video_height, 720);
    }

    #[test]
    fn test_write_then_load() {
        let path = env::temp_dir().join(format!("hand-gestures-config-{}.json", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let config = TrackerConfig {
            loop_playback: true,
            banner_font_size: 32.,
            ..Default::default()
        };
        config.write_config_to_file(&path).unwrap();
        assert_eq!(load_config_from_file(&path).unwrap(), config);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let path = env::temp_dir().join(format!("hand-gestures-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        assert!(load_config_from_file(&path.to_string_lossy()).is_err());
        fs::remove_file(&path).unwrap();
    }
}
