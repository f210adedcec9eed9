use clap::Parser;

// Some defaults; some of which can be overriden via CLI args
const CONFIG_FILE_PATH: &str = "./gestures.json";
const RECORDING_FILE_PATH: &str = "./recording.json";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Where to load tracker config
    #[arg(long="config",default_value_t=String::from(CONFIG_FILE_PATH))]
    pub config_path: String,

    /// Hand landmark recording to replay
    #[arg(long="recording",default_value_t=String::from(RECORDING_FILE_PATH))]
    pub recording_path: String,

    /// Optional file to append one JSON line of gestures per processed frame
    #[arg(long = "output")]
    pub output_path: Option<String>,

    /// Stop after this many processed frames
    #[arg(long = "maxFrames")]
    pub max_frames: Option<u64>,

    #[arg(long = "loglevel",default_value_t=String::from("info"))]
    pub log_level: String,
}
