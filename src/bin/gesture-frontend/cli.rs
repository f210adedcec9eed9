use clap::Parser;

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

    /// Start tracking as soon as the window opens
    #[arg(long = "autoStart")]
    pub auto_start: bool,

    #[arg(long = "loglevel",default_value_t=String::from("info"))]
    pub log_level: String,
}
