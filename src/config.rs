use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments parser for converting DocLayNet COCO annotations
/// to YOLO format.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Dataset root containing COCO/ and PNG/; images/, labels/ and data.yml
    /// are written beneath it
    #[arg(default_value = "./datasets")]
    pub root: PathBuf,

    /// Flag to append converted lines to existing label files instead of
    /// rewriting them, for merging partial dataset deliveries
    #[arg(long = "append_labels")]
    pub append_labels: bool,
}
