use clap::Parser;

use log::{error, info};

use doclaynet2yolo::{process_dataset, Args};

fn main() {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.root.exists() {
        error!(
            "The specified dataset root does not exist: {}",
            args.root.display()
        );
        std::process::exit(1);
    }

    info!("Starting the conversion process...");

    if let Err(e) = process_dataset(&args) {
        error!("Failed to convert dataset: {}", e);
        std::process::exit(1);
    }
    info!("Conversion process completed successfully.");
}
