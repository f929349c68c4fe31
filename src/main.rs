use std::process::ExitCode;

use clap::Parser;
use log::error;

use album_scraper_lib::{album, logger, Cli, HttpClient};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let config = match cli.into_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid URL argument: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match HttpClient::new(&config.user_agent, config.timeout) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match album::run(&config, &client) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error downloading album: {}", e);
            ExitCode::FAILURE
        }
    }
}
