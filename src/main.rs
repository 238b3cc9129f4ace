use std::process::ExitCode;

use biolink::config::Config;
use biolink::{logging, server};
use dotenv::dotenv;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = logging::init(&config) {
        eprintln!("Could not set up logging: {err}");
        return ExitCode::FAILURE;
    }

    info!("Starting biolink...");

    match server::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
