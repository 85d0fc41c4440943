//! Binary entrypoint for the reel engine daemon.

use std::process::ExitCode;

use reel_config::Config;

fn main() -> ExitCode {
    let config = Config::load();

    // Banner goes to stderr before anything can write JSON to stdout.
    reeld::print_banner();

    if let Err(error) = reeld::telemetry::initialise(&config) {
        eprintln!("reeld: failed to initialise telemetry: {error}");
        return ExitCode::FAILURE;
    }

    match reeld::run_engine(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "engine failed to start");
            ExitCode::FAILURE
        }
    }
}
