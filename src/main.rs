use clap::Parser;
use sitegrab::cli::Args;
use sitegrab::log_error;
use sitegrab::logging::{init_logging, parse_log_level, LoggerConfig};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = match parse_log_level(&args.log_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(LoggerConfig {
        level,
        directory: args.log_dir.clone(),
        ..LoggerConfig::default()
    }) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match sitegrab::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!(e => "[main] Run failed");
            ExitCode::from(e.exit_code())
        }
    }
}
