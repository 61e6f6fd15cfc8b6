mod cli;

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use m3u_toolbox::config::{Config, LogFormat};
use m3u_toolbox::error::AppError;
use m3u_toolbox::report::{render_json, render_text};
use m3u_toolbox::services::scanner::PlaylistScanner;

use crate::cli::CliArgs;

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = Config::from_env();

    if let Err(e) = init_tracing(&config, args.verbose) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    let scanner = PlaylistScanner::new(args.scan_options());
    let report = scanner.scan_file(&args.m3u_file)?;

    let sections = args.report_sections(scanner.options());
    let output = if args.json {
        let mut json = render_json(&report, &sections).context("Failed to render report")?;
        json.push('\n');
        json
    } else {
        render_text(&report, &sections)
    };

    print!("{output}");
    Ok(())
}

/// Logs go to stderr so stdout only carries the report
fn init_tracing(config: &Config, verbose: bool) -> Result<(), AppError> {
    let filter = if verbose {
        EnvFilter::new("m3u_toolbox=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("m3u_toolbox=info"))
    };

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> =
        match (config.log_format, config.log_timestamps) {
            (LogFormat::Json, _) => fmt::layer().json().with_writer(std::io::stderr).boxed(),
            (LogFormat::Text, true) => fmt::layer()
                .with_target(false)
                .with_ansi(config.log_ansi)
                .with_writer(std::io::stderr)
                .boxed(),
            (LogFormat::Text, false) => fmt::layer()
                .without_time()
                .with_target(false)
                .with_ansi(config.log_ansi)
                .with_writer(std::io::stderr)
                .boxed(),
        };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
