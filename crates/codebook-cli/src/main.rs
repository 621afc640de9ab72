//! Codebook CLI entry point.

use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use codebook::CodebookError;
use codebook_cli::{Args, error_adapter::to_reportables};

fn init_logging(requested: &str) {
    let level = match LevelFilter::from_str(requested) {
        Ok(level) => level,
        Err(_) => {
            eprintln!("Invalid log level: {requested}. Using 'warn' instead.");
            LevelFilter::Warn
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
    info!(level:?; "Starting codebook generation");
}

/// Renders every diagnostic of a failed run to the error log.
fn report_failure(err: &CodebookError) {
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in to_reportables(err) {
        let mut rendered = String::new();
        if reporter.render_report(&mut rendered, &reportable).is_err() {
            rendered = reportable.to_string();
        }
        error!("{rendered}");
    }
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    if let Err(err) = codebook_cli::run(&args) {
        report_failure(&err);
        process::exit(1);
    }
    info!("Completed successfully");
}
