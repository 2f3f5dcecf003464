//! bf CLI binary.

use std::io::{self, Write};
use std::process;

use clap::{CommandFactory, Parser};
use env_logger::Builder;
use log::LevelFilter;

use bayesfilter::cli::args::*;
use bayesfilter::cli::commands::*;

fn main() {
    // Parse command line arguments using clap
    let args = BfArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    // No mode selected: show usage and fail
    if args.mode().is_none() {
        let mut stderr = io::stderr();
        let _ = BfArgs::command().write_help(&mut stderr);
        let _ = writeln!(stderr);
        process::exit(1);
    }

    if let Err(e) = execute_command(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
