// bindery-cli/src/main.rs
//
// Entry point: initialises logging, parses arguments, and dispatches
// commands. A batch with any failed archive exits non-zero; the failures
// themselves are reported per-file by the convert command.

use std::process;

use clap::Parser;
use owo_colors::OwoColorize;

use bindery_cli::cli::{Cli, Commands};
use bindery_cli::commands::convert::run_convert;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => run_convert(args),
    };

    match result {
        Ok(summary) if summary.fail_count == 0 => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}
