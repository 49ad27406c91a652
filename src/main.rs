mod cli;
mod logging;

use std::process;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::initialize_logging(&cli) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
