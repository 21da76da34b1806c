mod catalog;
mod cli;
mod error;
mod gate;
mod init;
mod logging;
mod predict;
mod progress;
mod report;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.global.verbose);

    let result = match cli.command {
        Commands::Catalog => catalog::execute(&cli.global),
        Commands::Report(args) => report::execute(&cli.global, args),
        Commands::Predict(args) => predict::execute(&cli.global, args),
        Commands::Init { force } => init::execute(&cli.global, force),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "Error:".bold().red(), err.user_message());
        process::exit(1);
    }
}
