mod cli;
mod config;
mod convert;
mod input;
mod logging;
mod predict_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Seatemp(args) => predict_cmd::seatemp(args),
        Command::SeatempAnalog(args) => predict_cmd::seatemp_analog(args),
        Command::Tex(args) => predict_cmd::tex(args),
        Command::TexAnalog(args) => predict_cmd::tex_analog(args),
    }
}
