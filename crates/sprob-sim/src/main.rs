use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    estimate::{self, EstimateArgs},
    run::{self, RunArgs},
    version::{self, VersionArgs},
};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "sprob-sim", about = "Monte-Carlo state probability estimator")]
struct Cli {
    /// Log progress at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every state of a plan through every sample-count tier.
    Run(RunArgs),
    /// Estimate a single state once and print the report as JSON.
    Estimate(EstimateArgs),
    /// Print the tool version.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Estimate(args) => estimate::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
