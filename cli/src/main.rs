//! Command line front end for the Hebbian shape detector.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod telemetry;

/// Train and evaluate a Hebbian rectangle/triangle detector.
#[derive(Parser)]
#[command(name = "hebb-shapes", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train on the triangle folder, then the rectangle folder.
    Train(ConfigArg),
    /// Score the labelled rectangle and triangle folders.
    Test(ConfigArg),
    /// Score the mixed folder using file-name labels.
    Predict(ConfigArg),
    /// Reset the stored weights and bias to zero.
    Clear(ConfigArg),
    /// Print a summary of the stored weights.
    Show(ConfigArg),
}

#[derive(clap::Args)]
struct ConfigArg {
    /// TOML settings file; defaults to `<command>.toml` when present.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Train(args) => commands::run_train(args.config),
        Command::Test(args) => commands::run_test(args.config),
        Command::Predict(args) => commands::run_predict(args.config),
        Command::Clear(args) => commands::run_clear(args.config),
        Command::Show(args) => commands::run_show(args.config),
    }
}
