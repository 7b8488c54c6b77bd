mod cli;
mod dataset;
mod logging;
mod manifest;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "eval",
    version,
    about = "Compile benchmark instances into sandbox test scripts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the instance ids in a dataset.
    List { dataset: PathBuf },
    /// Compile every instance into test and mutation scripts.
    Compile {
        dataset: PathBuf,
        /// Repo/version specs table (TOML).
        #[arg(long)]
        specs: PathBuf,
        /// Output directory for compiled scripts and the manifest.
        #[arg(long)]
        out: PathBuf,
        /// Wall-clock budget for the mutation run, in seconds.
        #[arg(long, default_value_t = 3600)]
        mutation_timeout: u64,
    },
    /// Print one instance's compiled script to stdout.
    Show {
        dataset: PathBuf,
        instance_id: String,
        /// Repo/version specs table (TOML).
        #[arg(long)]
        specs: PathBuf,
        /// Print the mutation script instead of the test script.
        #[arg(long)]
        mutation: bool,
        /// Wall-clock budget for the mutation run, in seconds.
        #[arg(long, default_value_t = 3600)]
        mutation_timeout: u64,
    },
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::List { dataset } => cli::list_instances(&dataset),
        Command::Compile {
            dataset,
            specs,
            out,
            mutation_timeout,
        } => cli::compile_dataset(&dataset, &specs, &out, mutation_timeout),
        Command::Show {
            dataset,
            instance_id,
            specs,
            mutation,
            mutation_timeout,
        } => cli::show_script(&dataset, &instance_id, &specs, mutation, mutation_timeout),
    }
}
