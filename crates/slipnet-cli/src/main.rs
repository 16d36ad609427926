//! Slipnet command-line interface.
//!
//! Preview dislocation network configurations from TOML job files:
//! ```sh
//! slipnet-cli preview job.toml
//! slipnet-cli validate job.toml
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slipnet-cli")]
#[command(about = "Slipnet: dislocation network toolkit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a Frank-Read source from a job file and preview it.
    Preview {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running the preview.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Preview { config, output } => {
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            runner::run_preview(&job, &out_dir)
        }
        Commands::Validate { config } => {
            let _job = config::load_config(&config)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
    }
}
