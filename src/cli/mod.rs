//! Command-line interface wiring for disaster-prep.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod freq;
pub mod test;
pub mod train;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Disaster tweet data preparation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Train(args) => train::run(args, settings).await,
            Commands::Test(args) => test::run(args, settings).await,
            Commands::Freq(args) => freq::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Prepare the labeled training file and render the report plots.
    Train(train::Args),
    /// Prepare the unlabeled test file.
    Test(test::Args),
    /// Print the top frequency tables of the prepared training data as JSON.
    Freq(freq::Args),
}
