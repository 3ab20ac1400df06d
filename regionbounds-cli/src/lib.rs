//! Command-line interface for building and publishing the regions bounds database.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod build;
mod error;
mod release;

pub use error::CliError;

use build::{BuildArgs, run_build};
use release::{ReleaseArgs, run_release_assets};

/// Run the CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Build(args) => {
            run_build(args)?;
        }
        Command::ReleaseAssets(args) => {
            let plan = run_release_assets(args)?;
            plan.print()?;
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "regionbounds",
    about = "Build the US regions bounds database and search index",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Download the census shapefiles and write the bounds artefacts.
    Build(BuildArgs),
    /// Check the built artefacts and describe the release upload.
    ReleaseAssets(ReleaseArgs),
}

#[cfg(test)]
mod tests;
