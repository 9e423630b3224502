use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::ProviderArgs;
use commands::{print_insights, serve};

#[derive(Parser)]
#[command(name = "skydemand")]
#[command(about = "Airline market demand insights server and CLI tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        /// Directory holding the built dashboard bundle
        ///
        /// Served for every path the API does not handle. Ignored when the
        /// directory does not exist.
        #[arg(long, env = "STATIC_DIR", default_value = "workspace/frontend/dist")]
        static_dir: PathBuf,

        #[command(flatten)]
        providers: ProviderArgs,
    },
    /// Compute market demand for one destination and print it as JSON
    ///
    /// Examples:
    ///   skydemand insights LIS
    ///   skydemand insights BCN --max-offers 20
    Insights {
        /// Destination city or airport code
        destination: String,

        #[command(flatten)]
        providers: ProviderArgs,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address, static_dir, providers } => {
                serve(&providers, &bind_address, static_dir).await?;
            }
            Commands::Insights { destination, providers } => {
                print_insights(&providers, &destination).await?;
            }
        }
        Ok(())
    }
}
