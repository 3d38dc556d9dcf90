use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::{company::Company, period::Period};

#[derive(Parser, Debug)]
#[command(author, version, about = "Price history dashboard for B3-listed homebuilders")]
pub struct Cli {
    /// Path to the config file (dashboard.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Interactive terminal dashboard
    Tui,

    /// Fetch one company/period, print the view and exit
    Show {
        /// Company name or ticker (e.g. "MRV" or "MRVE3.SA")
        #[arg(long, default_value = "Cyrela")]
        company: Company,

        /// Lookback period: 7d, 1mo, 3mo, 6mo, 1y or 5y
        #[arg(long, default_value = "7d")]
        period: Period,

        /// Print the view as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the companies on offer and their tickers
    Companies,
}
