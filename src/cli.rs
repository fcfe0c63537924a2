use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "parl-to-sqlite")]
#[command(version, about = "Ingest UK parliamentary data into a SQLite database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: seed constituencies, enrich MPs, load addresses
    Sync {
        /// Output SQLite database path
        output_db: PathBuf,

        /// TheyWorkForYou API key (falls back to TWFY_API_KEY)
        #[arg(short, long)]
        api_key: Option<String>,

        /// Skip the member-directory address pass
        #[arg(long)]
        skip_addresses: bool,
    },

    /// List all constituency names from an existing database
    ListConstituencies {
        /// Database path
        db: PathBuf,
    },

    /// List MPs that have at least one social address on record
    Social {
        /// Database path
        db: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
