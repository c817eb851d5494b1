use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "emotion-detector")]
#[command(about = "Detect the emotions expressed in a piece of text")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a statement and report its emotion profile
    Analyze {
        /// Text to analyze; omitting it reports invalid input
        text: Option<String>,
        /// Config directory path
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Output the scores as JSON instead of a sentence
        #[arg(long)]
        json: bool,
    },
    /// Check whether the emotion service is reachable
    Status {
        /// Config directory path
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}
