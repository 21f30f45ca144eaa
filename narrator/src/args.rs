use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Narration with a fallback clip when speech generation fails
#[derive(Debug, Parser)]
#[command(name = "narrator", about = "Generate narration audio with a fallback clip")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "narrator.toml", env = "NARRATOR_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate narration for a text and export the clip that would play
    Speak {
        /// Text to narrate
        #[arg(short, long)]
        text: String,

        /// Where to write the audio that ended up loaded
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Validate the configuration without contacting the speech service
    Check,
}
