use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vidgen")]
#[command(about = "Create and manage video generation jobs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a new video generation job
    Create {
        /// Prompt text; words are joined with spaces
        prompt: Vec<String>,

        /// Reference image or video guiding generation
        #[arg(long)]
        file: Option<PathBuf>,

        /// Generation model (e.g. sora-2, sora-2-pro)
        #[arg(long)]
        model: Option<String>,

        /// Output size; coerced to the closest supported resolution
        #[arg(long)]
        size: Option<String>,

        /// Clip length in seconds
        #[arg(long)]
        seconds: Option<String>,
    },

    /// Show the status of a job
    Status { id: String },

    /// List recent jobs
    List {
        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// Download the rendered video
    Download {
        id: String,
        /// Target file; defaults to the configured download directory
        path: Option<PathBuf>,
    },

    /// Delete a job
    Delete { id: String },
}
