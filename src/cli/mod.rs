pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "newsprint")]
#[command(about = "Prints a one-page news digest from RSS feeds on a schedule", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/newsprint/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured printer name
    #[arg(short, long, global = true)]
    pub printer: Option<String>,

    /// Override the minutes between cycles
    #[arg(short, long, global = true)]
    pub interval: Option<u64>,

    /// Keep the generated PDF after printing
    #[arg(long, global = true)]
    pub keep_pdf: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the fetch-layout-print loop until interrupted
    Run,
    /// Run a single cycle and exit
    Once,
    /// List the configured feed sources
    Sources,
}
