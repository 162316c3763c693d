// bindery-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Bindery: comic archive to PDF converter",
    long_about = "Converts CBR/CBZ comic archives into single-file PDFs, one page per \
                  source image, via the bindery-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts .cbr/.cbz archives (or directories of them) into PDFs
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Archive files and/or directories to scan for .cbr/.cbz archives
    #[arg(required = true, value_name = "PATHS")]
    pub inputs: Vec<PathBuf>,

    /// Optional: output folder for the PDFs (defaults to a 'Converted PDFs'
    /// folder beside the first archive)
    #[arg(short, long = "output", value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Optional: path to the unrar binary used for .cbr archives.
    /// Can also be set via the BINDERY_UNRAR environment variable.
    #[arg(long, value_name = "UNRAR_PATH", env = "BINDERY_UNRAR")]
    pub unrar: Option<PathBuf>,
}
