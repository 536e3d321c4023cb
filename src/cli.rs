use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Riverscope iRIC result converter.
#[derive(Parser)]
#[command(
    name = "riverscope",
    version,
    about = "Convert iRIC simulation results into legacy Result_<N>.csv files"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Convert a project folder, .cgn file, or .ipro bundle to CSV.
    Convert(ConvertArgs),
    /// Report whether a path needs conversion at all.
    Classify(ClassifyArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Input: Case1.cgn, project.ipro, or a project folder.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output folder for Result_<N>.csv files (created if missing).
    #[arg(short, long)]
    pub out: PathBuf,

    /// Case file name to prefer inside folders and bundles.
    #[arg(long, default_value = "Case1.cgn")]
    pub case: String,

    /// Zone path inside the container.
    #[arg(long, default_value = "iRIC/iRICZone")]
    pub zone: String,

    /// Comma-separated variable names to export (default: all).
    #[arg(long, default_value = "")]
    pub vars: String,

    /// First step to export (1-based).
    #[arg(long = "from-step", default_value_t = 1)]
    pub from_step: usize,

    /// Last step to export (1-based, inclusive; default: final step).
    #[arg(long = "to-step")]
    pub to_step: Option<usize>,

    /// Step stride (2 exports steps 1,3,5,...).
    #[arg(long, default_value_t = 1)]
    pub skip: usize,

    /// Flatten rows in C order (row-major) instead of Fortran order.
    #[arg(long = "c-order")]
    pub c_order: bool,

    /// Write a JSON conversion report to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Arguments for the `classify` subcommand.
#[derive(clap::Args)]
pub struct ClassifyArgs {
    /// Path to classify.
    pub path: PathBuf,
}
