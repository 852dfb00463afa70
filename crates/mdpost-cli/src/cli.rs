use crate::config::TrajectoryFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "mdpost CLI - A command-line interface for mdpost, a post-processing toolkit for molecular dynamics trajectories.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the configured computes over a trajectory and write their result files.
    Analyze(AnalyzeArgs),
    /// Read a trajectory and print a summary of its contents.
    Inspect(InspectArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the analysis configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Trajectory files to read, overriding `trajectory.sources` from the config file.
    #[arg(short, long, value_name = "PATH", num_args(1..))]
    pub trajectory: Vec<PathBuf>,

    /// Override the trajectory file format from the config file.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<TrajectoryFormat>,

    /// Override the coordinate precision for fixed-column trajectory files.
    #[arg(long, value_name = "INT")]
    pub precision: Option<usize>,

    /// Override the stem for result file names from the config file.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output_stem: Option<PathBuf>,

    /// Override the spacing between mean squared displacement time origins.
    #[arg(long, value_name = "INT")]
    pub origin_spacing: Option<usize>,

    /// Particle type to analyze, overriding `msd.types` from the config file.
    /// Can be used multiple times.
    #[arg(long = "type", value_name = "NAME")]
    pub types: Vec<String>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Trajectory files to read, concatenated in the order given.
    #[arg(short, long, required = true, value_name = "PATH", num_args(1..))]
    pub trajectory: Vec<PathBuf>,

    /// Trajectory file format.
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "gro")]
    pub format: TrajectoryFormat,

    /// Coordinate precision for fixed-column trajectory files.
    #[arg(long, value_name = "INT", default_value_t = 3)]
    pub precision: usize,
}
