use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flowscrub")]
#[command(about = "Strip credential identities from exported workflow JSON", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: nearest flowscrub.toml, then the user config)
    #[arg(long, global = true, env = "FLOWSCRUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log more (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Defaults to `run` with the configured inputs
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sanitize workflow files into the output directory
    Run(RunArgs),

    /// Sanitize a single file
    File {
        /// Workflow JSON to sanitize
        input: PathBuf,

        /// Where to write the result (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fail if any workflow still contains real credential identities
    Check {
        /// Files or glob patterns (default from config)
        inputs: Vec<String>,
    },

    /// Write a default flowscrub.toml in the current directory
    Init,
}

#[derive(Args, Default)]
pub struct RunArgs {
    /// Files or glob patterns (default from config)
    pub inputs: Vec<String>,

    /// Output directory (default from config: workflows)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}
