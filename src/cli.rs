use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Build version with build target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Reference frames and viewer in/out for compositing scripts
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Script snapshot (JSON) to run the command against
    #[arg(short = 's', long = "script", value_name = "FILE", global = true)]
    pub script: Option<PathBuf>,

    /// Write the updated snapshot here (default: print it to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Enable debug logging to file (default: framehandling.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE", global = true)]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show what a label resolves to (range, frame or nothing)
    Parse {
        /// Label text, e.g. "0900 - 1050 +10"
        label: String,
    },

    /// Set the reference frame on the selection (annotate when nothing is selected)
    Set {
        /// Frame typed by the user; without it the current frame is used
        #[arg(short = 'f', long = "frame", value_name = "TEXT")]
        frame: Option<String>,
    },

    /// Go to the selected node's reference frame or range
    Goto,

    /// Clear the active viewer's in/out
    Clear,
}
