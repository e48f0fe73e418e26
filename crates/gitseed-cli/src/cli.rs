use std::path::PathBuf;

use clap::Parser;
use gitseed_setup::ExitStatus;

#[derive(Parser, Debug)]
#[command(
    name = "gitseed",
    about = "Initialize a git repository, commit the project, and print publishing instructions",
    version
)]
pub struct Cli {
    /// Directory to set up
    #[arg(short = 'C', long, default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file (defaults to <DIR>/gitseed.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Exit status for a command line clap rejected. `--help` and `--version`
/// also arrive as errors but are successful runs.
pub fn parse_error_status(err: &clap::Error) -> ExitStatus {
    if err.use_stderr() {
        ExitStatus::InvalidInput
    } else {
        ExitStatus::Success
    }
}
