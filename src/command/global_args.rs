use std::path::PathBuf;

use clap::Args;

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Path to the Director movie or cast file (.dir/.dxr/.cst/.cxt).
    /// Omitted for `batch-inspect`, which takes its own file list.
    pub movie: Option<PathBuf>,
    /// Verbosity level, repeat to increase.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
