use std::path::PathBuf;

use clap::Args;
use rayon::prelude::*;

use crate::cli_error::CliError;
use crate::command::global_args::GlobalArgs;
use crate::command::{load_movie_at, ShockdumpCommand};

/// Print a one-line metadata summary for many movies at once, fanned out
/// across threads (the expected usage pattern for a caller scanning a whole
/// asset tree, per the library's own concurrency guarantees).
#[derive(Args, Debug)]
pub struct BatchInspect {
    /// Movie/cast files to inspect.
    files: Vec<PathBuf>,
}

impl ShockdumpCommand for BatchInspect {
    fn run(self, _global_args: GlobalArgs) -> Result<(), CliError> {
        let started_at = chrono::Utc::now();
        println!("batch-inspect started {}", started_at.to_rfc3339());

        let results: Vec<(PathBuf, Result<String, CliError>)> = self
            .files
            .into_par_iter()
            .map(|path| {
                let summary = load_movie_at(&path).map(|file| {
                    let meta = file.metadata();
                    format!(
                        "version={} stage={}x{} afterburner={}",
                        meta.director_version, meta.stage_width, meta.stage_height, meta.afterburner
                    )
                });
                (path, summary)
            })
            .collect();

        for (path, result) in results {
            match result {
                Ok(summary) => println!("{}: {summary}", path.display()),
                Err(err) => println!("{}: error: {err}", path.display()),
            }
        }

        Ok(())
    }
}
