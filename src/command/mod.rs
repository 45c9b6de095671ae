use clap::{Parser, Subcommand};

use crate::cli_error::CliError;
use crate::command::global_args::GlobalArgs;

mod batch_inspect;
mod disassemble;
mod dump_sound;
pub mod global_args;
mod inspect;
mod list_cast;

pub trait ShockdumpCommand {
    fn run(self, global_args: GlobalArgs) -> Result<(), CliError>;
}

#[derive(Parser, Debug)]
#[clap(about = "Inspector for Macromedia/Adobe Director Shockwave containers", version)]
pub struct Shockdump {
    #[clap(flatten)]
    pub global_args: GlobalArgs,
    /// Thing to do.
    #[clap(subcommand)]
    pub subcommand: ShockdumpSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ShockdumpSubcommand {
    Inspect(inspect::Inspect),
    ListCast(list_cast::ListCast),
    DumpSoundWav(dump_sound::DumpSoundWav),
    DisassembleScript(disassemble::DisassembleScript),
    BatchInspect(batch_inspect::BatchInspect),
}

impl ShockdumpCommand for ShockdumpSubcommand {
    fn run(self, global_args: GlobalArgs) -> Result<(), CliError> {
        match self {
            Self::Inspect(v) => v.run(global_args),
            Self::ListCast(v) => v.run(global_args),
            Self::DumpSoundWav(v) => v.run(global_args),
            Self::DisassembleScript(v) => v.run(global_args),
            Self::BatchInspect(v) => v.run(global_args),
        }
    }
}

/// Load the movie at `global_args.movie`, logging every demoted chunk
/// (spec §7 band 2 — the CLI's one consumer of `Diagnostics`).
pub(crate) fn load_movie(global_args: &GlobalArgs) -> Result<shockwave::DirectorFile, CliError> {
    let path = global_args.movie.as_ref().ok_or(CliError::MissingMovieArgument)?;
    load_movie_at(path)
}

pub(crate) fn load_movie_at(path: &std::path::Path) -> Result<shockwave::DirectorFile, CliError> {
    let file = shockwave::DirectorFile::load_file(path).map_err(CliError::Load)?;
    for entry in file.diagnostics().entries() {
        log::warn!("resource {} ({}): {}", entry.resource_id, entry.fourcc, entry.error);
    }
    Ok(file)
}
