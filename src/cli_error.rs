use shockwave::{DecodeAssetError, LoadError};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("couldn't read {0}: {1}")]
    Io(std::path::PathBuf, std::io::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    DecodeAsset(#[from] DecodeAssetError),
    #[error("no resource with id {0}")]
    NoSuchResource(u32),
    #[error("resource {0} is not a cast member")]
    NotACastMember(u32),
    #[error("couldn't write {0}: {1}")]
    WriteOutput(std::path::PathBuf, std::io::Error),
    #[error("this subcommand requires a movie path")]
    MissingMovieArgument,
}
