use clap::Parser;

use crate::cli_error::CliError;
use crate::command::{Shockdump, ShockdumpCommand};

mod cli_error;
mod command;
mod uwu_colors;

fn main() -> Result<(), CliError> {
    env_logger::init();

    let args = Shockdump::parse();

    args.subcommand.run(args.global_args)
}
