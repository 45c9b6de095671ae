use clap::Args;

use shockwave::assets::disassemble::disassemble_handler;

use crate::cli_error::CliError;
use crate::command::global_args::GlobalArgs;
use crate::command::{load_movie, ShockdumpCommand};

/// Disassemble every handler in a Script (`Lscr`) resource.
#[derive(Args, Debug)]
pub struct DisassembleScript {
    /// Resource id of the Lscr chunk.
    script_id: u32,
}

impl ShockdumpCommand for DisassembleScript {
    fn run(self, global_args: GlobalArgs) -> Result<(), CliError> {
        let file = load_movie(&global_args)?;

        let script = file
            .chunk(self.script_id)
            .and_then(shockwave::Chunk::as_script)
            .ok_or(CliError::NoSuchResource(self.script_id))?;
        let names = file.script_names().cloned().unwrap_or_default();

        for (index, handler) in script.handlers.iter().enumerate() {
            println!("handler #{index} ({})", names.name_at(handler.name_id));
            for line in disassemble_handler(handler, script, &names) {
                println!("  {line}");
            }
        }

        Ok(())
    }
}
