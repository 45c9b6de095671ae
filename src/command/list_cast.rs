use clap::Args;

use crate::cli_error::CliError;
use crate::command::global_args::GlobalArgs;
use crate::command::{load_movie, ShockdumpCommand};

/// List every cast member, its type, and its display name.
#[derive(Args, Debug)]
pub struct ListCast {}

impl ShockdumpCommand for ListCast {
    fn run(self, global_args: GlobalArgs) -> Result<(), CliError> {
        let file = load_movie(&global_args)?;

        for (id, member) in file.cast_members() {
            let name = file.cast_member_display_name(id).unwrap_or_default();
            let has_script = file.script_for_member(member).is_some();
            println!(
                "[{id}] {:?} {name:?}{}",
                member.member_type,
                if has_script { " (scripted)" } else { "" }
            );
        }

        if let Some(labels) = file.frame_labels_chunk() {
            if !labels.labels.is_empty() {
                println!("frame labels:");
                for (frame, label) in &labels.labels {
                    println!("  {frame}: {label:?}");
                }
            }
        }

        Ok(())
    }
}
