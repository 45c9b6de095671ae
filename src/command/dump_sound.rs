use std::path::PathBuf;

use clap::Args;

use crate::cli_error::CliError;
use crate::command::global_args::GlobalArgs;
use crate::command::{load_movie, ShockdumpCommand};

/// Decode a sound cast member to a WAV file (or, for MP3-backed members,
/// copy the stream through unchanged).
#[derive(Args, Debug)]
pub struct DumpSoundWav {
    /// Resource id of the sound's owning CASt member.
    member_id: u32,
    /// Output path.
    output: PathBuf,
}

impl ShockdumpCommand for DumpSoundWav {
    fn run(self, global_args: GlobalArgs) -> Result<(), CliError> {
        let file = load_movie(&global_args)?;

        file.chunk(self.member_id)
            .and_then(shockwave::Chunk::as_cast_member)
            .ok_or(CliError::NotACastMember(self.member_id))?;

        let sound = file.sound_for_member(self.member_id).ok_or(CliError::NoSuchResource(self.member_id))?;
        let bytes = match sound.codec {
            shockwave::chunks::sound::SoundCodec::Mp3 => sound.audio_data.clone(),
            _ => file.decode_sound_wav(self.member_id)?,
        };
        std::fs::write(&self.output, bytes).map_err(|e| CliError::WriteOutput(self.output.clone(), e))?;

        log::info!("wrote {}", self.output.display());
        Ok(())
    }
}
