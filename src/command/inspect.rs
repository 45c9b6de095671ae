use clap::Args;
use owo_colors::OwoColorize;

use crate::cli_error::CliError;
use crate::command::global_args::GlobalArgs;
use crate::command::{load_movie, ShockdumpCommand};
use crate::uwu_colors::ErrStyle;

/// Print the container's metadata and a one-line summary of every resource.
#[derive(Args, Debug)]
pub struct Inspect {
    /// Print the full resource table instead of just the summary.
    #[clap(short, long)]
    resources: bool,
}

impl ShockdumpCommand for Inspect {
    fn run(self, global_args: GlobalArgs) -> Result<(), CliError> {
        let file = load_movie(&global_args)?;
        let meta = file.metadata();

        println!("{}", "movie metadata".bold());
        println!("  endian:            {:?}", meta.endian);
        println!("  afterburner:       {}", meta.afterburner);
        println!("  kind:              {}", meta.movie_kind);
        println!("  director version:  {}", meta.director_version);
        println!("  stage:             {}x{}", meta.stage_width, meta.stage_height);
        println!("  tempo:             {}", meta.tempo);
        println!("  channels:          {}", meta.channel_count);
        if let Some(base) = file.base_path() {
            println!("  base path:         {base}");
        }
        println!("  external casts:    {}", file.has_external_casts());
        println!("  has score:         {}", file.has_score());

        if !file.diagnostics().is_empty() {
            println!(
                "{}",
                format!("{} resource(s) were demoted to raw during decoding", file.diagnostics().entries().len())
                    .errstyle(owo_colors::Style::new().yellow())
            );
        }

        if self.resources {
            println!("{}", "resources".bold());
            let mut ids: Vec<u32> = file.resource_ids().collect();
            ids.sort_unstable();
            for id in ids {
                if let Some(chunk) = file.chunk(id) {
                    println!("  [{id}] {}", describe(chunk));
                }
            }
        }

        Ok(())
    }
}

fn describe(chunk: &shockwave::Chunk) -> String {
    match chunk {
        shockwave::Chunk::Config(_) => "Config".to_string(),
        shockwave::Chunk::KeyTable(_) => "KeyTable".to_string(),
        shockwave::Chunk::CastList(_) => "CastList".to_string(),
        shockwave::Chunk::Cast(c) => format!("Cast ({} members)", c.member_ids.len()),
        shockwave::Chunk::CastMember(m) => format!("CastMember({:?}) {:?}", m.member_type, m.name),
        shockwave::Chunk::ScriptContext(_) => "ScriptContext".to_string(),
        shockwave::Chunk::ScriptNames(n) => format!("ScriptNames ({} names)", n.names.len()),
        shockwave::Chunk::Script(s) => format!("Script ({} handlers)", s.handlers.len()),
        shockwave::Chunk::Score(_) => "Score".to_string(),
        shockwave::Chunk::FrameLabels(l) => format!("FrameLabels ({} labels)", l.labels.len()),
        shockwave::Chunk::Bitmap(b) => format!("Bitmap ({} RLE bytes)", b.rle_data.len()),
        shockwave::Chunk::Palette(p) => format!("Palette ({} colors)", p.colors.len()),
        shockwave::Chunk::Text(t) => format!("Text ({} chars)", t.text.chars().count()),
        shockwave::Chunk::Sound(s) => format!("Sound ({}, {} Hz)", s.codec, s.sample_rate),
        shockwave::Chunk::Raw(r) => format!("Raw({}) {} bytes", r.fourcc, r.data.len()),
    }
}
