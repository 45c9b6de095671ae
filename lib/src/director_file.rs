//! The crate's entry point: load a Shockwave container and expose its
//! decoded resources through typed accessors (spec §5/§6 "DirectorFile").

use std::path::Path;
use std::sync::Arc;

use crate::assets::bitmap::{decode_bitmap, Bitmap, BitmapError};
use crate::assets::sound::{to_wav, SoundAssetError};
use crate::binary_reader::Endian;
use crate::chunk_type::MovieKind;
use crate::chunks::cast::CastChunk;
use crate::chunks::cast_list::CastListChunk;
use crate::chunks::cast_member::{unnamed_placeholder, CastMemberChunk};
use crate::chunks::config::ConfigChunk;
use crate::chunks::key_table::KeyTableChunk;
use crate::chunks::palette::{self, PaletteChunk};
use crate::chunks::score::{FrameLabelsChunk, ScoreChunk};
use crate::chunks::script::ScriptChunk;
use crate::chunks::script_context::ScriptContextChunk;
use crate::chunks::script_names::ScriptNamesChunk;
use crate::chunks::sound::SoundChunk;
use crate::chunks::{bitmap_info_from_specific_data, Chunk};
use crate::container::read_container;
use crate::diagnostics::Diagnostics;
use crate::dispatch::dispatch;
use crate::error::LoadError;
use crate::fourcc::tags;
use crate::resource::ResourceTable;

/// Everything a caller needs to know about the container that isn't tied to
/// a specific resource (spec §6 "metadata accessors").
#[derive(Clone, Debug)]
pub struct Metadata {
    pub endian: Endian,
    pub afterburner: bool,
    pub movie_kind: MovieKind,
    pub director_version: i32,
    pub stage_width: i32,
    pub stage_height: i32,
    pub tempo: i16,
    pub channel_count: u32,
    pub base_path: Option<String>,
}

/// A fully loaded Shockwave container: every resource dispatched to its
/// typed chunk, with diagnostics for anything that had to be demoted
/// (spec §4.1, §7).
pub struct DirectorFile {
    table: ResourceTable,
    chunks: std::collections::HashMap<u32, Chunk>,
    metadata: Metadata,
    diagnostics: Diagnostics,
    endian: Endian,
    base_path: Option<String>,
}

impl DirectorFile {
    /// Parse `bytes` as a Director container (spec §4 end to end).
    pub fn load(bytes: impl Into<Vec<u8>>) -> Result<Self, LoadError> {
        Self::load_with_base_path(bytes, None)
    }

    /// Parse the file at `path`, recording its parent directory so external
    /// cast paths in the `CastList` can later be resolved relative to it
    /// (spec §6 `basePath`).
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|_| LoadError::TruncatedFile)?;
        let base_path = path.parent().map(|p| p.to_string_lossy().into_owned());
        Self::load_with_base_path(bytes, base_path)
    }

    fn load_with_base_path(bytes: impl Into<Vec<u8>>, base_path: Option<String>) -> Result<Self, LoadError> {
        let raw: Arc<[u8]> = Arc::from(bytes.into().into_boxed_slice());
        let container = read_container(&raw)?;

        let result = dispatch(&container.table, container.endian);

        let config = result.chunks.values().find_map(Chunk::as_config);
        let (stage_width, stage_height, tempo, channel_count) = match config {
            Some(c) => (c.stage_width(), c.stage_height(), c.tempo, c.channel_count()),
            None => (0, 0, 0, 48),
        };

        let metadata = Metadata {
            endian: container.endian,
            afterburner: container.afterburner,
            movie_kind: container.movie_kind,
            director_version: result.director_version,
            stage_width,
            stage_height,
            tempo,
            channel_count,
            base_path: base_path.clone(),
        };

        Ok(DirectorFile {
            table: container.table,
            chunks: result.chunks,
            metadata,
            diagnostics: result.diagnostics,
            endian: container.endian,
            base_path,
        })
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Every resource id this file contains (spec §6 "resource
    /// enumeration").
    pub fn resource_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.table.ids()
    }

    /// The decoded chunk for `id`, whatever kind it turned out to be.
    pub fn chunk(&self, id: u32) -> Option<&Chunk> {
        self.chunks.get(&id)
    }

    pub fn config(&self) -> Option<&ConfigChunk> {
        self.chunks.values().find_map(Chunk::as_config)
    }

    pub fn key_table(&self) -> Option<&KeyTableChunk> {
        self.chunks.values().find_map(Chunk::as_key_table)
    }

    pub fn cast_list(&self) -> Option<&CastListChunk> {
        self.chunks.values().find_map(Chunk::as_cast_list)
    }

    /// Every `CAS*` chunk's resource id paired with its decoded chunk,
    /// in ascending resource-id order (spec §6 `casts()`).
    pub fn casts(&self) -> Vec<(u32, &CastChunk)> {
        let mut out: Vec<(u32, &CastChunk)> =
            self.chunks.iter().filter_map(|(&id, c)| c.as_cast().map(|cc| (id, cc))).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// Every `CASt` member, in ascending resource-id order (spec §6
    /// `castMembers()`).
    pub fn cast_members(&self) -> Vec<(u32, &CastMemberChunk)> {
        let mut out: Vec<(u32, &CastMemberChunk)> =
            self.chunks.iter().filter_map(|(&id, c)| c.as_cast_member().map(|cm| (id, cm))).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// A display name for a cast member, falling back to the `Unnamed #<id>`
    /// placeholder when the member's own name is empty (spec §8).
    pub fn cast_member_display_name(&self, id: u32) -> Option<String> {
        let member = self.chunk(id)?.as_cast_member()?;
        Some(if member.name.is_empty() { unnamed_placeholder(id) } else { member.name.clone() })
    }

    pub fn scripts(&self) -> Vec<(u32, &ScriptChunk)> {
        let mut out: Vec<(u32, &ScriptChunk)> =
            self.chunks.iter().filter_map(|(&id, c)| c.as_script().map(|s| (id, s))).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    pub fn script_context(&self) -> Option<&ScriptContextChunk> {
        self.chunks.values().find_map(Chunk::as_script_context)
    }

    pub fn script_names(&self) -> Option<&ScriptNamesChunk> {
        self.chunks.values().find_map(Chunk::as_script_names)
    }

    /// The `Lscr` resource implementing `member`'s attached script, if any
    /// (spec §6 "symbol resolution"): `CastMember.scriptId` through the
    /// `ScriptContext` to a resource id.
    pub fn script_for_member(&self, member: &CastMemberChunk) -> Option<&ScriptChunk> {
        let ctx = self.script_context()?;
        let script_id = ctx.resolve(member.script_id)?;
        self.chunk(script_id)?.as_script()
    }

    pub fn score_chunk(&self) -> Option<&ScoreChunk> {
        self.chunks.values().find_map(Chunk::as_score)
    }

    pub fn frame_labels_chunk(&self) -> Option<&FrameLabelsChunk> {
        self.chunks.values().find_map(Chunk::as_frame_labels)
    }

    pub fn has_score(&self) -> bool {
        self.score_chunk().is_some()
    }

    pub fn has_external_casts(&self) -> bool {
        self.cast_list().map(|cl| cl.entries.iter().any(|e| e.is_external())).unwrap_or(false)
    }

    pub fn external_cast_paths(&self) -> Vec<String> {
        self.cast_list().map(|cl| cl.external_paths().map(str::to_owned).collect()).unwrap_or_default()
    }

    pub fn palettes(&self) -> Vec<(u32, &PaletteChunk)> {
        let mut out: Vec<(u32, &PaletteChunk)> =
            self.chunks.iter().filter_map(|(&id, c)| c.as_palette().map(|p| (id, p))).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// A member-owned `CLUT`, found via the key table (spec §8 palette
    /// resolution).
    fn owned_clut(&self, member_id: u32) -> Option<&PaletteChunk> {
        let key_table = self.key_table()?;
        let clut_id = key_table.child_of_type(member_id, tags::CLUT)?;
        self.chunk(clut_id)?.as_palette()
    }

    /// Decode a bitmap cast member's pixels, resolving its `BITD` payload
    /// through the key table and its palette per spec §8 (spec §6
    /// `decodeBitmap(castMember)`).
    pub fn decode_bitmap(&self, member_id: u32) -> Result<Bitmap, DecodeAssetError> {
        let member = self.chunk(member_id).and_then(Chunk::as_cast_member).ok_or(DecodeAssetError::NotFound)?;
        let info = bitmap_info_from_specific_data(&member.specific_data, self.endian)
            .ok_or(DecodeAssetError::MalformedHeader)?;

        let key_table = self.key_table().ok_or(DecodeAssetError::NotFound)?;
        let bitd_id = key_table.child_of_type(member_id, tags::BITD).ok_or(DecodeAssetError::NotFound)?;
        let bitd = self.chunk(bitd_id).and_then(Chunk::as_bitmap).ok_or(DecodeAssetError::NotFound)?;

        let palette_colors = palette::resolve(info.palette_id, self.owned_clut(member_id));
        decode_bitmap(&info, &bitd.rle_data, &palette_colors, self.endian).map_err(DecodeAssetError::Bitmap)
    }

    pub fn sound_for_member(&self, member_id: u32) -> Option<&SoundChunk> {
        let key_table = self.key_table()?;
        let snd_id = key_table
            .child_of_type(member_id, tags::SND)
            .or_else(|| key_table.child_of_type(member_id, tags::EDIM))?;
        self.chunk(snd_id)?.as_sound()
    }

    /// Decode a sound cast member into a playable WAV (spec §6
    /// `decodeSound(castMember)`; returns the original bytes unwrapped for
    /// MP3, per spec §4.3).
    pub fn decode_sound_wav(&self, member_id: u32) -> Result<Vec<u8>, DecodeAssetError> {
        let sound = self.sound_for_member(member_id).ok_or(DecodeAssetError::NotFound)?;
        to_wav(sound).map_err(DecodeAssetError::Sound)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeAssetError {
    #[error("no such resource, or it is not the expected chunk kind")]
    NotFound,
    #[error("bitmap member's specificData header could not be parsed")]
    MalformedHeader,
    #[error(transparent)]
    Bitmap(#[from] BitmapError),
    #[error(transparent)]
    Sound(#[from] SoundAssetError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_u32(buf: &mut Vec<u8>, v: u32) {
        buf.extend_from_slice(&v.to_be_bytes());
    }

    fn push_u16(buf: &mut Vec<u8>, v: u16) {
        buf.extend_from_slice(&v.to_be_bytes());
    }

    fn minimal_rifx_with_config() -> Vec<u8> {
        let mut config = Vec::new();
        for _ in 0..13 {
            config.extend_from_slice(&0u16.to_be_bytes());
        }
        config.push(0);
        config.push(0);
        for _ in 0..3 {
            config.extend_from_slice(&0i32.to_be_bytes());
        }
        config.extend_from_slice(&30i16.to_be_bytes());
        config.extend_from_slice(&0i16.to_be_bytes());
        config.extend_from_slice(&0i16.to_be_bytes());
        config.extend_from_slice(&0i32.to_be_bytes());
        config.extend_from_slice(&0u32.to_be_bytes());
        config.extend_from_slice(&1300i16.to_be_bytes());

        let mut buf = Vec::new();
        buf.extend_from_slice(b"RIFX");
        push_u32(&mut buf, 0);
        buf.extend_from_slice(b"MV93");

        buf.extend_from_slice(b"imap");
        push_u32(&mut buf, 4);
        let mmap_offset_field_pos = buf.len();
        push_u32(&mut buf, 0); // patched below

        // The mmap entry's `offset` points at the chunk's own tag+length
        // header, not its payload (the container reader adds 8 to land on
        // the payload start), so the DRCF chunk can live anywhere before
        // the mmap; here it sits right before the mmap itself.
        let config_header_pos = buf.len() as u32;
        buf.extend_from_slice(b"DRCF");
        push_u32(&mut buf, config.len() as u32);
        buf.extend_from_slice(&config);

        let mmap_start = buf.len();
        buf.extend_from_slice(b"mmap");
        push_u32(&mut buf, 24);
        push_u16(&mut buf, 24);
        push_u16(&mut buf, 20);
        push_u32(&mut buf, 1);
        push_u32(&mut buf, 1);
        buf.extend_from_slice(&[0u8; 12]);

        buf.extend_from_slice(b"DRCF");
        push_u32(&mut buf, config.len() as u32);
        push_u32(&mut buf, config_header_pos);
        push_u16(&mut buf, 0);
        push_u16(&mut buf, 0);
        push_u32(&mut buf, 0);

        let mmap_offset = mmap_start as u32;
        buf[mmap_offset_field_pos..mmap_offset_field_pos + 4].copy_from_slice(&mmap_offset.to_be_bytes());

        buf
    }

    #[test]
    fn loads_config_and_exposes_stage_metadata() {
        let bytes = minimal_rifx_with_config();
        let file = DirectorFile::load(bytes).expect("should parse");
        assert_eq!(file.metadata().director_version, 1300);
        assert!(file.config().is_some());
    }
}
