//! The two-pass chunk dispatcher (spec §4.1 "Chunk dispatcher").

use std::collections::HashMap;

use crate::binary_reader::{BinaryReader, Endian};
use crate::chunk_type::ChunkType;
use crate::chunks::{
    bitmap::BitmapChunk, cast::CastChunk, cast_list::CastListChunk, cast_member::CastMemberChunk,
    config::ConfigChunk, key_table::KeyTableChunk, media::RawChunk, palette::PaletteChunk,
    score::{FrameLabelsChunk, ScoreChunk}, script::ScriptChunk, script_context::ScriptContextChunk,
    script_names::ScriptNamesChunk, sound::SoundChunk, text::TextChunk, Chunk,
};
use crate::diagnostics::Diagnostics;
use crate::error::ChunkDecodeError;
use crate::fourcc::{tags, FourCC};
use crate::resource::ResourceTable;

pub struct DispatchResult {
    pub chunks: HashMap<u32, Chunk>,
    pub director_version: i32,
    pub diagnostics: Diagnostics,
}

/// Runs both passes described in spec §4.1 and returns every resource's
/// decoded (or demoted) chunk, plus the discovered Director version.
pub fn dispatch(table: &ResourceTable, endian: Endian) -> DispatchResult {
    let director_version = discover_version(table, endian);

    let mut chunks = HashMap::with_capacity(table.len());
    let mut diagnostics = Diagnostics::new();
    // capitalX propagates from the most recently decoded script context to
    // every Lscr decoded after it (spec §4.1 pass 2). Resource ids are
    // visited in ascending order so that an owning Lctx/LctX is very likely
    // to be seen before the Lscr chunks it governs, matching how these
    // chunks are laid out by the authoring tool in practice.
    let mut capital_x = false;

    let mut ids: Vec<u32> = table.ids().collect();
    ids.sort_unstable();

    for id in ids {
        let Some(info) = table.info(id) else { continue };
        let payload = match table.payload(id) {
            Ok(bytes) => bytes,
            Err(_) => {
                diagnostics.record(id, info.fourcc, ChunkDecodeError::Truncated);
                chunks.insert(id, Chunk::Raw(RawChunk::new(info.fourcc, &[])));
                continue;
            }
        };

        let mut r = BinaryReader::new(&payload, endian);
        let chunk_type = ChunkType::of(info.fourcc);

        let decoded = decode_one(chunk_type, info.fourcc, &mut r, director_version, &mut capital_x);
        match decoded {
            Ok(chunk) => {
                chunks.insert(id, chunk);
            }
            Err(err) => {
                diagnostics.record(id, info.fourcc, err);
                chunks.insert(id, Chunk::Raw(RawChunk::new(info.fourcc, &payload)));
            }
        }
    }

    DispatchResult { chunks, director_version, diagnostics }
}

/// Pass 1: find the first `DRCF`/`VWCF` payload and decode it tentatively
/// with version 0, extracting `directorVersion` for pass 2 (spec §4.1).
fn discover_version(table: &ResourceTable, endian: Endian) -> i32 {
    let mut ids: Vec<u32> = table.ids().collect();
    ids.sort_unstable();

    for id in ids {
        let Some(info) = table.info(id) else { continue };
        if ChunkType::of(info.fourcc) != ChunkType::Config {
            continue;
        }
        let Ok(payload) = table.payload(id) else { continue };
        let mut r = BinaryReader::new(&payload, endian);
        if let Ok(config) = ConfigChunk::decode(&mut r) {
            return config.director_version;
        }
    }
    0
}

fn decode_one(
    chunk_type: ChunkType,
    fourcc: FourCC,
    r: &mut BinaryReader,
    director_version: i32,
    capital_x: &mut bool,
) -> Result<Chunk, ChunkDecodeError> {
    match chunk_type {
        ChunkType::Config => ConfigChunk::decode(r).map(Chunk::Config),
        ChunkType::KeyTable => KeyTableChunk::decode(r).map(Chunk::KeyTable),
        ChunkType::CastList => CastListChunk::decode(r).map(Chunk::CastList),
        ChunkType::Cast => CastChunk::decode(r).map(Chunk::Cast),
        ChunkType::CastMember => CastMemberChunk::decode(r).map(Chunk::CastMember),
        ChunkType::ScriptContext => {
            *capital_x = fourcc == tags::LCTX_CAP;
            ScriptContextChunk::decode(r, *capital_x).map(Chunk::ScriptContext)
        }
        ChunkType::ScriptNames => ScriptNamesChunk::decode(r).map(Chunk::ScriptNames),
        ChunkType::Script => ScriptChunk::decode(r, *capital_x).map(Chunk::Script),
        ChunkType::Score => ScoreChunk::decode(r).map(Chunk::Score),
        ChunkType::FrameLabels => FrameLabelsChunk::decode(r).map(Chunk::FrameLabels),
        ChunkType::Bitmap => BitmapChunk::decode(r).map(Chunk::Bitmap),
        ChunkType::Palette => PaletteChunk::decode(r).map(Chunk::Palette),
        ChunkType::Text => TextChunk::decode(r, director_version).map(Chunk::Text),
        ChunkType::Sound => SoundChunk::decode(r, director_version).map(Chunk::Sound),
        ChunkType::Unknown => Ok(Chunk::Raw(RawChunk::new(fourcc, r.rest()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn config_payload(director_version: i16) -> Vec<u8> {
        let mut buf = Vec::new();
        for _ in 0..13 {
            buf.extend_from_slice(&0u16.to_be_bytes());
        }
        buf.extend_from_slice(&0u8.to_be_bytes());
        buf.extend_from_slice(&0u8.to_be_bytes());
        for _ in 0..3 {
            buf.extend_from_slice(&0i32.to_be_bytes());
        }
        buf.extend_from_slice(&30i16.to_be_bytes());
        buf.extend_from_slice(&0i16.to_be_bytes());
        buf.extend_from_slice(&0i16.to_be_bytes());
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&director_version.to_be_bytes());
        buf
    }

    #[test]
    fn unknown_tag_becomes_raw_and_known_tag_decodes() {
        let config_bytes = config_payload(1300);
        let raw: Arc<[u8]> = Arc::from(config_bytes.clone().into_boxed_slice());
        let mut table = ResourceTable::new(Arc::clone(&raw), None);
        table.insert_direct(0, tags::DRCF, 0, config_bytes.len() as u32);

        let unknown_tag = FourCC::from_str("XTRA");
        let unknown_bytes: Arc<[u8]> = Arc::from(vec![1u8, 2, 3].into_boxed_slice());
        let mut table2 = ResourceTable::new(Arc::clone(&unknown_bytes), None);
        table2.insert_direct(0, unknown_tag, 0, 3);

        let result = dispatch(&table, Endian::Big);
        assert_eq!(result.director_version, 1300);
        assert!(matches!(result.chunks.get(&0), Some(Chunk::Config(_))));

        let result2 = dispatch(&table2, Endian::Big);
        assert!(matches!(result2.chunks.get(&0), Some(Chunk::Raw(_))));
        assert!(result2.diagnostics.is_empty());
    }
}
