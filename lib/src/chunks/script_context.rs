//! `Lctx`/`LctX` — maps a cast member's 1-based `scriptId` to the `Lscr`
//! resource implementing it (spec §3 `ScriptContext`, §4.2).

use crate::binary_reader::BinaryReader;
use crate::error::ChunkDecodeError;

#[derive(Clone, Debug)]
pub struct ScriptContextEntry {
    /// `Lscr` resource id, or `None` for an unused slot.
    pub id: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ScriptContextChunk {
    pub entries: Vec<ScriptContextEntry>,
    pub lnam_section_id: u32,
    /// `true` when this context was read from an `LctX` tag rather than
    /// `Lctx`; propagated to `Lscr` decoding, which it governs the
    /// bytecode-size field widths for (spec §4.1 step "During pass 2...").
    pub capital_x: bool,
}

impl ScriptContextChunk {
    pub fn decode(r: &mut BinaryReader, capital_x: bool) -> Result<Self, ChunkDecodeError> {
        let count = r.read_u32()?;
        let lnam_section_id = r.read_u32()?;
        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let id = r.read_i32()?;
            entries.push(ScriptContextEntry { id: if id > 0 { Some(id as u32) } else { None } });
        }
        Ok(ScriptContextChunk { entries, lnam_section_id, capital_x })
    }

    pub fn has_entries(&self) -> bool {
        self.entries.iter().any(|e| e.id.is_some())
    }

    /// `script_id` is 1-based (spec §3 `CastMember.scriptId`).
    pub fn resolve(&self, script_id: u32) -> Option<u32> {
        let index = script_id.checked_sub(1)? as usize;
        self.entries.get(index).and_then(|e| e.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_reader::Endian;

    #[test]
    fn resolves_one_based_script_id() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&3u32.to_be_bytes());
        buf.extend_from_slice(&55u32.to_be_bytes());
        for id in [-1i32, 101, -1] {
            buf.extend_from_slice(&id.to_be_bytes());
        }
        let mut r = BinaryReader::new(&buf, Endian::Big);
        let ctx = ScriptContextChunk::decode(&mut r, false).unwrap();
        assert_eq!(ctx.resolve(2), Some(101));
        assert_eq!(ctx.resolve(1), None);
        assert_eq!(ctx.lnam_section_id, 55);
        assert!(ctx.has_entries());
    }
}
