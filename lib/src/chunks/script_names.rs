//! `Lnam` — the indexed symbol table for handler names, identifier
//! references, and symbol literals (spec §3 `ScriptNames`, §4.2).

use crate::binary_reader::BinaryReader;
use crate::error::ChunkDecodeError;

#[derive(Clone, Debug, Default)]
pub struct ScriptNamesChunk {
    pub names: Vec<String>,
}

impl ScriptNamesChunk {
    pub fn decode(r: &mut BinaryReader) -> Result<Self, ChunkDecodeError> {
        let count = r.read_u32()?;
        let mut names = Vec::with_capacity(count as usize);
        for _ in 0..count {
            names.push(r.read_pascal_str_u8()?);
        }
        Ok(ScriptNamesChunk { names })
    }

    /// Never fails: out-of-range lookups return a placeholder (spec §4.2).
    pub fn name_at(&self, index: u32) -> String {
        self.names.get(index as usize).cloned().unwrap_or_else(|| format!("<unknown:{index}>"))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
