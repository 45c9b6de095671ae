//! `MCsL` — the ordered list of cast-library descriptors; a nonempty path
//! marks a library external (spec §3 `CastList`, §4.2).

use crate::binary_reader::BinaryReader;
use crate::error::ChunkDecodeError;

#[derive(Clone, Debug)]
pub struct CastListEntry {
    pub name: String,
    pub path: String,
    pub id: u32,
    pub min_member: u16,
    pub max_member: u16,
    pub flags: u16,
}

impl CastListEntry {
    pub fn is_external(&self) -> bool {
        !self.path.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct CastListChunk {
    pub entries: Vec<CastListEntry>,
}

impl CastListChunk {
    /// String length prefixes are u16 in container endian (spec §4.2: "in
    /// some variants" name/path strings use a wider prefix than the u8
    /// pascal strings elsewhere in the format).
    pub fn decode(r: &mut BinaryReader) -> Result<Self, ChunkDecodeError> {
        let count = r.read_u16()?;
        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let name = r.read_pascal_str_u16()?;
            let path = r.read_pascal_str_u16()?;
            let id = r.read_u32()?;
            let min_member = r.read_u16()?;
            let max_member = r.read_u16()?;
            let flags = r.read_u16()?;
            entries.push(CastListEntry { name, path, id, min_member, max_member, flags });
        }
        Ok(CastListChunk { entries })
    }

    pub fn external_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter(|e| e.is_external()).map(|e| e.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_reader::Endian;

    fn push_pstr16(buf: &mut Vec<u8>, s: &str) {
        buf.extend_from_slice(&(s.len() as u16).to_be_bytes());
        buf.extend_from_slice(s.as_bytes());
    }

    #[test]
    fn marks_external_by_nonempty_path() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&2u16.to_be_bytes());
        push_pstr16(&mut buf, "Internal");
        push_pstr16(&mut buf, "");
        buf.extend_from_slice(&1u32.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes());
        buf.extend_from_slice(&10u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        push_pstr16(&mut buf, "External");
        push_pstr16(&mut buf, "C:\\assets\\shared.cst");
        buf.extend_from_slice(&2u32.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes());
        buf.extend_from_slice(&5u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());

        let mut r = BinaryReader::new(&buf, Endian::Big);
        let chunk = CastListChunk::decode(&mut r).unwrap();
        assert_eq!(chunk.entries.len(), 2);
        assert!(!chunk.entries[0].is_external());
        assert!(chunk.entries[1].is_external());
        assert_eq!(chunk.external_paths().collect::<Vec<_>>(), vec!["C:\\assets\\shared.cst"]);
    }
}
