//! `KEY*` — the table linking owner resources (usually `CASt` cast members)
//! to the child resources that belong to them, keyed by the child's FourCC
//! (spec §3 `KeyTableEntry`, §4.2).

use crate::binary_reader::BinaryReader;
use crate::error::ChunkDecodeError;
use crate::fourcc::FourCC;

#[derive(Clone, Copy, Debug)]
pub struct KeyTableEntry {
    /// Resource id of the child chunk (e.g. a `STXT` or `BITD`).
    pub child_id: u32,
    /// Resource id of the owner, or `-1` when the entry is unused.
    pub owner_id: i32,
    pub child_fourcc: FourCC,
}

#[derive(Clone, Debug, Default)]
pub struct KeyTableChunk {
    pub entries: Vec<KeyTableEntry>,
}

impl KeyTableChunk {
    /// Header layout per spec §4.2: entryLen(u16), headerLen(u16),
    /// maxEntries(u32), usedEntries(u32), then usedEntries records of
    /// (sectionId:u32, castId:u32, fourcc:u32).
    pub fn decode(r: &mut BinaryReader) -> Result<Self, ChunkDecodeError> {
        const HEADER_SIZE: u32 = 12;

        let _entry_len = r.read_u16()?;
        let header_len = r.read_u16()?;
        let _max_entries = r.read_u32()?;
        let used_entries = r.read_u32()?;
        let pad = u32::from(header_len).saturating_sub(HEADER_SIZE);
        r.skip(pad as usize)?;

        let mut entries = Vec::with_capacity(used_entries as usize);
        for _ in 0..used_entries {
            let section_id = r.read_u32()?;
            let owner_id = r.read_i32()?;
            let child_fourcc = r.read_fourcc()?;
            entries.push(KeyTableEntry { child_id: section_id, owner_id, child_fourcc });
        }

        Ok(KeyTableChunk { entries })
    }

    /// All children of `owner_id`, in table order.
    pub fn children_of(&self, owner_id: u32) -> impl Iterator<Item = &KeyTableEntry> {
        self.entries.iter().filter(move |e| e.owner_id >= 0 && e.owner_id as u32 == owner_id)
    }

    /// The single child of `owner_id` with the given FourCC, if any.
    pub fn child_of_type(&self, owner_id: u32, fourcc: FourCC) -> Option<u32> {
        self.children_of(owner_id).find(|e| e.child_fourcc == fourcc).map(|e| e.child_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_reader::Endian;
    use crate::fourcc::tags;

    fn encode(entries: &[(i32, i32, FourCC)]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&12u16.to_be_bytes());
        buf.extend_from_slice(&12u16.to_be_bytes());
        buf.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        buf.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        for (child, owner, fourcc) in entries {
            buf.extend_from_slice(&child.to_be_bytes());
            buf.extend_from_slice(&owner.to_be_bytes());
            buf.extend_from_slice(fourcc.as_bytes());
        }
        buf
    }

    #[test]
    fn finds_children_by_type() {
        let bytes = encode(&[(10, 5, tags::STXT), (11, 5, tags::BITD), (12, 6, tags::STXT)]);
        let mut r = BinaryReader::new(&bytes, Endian::Big);
        let table = KeyTableChunk::decode(&mut r).unwrap();
        assert_eq!(table.children_of(5).count(), 2);
        assert_eq!(table.child_of_type(5, tags::STXT), Some(10));
        assert_eq!(table.child_of_type(6, tags::BITD), None);
    }
}
