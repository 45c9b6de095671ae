//! `CAS*` — a single cast library's ordered member-id list (spec §3 `Cast`,
//! §4.2). Slot 0 is reserved: member numbers are 1-based.

use crate::binary_reader::BinaryReader;
use crate::error::ChunkDecodeError;

#[derive(Clone, Debug, Default)]
pub struct CastChunk {
    /// `member_ids[i]` is the `CASt` resource id for 1-based member number
    /// `i + 1`; `0` denotes an unoccupied slot.
    pub member_ids: Vec<u32>,
}

impl CastChunk {
    pub fn decode(r: &mut BinaryReader) -> Result<Self, ChunkDecodeError> {
        let member_count = r.read_u32()?;
        let mut member_ids = Vec::with_capacity(member_count as usize);
        for _ in 0..member_count {
            member_ids.push(r.read_u32()?);
        }
        Ok(CastChunk { member_ids })
    }

    /// Resource id for 1-based member number `n`, if occupied.
    pub fn member_resource_id(&self, member_number: u32) -> Option<u32> {
        let index = member_number.checked_sub(1)? as usize;
        match self.member_ids.get(index) {
            Some(&id) if id != 0 => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_reader::Endian;

    #[test]
    fn zero_ids_are_empty_slots() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&3u32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&42u32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());

        let mut r = BinaryReader::new(&buf, Endian::Big);
        let cast = CastChunk::decode(&mut r).unwrap();
        assert_eq!(cast.member_resource_id(1), None);
        assert_eq!(cast.member_resource_id(2), Some(42));
        assert_eq!(cast.member_resource_id(3), None);
        assert_eq!(cast.member_resource_id(4), None);
    }
}
