//! Bitmap member `specificData` header parsing, and the raw `BITD` payload
//! wrapper (spec §3 `BitmapInfo`/`BitmapChunk`, §4.2).

use crate::binary_reader::BinaryReader;
use crate::error::ChunkDecodeError;

#[derive(Clone, Copy, Debug)]
pub struct BitmapInfo {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub palette_id: i32,
}

impl BitmapInfo {
    /// Parses a cast member's `specificData` blob when `memberType == Bitmap`
    /// (spec §4.2 "Bitmap info"). `paletteId`'s width (i16 vs i32) varies by
    /// version; per spec §9, try i32 first and fall back to sign-extended
    /// i16 if the wider read looks implausible (outside [-102, 32767]).
    pub fn decode(r: &mut BinaryReader) -> Result<Self, ChunkDecodeError> {
        let top = r.read_i16()?;
        let left = r.read_i16()?;
        let bottom = r.read_i16()?;
        let right = r.read_i16()?;
        let width = (i32::from(right) - i32::from(left)).unsigned_abs();
        let height = (i32::from(bottom) - i32::from(top)).unsigned_abs();

        let bit_depth_raw = r.read_u16()?;
        let bit_depth = normalize_bit_depth((bit_depth_raw & 0x00FF) as u8);

        let palette_id = if r.remaining() >= 4 {
            let saved = r.clone();
            let wide = r.read_i32()?;
            if (-102..=32767).contains(&wide) {
                wide
            } else {
                let mut narrow_reader = saved;
                i32::from(narrow_reader.read_i16()?)
            }
        } else if r.remaining() >= 2 {
            i32::from(r.read_i16()?)
        } else {
            0
        };

        Ok(BitmapInfo { width, height, bit_depth, palette_id })
    }
}

fn normalize_bit_depth(raw: u8) -> u8 {
    match raw {
        0 => 1,
        1 | 2 | 4 | 8 | 16 | 24 | 32 => raw,
        _ => 8,
    }
}

/// The raw RLE-compressed pixel payload; decoded on demand by
/// `assets::bitmap` once the owning `BitmapInfo` and palette are known.
#[derive(Clone, Debug)]
pub struct BitmapChunk {
    pub rle_data: Vec<u8>,
}

impl BitmapChunk {
    pub fn decode(r: &mut BinaryReader) -> Result<Self, ChunkDecodeError> {
        Ok(BitmapChunk { rle_data: r.rest().to_vec() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_reader::Endian;

    #[test]
    fn decodes_rect_into_width_height() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0i16.to_be_bytes());
        buf.extend_from_slice(&0i16.to_be_bytes());
        buf.extend_from_slice(&16i16.to_be_bytes());
        buf.extend_from_slice(&32i16.to_be_bytes());
        buf.extend_from_slice(&8u16.to_be_bytes());
        buf.extend_from_slice(&(-1i32).to_be_bytes());

        let mut r = BinaryReader::new(&buf, Endian::Big);
        let info = BitmapInfo::decode(&mut r).unwrap();
        assert_eq!(info.width, 32);
        assert_eq!(info.height, 16);
        assert_eq!(info.bit_depth, 8);
        assert_eq!(info.palette_id, -1);
    }

    #[test]
    fn falls_back_to_i16_palette_id_on_implausible_i32() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0i16.to_be_bytes());
        buf.extend_from_slice(&0i16.to_be_bytes());
        buf.extend_from_slice(&1i16.to_be_bytes());
        buf.extend_from_slice(&1i16.to_be_bytes());
        buf.extend_from_slice(&8u16.to_be_bytes());
        // Only 2 bytes available where a 4-byte read would misparse.
        buf.extend_from_slice(&(-1i16).to_be_bytes());

        let mut r = BinaryReader::new(&buf, Endian::Big);
        let info = BitmapInfo::decode(&mut r).unwrap();
        assert_eq!(info.palette_id, -1);
    }
}
