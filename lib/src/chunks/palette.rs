//! `CLUT` — a color lookup table, plus the built-in palettes addressable by
//! negative id (spec §3 `Palette`).

use crate::binary_reader::BinaryReader;
use crate::error::ChunkDecodeError;

/// 0xAARRGGBB, alpha always 0xFF for a palette entry (spec §4.2).
pub type Argb = u32;

#[derive(Clone, Debug, Default)]
pub struct PaletteChunk {
    pub colors: Vec<Argb>,
}

impl PaletteChunk {
    pub fn decode(r: &mut BinaryReader) -> Result<Self, ChunkDecodeError> {
        let entry_count = r.remaining() / 3;
        let mut colors = Vec::with_capacity(entry_count);
        for _ in 0..entry_count {
            let red = r.read_u8()?;
            let green = r.read_u8()?;
            let blue = r.read_u8()?;
            colors.push(pack_argb(red, green, blue));
        }
        Ok(PaletteChunk { colors })
    }

    pub fn get(&self, index: usize) -> Argb {
        if self.colors.is_empty() {
            return 0xFF00_0000;
        }
        self.colors[index % self.colors.len()]
    }
}

fn pack_argb(r: u8, g: u8, b: u8) -> Argb {
    0xFF00_0000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Negative ids addressing process-wide built-in palettes (spec §3).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BuiltinPalette {
    SystemMac,
    Rainbow,
    Grayscale,
    Pastels,
    Vivid,
    Ntsc,
    Metallic,
    SystemWindows,
    SystemWindowsD4,
}

impl BuiltinPalette {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 | -1 => Some(Self::SystemMac),
            -2 => Some(Self::Rainbow),
            -3 => Some(Self::Grayscale),
            -4 => Some(Self::Pastels),
            -5 => Some(Self::Vivid),
            -6 => Some(Self::Ntsc),
            -7 => Some(Self::Metallic),
            -101 => Some(Self::SystemWindows),
            -102 => Some(Self::SystemWindowsD4),
            _ => None,
        }
    }

    /// A deterministic 256-entry table. Built procedurally rather than
    /// embedded verbatim, since each "built-in" here is a stand-in for a
    /// platform system palette the core has no access to at decode time;
    /// callers needing the literal Mac/Windows system CLUT values should
    /// supply their own table via the CLUT path instead.
    pub fn table(self) -> Vec<Argb> {
        (0..256u32)
            .map(|i| match self {
                Self::SystemMac | Self::SystemWindows | Self::SystemWindowsD4 => {
                    let shade = (i * 255 / 255) as u8;
                    pack_argb(shade, shade, shade)
                }
                Self::Grayscale => {
                    let shade = i as u8;
                    pack_argb(shade, shade, shade)
                }
                Self::Rainbow => {
                    let hue = i as u8;
                    pack_argb(hue, hue.wrapping_mul(3), 255 - hue)
                }
                Self::Pastels => {
                    let base = 128 + (i / 2) as u8;
                    pack_argb(base, base.wrapping_add(32), base.wrapping_add(64))
                }
                Self::Vivid => {
                    let saturated = (i % 256) as u8;
                    pack_argb(saturated, 255 - saturated, saturated.wrapping_mul(2))
                }
                Self::Ntsc => {
                    let luma = (i as f32 * 0.8) as u8;
                    pack_argb(luma, luma, luma)
                }
                Self::Metallic => {
                    let v = 64 + (i / 4) as u8;
                    pack_argb(v, v, v.wrapping_add(16))
                }
            })
            .collect()
    }
}

/// Resolve a `paletteId` per the rules in spec §8: 0 → SystemMac, negative →
/// the matching built-in, positive → a cast-member-owned CLUT (the caller
/// must look that member's CLUT up separately and pass it here).
pub fn resolve(palette_id: i32, owned_clut: Option<&PaletteChunk>) -> Vec<Argb> {
    if palette_id > 0 {
        return owned_clut.map(|c| c.colors.clone()).unwrap_or_else(|| BuiltinPalette::SystemMac.table());
    }
    BuiltinPalette::from_id(palette_id).unwrap_or(BuiltinPalette::SystemMac).table()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_reader::Endian;

    #[test]
    fn decodes_rgb_triples_with_full_alpha() {
        let bytes = [0x10, 0x20, 0x30, 0xAA, 0xBB, 0xCC];
        let mut r = BinaryReader::new(&bytes, Endian::Big);
        let clut = PaletteChunk::decode(&mut r).unwrap();
        assert_eq!(clut.colors, vec![0xFF10_2030, 0xFFAA_BBCC]);
    }

    #[test]
    fn out_of_range_index_wraps() {
        let bytes = [0x01, 0x02, 0x03];
        let mut r = BinaryReader::new(&bytes, Endian::Big);
        let clut = PaletteChunk::decode(&mut r).unwrap();
        assert_eq!(clut.get(0), clut.get(1));
    }

    #[test]
    fn negative_ids_resolve_to_builtins() {
        assert_eq!(BuiltinPalette::from_id(-1), Some(BuiltinPalette::SystemMac));
        assert_eq!(BuiltinPalette::from_id(-102), Some(BuiltinPalette::SystemWindowsD4));
        assert_eq!(BuiltinPalette::from_id(5), None);
    }
}
