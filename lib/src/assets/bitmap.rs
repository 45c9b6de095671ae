//! Bitmap RLE decompression and palette resolution to ARGB (spec §4.3
//! "Bitmap decoder").

use crate::binary_reader::Endian;
use crate::chunks::bitmap::BitmapInfo;
use crate::chunks::palette::Argb;

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum BitmapError {
    #[error("RLE stream ended before row {0} of {1} was fully decoded")]
    RleOverrun(u32, u32),
    #[error("unsupported bit depth {0}")]
    UnsupportedDepth(u8),
}

/// A decoded width×height ARGB pixel grid.
#[derive(Clone, Debug)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Argb>,
}

/// Decode a `BITD` RLE payload into ARGB pixels (spec §4.3). `palette` is
/// used only for `bit_depth <= 8`.
pub fn decode_bitmap(
    info: &BitmapInfo,
    rle: &[u8],
    palette: &[Argb],
    endian: Endian,
) -> Result<Bitmap, BitmapError> {
    let row_bytes = row_byte_len(info.width, info.bit_depth);
    let rows = unpack_rows(rle, row_bytes, info.height)?;

    let mut pixels = Vec::with_capacity((info.width * info.height) as usize);
    for row in &rows {
        decode_row(row, info.width, info.bit_depth, palette, endian, &mut pixels)?;
    }

    Ok(Bitmap { width: info.width, height: info.height, pixels })
}

fn row_byte_len(width: u32, bit_depth: u8) -> usize {
    ((width as usize * bit_depth as usize) + 7) / 8
}

/// PackBits-style RLE, decompressed one row at a time: a run never spans a
/// row boundary (spec §4.2 "BITD (RLE)").
fn unpack_rows(rle: &[u8], row_bytes: usize, height: u32) -> Result<Vec<Vec<u8>>, BitmapError> {
    let mut cursor = 0usize;
    let mut rows = Vec::with_capacity(height as usize);

    for row_index in 0..height {
        let mut row = Vec::with_capacity(row_bytes);
        while row.len() < row_bytes {
            let Some(&control) = rle.get(cursor) else {
                return Err(BitmapError::RleOverrun(row_index, height));
            };
            cursor += 1;
            if control == 0x80 {
                continue;
            } else if control < 0x80 {
                let count = control as usize + 1;
                let Some(bytes) = rle.get(cursor..cursor + count) else {
                    return Err(BitmapError::RleOverrun(row_index, height));
                };
                row.extend_from_slice(bytes);
                cursor += count;
            } else {
                let count = 257 - control as usize;
                let Some(&byte) = rle.get(cursor) else {
                    return Err(BitmapError::RleOverrun(row_index, height));
                };
                cursor += 1;
                row.extend(std::iter::repeat(byte).take(count));
            }
        }
        row.truncate(row_bytes);
        rows.push(row);
    }

    Ok(rows)
}

fn decode_row(
    row: &[u8],
    width: u32,
    bit_depth: u8,
    palette: &[Argb],
    endian: Endian,
    out: &mut Vec<Argb>,
) -> Result<(), BitmapError> {
    let width = width as usize;
    match bit_depth {
        1 | 2 | 4 | 8 => {
            for i in 0..width {
                let index = unpack_index(row, i, bit_depth);
                out.push(palette_lookup(palette, index));
            }
        }
        16 => {
            for i in 0..width {
                let b = &row[i * 2..i * 2 + 2];
                let raw = match endian {
                    Endian::Big => u16::from_be_bytes([b[0], b[1]]),
                    Endian::Little => u16::from_le_bytes([b[0], b[1]]),
                };
                out.push(rgb555_to_argb(raw));
            }
        }
        24 => {
            for i in 0..width {
                let r = row[i];
                let g = row[width + i];
                let b = row[2 * width + i];
                out.push(0xFF00_0000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b));
            }
        }
        32 => {
            for i in 0..width {
                let a = row[i];
                let r = row[width + i];
                let g = row[2 * width + i];
                let b = row[3 * width + i];
                out.push((u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b));
            }
        }
        other => return Err(BitmapError::UnsupportedDepth(other)),
    }
    Ok(())
}

fn unpack_index(row: &[u8], pixel: usize, bit_depth: u8) -> u32 {
    let per_byte = 8 / bit_depth as usize;
    let byte = row[pixel / per_byte];
    let shift = 8 - bit_depth as usize * (pixel % per_byte + 1);
    let mask = (1u16 << bit_depth) - 1;
    u32::from((byte >> shift) as u16 & mask)
}

fn palette_lookup(palette: &[Argb], index: u32) -> Argb {
    if palette.is_empty() {
        return 0xFF00_0000;
    }
    palette[index as usize % palette.len()]
}

/// RGB555: high bit ignored, alpha always opaque (spec §4.2).
fn rgb555_to_argb(raw: u16) -> Argb {
    let r5 = (raw >> 10) & 0x1F;
    let g5 = (raw >> 5) & 0x1F;
    let b5 = raw & 0x1F;
    let expand = |v: u16| -> u32 { u32::from((v << 3) | (v >> 2)) };
    0xFF00_0000 | (expand(r5) << 16) | (expand(g5) << 8) | expand(b5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_row_rle(row_bytes: usize, value: u8) -> Vec<u8> {
        // A single "repeat" run covering the whole row: control=257-count.
        vec![(257 - row_bytes) as u8, value]
    }

    #[test]
    fn solid_8bit_bitmap_resolves_every_pixel_to_one_palette_entry() {
        let info = BitmapInfo { width: 32, height: 16, bit_depth: 8, palette_id: -1 };
        let mut rle = Vec::new();
        for _ in 0..info.height {
            rle.extend(solid_row_rle(info.width as usize, 5));
        }
        let mut palette = vec![0u32; 256];
        palette[5] = 0xFF11_2233;

        let bitmap = decode_bitmap(&info, &rle, &palette, Endian::Big).unwrap();
        assert_eq!(bitmap.pixels.len(), (32 * 16) as usize);
        assert!(bitmap.pixels.iter().all(|&p| p == 0xFF11_2233));
    }

    #[test]
    fn verbatim_run_copies_bytes_directly() {
        let row_bytes = 4usize;
        let mut rle = Vec::new();
        rle.push((row_bytes - 1) as u8); // copy next 4 bytes verbatim
        rle.extend_from_slice(&[1, 2, 3, 4]);
        let info = BitmapInfo { width: 4, height: 1, bit_depth: 8, palette_id: 0 };
        let palette: Vec<u32> = (0..256).map(|i| i as u32).collect();
        let bitmap = decode_bitmap(&info, &rle, &palette, Endian::Big).unwrap();
        assert_eq!(bitmap.pixels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn truncated_rle_reports_overrun() {
        let info = BitmapInfo { width: 8, height: 4, bit_depth: 8, palette_id: 0 };
        let rle = vec![0x00u8]; // claims to copy 1 byte, but stream ends
        let palette = vec![0u32; 4];
        assert!(decode_bitmap(&info, &rle, &palette, Endian::Big).is_err());
    }

    #[test]
    fn rgb555_ignores_high_bit() {
        let argb = rgb555_to_argb(0b1_11111_00000_00000);
        assert_eq!(argb, 0xFFFF_0000);
    }
}
