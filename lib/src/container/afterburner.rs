//! Afterburner (post-D8 compressed container) layer: `Fver`/`Fcdr`/`ABMP`/
//! `FGEI` parsing and on-demand zlib inflation (spec §4.1).

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::binary_reader::{BinaryReader, Endian};
use crate::error::LoadError;
use crate::fourcc::{tags, FourCC};
use crate::resource::ResourceTable;

/// Inflate a single zlib-compressed resource payload. Shared by
/// `ResourceTable::payload` and the ABMP/ILS bootstrap parsing below.
pub(crate) fn inflate(compressed: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

/// A LEB128-style variable-length integer, as used throughout `ABMP`/`FGEI`
/// bookkeeping structures.
fn read_var_int(r: &mut BinaryReader) -> Result<u32, LoadError> {
    let mut result: u32 = 0;
    let mut shift = 0u32;
    loop {
        let byte = r
            .read_u8()
            .map_err(|_| LoadError::AfterburnerMapCorrupt("truncated varint".into()))?;
        result |= u32::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
        if shift >= 35 {
            return Err(LoadError::AfterburnerMapCorrupt("varint too long".into()));
        }
    }
    Ok(result)
}

/// Parses `Fver`, `Fcdr`, `ABMP`, and the `FGEI` header, populating `table`
/// with every resource's compressed location, and returning the
/// `directorVersion` advertised by `Fver` if present (0 otherwise — the
/// authoritative version still comes from the `DRCF`/`VWCF` chunk per spec
/// §4.1 pass 1).
pub(crate) fn read_afterburner_map(
    r: &mut BinaryReader,
    table: &mut ResourceTable,
) -> Result<u32, LoadError> {
    expect_tag(r, tags::FVER)?;
    let fver_length = read_var_int(r).map_err(|_| LoadError::AfterburnerMapCorrupt("Fver length".into()))? as usize;
    let fver_start = r.pos();
    let fver_version = read_var_int(r).map_err(|_| LoadError::AfterburnerMapCorrupt("Fver version".into()))?;
    if fver_version >= 0x401 {
        let _imap_version = read_var_int(r);
        let _director_version = read_var_int(r);
    }
    if fver_version >= 0x501 {
        if let Ok(len) = r.read_u8() {
            let _ = r.read_bytes(len as usize);
        }
    }
    // Tolerate any trailing unknown fields by seeking to the declared end.
    let _ = r.seek(fver_start + fver_length);

    expect_tag(r, tags::FCDR)?;
    let fcdr_length = read_var_int(r).map_err(|_| LoadError::AfterburnerMapCorrupt("Fcdr length".into()))? as usize;
    let fcdr_compressed = r
        .read_bytes(fcdr_length)
        .map_err(|_| LoadError::AfterburnerMapCorrupt("Fcdr body truncated".into()))?;
    // Fcdr lists the compressor GUIDs available; only zlib is required by
    // this crate (spec §4.1 step 2), so the contents are validated but not
    // retained beyond confirming inflation succeeds.
    inflate(fcdr_compressed).map_err(|e| LoadError::Inflate(e.to_string()))?;

    expect_tag(r, tags::ABMP)?;
    let abmp_length = read_var_int(r).map_err(|_| LoadError::AfterburnerMapCorrupt("ABMP length".into()))? as usize;
    let abmp_end = r.pos() + abmp_length;
    let _abmp_compression_type = read_var_int(r);
    let abmp_uncompressed_length =
        read_var_int(r).map_err(|_| LoadError::AfterburnerMapCorrupt("ABMP uncompressed length".into()))?;
    let remaining = abmp_end.saturating_sub(r.pos());
    let abmp_compressed = r
        .read_bytes(remaining)
        .map_err(|_| LoadError::AfterburnerMapCorrupt("ABMP body truncated".into()))?;
    let abmp_uncompressed =
        inflate(abmp_compressed).map_err(|e| LoadError::Inflate(e.to_string()))?;
    if abmp_uncompressed.len() != abmp_uncompressed_length as usize {
        return Err(LoadError::AfterburnerMapCorrupt(format!(
            "ABMP: expected {} uncompressed bytes, got {}",
            abmp_uncompressed_length,
            abmp_uncompressed.len()
        )));
    }

    let mut abmp_reader = BinaryReader::new(&abmp_uncompressed, r.endian());
    let _unk1 = read_var_int(&mut abmp_reader);
    let _unk2 = read_var_int(&mut abmp_reader);
    let resource_count =
        read_var_int(&mut abmp_reader).map_err(|_| LoadError::AfterburnerMapCorrupt("resource count".into()))?;

    for _ in 0..resource_count {
        let id = read_var_int(&mut abmp_reader)
            .map_err(|_| LoadError::AfterburnerMapCorrupt("resource id".into()))?;
        let offset = read_var_int(&mut abmp_reader)
            .map_err(|_| LoadError::AfterburnerMapCorrupt("resource offset".into()))?;
        let compressed_size = read_var_int(&mut abmp_reader)
            .map_err(|_| LoadError::AfterburnerMapCorrupt("resource compressed size".into()))?;
        let uncompressed_size = read_var_int(&mut abmp_reader)
            .map_err(|_| LoadError::AfterburnerMapCorrupt("resource uncompressed size".into()))?;
        let _compressor_index = read_var_int(&mut abmp_reader);
        let tag = abmp_reader
            .read_fourcc()
            .map_err(|_| LoadError::AfterburnerMapCorrupt("resource tag".into()))?;

        table.insert_compressed(id, tag, offset, compressed_size, uncompressed_size);
    }

    expect_tag(r, tags::FGEI)?;
    // The initial-load-segment (ILS) length prefix; not needed beyond
    // positioning the cursor at the FGEI body start, which is the base for
    // every `PayloadLocation::Compressed::offset` recorded above.
    let _ils_unk1 = read_var_int(r);
    Ok(r.pos() as u32)
}

fn expect_tag(r: &mut BinaryReader, tag: FourCC) -> Result<(), LoadError> {
    let got = r
        .read_fourcc()
        .map_err(|_| LoadError::AfterburnerMapCorrupt(format!("expected {tag} tag")))?;
    if got != tag {
        return Err(LoadError::AfterburnerMapCorrupt(format!("expected {tag} tag, got {got}")));
    }
    Ok(())
}

pub(crate) fn container_endian_from_afterburner() -> Endian {
    // Afterburner files are always big-endian at the container level; the
    // `RIFX`/`XFIR` ordering oracle only applies to the uncompressed layout.
    Endian::Big
}
