//! Container discovery: the uncompressed RIFX/XFIR `imap`/`mmap` layout, or
//! the Afterburner `Fver`/`Fcdr`/`ABMP`/`FGEI` layout, both producing a
//! uniform [`ResourceTable`] (spec §4.1).

pub mod afterburner;

use std::sync::Arc;

use crate::binary_reader::{BinaryReader, Endian};
use crate::chunk_type::MovieKind;
use crate::error::LoadError;
use crate::fourcc::{tags, FourCC};
use crate::resource::ResourceTable;

/// Everything the container header told us before any chunk was decoded.
pub struct ContainerInfo {
    pub endian: Endian,
    pub afterburner: bool,
    pub movie_type: FourCC,
    pub movie_kind: MovieKind,
    pub table: ResourceTable,
}

/// Parse the container header and build the resource table, per spec §4.1.
pub fn read_container(raw: &Arc<[u8]>) -> Result<ContainerInfo, LoadError> {
    if raw.len() < 12 {
        return Err(LoadError::TruncatedFile);
    }

    // The very first 4 bytes are always read in ASCII-normal (big-endian)
    // order: "RIFX" or "XFIR" is the only endianness signal (spec's open
    // question — do not implement the byte-reversed mmap-tag variant).
    let mut header = BinaryReader::new(raw, Endian::Big);
    let container_tag = header.read_fourcc().map_err(|_| LoadError::TruncatedFile)?;
    let endian = match container_tag {
        t if t == tags::RIFX => Endian::Big,
        t if t == tags::XFIR => Endian::Little,
        _ => return Err(LoadError::UnsupportedContainer),
    };
    header.set_endian(endian);

    let _container_length = header.read_u32().map_err(|_| LoadError::TruncatedFile)?;
    let movie_type = header.read_fourcc().map_err(|_| LoadError::TruncatedFile)?;
    let movie_kind_tag_endian_adjusted = movie_type;

    let afterburner = MovieKind::is_afterburner(movie_type_normalized(movie_type));

    let mut table = ResourceTable::new(Arc::clone(raw), None);

    if afterburner {
        // Afterburner's own sub-structures are always big-endian regardless
        // of what the container header claimed (it is effectively always
        // "RIFX" for FGDM/FGDC files in practice).
        let mut ab_reader = BinaryReader::new(raw, Endian::Big);
        ab_reader.seek(header.pos()).map_err(|_| LoadError::TruncatedFile)?;
        let fgei_body_offset = afterburner::read_afterburner_map(&mut ab_reader, &mut table)?;
        table.set_fgei_body_offset(fgei_body_offset);
    } else {
        read_uncompressed_map(&mut header, &mut table)?;
    }

    Ok(ContainerInfo {
        endian,
        afterburner,
        movie_type: movie_kind_tag_endian_adjusted,
        movie_kind: MovieKind::classify(movie_type_normalized(movie_type)),
        table,
    })
}

/// The movie-type tag is read in container-native order by `BinaryReader`
/// (which already normalizes FourCC reads to ASCII order), so no further
/// byte-swapping is required; this indirection exists purely to document
/// that fact at the call sites above.
fn movie_type_normalized(tag: FourCC) -> FourCC {
    tag
}

/// The uncompressed RIFX/XFIR path: `imap` points at `mmap`, which lists
/// every resource's FourCC, length, and offset (spec §4.1).
fn read_uncompressed_map(r: &mut BinaryReader, table: &mut ResourceTable) -> Result<(), LoadError> {
    let imap_tag = r.read_fourcc().map_err(|_| LoadError::MemoryMapCorrupt("imap tag".into()))?;
    if imap_tag != tags::IMAP {
        return Err(LoadError::MemoryMapCorrupt(format!("expected imap, got {imap_tag}")));
    }
    let _imap_length = r.read_u32().map_err(|_| LoadError::MemoryMapCorrupt("imap length".into()))?;
    let mmap_offset = r.read_u32().map_err(|_| LoadError::MemoryMapCorrupt("mmap offset".into()))?;

    r.seek(mmap_offset as usize).map_err(|_| LoadError::MemoryMapCorrupt("seek to mmap".into()))?;
    let mmap_tag = r.read_fourcc().map_err(|_| LoadError::MemoryMapCorrupt("mmap tag".into()))?;
    if mmap_tag != tags::MMAP {
        return Err(LoadError::MemoryMapCorrupt(format!("expected mmap, got {mmap_tag}")));
    }
    let _mmap_length = r.read_u32().map_err(|_| LoadError::MemoryMapCorrupt("mmap length".into()))?;
    let _header_len = r.read_u16().map_err(|_| LoadError::MemoryMapCorrupt("mmap header len".into()))?;
    let _entry_len = r.read_u16().map_err(|_| LoadError::MemoryMapCorrupt("mmap entry len".into()))?;
    let _max_entries = r.read_u32().map_err(|_| LoadError::MemoryMapCorrupt("mmap max entries".into()))?;
    let used_entries = r.read_u32().map_err(|_| LoadError::MemoryMapCorrupt("mmap used entries".into()))?;
    r.skip(12).map_err(|_| LoadError::MemoryMapCorrupt("mmap free-list pointers".into()))?;

    for index in 0..used_entries {
        let fourcc = r.read_fourcc().map_err(|_| LoadError::MemoryMapCorrupt("entry fourcc".into()))?;
        let length = r.read_u32().map_err(|_| LoadError::MemoryMapCorrupt("entry length".into()))?;
        let offset = r.read_u32().map_err(|_| LoadError::MemoryMapCorrupt("entry offset".into()))?;
        let _flags = r.read_u16().map_err(|_| LoadError::MemoryMapCorrupt("entry flags".into()))?;
        let _pad = r.read_u16().map_err(|_| LoadError::MemoryMapCorrupt("entry pad".into()))?;
        let _link = r.read_u32().map_err(|_| LoadError::MemoryMapCorrupt("entry link".into()))?;

        if fourcc.to_u32_be() == 0 || offset == 0 {
            // Gaps in the slot table are permissible and skipped (spec §4.1
            // step 4).
            continue;
        }
        // `offset` points at the chunk's own tag+length header; payload
        // decoders only ever see bytes past it.
        table.insert_direct(index, fourcc, offset + 8, length);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_u32(buf: &mut Vec<u8>, v: u32) {
        buf.extend_from_slice(&v.to_be_bytes());
    }

    fn push_u16(buf: &mut Vec<u8>, v: u16) {
        buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Builds the minimal file from spec §8 scenario 1: an empty mmap.
    fn minimal_rifx() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"RIFX");
        push_u32(&mut buf, 20);
        buf.extend_from_slice(b"MV93");
        // imap
        buf.extend_from_slice(b"imap");
        push_u32(&mut buf, 4);
        let mmap_offset = (buf.len() + 4) as u32;
        push_u32(&mut buf, mmap_offset);
        // mmap
        buf.extend_from_slice(b"mmap");
        push_u32(&mut buf, 24);
        push_u16(&mut buf, 24); // header len
        push_u16(&mut buf, 20); // entry len
        push_u32(&mut buf, 0); // max entries
        push_u32(&mut buf, 0); // used entries
        buf.extend_from_slice(&[0u8; 12]);
        buf
    }

    #[test]
    fn minimal_rifx_has_no_resources() {
        let raw: Arc<[u8]> = Arc::from(minimal_rifx().into_boxed_slice());
        let info = read_container(&raw).expect("should parse");
        assert_eq!(info.endian, Endian::Big);
        assert!(!info.afterburner);
        assert_eq!(info.table.len(), 0);
    }

    #[test]
    fn rejects_bad_container_tag() {
        let raw: Arc<[u8]> = Arc::from(vec![b'N', b'O', b'P', b'E', 0, 0, 0, 0, 0, 0, 0, 0].into_boxed_slice());
        assert!(matches!(read_container(&raw), Err(LoadError::UnsupportedContainer)));
    }
}
