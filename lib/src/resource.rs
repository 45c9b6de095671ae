//! The uniform, addressable resource table built by the container layer
//! (spec §3 `ResourceInfo`, §4.1 "Resource table contract").

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ResourceError;
use crate::fourcc::FourCC;

/// Where a resource's bytes live in the owning `DirectorFile`'s buffer.
#[derive(Clone, Debug)]
pub(crate) enum PayloadLocation {
    /// RIFX/XFIR layout: payload bytes sit directly in the file buffer,
    /// starting just past the 8-byte tag+length header.
    Direct { offset: u32, length: u32 },
    /// Afterburner layout: payload bytes are zlib-compressed inside the
    /// FGEI blob, at `offset` bytes past the FGEI body start.
    Compressed { offset: u32, compressed_length: u32, uncompressed_length: u32 },
}

/// A record keyed by resource id (spec §3 `ResourceInfo`).
#[derive(Clone, Debug)]
pub struct ResourceInfo {
    pub id: u32,
    pub fourcc: FourCC,
    pub offset: u32,
    pub length: u32,
    pub uncompressed_length: u32,
}

/// `id -> (FourCC, offset, length, uncompressed_length)` index plus a
/// total `payload(id)` accessor, per spec §4.1.
///
/// The decode cache is a `parking_lot::Mutex`-guarded map, making it safe to
/// share a `DirectorFile` across threads per spec §5 ("the cache must be
/// internally synchronized if the DirectorFile is concurrently read by
/// multiple workers"). We always enable it, bounded by `MAX_CACHE_ENTRIES`,
/// rather than offer a disabled mode: Afterburner inflation is the one
/// expensive, repeatable operation in this crate and every consumer wants it
/// memoized.
pub struct ResourceTable {
    raw: Arc<[u8]>,
    entries: HashMap<u32, (FourCC, PayloadLocation)>,
    /// Byte offset of the Afterburner FGEI body, if this file is Afterburner
    /// compressed. `None` for plain RIFX/XFIR files.
    fgei_body_offset: Option<u32>,
    cache: Mutex<HashMap<u32, Arc<[u8]>>>,
}

const MAX_CACHE_ENTRIES: usize = 256;

impl ResourceTable {
    pub(crate) fn new(raw: Arc<[u8]>, fgei_body_offset: Option<u32>) -> Self {
        Self {
            raw,
            entries: HashMap::new(),
            fgei_body_offset,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn set_fgei_body_offset(&mut self, offset: u32) {
        self.fgei_body_offset = Some(offset);
    }

    pub(crate) fn insert_direct(&mut self, id: u32, fourcc: FourCC, offset: u32, length: u32) {
        self.entries.insert(id, (fourcc, PayloadLocation::Direct { offset, length }));
    }

    pub(crate) fn insert_compressed(
        &mut self,
        id: u32,
        fourcc: FourCC,
        offset: u32,
        compressed_length: u32,
        uncompressed_length: u32,
    ) {
        self.entries.insert(
            id,
            (fourcc, PayloadLocation::Compressed { offset, compressed_length, uncompressed_length }),
        );
    }

    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    pub fn info(&self, id: u32) -> Option<ResourceInfo> {
        self.entries.get(&id).map(|(fourcc, loc)| match loc {
            PayloadLocation::Direct { offset, length } => ResourceInfo {
                id,
                fourcc: *fourcc,
                offset: *offset,
                length: *length,
                uncompressed_length: *length,
            },
            PayloadLocation::Compressed { offset, compressed_length, uncompressed_length } => {
                ResourceInfo {
                    id,
                    fourcc: *fourcc,
                    offset: *offset,
                    length: *compressed_length,
                    uncompressed_length: *uncompressed_length,
                }
            }
        })
    }

    pub fn iter_infos(&self) -> impl Iterator<Item = ResourceInfo> + '_ {
        self.entries.keys().copied().filter_map(move |id| self.info(id))
    }

    /// Fetch a resource's decoded payload bytes, inflating on demand for
    /// Afterburner resources. Total function on valid ids, per spec §4.1.
    pub fn payload(&self, id: u32) -> Result<Arc<[u8]>, ResourceError> {
        if let Some(hit) = self.cache.lock().get(&id) {
            return Ok(Arc::clone(hit));
        }

        let (_, loc) = self.entries.get(&id).ok_or(ResourceError::MissingResource(id))?;
        let bytes: Arc<[u8]> = match loc {
            PayloadLocation::Direct { offset, length } => {
                let start = *offset as usize;
                let end = start + *length as usize;
                let slice = self.raw.get(start..end).ok_or(ResourceError::MissingResource(id))?;
                Arc::from(slice)
            }
            PayloadLocation::Compressed { offset, compressed_length, uncompressed_length } => {
                let base = self.fgei_body_offset.ok_or(ResourceError::MissingResource(id))? as usize;
                let start = base + *offset as usize;
                let end = start + *compressed_length as usize;
                let slice = self.raw.get(start..end).ok_or(ResourceError::MissingResource(id))?;
                let inflated = crate::container::afterburner::inflate(slice)
                    .map_err(|_| ResourceError::CorruptResource(id, 0, *uncompressed_length as usize))?;
                if inflated.len() != *uncompressed_length as usize {
                    return Err(ResourceError::CorruptResource(
                        id,
                        inflated.len(),
                        *uncompressed_length as usize,
                    ));
                }
                Arc::from(inflated.into_boxed_slice())
            }
        };

        let mut cache = self.cache.lock();
        if cache.len() < MAX_CACHE_ENTRIES {
            cache.insert(id, Arc::clone(&bytes));
        }
        Ok(bytes)
    }
}
