//! Error taxonomy. Two bands, per spec §7: fatal load errors abort `load`;
//! per-chunk decode errors are demoted to a `RawChunk` and recorded in the
//! diagnostics log instead of propagating.

use thiserror::Error;

use crate::fourcc::FourCC;

/// Band 1: fatal errors that prevent a `DirectorFile` from being constructed.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("not a Director container: first 4 bytes were not RIFX or XFIR")]
    UnsupportedContainer,
    #[error("file is too short to contain a container header")]
    TruncatedFile,
    #[error("imap/mmap could not be read: {0}")]
    MemoryMapCorrupt(String),
    #[error("Afterburner map (ABMP) is corrupt: {0}")]
    AfterburnerMapCorrupt(String),
    #[error("zlib inflate failed while reading Afterburner structures: {0}")]
    Inflate(String),
    #[error("no config chunk (DRCF/VWCF) was found")]
    MissingConfig,
}

/// Band 2: per-chunk decode failures. The dispatcher demotes these to a
/// `Chunk::Raw` substitution; they never escape `load`.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ChunkDecodeError {
    #[error("chunk body ended before the expected fields were read")]
    Truncated,
    #[error("malformed field `{0}`")]
    MalformedField(&'static str),
    #[error("unsupported Director version {0}")]
    UnsupportedVersion(i32),
}

/// One entry in the dispatcher's diagnostic log (spec §4.1, §7).
#[derive(Debug, Clone)]
pub struct DiagnosticEntry {
    pub resource_id: u32,
    pub fourcc: FourCC,
    pub error: ChunkDecodeError,
}

/// Fatal failure inflating or locating a resource payload (spec §4.1
/// "resource table contract").
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ResourceError {
    #[error("no resource with id {0}")]
    MissingResource(u32),
    #[error("inflate of resource {0} produced {1} bytes, expected {2}")]
    CorruptResource(u32, usize, usize),
}
