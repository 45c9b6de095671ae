//! A read-only parser and decoder for Macromedia/Adobe Director Shockwave
//! containers: both the uncompressed RIFX/XFIR layout and the Afterburner
//! (FGDM/FGDC) compressed layout, down to cast members, scripts, score
//! timelines, and playable bitmap/sound assets.

pub mod assets;
pub mod binary_reader;
pub mod chunk_type;
pub mod chunks;
pub mod container;
pub mod diagnostics;
pub mod director_file;
pub mod dispatch;
pub mod error;
pub mod fourcc;
pub mod resource;

pub use binary_reader::Endian;
pub use chunk_type::{ChunkType, MovieKind};
pub use chunks::Chunk;
pub use diagnostics::Diagnostics;
pub use director_file::{DecodeAssetError, DirectorFile, Metadata};
pub use error::{ChunkDecodeError, DiagnosticEntry, LoadError, ResourceError};
pub use fourcc::FourCC;
