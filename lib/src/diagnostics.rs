//! The dispatcher's demoted-chunk log (spec §4.1, §7 band 2).

use crate::error::DiagnosticEntry;
use crate::fourcc::FourCC;

#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<DiagnosticEntry>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn record(&mut self, resource_id: u32, fourcc: FourCC, error: crate::error::ChunkDecodeError) {
        log::warn!("demoting chunk {fourcc} (id {resource_id}) to RawChunk: {error}");
        self.entries.push(DiagnosticEntry { resource_id, fourcc, error });
    }

    pub fn entries(&self) -> &[DiagnosticEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
