//! Opaque passthrough for resources this crate recognizes by FourCC but has
//! no typed decoder for — and the substitution used when a typed decoder
//! fails (spec §4.1 "Unknown tags become opaque RawChunk", §7 band 2).

use crate::fourcc::FourCC;

#[derive(Clone, Debug)]
pub struct RawChunk {
    pub fourcc: FourCC,
    pub data: Vec<u8>,
}

impl RawChunk {
    pub fn new(fourcc: FourCC, data: &[u8]) -> Self {
        Self { fourcc, data: data.to_vec() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fourcc::tags;

    #[test]
    fn wraps_bytes_verbatim() {
        let raw = RawChunk::new(tags::RIFX, &[1, 2, 3]);
        assert_eq!(raw.data, vec![1, 2, 3]);
    }
}
