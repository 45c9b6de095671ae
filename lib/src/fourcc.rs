//! 4-byte tag packing used throughout Director containers.

use std::fmt::{self, Debug, Display, Formatter};

/// A 32-bit identifier built from four ASCII bytes, e.g. `RIFX`, `CASt`, `KEY*`.
///
/// Tag bytes are always stored and compared in ASCII-normal order regardless
/// of the container's data endianness; see spec's open question about the
/// two disagreeing historical readers of the mmap entry tag. We only ever
/// read tag bytes in ASCII-normal order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const fn new(tag: &[u8; 4]) -> Self {
        Self(*tag)
    }

    pub const fn from_str(s: &str) -> Self {
        let b = s.as_bytes();
        assert!(b.len() == 4, "FourCC must be exactly 4 bytes");
        Self([b[0], b[1], b[2], b[3]])
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Pack as a big-endian `u32`, the canonical representation Director
    /// itself uses internally for comparisons.
    pub fn to_u32_be(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn from_u32_be(v: u32) -> Self {
        Self(v.to_be_bytes())
    }

    /// Best-effort ASCII rendering; non-printable bytes become `.`.
    pub fn printable(&self) -> String {
        self.0
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect()
    }
}

impl Display for FourCC {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.printable())
    }
}

impl Debug for FourCC {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC({:?})", self.printable())
    }
}

impl From<[u8; 4]> for FourCC {
    fn from(b: [u8; 4]) -> Self {
        Self(b)
    }
}

/// Common tags referenced by the container and chunk layers.
pub mod tags {
    use super::FourCC;

    pub const RIFX: FourCC = FourCC::from_str("RIFX");
    pub const XFIR: FourCC = FourCC::from_str("XFIR");
    pub const IMAP: FourCC = FourCC::from_str("imap");
    pub const MMAP: FourCC = FourCC::from_str("mmap");

    pub const FVER: FourCC = FourCC::from_str("Fver");
    pub const FCDR: FourCC = FourCC::from_str("Fcdr");
    pub const ABMP: FourCC = FourCC::from_str("ABMP");
    pub const FGEI: FourCC = FourCC::from_str("FGEI");

    pub const MOVIE_MV93: FourCC = FourCC::from_str("MV93");
    pub const MOVIE_FGDM: FourCC = FourCC::from_str("FGDM");
    pub const MOVIE_FGDC: FourCC = FourCC::from_str("FGDC");

    pub const DRCF: FourCC = FourCC::from_str("DRCF");
    pub const VWCF: FourCC = FourCC::from_str("VWCF");
    pub const KEY_STAR: FourCC = FourCC::from_str("KEY*");
    pub const MCSL: FourCC = FourCC::from_str("MCsL");
    pub const CAS_STAR: FourCC = FourCC::from_str("CAS*");
    pub const CAST: FourCC = FourCC::from_str("CASt");
    pub const LCTX: FourCC = FourCC::from_str("Lctx");
    pub const LCTX_CAP: FourCC = FourCC::from_str("LctX");
    pub const LNAM: FourCC = FourCC::from_str("Lnam");
    pub const LSCR: FourCC = FourCC::from_str("Lscr");
    pub const VWSC: FourCC = FourCC::from_str("VWSC");
    pub const SCVW: FourCC = FourCC::from_str("SCVW");
    pub const VWLB: FourCC = FourCC::from_str("VWLB");
    pub const BITD: FourCC = FourCC::from_str("BITD");
    pub const CLUT: FourCC = FourCC::from_str("CLUT");
    pub const STXT: FourCC = FourCC::from_str("STXT");
    pub const SND: FourCC = FourCC::from_str("snd ");
    pub const EDIM: FourCC = FourCC::from_str("ediM");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u32() {
        let tag = FourCC::from_str("CASt");
        assert_eq!(FourCC::from_u32_be(tag.to_u32_be()), tag);
    }

    #[test]
    fn display_is_ascii() {
        assert_eq!(tags::RIFX.to_string(), "RIFX");
        assert_eq!(tags::KEY_STAR.to_string(), "KEY*");
    }

    #[test]
    fn printable_escapes_non_ascii() {
        let tag = FourCC([0, 1, b'A', b'B']);
        assert_eq!(tag.printable(), "..AB");
    }
}
