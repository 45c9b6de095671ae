//! Maps a [`FourCC`] to the decoder that understands it, and classifies the
//! container's movie-type tag.

use crate::fourcc::{tags, FourCC};

/// The set of chunk kinds this crate knows how to decode, plus a catch-all
/// for everything else (spec §4.1: "Unknown tags become opaque RawChunk").
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ChunkType {
    Config,
    KeyTable,
    CastList,
    Cast,
    CastMember,
    ScriptContext,
    ScriptNames,
    Script,
    Score,
    FrameLabels,
    Bitmap,
    Palette,
    Text,
    Sound,
    Unknown,
}

impl ChunkType {
    pub fn of(fourcc: FourCC) -> Self {
        match fourcc {
            t if t == tags::DRCF || t == tags::VWCF => Self::Config,
            t if t == tags::KEY_STAR => Self::KeyTable,
            t if t == tags::MCSL => Self::CastList,
            t if t == tags::CAS_STAR => Self::Cast,
            t if t == tags::CAST => Self::CastMember,
            t if t == tags::LCTX || t == tags::LCTX_CAP => Self::ScriptContext,
            t if t == tags::LNAM => Self::ScriptNames,
            t if t == tags::LSCR => Self::Script,
            t if t == tags::VWSC || t == tags::SCVW => Self::Score,
            t if t == tags::VWLB => Self::FrameLabels,
            t if t == tags::BITD => Self::Bitmap,
            t if t == tags::CLUT => Self::Palette,
            t if t == tags::STXT => Self::Text,
            t if t == tags::SND || t == tags::EDIM => Self::Sound,
            _ => Self::Unknown,
        }
    }
}

/// Whether the container holds a `.dir`/`.dxr` movie or a `.cst`/`.cxt` cast
/// library, derived from the codec tag read right after the container
/// header (spec §4.1 step 2: "the observed value determines afterburner
/// flag" and also tells us movie vs. cast).
#[derive(Copy, Clone, Eq, PartialEq, Debug, strum::Display)]
#[strum(serialize_all = "PascalCase")]
pub enum MovieKind {
    Movie,
    Cast,
    Unknown,
}

impl MovieKind {
    pub fn classify(movie_type_tag: FourCC) -> Self {
        match movie_type_tag.as_bytes() {
            b"MV93" | b"FGDM" => Self::Movie,
            b"MC95" | b"FGDC" => Self::Cast,
            _ => Self::Unknown,
        }
    }

    pub fn is_afterburner(movie_type_tag: FourCC) -> bool {
        movie_type_tag == tags::MOVIE_FGDM || movie_type_tag == tags::MOVIE_FGDC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_tags() {
        assert_eq!(ChunkType::of(tags::CAST), ChunkType::CastMember);
        assert_eq!(ChunkType::of(tags::BITD), ChunkType::Bitmap);
        assert_eq!(ChunkType::of(FourCC::from_str("XXXX")), ChunkType::Unknown);
    }

    #[test]
    fn lctx_and_lctx_capital_are_both_script_context() {
        assert_eq!(ChunkType::of(tags::LCTX), ChunkType::ScriptContext);
        assert_eq!(ChunkType::of(tags::LCTX_CAP), ChunkType::ScriptContext);
    }

    #[test]
    fn movie_kind_from_codec_tag() {
        assert_eq!(MovieKind::classify(tags::MOVIE_MV93), MovieKind::Movie);
        assert_eq!(MovieKind::classify(tags::MOVIE_FGDM), MovieKind::Movie);
        assert!(MovieKind::is_afterburner(tags::MOVIE_FGDM));
        assert!(!MovieKind::is_afterburner(tags::MOVIE_MV93));
    }
}
