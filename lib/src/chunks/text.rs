//! `STXT` — a text cast member's body and formatting runs (spec §3
//! `TextChunk`, §4.2).

use crate::binary_reader::BinaryReader;
use crate::error::ChunkDecodeError;

#[derive(Clone, Copy, Debug)]
pub struct FormatRun {
    pub start_offset: u32,
    pub font_id: u16,
    pub font_size: u16,
    pub font_style_bits: u16,
}

#[derive(Clone, Debug)]
pub struct TextChunk {
    pub text: String,
    pub runs: Vec<FormatRun>,
}

impl TextChunk {
    /// `director_version` selects the text encoding: pre-Unicode releases
    /// wrote Latin-1; later ones wrote UTF-8 (spec §4.2: "latin-1 or UTF-8
    /// depending on version; follow directorVersion").
    pub fn decode(r: &mut BinaryReader, director_version: i32) -> Result<Self, ChunkDecodeError> {
        let _payload_offset = r.read_u32()?;
        let text_len = r.read_u32()?;
        let runs_len = r.read_u32()?;

        let text_bytes = r.read_bytes(text_len as usize)?;
        let text = decode_text(text_bytes, director_version);
        let text = normalize_newlines(&text);

        let mut runs_reader = r.sub_reader(runs_len as usize)?;
        let mut runs = Vec::new();
        while runs_reader.remaining() >= 10 {
            runs.push(FormatRun {
                start_offset: runs_reader.read_u32()?,
                font_id: runs_reader.read_u16()?,
                font_size: runs_reader.read_u16()?,
                font_style_bits: runs_reader.read_u16()?,
            });
        }

        Ok(TextChunk { text, runs })
    }
}

fn decode_text(bytes: &[u8], director_version: i32) -> String {
    if director_version >= 1100 {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// CR and CRLF line endings collapse to `\n` (spec §3 `TextChunk.text`).
fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_reader::Endian;

    fn encode(text: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&12u32.to_be_bytes());
        buf.extend_from_slice(&(text.len() as u32).to_be_bytes());
        buf.extend_from_slice(&10u32.to_be_bytes());
        buf.extend_from_slice(text.as_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&12u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf
    }

    #[test]
    fn normalizes_crlf_to_lf() {
        let bytes = encode("hello\r\nworld\rfoo");
        let mut r = BinaryReader::new(&bytes, Endian::Big);
        let chunk = TextChunk::decode(&mut r, 1300).unwrap();
        assert_eq!(chunk.text, "hello\nworld\nfoo");
        assert_eq!(chunk.runs.len(), 1);
        assert_eq!(chunk.runs[0].font_size, 12);
    }
}
