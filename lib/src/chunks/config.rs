//! `DRCF`/`VWCF` — stage geometry, tempo, and the Director version every
//! other decoder keys its behavior on (spec §3 `ConfigChunk`, §4.2).

use crate::binary_reader::BinaryReader;
use crate::error::ChunkDecodeError;

#[derive(Clone, Debug)]
pub struct ConfigChunk {
    pub len: u16,
    pub file_version: u16,
    pub stage_top: i16,
    pub stage_left: i16,
    pub stage_bottom: i16,
    pub stage_right: i16,
    pub min_member: i16,
    pub max_member: i16,
    pub stage_color: u16,
    pub bit_depth: i16,
    pub tempo: i16,
    pub director_version: i32,
}

impl ConfigChunk {
    pub fn stage_width(&self) -> i32 {
        i32::from(self.stage_right) - i32::from(self.stage_left)
    }

    pub fn stage_height(&self) -> i32 {
        i32::from(self.stage_bottom) - i32::from(self.stage_top)
    }

    /// Channel count derived from the version bands in spec §3.
    pub fn channel_count(&self) -> u32 {
        match self.director_version {
            v if v >= 1300 => 1000,
            1200 => 120,
            1100 => 48,
            _ => 48,
        }
    }

    /// Decode a config record. `version` is 0 on the dispatcher's first
    /// (pre-config) pass; this decoder does not need it, since
    /// `directorVersion` is itself a field of this chunk (spec §4.1 pass 1).
    pub fn decode(r: &mut BinaryReader) -> Result<Self, ChunkDecodeError> {
        let len = r.read_u16()?;
        let file_version = r.read_u16()?;
        let stage_top = r.read_i16()?;
        let stage_left = r.read_i16()?;
        let stage_bottom = r.read_i16()?;
        let stage_right = r.read_i16()?;
        let min_member = r.read_i16()?;
        let max_member = r.read_i16()?;
        let _field9 = r.read_u8()?;
        let _field10 = r.read_u8()?;
        let _pre_d7_field11 = r.read_i16()?;
        let _comment_font = r.read_i16()?;
        let _comment_size = r.read_i16()?;
        let _comment_style = r.read_u16()?;
        let stage_color = r.read_u16()?;
        let bit_depth = r.read_i16()?;
        let _field17 = r.read_u8()?;
        let _field18 = r.read_u8()?;
        let _field19 = r.read_i32()?;
        let _field20 = r.read_i32()?;
        let _field21 = r.read_i32()?;
        let tempo = r.read_i16()?;
        let _platform = r.read_i16()?;
        let _protection = r.read_i16()?;
        let _field25 = r.read_i32()?;
        let _checksum = r.read_u32()?;
        // Fields beyond the checksum vary by era and are tolerated as
        // optional trailing data (spec §4.2: "must tolerate trailing bytes").
        let director_version = r.read_i16().map(i32::from).unwrap_or(0);

        Ok(ConfigChunk {
            len,
            file_version,
            stage_top,
            stage_left,
            stage_bottom,
            stage_right,
            min_member,
            max_member,
            stage_color,
            bit_depth,
            tempo,
            director_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_reader::Endian;

    fn config_bytes(director_version: i16) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0u16.to_be_bytes()); // len
        buf.extend_from_slice(&0u16.to_be_bytes()); // file_version
        buf.extend_from_slice(&0i16.to_be_bytes()); // top
        buf.extend_from_slice(&0i16.to_be_bytes()); // left
        buf.extend_from_slice(&480i16.to_be_bytes()); // bottom
        buf.extend_from_slice(&640i16.to_be_bytes()); // right
        buf.extend_from_slice(&0i16.to_be_bytes()); // min member
        buf.extend_from_slice(&0i16.to_be_bytes()); // max member
        buf.push(0); // field9
        buf.push(0); // field10
        buf.extend_from_slice(&0i16.to_be_bytes()); // pre d7
        buf.extend_from_slice(&0i16.to_be_bytes()); // comment font
        buf.extend_from_slice(&0i16.to_be_bytes()); // comment size
        buf.extend_from_slice(&0u16.to_be_bytes()); // comment style
        buf.extend_from_slice(&0u16.to_be_bytes()); // stage color
        buf.extend_from_slice(&8i16.to_be_bytes()); // bit depth
        buf.push(0);
        buf.push(0);
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&30i16.to_be_bytes()); // tempo
        buf.extend_from_slice(&0i16.to_be_bytes()); // platform
        buf.extend_from_slice(&0i16.to_be_bytes()); // protection
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes()); // checksum
        buf.extend_from_slice(&director_version.to_be_bytes());
        buf
    }

    #[test]
    fn decodes_stage_and_tempo() {
        let bytes = config_bytes(1300);
        let mut r = BinaryReader::new(&bytes, Endian::Big);
        let config = ConfigChunk::decode(&mut r).unwrap();
        assert_eq!(config.stage_width(), 640);
        assert_eq!(config.stage_height(), 480);
        assert_eq!(config.tempo, 30);
        assert_eq!(config.director_version, 1300);
        assert_eq!(config.channel_count(), 1000);
    }

    #[test]
    fn channel_count_bands() {
        assert_eq!(config_with_version(1100).channel_count(), 48);
        assert_eq!(config_with_version(1200).channel_count(), 120);
        assert_eq!(config_with_version(1300).channel_count(), 1000);
        assert_eq!(config_with_version(700).channel_count(), 48);
    }

    fn config_with_version(v: i16) -> ConfigChunk {
        let bytes = config_bytes(v);
        let mut r = BinaryReader::new(&bytes, Endian::Big);
        ConfigChunk::decode(&mut r).unwrap()
    }

    #[test]
    fn truncated_chunk_fails() {
        let bytes = [0u8; 4];
        let mut r = BinaryReader::new(&bytes, Endian::Big);
        assert!(ConfigChunk::decode(&mut r).is_err());
    }
}
