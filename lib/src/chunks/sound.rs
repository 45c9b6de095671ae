//! `snd_`/`ediM` — sound member header parsing and codec detection (spec §3
//! `SoundChunk`, §4.2).

use crate::binary_reader::{BinaryReader, Endian};
use crate::error::ChunkDecodeError;

#[derive(Copy, Clone, Eq, PartialEq, Debug, strum::Display)]
pub enum SoundCodec {
    #[strum(serialize = "PCM")]
    Pcm,
    #[strum(serialize = "MP3")]
    Mp3,
    #[strum(serialize = "IMA ADPCM")]
    ImaAdpcm,
}

#[derive(Clone, Debug)]
pub struct SoundChunk {
    pub codec: SoundCodec,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channel_count: u16,
    pub audio_data: Vec<u8>,
    /// Endianness of `audio_data` for PCM (the container's own endian;
    /// spec §4.3 — Mac-authored movies store PCM samples big-endian, so WAV
    /// synthesis must only byte-swap when this is `Big`).
    pub source_endian: Endian,
}

impl SoundChunk {
    /// `bytes_per_sample` for PCM; panics-free helper for duration math.
    pub fn bytes_per_sample(&self) -> u32 {
        u32::from(self.bits_per_sample.max(8)) / 8
    }

    /// `durationSeconds = bytes / (sampleRate * channels * bytesPerSample)`
    /// for PCM (spec §8); `None` for compressed codecs.
    pub fn duration_seconds(&self) -> Option<f64> {
        if self.codec != SoundCodec::Pcm {
            return None;
        }
        let denom = f64::from(self.sample_rate) * f64::from(self.channel_count) * f64::from(self.bytes_per_sample());
        if denom == 0.0 {
            return None;
        }
        Some(self.audio_data.len() as f64 / denom)
    }

    pub fn decode(r: &mut BinaryReader, director_version: i32) -> Result<Self, ChunkDecodeError> {
        const HEADER_LEN: usize = 44;
        let total = r.remaining();
        let header_len = HEADER_LEN.min(total);
        let header = r.read_bytes(header_len)?;

        let channel_count = read_u16_at(header, 0x0C, r.endian()).unwrap_or(1).max(1);
        let bits_per_sample = read_u16_at(header, 0x14, r.endian()).unwrap_or(8);
        let sample_rate_offset = if director_version >= 1100 { 0x2A } else { 0x16 };
        let sample_rate = read_u32_at(header, sample_rate_offset, r.endian()).unwrap_or(22_050);

        let source_endian = r.endian();
        let body = r.rest();
        let codec = if let Some(mp3_start) = find_mp3_start(body) {
            let audio = body[mp3_start..].to_vec();
            return Ok(SoundChunk {
                codec: SoundCodec::Mp3,
                sample_rate,
                bits_per_sample,
                channel_count,
                audio_data: audio,
                source_endian,
            });
        } else if bits_per_sample == 4 {
            SoundCodec::ImaAdpcm
        } else {
            SoundCodec::Pcm
        };

        Ok(SoundChunk {
            codec,
            sample_rate,
            bits_per_sample,
            channel_count,
            audio_data: body.to_vec(),
            source_endian,
        })
    }
}

fn read_u16_at(bytes: &[u8], offset: usize, endian: crate::binary_reader::Endian) -> Option<u16> {
    let slice = bytes.get(offset..offset + 2)?;
    Some(match endian {
        crate::binary_reader::Endian::Big => u16::from_be_bytes([slice[0], slice[1]]),
        crate::binary_reader::Endian::Little => u16::from_le_bytes([slice[0], slice[1]]),
    })
}

fn read_u32_at(bytes: &[u8], offset: usize, endian: crate::binary_reader::Endian) -> Option<u32> {
    let slice = bytes.get(offset..offset + 4)?;
    Some(match endian {
        crate::binary_reader::Endian::Big => u32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]]),
        crate::binary_reader::Endian::Little => u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]),
    })
}

/// Scan the first 1024 bytes of `data` for an MPEG audio frame sync: `0xFF`
/// followed by a byte whose top 3 bits are set and whose next two bits name
/// a valid MPEG layer (spec §4.2: "0xFF 0xFB or 0xFF 0xFA pattern with valid
/// bitrate/samplerate bits").
pub fn find_mp3_start(data: &[u8]) -> Option<usize> {
    let scan_len = data.len().min(1024);
    for i in 0..scan_len.saturating_sub(1) {
        if data[i] == 0xFF && (data[i + 1] & 0xE0) == 0xE0 {
            let layer_bits = (data[i + 1] >> 1) & 0x03;
            if layer_bits != 0 {
                return Some(i);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_reader::Endian;

    #[test]
    fn detects_mp3_sync_at_offset_zero() {
        let data = [0xFF, 0xFB, 0x90, 0x00];
        assert_eq!(find_mp3_start(&data), Some(0));
    }

    #[test]
    fn no_mp3_sync_in_silent_pcm() {
        let data = [0u8; 64];
        assert_eq!(find_mp3_start(&data), None);
    }

    #[test]
    fn pcm_duration_matches_spec_formula() {
        let mut header = vec![0u8; 44];
        header[0x0C..0x0E].copy_from_slice(&1u16.to_be_bytes());
        header[0x14..0x16].copy_from_slice(&16u16.to_be_bytes());
        header[0x2A..0x2E].copy_from_slice(&22_050u32.to_be_bytes());
        header.extend(std::iter::repeat(0u8).take(44_100));

        let mut r = BinaryReader::new(&header, Endian::Big);
        let sound = SoundChunk::decode(&mut r, 1300).unwrap();
        assert_eq!(sound.codec, SoundCodec::Pcm);
        assert!((sound.duration_seconds().unwrap() - 1.0).abs() < 0.001);
    }
}
