//! `VWSC`/`SCVW` — the score timeline: frame intervals plus a sparse
//! frame × channel sprite matrix (spec §3 `Score`, §4.2).

use crate::binary_reader::BinaryReader;
use crate::error::ChunkDecodeError;

#[derive(Clone, Copy, Debug)]
pub struct FrameIntervalSecondary {
    pub cast_lib: u16,
    pub member_number: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct FrameInterval {
    pub start_frame: u32,
    pub end_frame: u32,
    pub channel_index: u16,
    pub secondary: Option<FrameIntervalSecondary>,
}

/// A single sprite occupying one cell of the score matrix. Empty iff
/// `cast_member == 0` (spec §3 invariant).
#[derive(Clone, Copy, Debug, Default)]
pub struct ChannelData {
    pub cast_lib: u16,
    pub cast_member: u16,
    pub sprite_type: u8,
    pub ink: u8,
    pub pos_x: i16,
    pub pos_y: i16,
    pub width: u16,
    pub height: u16,
}

impl ChannelData {
    pub fn is_empty(&self) -> bool {
        self.cast_member == 0
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FrameChannelEntry {
    pub frame_index: u32,
    pub channel_index: u16,
    pub data: ChannelData,
}

#[derive(Clone, Debug)]
pub struct ScoreChunk {
    pub frame_count: u32,
    pub channel_count: u32,
    pub intervals: Vec<FrameInterval>,
    pub frame_channel_data: Vec<FrameChannelEntry>,
}

impl ScoreChunk {
    pub fn decode(r: &mut BinaryReader) -> Result<Self, ChunkDecodeError> {
        let _total_length = r.read_u32()?;
        let _frames_data_len = r.read_u32()?;
        let frame_count = r.read_u32()?;
        let channel_count = r.read_u32()?;
        let interval_count = r.read_u32()?;

        let mut intervals = Vec::with_capacity(interval_count as usize);
        for _ in 0..interval_count {
            let start_frame = r.read_u32()?;
            let end_frame = r.read_u32()?;
            let channel_index = r.read_u16()?;
            let has_secondary = r.read_u8()?;
            let secondary = if has_secondary != 0 {
                Some(FrameIntervalSecondary { cast_lib: r.read_u16()?, member_number: r.read_u16()? })
            } else {
                None
            };
            intervals.push(FrameInterval { start_frame, end_frame, channel_index, secondary });
        }

        let entry_count = r.read_u32()?;
        let mut frame_channel_data = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            let frame_index = r.read_u32()?;
            let channel_index = r.read_u16()?;
            let data = ChannelData {
                cast_lib: r.read_u16()?,
                cast_member: r.read_u16()?,
                sprite_type: r.read_u8()?,
                ink: r.read_u8()?,
                pos_x: r.read_i16()?,
                pos_y: r.read_i16()?,
                width: r.read_u16()?,
                height: r.read_u16()?,
            };
            frame_channel_data.push(FrameChannelEntry { frame_index, channel_index, data });
        }

        Ok(ScoreChunk { frame_count, channel_count, intervals, frame_channel_data })
    }

    /// Occupied cells only (spec §3 invariant: empty iff no sprite).
    pub fn occupied_cells(&self) -> impl Iterator<Item = &FrameChannelEntry> {
        self.frame_channel_data.iter().filter(|e| !e.data.is_empty())
    }
}

/// `VWLB` — labeled frames, sorted by frame number (spec §3 `FrameLabels`).
#[derive(Clone, Debug, Default)]
pub struct FrameLabelsChunk {
    pub labels: Vec<(u16, String)>,
}

impl FrameLabelsChunk {
    pub fn decode(r: &mut BinaryReader) -> Result<Self, ChunkDecodeError> {
        let count = r.read_u16()?;
        let mut frame_offsets = Vec::with_capacity(count as usize);
        for _ in 0..count {
            frame_offsets.push((r.read_u16()?, r.read_u16()?));
        }
        // The string pool starts immediately after the offset table; each
        // entry's labelOffset is a byte offset into that pool, and its
        // length runs until the next entry's offset (or pool end for the
        // last).
        let pool_start = r.pos();
        let pool = r.rest();

        let mut labels = Vec::with_capacity(frame_offsets.len());
        for (i, &(frame_num, offset)) in frame_offsets.iter().enumerate() {
            let start = offset as usize;
            let end = frame_offsets
                .get(i + 1)
                .map(|&(_, next)| next as usize)
                .unwrap_or(pool.len());
            let slice = pool.get(start..end.max(start)).unwrap_or(&[]);
            labels.push((frame_num, String::from_utf8_lossy(slice).into_owned()));
        }
        let _ = pool_start;

        labels.sort_by_key(|(frame_num, _)| *frame_num);
        Ok(FrameLabelsChunk { labels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_reader::Endian;

    #[test]
    fn frame_channel_entry_empty_iff_no_cast_member() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&10u32.to_be_bytes()); // frame_count
        buf.extend_from_slice(&6u32.to_be_bytes()); // channel_count
        buf.extend_from_slice(&0u32.to_be_bytes()); // interval_count
        buf.extend_from_slice(&1u32.to_be_bytes()); // entry_count
        buf.extend_from_slice(&3u32.to_be_bytes()); // frame_index
        buf.extend_from_slice(&1u16.to_be_bytes()); // channel_index
        buf.extend_from_slice(&1u16.to_be_bytes()); // cast_lib
        buf.extend_from_slice(&0u16.to_be_bytes()); // cast_member = 0 -> empty
        buf.extend_from_slice(&0u8.to_be_bytes());
        buf.extend_from_slice(&0u8.to_be_bytes());
        buf.extend_from_slice(&0i16.to_be_bytes());
        buf.extend_from_slice(&0i16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes());

        let mut r = BinaryReader::new(&buf, Endian::Big);
        let score = ScoreChunk::decode(&mut r).unwrap();
        assert_eq!(score.frame_count, 10);
        assert!(score.frame_channel_data[0].data.is_empty());
        assert_eq!(score.occupied_cells().count(), 0);
    }

    #[test]
    fn frame_labels_sorted_by_frame_number() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&2u16.to_be_bytes());
        buf.extend_from_slice(&1u16.to_be_bytes());
        buf.extend_from_slice(&0u16.to_be_bytes()); // "start"
        buf.extend_from_slice(&20u16.to_be_bytes());
        buf.extend_from_slice(&5u16.to_be_bytes()); // "end"
        buf.extend_from_slice(b"startend");

        let mut r = BinaryReader::new(&buf, Endian::Big);
        let labels = FrameLabelsChunk::decode(&mut r).unwrap();
        assert_eq!(labels.labels, vec![(1u16, "start".to_string()), (20u16, "end".to_string())]);
    }
}
