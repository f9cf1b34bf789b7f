//! Fixed-layout RIFF/WAVE/PCM header codec
//!
//! This module parses, validates, serializes and re-stamps the 44-byte
//! header that precedes the PCM payload. All multi-byte fields are
//! little-endian. Only the canonical PCM layout is accepted: a 16-byte
//! fmt block with format tag 1 followed immediately by the data chunk.

use crate::error::{Error, Result};
use std::io::{Read, Seek, SeekFrom, Write};

/// WAV format magic numbers
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";
pub const FMT_CHUNK: &[u8; 4] = b"fmt ";
pub const DATA_CHUNK: &[u8; 4] = b"data";

/// Total header length in bytes; the payload starts here
pub const HEADER_SIZE: u64 = 44;
/// Fixed fmt block length for canonical PCM
pub const FMT_BLOCK_LEN: u32 = 16;
/// Format tag for uncompressed PCM
pub const PCM_TAG: u16 = 1;

/// Byte offset of the file-size field
pub const FILE_SIZE_POS: u64 = 0x04;
/// Byte offset of the data-size field
pub const DATA_SIZE_POS: u64 = 0x28;

const TAG_POS: usize = 0x14;
const CHANNELS_POS: usize = 0x16;
const SAMPLE_RATE_POS: usize = 0x18;
const BYTES_PER_SECOND_POS: usize = 0x1c;
const FRAME_SIZE_POS: usize = 0x20;
const BITS_PER_SAMPLE_POS: usize = 0x22;

/// The six numeric fields of a PCM WAV header
///
/// The size fields (offsets 0x04 and 0x28) are not stored; they are
/// derived from the byte-store length on every write and re-stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Number of interleaved channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Average bytes per second (`sample_rate * frame_size`)
    pub bytes_per_second: u32,
    /// Bytes per sample frame across all channels
    pub frame_size: u16,
    /// Bits per single-channel sample
    pub bits_per_sample: u16,
}

impl WavHeader {
    /// Derive a header from creation parameters
    ///
    /// Rejects formats whose derived frame size or byte rate does not fit
    /// its header field, including the degenerate zero-channel and
    /// zero-bit cases.
    pub fn for_format(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Result<Self> {
        let frame_size = bits_per_sample.div_ceil(8) as u32 * channels as u32;
        if frame_size == 0 || frame_size > u16::MAX as u32 {
            return Err(Error::inconsistent(format!(
                "frame size {} for {} channels at {} bits per sample is outside the header field range",
                frame_size, channels, bits_per_sample
            )));
        }
        let bytes_per_second = sample_rate as u64 * frame_size as u64;
        if bytes_per_second > u32::MAX as u64 {
            return Err(Error::inconsistent(format!(
                "byte rate {} is outside the header field range",
                bytes_per_second
            )));
        }
        Ok(WavHeader {
            channels,
            sample_rate,
            bytes_per_second: bytes_per_second as u32,
            frame_size: frame_size as u16,
            bits_per_sample,
        })
    }

    /// Bytes used to encode one channel's sample
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample.div_ceil(8)
    }

    /// Read and validate a header, leaving the cursor at the payload start
    ///
    /// `store_len` is the actual byte-store length, checked against the
    /// header's own file-size field.
    pub fn read<R: Read + Seek>(reader: &mut R, store_len: u64) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;
        let mut raw = [0u8; HEADER_SIZE as usize];
        reader
            .read_exact(&mut raw)
            .map_err(|_| Error::corrupted("file is shorter than the 44-byte header"))?;

        if &raw[0x00..0x04] != RIFF_MAGIC {
            return Err(Error::corrupted("missing RIFF marker"));
        }
        if &raw[0x08..0x0c] != WAVE_MAGIC {
            return Err(Error::corrupted("missing WAVE marker"));
        }
        if &raw[0x0c..0x10] != FMT_CHUNK {
            return Err(Error::corrupted("missing fmt marker"));
        }
        let fmt_len = read_u32(&raw, 0x10);
        if fmt_len != FMT_BLOCK_LEN {
            return Err(Error::corrupted(format!(
                "fmt block length is {}, expected {}",
                fmt_len, FMT_BLOCK_LEN
            )));
        }

        let format_tag = read_u16(&raw, TAG_POS);
        if format_tag != PCM_TAG {
            return Err(Error::FormatNotSupported(format_tag));
        }

        if &raw[0x24..0x28] != DATA_CHUNK {
            return Err(Error::corrupted("missing data marker"));
        }

        let header = WavHeader {
            channels: read_u16(&raw, CHANNELS_POS),
            sample_rate: read_u32(&raw, SAMPLE_RATE_POS),
            bytes_per_second: read_u32(&raw, BYTES_PER_SECOND_POS),
            frame_size: read_u16(&raw, FRAME_SIZE_POS),
            bits_per_sample: read_u16(&raw, BITS_PER_SAMPLE_POS),
        };

        let file_size = read_u32(&raw, FILE_SIZE_POS as usize) as u64;
        let data_size = read_u32(&raw, DATA_SIZE_POS as usize) as u64;
        header.validate(file_size, data_size, store_len)?;

        Ok(header)
    }

    /// Serialize all 44 bytes, leaving the cursor at the payload start
    ///
    /// The size fields are computed from `store_len`, clamped so that a
    /// store shorter than the header yields a zero data size.
    pub fn write<W: Write + Seek>(
        &self,
        writer: &mut W,
        store_len: u64,
        writable: bool,
    ) -> Result<()> {
        if !writable {
            return Err(Error::FileNotWritable);
        }

        let file_size = store_len.max(HEADER_SIZE);
        let data_size = file_size - HEADER_SIZE;

        let mut raw = [0u8; HEADER_SIZE as usize];
        raw[0x00..0x04].copy_from_slice(RIFF_MAGIC);
        raw[0x04..0x08].copy_from_slice(&(file_size as u32).to_le_bytes());
        raw[0x08..0x0c].copy_from_slice(WAVE_MAGIC);
        raw[0x0c..0x10].copy_from_slice(FMT_CHUNK);
        raw[0x10..0x14].copy_from_slice(&FMT_BLOCK_LEN.to_le_bytes());
        raw[0x14..0x16].copy_from_slice(&PCM_TAG.to_le_bytes());
        raw[0x16..0x18].copy_from_slice(&self.channels.to_le_bytes());
        raw[0x18..0x1c].copy_from_slice(&self.sample_rate.to_le_bytes());
        raw[0x1c..0x20].copy_from_slice(&self.bytes_per_second.to_le_bytes());
        raw[0x20..0x22].copy_from_slice(&self.frame_size.to_le_bytes());
        raw[0x22..0x24].copy_from_slice(&self.bits_per_sample.to_le_bytes());
        raw[0x24..0x28].copy_from_slice(DATA_CHUNK);
        raw[0x28..0x2c].copy_from_slice(&(data_size as u32).to_le_bytes());

        writer.seek(SeekFrom::Start(0))?;
        writer.write_all(&raw)?;
        Ok(())
    }

    /// Rewrite only the file-size and data-size fields from the current
    /// store length, preserving the caller's cursor position
    pub fn restamp<W: Write + Seek>(writer: &mut W) -> Result<()> {
        let pos = writer.stream_position()?;
        let len = writer.seek(SeekFrom::End(0))?;
        let file_size = len.max(HEADER_SIZE);

        writer.seek(SeekFrom::Start(FILE_SIZE_POS))?;
        writer.write_all(&(file_size as u32).to_le_bytes())?;
        writer.seek(SeekFrom::Start(DATA_SIZE_POS))?;
        writer.write_all(&((file_size - HEADER_SIZE) as u32).to_le_bytes())?;

        writer.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    /// Check that the derived fields agree with each other and with the
    /// actual byte-store length
    fn validate(&self, file_size: u64, data_size: u64, store_len: u64) -> Result<()> {
        if self.frame_size == 0 {
            return Err(Error::inconsistent("frame size is zero"));
        }
        // Widened so a crafted channel count cannot overflow u16.
        if self.bytes_per_sample() as u32 * self.channels as u32 != self.frame_size as u32 {
            return Err(Error::inconsistent(format!(
                "frame size {} does not match {} channels at {} bits per sample",
                self.frame_size, self.channels, self.bits_per_sample
            )));
        }
        if self.sample_rate as u64 * self.frame_size as u64 != self.bytes_per_second as u64 {
            return Err(Error::inconsistent(format!(
                "bytes per second {} does not match sample rate {} * frame size {}",
                self.bytes_per_second, self.sample_rate, self.frame_size
            )));
        }
        if file_size != data_size + HEADER_SIZE {
            return Err(Error::inconsistent(format!(
                "file size {} does not match data size {} + header",
                file_size, data_size
            )));
        }
        if file_size != store_len {
            return Err(Error::inconsistent(format!(
                "header file size {} does not match actual file length {}",
                file_size, store_len
            )));
        }
        if data_size % self.frame_size as u64 != 0 {
            return Err(Error::inconsistent(format!(
                "data size {} is not a whole number of {}-byte frames",
                data_size, self.frame_size
            )));
        }
        Ok(())
    }
}

fn read_u16(raw: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([raw[pos], raw[pos + 1]])
}

fn read_u32(raw: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([raw[pos], raw[pos + 1], raw[pos + 2], raw[pos + 3]])
}
