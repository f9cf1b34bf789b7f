//! Common test utilities for pcmwave integration tests
//!
//! Fabricates raw WAV byte images field by field, independently of the
//! library's own header codec, so header rejection tests do not depend on
//! the code under test.

#![allow(dead_code)]

use std::path::Path;

/// Build a canonical 44-byte PCM header followed by `payload`
pub fn raw_wav_bytes(
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    payload: &[u8],
) -> Vec<u8> {
    let bytes_per_sample = (bits_per_sample + 7) / 8;
    let frame_size = bytes_per_sample * channels;
    let byte_rate = sample_rate * frame_size as u32;

    let mut out = Vec::with_capacity(44 + payload.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&((44 + payload.len()) as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&frame_size.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// Write a fabricated WAV file to disk
pub fn write_raw_wav(
    path: &Path,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    payload: &[u8],
) {
    std::fs::write(path, raw_wav_bytes(channels, sample_rate, bits_per_sample, payload)).unwrap();
}

/// Read a little-endian u32 field at a byte offset of a file on disk
pub fn read_u32_at(path: &Path, pos: usize) -> u32 {
    let bytes = std::fs::read(path).unwrap();
    u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
}

/// Read the PCM payload (everything past the 44-byte header) of a file
pub fn read_payload(path: &Path) -> Vec<u8> {
    let bytes = std::fs::read(path).unwrap();
    bytes[44..].to_vec()
}
