//! PCM WAV sample engine
//!
//! `WaveFile` owns an open file positioned past the 44-byte header and
//! performs frame-granular seek/read/write over the interleaved PCM
//! payload. Samples are decoded as little-endian unsigned integers of
//! `bytes_per_sample` bytes each; writes truncate to the same width, so
//! negative values store their two's-complement low bytes.

use crate::builder::WaveBuilder;
use crate::error::{Error, Result};
use crate::header::{WavHeader, HEADER_SIZE};
use crate::stream::SampleStream;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

/// Random-access integer sample engine over a PCM WAV file
///
/// Single-threaded and synchronous: the engine is the sole owner of the
/// file handle and its cursor, and callers must serialize all operations
/// on one instance.
#[derive(Debug)]
pub struct WaveFile {
    file: Option<File>,
    writable: bool,
    header: WavHeader,
}

impl WaveFile {
    /// Start a fluent builder for new-file creation
    pub fn builder() -> WaveBuilder {
        WaveBuilder::new()
    }

    /// Open an existing WAV file, read-write when filesystem permissions
    /// allow it and read-only otherwise
    ///
    /// The header is parsed and validated before the engine becomes
    /// observable; on success the cursor is at frame 0.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let (mut file, writable) = match OpenOptions::new().read(true).write(true).open(path) {
            Ok(file) => (file, true),
            Err(_) => match OpenOptions::new().read(true).open(path) {
                Ok(file) => (file, false),
                Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                    return Err(Error::FileNotReadable(path.display().to_string()));
                }
                Err(e) => return Err(Error::CannotOpenFile(e.to_string())),
            },
        };

        let store_len = file.metadata()?.len();
        let header = WavHeader::read(&mut file, store_len)?;

        debug!(
            path = %path.display(),
            channels = header.channels,
            sample_rate = header.sample_rate,
            bits_per_sample = header.bits_per_sample,
            writable,
            "opened wave file"
        );

        Ok(WaveFile {
            file: Some(file),
            writable,
            header,
        })
    }

    /// Create (or truncate) a WAV file with the given format and write its
    /// header immediately; the cursor is left at frame 0
    pub fn create<P: AsRef<Path>>(
        path: P,
        channels: u16,
        sample_rate: u32,
        bits_per_sample: u16,
    ) -> Result<Self> {
        let path = path.as_ref();
        let header = WavHeader::for_format(channels, sample_rate, bits_per_sample)?;

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| Error::CannotCreateFile(e.to_string()))?;

        header.write(&mut file, 0, true)?;

        debug!(
            path = %path.display(),
            channels,
            sample_rate,
            bits_per_sample,
            "created wave file"
        );

        Ok(WaveFile {
            file: Some(file),
            writable: true,
            header,
        })
    }

    fn file_ref(&self) -> Result<&File> {
        self.file.as_ref().ok_or(Error::FileClosed)
    }

    fn file_mut(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(Error::FileClosed)
    }
}

/// Decode up to eight little-endian bytes as an unsigned integer
fn decode_sample(chunk: &[u8]) -> i64 {
    let mut bytes = [0u8; 8];
    let n = chunk.len().min(8);
    bytes[..n].copy_from_slice(&chunk[..n]);
    u64::from_le_bytes(bytes) as i64
}

impl SampleStream for WaveFile {
    type Sample = i64;

    fn is_writable(&self) -> bool {
        self.writable
    }

    fn channels(&self) -> u16 {
        self.header.channels
    }

    fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }

    fn bytes_per_second(&self) -> u32 {
        self.header.bytes_per_second
    }

    fn frame_size(&self) -> u16 {
        self.header.frame_size
    }

    fn bits_per_sample(&self) -> u16 {
        self.header.bits_per_sample
    }

    fn bytes_per_sample(&self) -> u16 {
        self.header.bytes_per_sample()
    }

    fn frame_count(&self) -> Result<u64> {
        let len = self.file_ref()?.metadata()?.len();
        Ok(len.saturating_sub(HEADER_SIZE) / self.header.frame_size as u64)
    }

    fn position(&mut self) -> Result<u64> {
        let frame_size = self.header.frame_size as u64;
        let pos = self.file_mut()?.stream_position()?;
        Ok(pos.saturating_sub(HEADER_SIZE) / frame_size)
    }

    fn seek(&mut self, frame: u64) -> Result<()> {
        let offset = HEADER_SIZE + frame * self.header.frame_size as u64;
        self.file_mut()?.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Vec<i64>> {
        let channels = self.header.channels as usize;
        let bytes_per_sample = self.header.bytes_per_sample() as usize;
        let mut raw = vec![0u8; self.header.frame_size as usize];

        // Short reads at end-of-data leave the tail zero-filled.
        let file = self.file_mut()?;
        let mut filled = 0;
        while filled < raw.len() {
            let n = file.read(&mut raw[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        let mut frame = Vec::with_capacity(channels);
        for ch in 0..channels {
            let start = ch * bytes_per_sample;
            frame.push(decode_sample(&raw[start..start + bytes_per_sample]));
        }
        Ok(frame)
    }

    fn write_frame(&mut self, frame: &[i64]) -> Result<()> {
        let channels = self.header.channels as usize;
        let bytes_per_sample = self.header.bytes_per_sample() as usize;
        let mut raw = vec![0u8; self.header.frame_size as usize];

        for ch in 0..channels {
            // Missing channels are written as silence.
            let value = frame.get(ch).copied().unwrap_or(0);
            let le = (value as u64).to_le_bytes();
            let n = bytes_per_sample.min(le.len());
            let start = ch * bytes_per_sample;
            raw[start..start + n].copy_from_slice(&le[..n]);
        }

        self.file_mut()?.write_all(&raw)?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let writable = self.writable;
        let file = self.file_mut()?;
        if writable {
            WavHeader::restamp(file)?;
        }
        file.sync_all()?;
        debug!("saved wave file header");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let Some(mut file) = self.file.take() else {
            return Ok(());
        };
        if self.writable {
            WavHeader::restamp(&mut file)?;
        }
        debug!("closed wave file");
        Ok(())
    }
}

impl Drop for WaveFile {
    fn drop(&mut self) {
        // Teardown on scope exit; close() is a no-op if already closed.
        let _ = self.close();
    }
}
