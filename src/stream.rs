//! Shared sample-stream contract
//!
//! `SampleStream` is the seam between the integer engine and the float
//! decorator: everything is addressed in sample frames (one sample per
//! channel) and expressed through a small required core. The indexed,
//! iteration and streaming operations are provided methods built only on
//! that core, so a decorator that converts samples in `read_frame` and
//! `write_frame` inherits converted behavior everywhere else.

use crate::error::Result;

/// Frame-granular access over a PCM byte store
pub trait SampleStream {
    /// Per-channel sample value (`i64` for the raw engine, `f64` for the
    /// float decorator)
    type Sample: Copy;

    /// Whether the underlying store accepts writes
    fn is_writable(&self) -> bool;

    /// Number of interleaved channels
    fn channels(&self) -> u16;

    /// Sample rate in Hz
    fn sample_rate(&self) -> u32;

    /// Average bytes per second
    fn bytes_per_second(&self) -> u32;

    /// Bytes per sample frame across all channels
    fn frame_size(&self) -> u16;

    /// Bits per single-channel sample
    fn bits_per_sample(&self) -> u16;

    /// Bytes used to encode one channel's sample
    fn bytes_per_sample(&self) -> u16;

    /// Total number of frames in the payload, measured from the store length
    fn frame_count(&self) -> Result<u64>;

    /// Current cursor position in frames
    fn position(&mut self) -> Result<u64>;

    /// Move the cursor to a frame position
    ///
    /// Seeking past the end of data is legal; subsequent reads observe
    /// end-of-stream.
    fn seek(&mut self, frame: u64) -> Result<()>;

    /// Read the frame at the cursor and advance by one frame
    ///
    /// Reading past the end of data is lenient: missing trailing bytes
    /// decode as zero, matching the store's own short-read behavior.
    fn read_frame(&mut self) -> Result<Vec<Self::Sample>>;

    /// Write one frame at the cursor and advance by one frame
    ///
    /// Channels missing from `frame` are written as zero; extra values are
    /// ignored. Header size fields are only re-stamped by `save`/`close`.
    fn write_frame(&mut self, frame: &[Self::Sample]) -> Result<()>;

    /// Re-stamp the header size fields and flush to durable storage,
    /// preserving the cursor; the stream stays open
    fn save(&mut self) -> Result<()>;

    /// Re-stamp the header size fields and release the underlying handle
    ///
    /// Idempotent: second and later calls are no-ops.
    fn close(&mut self) -> Result<()>;

    /// Convert a time position to a frame index:
    /// `floor((minutes * 60 + seconds) * sample_rate) + extra_frames`
    fn time_to_frame(&self, minutes: f64, seconds: f64, extra_frames: u64) -> u64 {
        ((minutes * 60.0 + seconds) * self.sample_rate() as f64) as u64 + extra_frames
    }

    /// Whether a frame exists at `index`
    fn has_frame(&mut self, index: u64) -> Result<bool> {
        Ok(index < self.frame_count()?)
    }

    /// Read the frame at an absolute index, restoring the prior cursor
    fn frame_at(&mut self, index: u64) -> Result<Vec<Self::Sample>> {
        let pos = self.position()?;
        self.seek(index)?;
        let frame = self.read_frame();
        self.seek(pos)?;
        frame
    }

    /// Write a frame at an absolute index, restoring the prior cursor
    fn set_frame_at(&mut self, index: u64, frame: &[Self::Sample]) -> Result<()> {
        let pos = self.position()?;
        self.seek(index)?;
        let result = self.write_frame(frame);
        self.seek(pos)?;
        result
    }

    /// Append a frame at the end of the store, restoring the prior cursor
    fn append_frame(&mut self, frame: &[Self::Sample]) -> Result<()> {
        let end = self.frame_count()?;
        self.set_frame_at(end, frame)
    }

    /// Overwrite the frame at `index` with silence (all-zero samples),
    /// restoring the prior cursor; the store does not shrink
    fn clear_frame(&mut self, index: u64) -> Result<()> {
        self.set_frame_at(index, &[])
    }

    /// Peek the frame at the cursor without advancing
    fn current_frame(&mut self) -> Result<Vec<Self::Sample>> {
        let pos = self.position()?;
        let frame = self.read_frame();
        self.seek(pos)?;
        frame
    }

    /// Move the cursor forward by one frame without reading
    fn advance(&mut self) -> Result<()> {
        let pos = self.position()?;
        self.seek(pos + 1)
    }

    /// Whether the cursor is at or past the end of data
    fn at_end(&mut self) -> Result<bool> {
        Ok(self.position()? >= self.frame_count()?)
    }

    /// Move the cursor back to frame 0
    fn rewind(&mut self) -> Result<()> {
        self.seek(0)
    }

    /// Lazily stream `(frame_index, frame)` pairs starting at `from`
    ///
    /// The iterator is driven by the stream's own cursor: consuming it
    /// advances the cursor as a side effect, so it is finite (it stops at
    /// the frame count captured here) but not restartable and not safe to
    /// interleave with other cursor movement.
    fn frames(&mut self, from: u64) -> Result<Frames<'_, Self>>
    where
        Self: Sized,
    {
        let len = self.frame_count()?;
        self.seek(from)?;
        Ok(Frames { stream: self, len })
    }

    /// Consume a finite sequence of frames, writing each in order at the
    /// cursor
    fn write_frames<I, F>(&mut self, frames: I) -> Result<()>
    where
        Self: Sized,
        I: IntoIterator<Item = F>,
        F: AsRef<[Self::Sample]>,
    {
        for frame in frames {
            self.write_frame(frame.as_ref())?;
        }
        Ok(())
    }
}

/// Lazy frame iterator returned by [`SampleStream::frames`]
///
/// Yields `Ok((index, samples))` until the frame count captured at
/// creation; I/O failures surface as `Err` items.
pub struct Frames<'a, S: SampleStream> {
    stream: &'a mut S,
    len: u64,
}

impl<S: SampleStream> Iterator for Frames<'_, S> {
    type Item = Result<(u64, Vec<S::Sample>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = match self.stream.position() {
            Ok(pos) => pos,
            Err(e) => return Some(Err(e)),
        };
        if pos >= self.len {
            return None;
        }
        match self.stream.read_frame() {
            Ok(frame) => Some(Ok((pos, frame))),
            Err(e) => Some(Err(e)),
        }
    }
}
