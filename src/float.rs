//! Float-normalization decorator
//!
//! `FloatWave` wraps an integer sample stream behind the same contract
//! and converts every sample crossing it to or from a normalized float in
//! [-1.0, 1.0). Two bit depths are mapped; each uses a reversible affine
//! mapping over the raw unsigned sample domain, so every representable
//! integer survives a float round trip bit-exactly.

use crate::error::{Error, Result};
use crate::stream::SampleStream;

/// Bit-depth tag selecting the conversion formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FloatDepth {
    /// Unsigned 8-bit samples in [0, 255], midpoint 128
    Eight,
    /// 16-bit samples in [0, 65535], two's-complement signed range
    Sixteen,
}

impl FloatDepth {
    fn bits(self) -> u16 {
        match self {
            FloatDepth::Eight => 8,
            FloatDepth::Sixteen => 16,
        }
    }

    fn int_to_float(self, value: i64) -> f64 {
        match self {
            FloatDepth::Eight => value as f64 / 128.0 - 1.0,
            FloatDepth::Sixteen => {
                let v = value as f64 / 32768.0;
                // Values at or above 1.0 are the negative half of the
                // two's-complement range.
                if v >= 1.0 {
                    v - 2.0
                } else {
                    v
                }
            }
        }
    }

    fn float_to_int(self, value: f64) -> i64 {
        match self {
            FloatDepth::Eight => ((value + 1.0) * 128.0).round().clamp(0.0, 255.0) as i64,
            FloatDepth::Sixteen => {
                if value < 0.0 {
                    ((value + 2.0) * 32768.0).round().clamp(32768.0, 65535.0) as i64
                } else {
                    (value * 32768.0).round().clamp(0.0, 32767.0) as i64
                }
            }
        }
    }
}

/// Decorator exposing a float sample contract over an integer engine
///
/// Holds exclusive ownership of the wrapped stream and never bypasses it:
/// only `read_frame`/`write_frame` convert values, and every other
/// operation (indexed access, peeking, streaming, ingestion) goes through
/// those, preserving frame ordering and channel order.
#[derive(Debug)]
pub struct FloatWave<W: SampleStream<Sample = i64>> {
    inner: W,
    depth: FloatDepth,
}

impl<W: SampleStream<Sample = i64>> FloatWave<W> {
    /// Wrap an 8-bit stream; fails if the stream has another bit depth
    pub fn new_8bit(inner: W) -> Result<Self> {
        Self::with_depth(inner, FloatDepth::Eight)
    }

    /// Wrap a 16-bit stream; fails if the stream has another bit depth
    pub fn new_16bit(inner: W) -> Result<Self> {
        Self::with_depth(inner, FloatDepth::Sixteen)
    }

    /// Select the decorator variant matching the stream's bit depth
    pub fn decorate(inner: W) -> Result<Self> {
        match inner.bits_per_sample() {
            8 => Self::new_8bit(inner),
            16 => Self::new_16bit(inner),
            bits => Err(Error::FloatDecoratorNotFound(bits)),
        }
    }

    fn with_depth(inner: W, depth: FloatDepth) -> Result<Self> {
        let actual = inner.bits_per_sample();
        if actual != depth.bits() {
            return Err(Error::NotApplicableBitPerSample {
                expected: depth.bits(),
                actual,
            });
        }
        Ok(FloatWave { inner, depth })
    }

    /// Unwrap the decorated stream
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: SampleStream<Sample = i64>> SampleStream for FloatWave<W> {
    type Sample = f64;

    fn is_writable(&self) -> bool {
        self.inner.is_writable()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn bytes_per_second(&self) -> u32 {
        self.inner.bytes_per_second()
    }

    fn frame_size(&self) -> u16 {
        self.inner.frame_size()
    }

    fn bits_per_sample(&self) -> u16 {
        self.inner.bits_per_sample()
    }

    fn bytes_per_sample(&self) -> u16 {
        self.inner.bytes_per_sample()
    }

    fn frame_count(&self) -> Result<u64> {
        self.inner.frame_count()
    }

    fn position(&mut self) -> Result<u64> {
        self.inner.position()
    }

    fn seek(&mut self, frame: u64) -> Result<()> {
        self.inner.seek(frame)
    }

    fn read_frame(&mut self) -> Result<Vec<f64>> {
        let depth = self.depth;
        let frame = self.inner.read_frame()?;
        Ok(frame.into_iter().map(|v| depth.int_to_float(v)).collect())
    }

    fn write_frame(&mut self, frame: &[f64]) -> Result<()> {
        let depth = self.depth;
        let ints: Vec<i64> = frame.iter().map(|&v| depth.float_to_int(v)).collect();
        self.inner.write_frame(&ints)
    }

    fn save(&mut self) -> Result<()> {
        self.inner.save()
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}
