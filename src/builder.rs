//! Fluent configuration for new-file creation

use crate::error::Result;
use crate::float::FloatWave;
use crate::wave::WaveFile;
use std::path::Path;

/// Builder pre-setting the format of a wave file to be created
///
/// Defaults to CD-style stereo: 2 channels, 44100 Hz, 16 bits per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveBuilder {
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
}

impl Default for WaveBuilder {
    fn default() -> Self {
        WaveBuilder {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
        }
    }
}

impl WaveBuilder {
    /// Create a builder with the default format
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of channels
    pub fn channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    /// Set the sample rate in Hz
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the bit depth of one channel's sample
    pub fn bits_per_sample(mut self, bits_per_sample: u16) -> Self {
        self.bits_per_sample = bits_per_sample;
        self
    }

    /// Create a new wave file with the configured format
    pub fn create<P: AsRef<Path>>(&self, path: P) -> Result<WaveFile> {
        WaveFile::create(path, self.channels, self.sample_rate, self.bits_per_sample)
    }

    /// Create a new wave file and wrap it with the float decorator
    /// matching the configured bit depth
    pub fn create_float<P: AsRef<Path>>(&self, path: P) -> Result<FloatWave<WaveFile>> {
        FloatWave::decorate(self.create(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let builder = WaveBuilder::new();
        assert_eq!(builder.channels, 2);
        assert_eq!(builder.sample_rate, 44100);
        assert_eq!(builder.bits_per_sample, 16);
    }

    #[test]
    fn test_fluent_setters() {
        let builder = WaveBuilder::new()
            .channels(1)
            .sample_rate(8000)
            .bits_per_sample(8);
        assert_eq!(builder.channels, 1);
        assert_eq!(builder.sample_rate, 8000);
        assert_eq!(builder.bits_per_sample, 8);
    }
}
