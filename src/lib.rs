//! pcmwave - a random-access PCM WAV codec written in Rust
//!
//! pcmwave parses, validates and writes the fixed 44-byte RIFF/WAVE/PCM
//! header and exposes sample-frame-granular access over the audio
//! payload: seeking, sequential reads and writes, absolute indexed
//! access, lazy streaming and bulk ingestion. A float decorator wraps the
//! integer engine behind the same contract with reversible normalized
//! float conversions for 8- and 16-bit audio.
//!
//! # Architecture
//!
//! - `header`: the fixed 44-byte header codec (parse/serialize/re-stamp)
//! - `stream`: the `SampleStream` trait shared by engine and decorator
//! - `wave`: the `WaveFile` integer sample engine over a file handle
//! - `float`: the `FloatWave` normalized-float decorator and its factory
//! - `builder`: fluent format configuration for new-file creation
//! - `error`: typed failures for every rejection path
//!
//! # Example
//!
//! ```no_run
//! use pcmwave::{SampleStream, WaveFile};
//!
//! # fn main() -> pcmwave::Result<()> {
//! let mut wave = WaveFile::create("tone.wav", 1, 44100, 16)?;
//! wave.write_frame(&[1000])?;
//! wave.write_frame(&[-1000])?;
//! wave.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! Only uncompressed PCM is supported; any other format tag is rejected
//! at open time. All I/O is synchronous and single-threaded.

pub mod builder;
pub mod error;
pub mod float;
pub mod header;
pub mod stream;
pub mod wave;

pub use builder::WaveBuilder;
pub use error::{Error, Result};
pub use float::FloatWave;
pub use header::WavHeader;
pub use stream::{Frames, SampleStream};
pub use wave::WaveFile;

/// pcmwave version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the pcmwave library
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Enable verbose logging
    pub verbose: bool,
    /// Enable debug output
    pub debug: bool,
}

/// Initialize the pcmwave library with the given configuration
///
/// Installs a global tracing subscriber when logging is requested; call
/// at most once per process.
pub fn init(config: Config) -> Result<()> {
    if config.verbose || config.debug {
        let level = if config.debug { "debug" } else { "info" };
        tracing_subscriber::fmt().with_env_filter(level).init();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.verbose);
        assert!(!config.debug);
    }
}
