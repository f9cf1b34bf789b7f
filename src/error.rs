//! Error types for pcmwave

use thiserror::Error;

/// Result type alias for pcmwave operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pcmwave
#[derive(Error, Debug)]
pub enum Error {
    /// IO error propagated from the underlying byte store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File does not exist
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// File exists but cannot be read
    #[error("file is not readable: {0}")]
    FileNotReadable(String),

    /// Write attempted on a read-only wave file
    #[error("wave file is not writable")]
    FileNotWritable,

    /// File could not be opened
    #[error("cannot open file: {0}")]
    CannotOpenFile(String),

    /// File could not be created
    #[error("cannot create file: {0}")]
    CannotCreateFile(String),

    /// Header marker or fixed field mismatch
    #[error("header corrupted: {0}")]
    HeaderCorrupted(String),

    /// Format tag other than PCM
    #[error("format tag {0:#06x} is not supported, only PCM (0x0001)")]
    FormatNotSupported(u16),

    /// Derived header fields do not agree
    #[error("header data inconsistent: {0}")]
    HeaderDataInconsistent(String),

    /// Decorator constructed over an engine with a different bit depth
    #[error("bit depth {actual} does not match decorator bit depth {expected}")]
    NotApplicableBitPerSample { expected: u16, actual: u16 },

    /// No decorator variant exists for the engine's bit depth
    #[error("no float decorator for {0} bits per sample")]
    FloatDecoratorNotFound(u16),

    /// Operation on a closed wave file
    #[error("wave file is closed")]
    FileClosed,
}

impl Error {
    /// Create a header-corrupted error
    pub fn corrupted<S: Into<String>>(msg: S) -> Self {
        Error::HeaderCorrupted(msg.into())
    }

    /// Create a header-data-inconsistent error
    pub fn inconsistent<S: Into<String>>(msg: S) -> Self {
        Error::HeaderDataInconsistent(msg.into())
    }
}
