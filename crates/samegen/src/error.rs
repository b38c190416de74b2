//! Error types

use thiserror::Error;

/// Header text cannot be framed as SAME bytes
///
/// SAME transmits one byte per character. Every character
/// of the header must have a code point between `0` and
/// `255`, inclusive.
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
#[error("invalid SAME header: character {character:?} at position {position} is not a single byte")]
pub struct EncodingError {
    /// The offending character
    pub character: char,

    /// Character index of the offending character
    pub position: usize,
}

/// Audio buffer format is unusable
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AudioFormatError {
    /// Sampling rate must be nonzero
    #[error("invalid audio format: sampling rate must be nonzero")]
    InvalidSampleRate,

    /// Channel count must be nonzero
    #[error("invalid audio format: channel count must be nonzero")]
    InvalidChannels,

    /// Sample count does not divide evenly into frames
    #[error("invalid audio format: {samples} samples do not fill {channels}-channel frames")]
    PartialFrame {
        /// Total sample count
        samples: usize,

        /// Channels per frame
        channels: u16,
    },

    /// Sample width is not one of 8, 16, 24, or 32 bits
    #[error("invalid audio format: unsupported sample width of {0} bytes")]
    UnsupportedWidth(u16),

    /// A sample value does not fit in the sample width
    #[error("invalid audio format: sample {value} at index {index} exceeds the sample width")]
    SampleOutOfRange {
        /// Index of the sample
        index: usize,

        /// Sample value
        value: i32,
    },
}

/// Failure to write a WAV file
#[derive(Error, Debug)]
pub enum ExportError {
    /// The requested output format is not valid
    #[error("unable to export audio: {0}")]
    Format(#[from] AudioFormatError),

    /// I/O or encoding error while writing
    #[error("unable to export audio: {0}")]
    Wav(#[from] hound::Error),
}

/// Failure to generate a SAME alert
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GenerateError {
    /// Header text cannot be framed
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Output format or payload audio is unusable
    #[error(transparent)]
    AudioFormat(#[from] AudioFormatError),
}
