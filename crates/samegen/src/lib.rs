//! # samegen: SAME/EAS Alert Generation
//!
//! This crate synthesizes audio for
//! [Specific Area Message Encoding](https://en.wikipedia.org/wiki/Specific_Area_Message_Encoding)
//! (SAME) alerts. It turns a SAME header string into a complete,
//! sample-exact alert waveform: header bursts, attention signal,
//! an optional voice message, and end of message bursts.
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these licenses
//! carefully as they may affect your rights.
//!
//! Transmitting SAME/EAS tones over the air, or anywhere they might
//! be mistaken for a real alert, is illegal in many jurisdictions.
//! Generated alerts are for testing receivers and for archival use.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use samegen::{AudioBuffer, EncoderMode, SameEncoderBuilder};
//!
//! // create a SameEncoder with your output sampling rate
//! let encoder = SameEncoderBuilder::new(24000)
//!     .with_mode(EncoderMode::Nws)   // emulate a weather radio transmitter
//!     .with_attention_tone(true)     // 1050 Hz warning alarm
//!     .with_end_of_message(true)     // NNNN bursts
//!     .build();
//!
//! // your voice message, in any format; here, two seconds of silence
//! let voice = AudioBuffer::silent(Duration::from_secs(2), 8000);
//!
//! let alert = encoder
//!     .generate(
//!         "ZCZC-WXR-RWT-012345-567890-888990+0015-0321115-KLOX/NWS-",
//!         Some(&voice),
//!     )
//!     .expect("header contains only single-byte characters");
//!
//! assert_eq!(24000, alert.rate());
//! assert_eq!(1, alert.channels());
//! ```
//!
//! Write the result with [`export_wav()`], or take the raw 16-bit
//! samples from [`AudioBuffer::samples()`].
//!
//! For a one-off alert, [`gen_eas()`] accepts every setting as an
//! argument. [`gen_header()`], [`gen_eom()`], and
//! [`gen_attention_tone()`] generate the individual parts.
//!
//! ## Background
//!
//! SAME headers are modulated using two-level audio frequency-shift
//! keying (AFSK) at a baud rate of 520.83 Hz. A one bit is a 2083.3 Hz
//! "mark" tone, and a zero bit is a 1562.5 Hz "space" tone. Each byte
//! is sent least significant bit first.
//!
//! Every burst begins with a sixteen-byte preamble of `0xAB`. The header
//! burst is sent three times, with a one-second pause after each. The
//! header is followed by an attention signal, the voice message, and
//! then three end of message bursts, which contain the text `NNNN`.
//!
//! ## Encoder modes
//!
//! Real encoders differ in small ways: extra padding bytes after the
//! data, shorter pauses, or a different attention signal. An
//! [`EncoderMode`] reproduces the quirks of one family of encoders.
//! See [`Framing`] for the exact byte layout of each mode.

mod attention;
mod audio;
mod builder;
mod encoder;
mod error;
mod framing;
mod mode;
mod modulate;
mod tone;
mod waveform;

pub mod filter;

pub use attention::{
    gen_attention_tone, NPAS_HIGH_CHORD_HZ, NPAS_LOW_CHORD_HZ, NPAS_TONE_HZ, NWS_TONE_HZ,
    TWO_TONE_HZ,
};
pub use audio::{export_wav, AudioBuffer, SampleWidth};
pub use builder::SameEncoderBuilder;
pub use encoder::{gen_eas, SameEncoder, ATTENTION_TAIL, LEAD_SILENCE, TRAIL_SILENCE};
pub use error::{AudioFormatError, EncodingError, ExportError, GenerateError};
pub use framing::{gen_eom, gen_header, header_bytes};
pub use mode::{EncoderMode, Framing, BROADCASTER_TONE_RATE, BURST_GAP, BURST_REPEATS};
pub use modulate::{encode_bits, mark, space, Modulator};
pub use tone::{chord, db_to_gain, Sine};
pub use waveform::{
    bit_period, samples_per_symbol, BAUD_HZ, BIT_GAIN_DB, FSK_MARK_HZ, FSK_SPACE_HZ, PREAMBLE,
    PREAMBLE_LEN, PREFIX_MESSAGE_END,
};
