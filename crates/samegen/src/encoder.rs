//! Complete alert assembly

use std::time::Duration;

#[cfg(not(test))]
use log::debug;

#[cfg(test)]
use std::println as debug;

use crate::attention::gen_attention_tone;
use crate::audio::AudioBuffer;
use crate::builder::SameEncoderBuilder;
use crate::error::{AudioFormatError, EncodingError, GenerateError};
use crate::filter::band_filter;
use crate::framing::{header_bytes, FrameBuilder};
use crate::mode::EncoderMode;

/// Silence before the first header burst
pub const LEAD_SILENCE: Duration = Duration::from_millis(500);

/// Silence after the last end of message burst
pub const TRAIL_SILENCE: Duration = Duration::from_millis(500);

/// Silence after the attention signal
pub const ATTENTION_TAIL: Duration = Duration::from_secs(1);

/// Generate a complete SAME alert
///
/// The alert contains, in order:
///
/// 1. 500 ms of silence
/// 2. the header burst group
/// 3. if `attention_tone` is set, or the `mode` requires it,
///    the attention signal and one second of silence
/// 4. the `audio` message, if any, converted to 16-bit mono
///    at `rate`
/// 5. if `end_of_message` is set, the end of message burst group
/// 6. 500 ms of silence
///
/// If `bandpass` is set, the whole alert is passed through the
/// [band filter](crate::filter::band_filter).
///
/// ```
/// use samegen::{gen_eas, EncoderMode};
///
/// let alert = gen_eas(
///     "ZCZC-WXR-RWT-012345-567890-888990+0015-0321115-KLOX/NWS-",
///     true,
///     true,
///     None,
///     EncoderMode::Nws,
///     24000,
///     false,
/// ).expect("valid header");
/// assert_eq!(24000, alert.rate());
/// ```
///
/// To generate many alerts with the same settings, build a
/// [`SameEncoder`] instead.
pub fn gen_eas(
    header: &str,
    attention_tone: bool,
    end_of_message: bool,
    audio: Option<&AudioBuffer>,
    mode: EncoderMode,
    rate: u32,
    bandpass: bool,
) -> Result<AudioBuffer, GenerateError> {
    SameEncoderBuilder::new(rate)
        .with_mode(mode)
        .with_attention_tone(attention_tone)
        .with_end_of_message(end_of_message)
        .with_bandpass(bandpass)
        .build()
        .generate(header, audio)
}

/// A SAME/EAS alert encoder
///
/// The encoder holds the parts of an alert which never change
/// for its configuration: the mark and space tones, the
/// attention signal, and the end of message bursts. It is
/// created from a [`SameEncoderBuilder`].
///
/// ```
/// use samegen::{EncoderMode, SameEncoderBuilder};
///
/// let encoder = SameEncoderBuilder::new(24000)
///     .with_mode(EncoderMode::Sage)
///     .build();
///
/// let first = encoder.generate("ZCZC-CIV-DMO-000000+0015-0321115-KLOX/NWS-", None).unwrap();
/// let again = encoder.generate("ZCZC-CIV-DMO-000000+0015-0321115-KLOX/NWS-", None).unwrap();
/// assert_eq!(first, again);
/// ```
#[derive(Clone, Debug)]
pub struct SameEncoder {
    config: SameEncoderBuilder,
    frames: FrameBuilder,
    attention: Option<AudioBuffer>,
    eoms: Option<AudioBuffer>,
}

impl SameEncoder {
    /// Output sampling rate (Hz)
    pub fn rate(&self) -> u32 {
        self.config.rate()
    }

    /// Encoder emulation mode
    pub fn mode(&self) -> EncoderMode {
        self.config.mode()
    }

    /// Settings this encoder was built with
    pub fn config(&self) -> &SameEncoderBuilder {
        &self.config
    }

    /// Attention signal, if this encoder sends one
    ///
    /// The signal does not include the silence which follows
    /// it in an alert, and it is never band-filtered.
    pub fn attention_tone(&self) -> Option<&AudioBuffer> {
        self.attention.as_ref()
    }

    /// End of message burst group, if this encoder sends one
    pub fn end_of_message(&self) -> Option<&AudioBuffer> {
        self.eoms.as_ref()
    }

    /// Header burst group for `header`
    pub fn header(&self, header: &str) -> Result<AudioBuffer, EncodingError> {
        Ok(self.frames.headers(&header_bytes(header)?))
    }

    /// Generate a complete alert
    ///
    /// See [`gen_eas()`] for the layout. The optional `audio`
    /// message is converted to 16-bit mono at the encoder's rate.
    pub fn generate(
        &self,
        header: &str,
        audio: Option<&AudioBuffer>,
    ) -> Result<AudioBuffer, GenerateError> {
        let rate = self.rate();
        if rate == 0 {
            return Err(AudioFormatError::InvalidSampleRate.into());
        }

        let data = header_bytes(header)?;
        let headers = self.frames.headers(&data);
        let payload = match audio {
            Some(audio) if !audio.is_empty() => Some(audio.to_mono16(rate)?),
            _ => None,
        };

        let mut alert = AudioBuffer::silent(LEAD_SILENCE, rate) + &headers;
        if let Some(attention) = &self.attention {
            alert = alert + attention + AudioBuffer::silent(ATTENTION_TAIL, rate);
        }
        if let Some(payload) = &payload {
            alert = alert + payload;
        }
        if let Some(eoms) = &self.eoms {
            alert = alert + eoms;
        }
        alert = alert + AudioBuffer::silent(TRAIL_SILENCE, rate);

        debug!(
            "{} alert: {} header bytes, {:?} headers, {:?} attention, {:?} message, {:?} eom, {:?} total",
            self.mode().as_str(),
            data.len(),
            headers.duration(),
            self.attention.as_ref().map(|a| a.duration()),
            payload.as_ref().map(|p| p.duration()),
            self.eoms.as_ref().map(|e| e.duration()),
            alert.duration()
        );

        if self.config.bandpass() {
            Ok(band_filter(&alert))
        } else {
            Ok(alert)
        }
    }
}

impl From<&SameEncoderBuilder> for SameEncoder {
    fn from(cfg: &SameEncoderBuilder) -> Self {
        let mode = cfg.mode();
        let frames = FrameBuilder::new(mode, cfg.rate());

        let attention = if cfg.attention_tone() || mode.forces_attention_tone() {
            Some(gen_attention_tone(mode, cfg.rate(), false))
        } else {
            None
        };

        let eoms = if cfg.end_of_message() && mode.framing().has_bursts() {
            Some(frames.eoms())
        } else {
            None
        };

        Self {
            config: *cfg,
            frames,
            attention,
            eoms,
        }
    }
}
