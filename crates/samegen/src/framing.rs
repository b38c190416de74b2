//! Header and end-of-message burst groups

#[cfg(not(test))]
use log::{debug, trace};

#[cfg(test)]
use std::println as trace;
#[cfg(test)]
use std::println as debug;

use crate::audio::AudioBuffer;
use crate::error::EncodingError;
use crate::filter::band_filter;
use crate::mode::{EncoderMode, Framing};
use crate::modulate::Modulator;

/// Generate the header burst group
///
/// Modulates `header` three times (per the `mode`), with the
/// mode's silence after each burst. The `header` is usually a
/// complete SAME header like
///
/// ```txt
/// ZCZC-WXR-RWT-012345-567890-888990+0015-0321115-KLOX/NWS-
/// ```
///
/// but it is not checked. Each character must fit in one byte.
/// If `bandpass` is set, the result is passed through the
/// [band filter](crate::filter::band_filter).
///
/// Attention-only modes return an empty buffer.
pub fn gen_header(
    header: &str,
    mode: EncoderMode,
    rate: u32,
    bandpass: bool,
) -> Result<AudioBuffer, EncodingError> {
    let data = header_bytes(header)?;
    let out = FrameBuilder::new(mode, rate).headers(&data);
    Ok(maybe_filter(out, bandpass))
}

/// Generate the end-of-message burst group
///
/// Modulates `NNNN` three times (per the `mode`), with the
/// mode's silence before each burst. Attention-only modes
/// return an empty buffer.
pub fn gen_eom(mode: EncoderMode, rate: u32, bandpass: bool) -> AudioBuffer {
    let out = FrameBuilder::new(mode, rate).eoms();
    maybe_filter(out, bandpass)
}

/// Convert header text to bytes
///
/// Each character becomes one byte equal to its code point
/// (ISO 8859-1). Characters above `U+00FF` are an error.
pub fn header_bytes(header: &str) -> Result<Vec<u8>, EncodingError> {
    header
        .chars()
        .enumerate()
        .map(|(position, character)| {
            u8::try_from(character as u32).map_err(|_| EncodingError {
                character,
                position,
            })
        })
        .collect()
}

/// Builds burst groups for one mode and output rate
///
/// The tones are synthesized at the mode's fixed tone rate,
/// if it has one, and resampled to the output `rate`.
#[derive(Clone, Debug)]
pub(crate) struct FrameBuilder {
    mode: EncoderMode,
    framing: Framing,
    modulator: Modulator,
    rate: u32,
}

impl FrameBuilder {
    pub fn new(mode: EncoderMode, rate: u32) -> Self {
        let framing = mode.framing();
        let tone_rate = framing.tone_rate().unwrap_or(rate);
        if tone_rate != rate && framing.has_bursts() {
            debug!(
                "{} mode: synthesizing tones at {} Hz for {} Hz output",
                mode.as_str(),
                tone_rate,
                rate
            );
        }
        Self {
            mode,
            framing,
            modulator: Modulator::new(tone_rate),
            rate,
        }
    }

    /// Header group: each burst followed by its gap
    pub fn headers(&self, data: &[u8]) -> AudioBuffer {
        let gap = AudioBuffer::silent(self.framing.gap(), self.rate);
        let mut out = AudioBuffer::empty(self.rate);
        for burst in self.framing.header_bursts(data) {
            out = out + self.burst(&burst) + &gap;
        }
        if self.framing.has_bursts() {
            out = out + AudioBuffer::silent(self.framing.header_pad(), self.rate);
        }
        out
    }

    /// End of message group: each burst preceded by its gap
    pub fn eoms(&self) -> AudioBuffer {
        let gap = AudioBuffer::silent(self.framing.gap(), self.rate);
        let mut out = AudioBuffer::empty(self.rate);
        for burst in self.framing.eom_bursts() {
            out = out + &gap + self.burst(&burst);
        }
        out
    }

    // Modulate one burst at the output rate
    fn burst(&self, bytes: &[u8]) -> AudioBuffer {
        trace!(
            "{} mode: modulating {}-byte burst",
            self.mode.as_str(),
            bytes.len()
        );
        let tones = self.modulator.modulate(bytes);
        if tones.rate() == self.rate {
            tones
        } else {
            AudioBuffer::empty(self.rate) + tones
        }
    }
}

fn maybe_filter(audio: AudioBuffer, bandpass: bool) -> AudioBuffer {
    if bandpass {
        band_filter(&audio)
    } else {
        audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use strum::IntoEnumIterator;

    use crate::modulate::encode_bits;
    use crate::waveform::samples_per_symbol;

    const RATE: u32 = 24000;
    const SPB: usize = 46;
    const SECOND: usize = 24000;

    #[test]
    fn test_header_bytes() {
        assert_eq!(Ok(b"ZCZC-".to_vec()), header_bytes("ZCZC-"));
        assert_eq!(Ok(vec![0xe9, 0x41]), header_bytes("\u{e9}A"));
        assert_eq!(Ok(vec![]), header_bytes(""));
        assert_eq!(
            Err(EncodingError {
                character: '\u{2603}',
                position: 2
            }),
            header_bytes("ZC\u{2603}C")
        );
    }

    #[test]
    fn test_sage_header_exact() {
        let header = gen_header("ZCZC-TEST", EncoderMode::Sage, RATE, false).unwrap();

        let mut bytes = vec![0xabu8; 16];
        bytes.extend_from_slice(b"ZCZC-TEST");
        bytes.push(0xff);
        let burst = encode_bits(&bytes, RATE);
        let gap = AudioBuffer::silent(Duration::from_secs(1), RATE);
        let expect = (burst + &gap).repeat(3);
        assert_eq!(expect, header);
    }

    #[test]
    fn test_default_group_lengths() {
        let header = gen_header("ZCZC", EncoderMode::Default, RATE, false).unwrap();
        assert_eq!(3 * ((16 + 4) * 8 * SPB + SECOND), header.frame_count());

        let eom = gen_eom(EncoderMode::Default, RATE, false);
        assert_eq!(3 * (SECOND + (16 + 4) * 8 * SPB), eom.frame_count());

        // eom silence comes first
        assert!(eom.samples()[..SECOND].iter().all(|&sa| sa == 0));
        assert!(header.samples()[..SPB].iter().any(|&sa| sa != 0));
    }

    #[test]
    fn test_nws_group() {
        let header = gen_header("ZCZC", EncoderMode::Nws, RATE, false).unwrap();
        assert_eq!(3 * ((16 + 4 + 2) * 8 * SPB + SECOND), header.frame_count());
        let eom = gen_eom(EncoderMode::Nws, RATE, false);
        assert_eq!(3 * (SECOND + (16 + 4 + 2) * 8 * SPB), eom.frame_count());
    }

    #[test]
    fn test_trilithic_group() {
        let header = gen_header("ZCZC", EncoderMode::Trilithic, RATE, false).unwrap();
        let burst = (16 + 4) * 8 * SPB;
        assert_eq!(3 * (burst + 20400) + 3600, header.frame_count());

        // no pad on the eom group
        let eom = gen_eom(EncoderMode::Trilithic, RATE, false);
        assert_eq!(3 * (20400 + burst), eom.frame_count());
    }

    #[test]
    fn test_digital_asymmetry() {
        let header = gen_header("ZCZC", EncoderMode::Digital, RATE, false).unwrap();
        let first = (1 + 16 + 4 + 3) * 8 * SPB;
        let rest = (16 + 4 + 3) * 8 * SPB;
        assert_eq!(first + SECOND + 2 * (rest + SECOND), header.frame_count());

        // first burst opens with eight spaces for the 0x00 byte
        let space = encode_bits(&[0x00], RATE);
        assert_eq!(space.samples(), &header.samples()[..8 * SPB]);

        // second burst opens with the preamble instead
        let second_start = first + SECOND;
        let preamble = encode_bits(&[0xab], RATE);
        assert_eq!(
            preamble.samples(),
            &header.samples()[second_start..second_start + 8 * SPB]
        );

        let eom = gen_eom(EncoderMode::Digital, RATE, false);
        let first = (1 + 16 + 4 + 3) * 8 * SPB;
        let rest = (16 + 4 + 3) * 8 * SPB;
        assert_eq!(SECOND + first + 2 * (SECOND + rest), eom.frame_count());
    }

    #[test]
    fn test_broadcaster_tone_rate() {
        let header = gen_header("ZCZC", EncoderMode::Broadcaster, RATE, false).unwrap();
        assert_eq!(RATE, header.rate());

        // bits are 84 samples long at 44.1 kHz, then resampled
        let bits = (16 + 4 + 3) * 8;
        let native = bits * samples_per_symbol(44100);
        let resampled = native * RATE as usize / 44100;
        assert_eq!(3 * (resampled + SECOND), header.frame_count());
        assert_ne!(bits * SPB, resampled);

        let eom = gen_eom(EncoderMode::Broadcaster, RATE, false);
        assert_eq!(3 * (SECOND + resampled), eom.frame_count());

        // at 44.1 kHz output, nothing is resampled
        let header = gen_header("ZCZC", EncoderMode::Broadcaster, 44100, false).unwrap();
        assert_eq!(3 * (native + 44100), header.frame_count());
    }

    #[test]
    fn test_attention_only_modes_are_silent() {
        for mode in &[EncoderMode::Npas, EncoderMode::Wea] {
            assert!(gen_header("ZCZC", *mode, RATE, false).unwrap().is_empty());
            assert!(gen_eom(*mode, RATE, false).is_empty());
        }
    }

    #[test]
    fn test_empty_header() {
        for mode in EncoderMode::iter().filter(|m| m.framing().has_bursts()) {
            let header = gen_header("", mode, RATE, false).unwrap();
            assert!(!header.is_empty());
        }

        let header = gen_header("", EncoderMode::Default, RATE, false).unwrap();
        assert_eq!(3 * (16 * 8 * SPB + SECOND), header.frame_count());
    }

    #[test]
    fn test_bad_header() {
        assert!(gen_header("ZCZC-\u{1F4FB}", EncoderMode::Default, RATE, false).is_err());
    }

    #[test]
    fn test_bandpass() {
        let plain = gen_header("ZCZC", EncoderMode::Default, RATE, false).unwrap();
        let filtered = gen_header("ZCZC", EncoderMode::Default, RATE, true).unwrap();
        assert_eq!(plain.frame_count(), filtered.frame_count());
        assert_ne!(plain, filtered);
        assert_eq!(band_filter(&plain), filtered);
    }
}
