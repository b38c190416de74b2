//! AFSK bit modulator and byte-stream encoder

use crate::audio::AudioBuffer;
use crate::tone::Sine;
use crate::waveform::{bit_period, bytes_to_bits, BIT_GAIN_DB, FSK_MARK_HZ, FSK_SPACE_HZ};

/// One bit of mark tone (binary `1`)
///
/// A 2083.3 Hz tone, one SAME bit period long, at -3 dBFS.
pub fn mark(rate: u32) -> AudioBuffer {
    Sine::new(FSK_MARK_HZ, rate).to_audio(bit_period(), BIT_GAIN_DB)
}

/// One bit of space tone (binary `0`)
///
/// A 1562.5 Hz tone, one SAME bit period long, at -3 dBFS.
pub fn space(rate: u32) -> AudioBuffer {
    Sine::new(FSK_SPACE_HZ, rate).to_audio(bit_period(), BIT_GAIN_DB)
}

/// Modulate `bytes` as SAME AFSK
///
/// Each byte is sent least significant bit first. See
/// [`Modulator`] to reuse the mark and space tones between
/// calls.
pub fn encode_bits(bytes: &[u8], rate: u32) -> AudioBuffer {
    Modulator::new(rate).modulate(bytes)
}

/// SAME AFSK modulator
///
/// Holds pre-rendered mark and space tones for one sampling
/// rate. Every bit is an independent tone which starts at
/// zero phase; the modulator does not maintain phase
/// continuity between bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Modulator {
    mark: AudioBuffer,
    space: AudioBuffer,
}

impl Modulator {
    /// Create modulator for the given sampling `rate`
    pub fn new(rate: u32) -> Self {
        Self {
            mark: mark(rate),
            space: space(rate),
        }
    }

    /// Sampling rate (Hz)
    pub fn rate(&self) -> u32 {
        self.mark.rate()
    }

    /// Samples per bit
    pub fn samples_per_bit(&self) -> usize {
        self.mark.frame_count()
    }

    /// Modulate bytes into one continuous burst
    ///
    /// Emits one mark for each `1` bit and one space for each
    /// `0` bit, least significant bit first.
    pub fn modulate(&self, bytes: &[u8]) -> AudioBuffer {
        let mut out = AudioBuffer::empty(self.rate());
        out.reserve_frames(bytes.len() * 8 * self.samples_per_bit());
        for bit in bytes_to_bits(bytes) {
            let tone = if bit { &self.mark } else { &self.space };
            out.extend_from_slice(tone.samples());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::waveform::samples_per_symbol;

    #[test]
    fn test_bit_duration() {
        for &rate in &[8000u32, 11025, 22050, 24000, 44100, 48000] {
            let m = mark(rate);
            let s = space(rate);
            assert_eq!(samples_per_symbol(rate), m.frame_count());
            assert_eq!(m.frame_count(), s.frame_count());

            // within one sample period of 1 / 520.83 s
            let err = m.duration().as_secs_f64() - 1.0 / 520.83;
            assert!(err <= 0.0 && err > -1.0 / rate as f64);
        }
    }

    #[test]
    fn test_tones_differ() {
        let m = mark(24000);
        let s = space(24000);
        assert_eq!(0, m.samples()[0]);
        assert_eq!(0, s.samples()[0]);
        assert_ne!(m, s);

        // -3 dBFS peak
        let peak = m.samples().iter().map(|sa| sa.abs()).max().unwrap();
        assert!(peak <= 23197 && peak > 22000);
    }

    #[test]
    fn test_bit_order() {
        // 'A' = 0b0100_0001 → 1,0,0,0,0,0,1,0
        let rate = 24000;
        let m = mark(rate);
        let s = space(rate);
        let expect = m.clone()
            + &s
            + &s
            + &s
            + &s
            + &s
            + &m
            + &s;

        let out = encode_bits(&[0x41], rate);
        assert_eq!(expect, out);
        assert_eq!(8 * 46, out.frame_count());
    }

    #[test]
    fn test_modulator() {
        let modulator = Modulator::new(22050);
        assert_eq!(22050, modulator.rate());
        assert_eq!(42, modulator.samples_per_bit());
        assert!(modulator.modulate(&[]).is_empty());

        let out = modulator.modulate(b"ZCZC");
        assert_eq!(4 * 8 * 42, out.frame_count());
        assert_eq!(encode_bits(b"ZCZC", 22050), out);
    }
}
