//! Attention signals
//!
//! The attention signal follows the header bursts and alerts
//! the listener that a message is about to play.
//!
//! | Mode          | Signal                                          |
//! |---------------|-------------------------------------------------|
//! | NWS           | 1050 Hz, 9 s                                    |
//! | WEA           | interrupted 853 + 960 Hz cadence, 11 s           |
//! | NPAS          | 3135.96 Hz with alternating chords, 8 s + 1 s   |
//! | anything else | 853 + 960 Hz two-tone, 8 s                      |

use std::time::Duration;

use crate::audio::AudioBuffer;
use crate::filter::band_filter;
use crate::mode::EncoderMode;
use crate::tone::{chord, Sine};

/// Two-tone attention signal frequencies (Hz)
pub const TWO_TONE_HZ: [f64; 2] = [853.0, 960.0];

/// NOAA Weather Radio warning alarm tone (Hz)
pub const NWS_TONE_HZ: f64 = 1050.0;

/// Continuous tone under the NPAS chords (Hz)
pub const NPAS_TONE_HZ: f64 = 3135.96;

/// NPAS high chord (Hz)
pub const NPAS_HIGH_CHORD_HZ: [f64; 2] = [1046.5, 932.33];

/// NPAS low chord (Hz)
pub const NPAS_LOW_CHORD_HZ: [f64; 2] = [659.26, 440.0];

const TWO_TONE_GAIN_DB: f64 = -10.0;
const TWO_TONE_LENGTH: Duration = Duration::from_secs(8);

const NWS_GAIN_DB: f64 = -4.0;
const NWS_LENGTH: Duration = Duration::from_secs(9);

const NPAS_GAIN_DB: f64 = -10.0;
const NPAS_LENGTH: Duration = Duration::from_secs(8);
const NPAS_CHORD_LENGTH: Duration = Duration::from_millis(500);
const NPAS_CHORD_PAIRS: usize = 8;
const NPAS_TAIL: Duration = Duration::from_secs(1);

const WEA_LONG: Duration = Duration::from_secs(2);
const WEA_SHORT: Duration = Duration::from_secs(1);
const WEA_PAUSE: Duration = Duration::from_millis(500);

/// Generate the attention signal for `mode`
///
/// If `bandpass` is set, the result is passed through the
/// [band filter](crate::filter::band_filter).
///
/// ```
/// use std::time::Duration;
/// use samegen::{gen_attention_tone, EncoderMode};
///
/// let tone = gen_attention_tone(EncoderMode::Nws, 8000, false);
/// assert_eq!(Duration::from_secs(9), tone.duration());
/// ```
pub fn gen_attention_tone(mode: EncoderMode, rate: u32, bandpass: bool) -> AudioBuffer {
    let out = match mode {
        EncoderMode::Nws => {
            Sine::new(NWS_TONE_HZ, rate).to_audio(NWS_LENGTH, NWS_GAIN_DB)
        }
        EncoderMode::Wea => wea(rate),
        EncoderMode::Npas => npas(rate),
        _ => two_tone(rate),
    };

    if bandpass {
        band_filter(&out)
    } else {
        out
    }
}

// 853 Hz + 960 Hz, eight seconds
fn two_tone(rate: u32) -> AudioBuffer {
    chord(&TWO_TONE_HZ, TWO_TONE_LENGTH, TWO_TONE_GAIN_DB, rate)
}

// Two-tone in a long, short, short cadence, sent twice
fn wea(rate: u32) -> AudioBuffer {
    let two = two_tone(rate);
    let pause = AudioBuffer::silent(WEA_PAUSE, rate);
    let short = two.take(WEA_SHORT) + &pause;
    let cadence = two.take(WEA_LONG) + &pause + short.repeat(2);
    cadence.repeat(2)
}

// Continuous high tone with alternating chords mixed in
fn npas(rate: u32) -> AudioBuffer {
    let high = chord(&NPAS_HIGH_CHORD_HZ, NPAS_CHORD_LENGTH, NPAS_GAIN_DB, rate);
    let low = chord(&NPAS_LOW_CHORD_HZ, NPAS_CHORD_LENGTH, NPAS_GAIN_DB, rate);
    let chords = (high + low).repeat(NPAS_CHORD_PAIRS);

    Sine::new(NPAS_TONE_HZ, rate)
        .to_audio(NPAS_LENGTH, NPAS_GAIN_DB)
        .overlay(&chords)
        + AudioBuffer::silent(NPAS_TAIL, rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 24000;

    #[test]
    fn test_two_tone() {
        let tone = gen_attention_tone(EncoderMode::Default, RATE, false);
        assert_eq!(8 * RATE as usize, tone.frame_count());

        let a = Sine::new(853.0, RATE).to_audio(TWO_TONE_LENGTH, -10.0);
        let b = Sine::new(960.0, RATE).to_audio(TWO_TONE_LENGTH, -10.0);
        assert_eq!(a.overlay(&b), tone);

        // most modes share it
        for mode in &[
            EncoderMode::Sage,
            EncoderMode::Digital,
            EncoderMode::Trilithic,
            EncoderMode::Broadcaster,
        ] {
            assert_eq!(tone, gen_attention_tone(*mode, RATE, false));
        }
    }

    #[test]
    fn test_nws() {
        let tone = gen_attention_tone(EncoderMode::Nws, RATE, false);
        assert_eq!(9 * RATE as usize, tone.frame_count());
        assert_eq!(
            Sine::new(1050.0, RATE).to_audio(NWS_LENGTH, -4.0),
            tone
        );
    }

    #[test]
    fn test_wea() {
        let tone = gen_attention_tone(EncoderMode::Wea, RATE, false);
        assert_eq!(Duration::from_secs(11), tone.duration());

        let two = two_tone(RATE);
        let r = RATE as usize;
        let sa = tone.samples();

        // 2 s of tone, then a half-second pause
        assert_eq!(&two.samples()[..2 * r], &sa[..2 * r]);
        assert!(sa[2 * r..2 * r + r / 2].iter().all(|&s| s == 0));

        // then 1 s of tone from the start of the two-tone
        assert_eq!(&two.samples()[..r], &sa[2 * r + r / 2..3 * r + r / 2]);

        // cadence repeats at 5.5 s
        let half = tone.frame_count() / 2;
        assert_eq!(&sa[..half], &sa[half..]);
    }

    #[test]
    fn test_npas() {
        let tone = gen_attention_tone(EncoderMode::Npas, RATE, false);
        assert_eq!(Duration::from_secs(9), tone.duration());

        // last second is silent
        let sa = tone.samples();
        assert!(sa[8 * RATE as usize..].iter().all(|&s| s == 0));

        // chords are mixed over the continuous tone
        let bare = Sine::new(NPAS_TONE_HZ, RATE).to_audio(NPAS_LENGTH, -10.0);
        assert_ne!(bare.samples(), &sa[..8 * RATE as usize]);
    }

    #[test]
    fn test_bandpass() {
        let plain = gen_attention_tone(EncoderMode::Default, 8000, false);
        let filtered = gen_attention_tone(EncoderMode::Default, 8000, true);
        assert_eq!(plain.frame_count(), filtered.frame_count());

        // the two-tone sits well below the high-pass corner
        let energy = |buf: &AudioBuffer| -> f64 {
            buf.samples().iter().map(|&s| (s as f64) * (s as f64)).sum()
        };
        assert!(energy(&filtered) < energy(&plain) / 4.0);
    }
}
