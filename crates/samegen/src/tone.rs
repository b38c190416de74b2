//! Sine tone generation

use std::time::Duration;

use crate::audio::{AudioBuffer, SampleWidth};
use crate::waveform::samples_in;

/// Sine wave generator
///
/// Generates a mono sinusoid at a fixed frequency. Every
/// tone starts at zero phase. The sample at index `n` is
///
/// ```txt
/// trunc(sin(2π f n / fs) * full_scale * gain)
/// ```
///
/// where `full_scale` is the largest sample value of the
/// chosen [`SampleWidth`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sine {
    freq_hz: f64,
    rate: u32,
    width: SampleWidth,
}

impl Sine {
    /// 16-bit sine at `freq_hz`, sampled at `rate`
    pub fn new(freq_hz: f64, rate: u32) -> Self {
        Self {
            freq_hz,
            rate,
            width: SampleWidth::Sixteen,
        }
    }

    /// Use a different sample width
    pub fn with_sample_width(mut self, width: SampleWidth) -> Self {
        self.width = width;
        self
    }

    /// Frequency (Hz)
    pub fn freq_hz(&self) -> f64 {
        self.freq_hz
    }

    /// Sampling rate (Hz)
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Render `duration` of the tone at `gain_db` dBFS
    pub fn to_audio(&self, duration: Duration, gain_db: f64) -> AudioBuffer {
        let count = samples_in(duration, self.rate);
        let scale = self.width.max_value() as f64 * db_to_gain(gain_db);
        let rad_per_sa = 2.0 * std::f64::consts::PI * self.freq_hz / self.rate as f64;
        let samples = (0..count)
            .map(|n| (f64::sin(rad_per_sa * n as f64) * scale) as i32)
            .collect();

        AudioBuffer::mono(samples, self.rate, self.width)
    }
}

/// Mix several equal-gain tones
///
/// Renders each frequency in `freqs_hz` for `duration` at
/// `gain_db` and sums them with [`AudioBuffer::overlay()`].
pub fn chord(freqs_hz: &[f64], duration: Duration, gain_db: f64, rate: u32) -> AudioBuffer {
    let mut tones = freqs_hz
        .iter()
        .map(|&freq| Sine::new(freq, rate).to_audio(duration, gain_db));
    let first = tones
        .next()
        .unwrap_or_else(|| AudioBuffer::silent(duration, rate));
    tones.fold(first, |acc, tone| acc.overlay(&tone))
}

/// Convert decibels to a linear amplitude ratio
pub fn db_to_gain(db: f64) -> f64 {
    f64::powf(10.0, db / 20.0)
}
