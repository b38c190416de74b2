//! # Single-pole RC filters
//!
//! The [`LowPass`] and [`HighPass`] filters are the discrete
//! form of a first-order resistor-capacitor network. With time
//! constant `RC = 1 / (2π fc)` and sample period `dt`,
//!
//! ```txt
//! low-pass:  y[n] = y[n-1] + α (x[n] - y[n-1]),       α = dt / (RC + dt)
//! high-pass: y[n] = α (y[n-1] + x[n] - x[n-1]),       α = RC / (RC + dt)
//! ```
//!
//! Both filters pass their first input sample through unchanged
//! and use it as the initial condition. Each roll off at only
//! 6 dB per octave, so their corner frequencies are soft.
//!
//! ## Band filter
//!
//! [`band_filter()`] runs a low-pass at [`BAND_LOW_PASS_HZ`]
//! followed by a high-pass at [`BAND_HIGH_PASS_HZ`] over every
//! channel of an [`AudioBuffer`].

use crate::audio::AudioBuffer;

/// Corner frequency of the band filter's low-pass stage (Hz)
pub const BAND_LOW_PASS_HZ: f64 = 800.0;

/// Corner frequency of the band filter's high-pass stage (Hz)
pub const BAND_HIGH_PASS_HZ: f64 = 1600.0;

/// Single-pole low-pass filter
#[derive(Clone, Debug)]
pub struct LowPass {
    alpha: f64,
    last: Option<f64>,
}

impl LowPass {
    /// Create a low-pass filter
    ///
    /// The corner frequency `cutoff_hz` and the sampling rate
    /// `fs` are both in Hz.
    pub fn new(cutoff_hz: f64, fs: u32) -> Self {
        let (rc, dt) = rc_dt(cutoff_hz, fs);
        Self {
            alpha: dt / (rc + dt),
            last: None,
        }
    }

    /// Reset to initial conditions
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Filter one sample
    #[inline]
    pub fn filter(&mut self, input: f64) -> f64 {
        let out = match self.last {
            Some(last) => last + self.alpha * (input - last),
            None => input,
        };
        self.last = Some(out);
        out
    }
}

/// Single-pole high-pass filter
#[derive(Clone, Debug)]
pub struct HighPass {
    alpha: f64,
    last: Option<(f64, f64)>,
}

impl HighPass {
    /// Create a high-pass filter
    ///
    /// The corner frequency `cutoff_hz` and the sampling rate
    /// `fs` are both in Hz.
    pub fn new(cutoff_hz: f64, fs: u32) -> Self {
        let (rc, dt) = rc_dt(cutoff_hz, fs);
        Self {
            alpha: rc / (rc + dt),
            last: None,
        }
    }

    /// Reset to initial conditions
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Filter one sample
    #[inline]
    pub fn filter(&mut self, input: f64) -> f64 {
        let out = match self.last {
            Some((last_in, last_out)) => self.alpha * (last_out + input - last_in),
            None => input,
        };
        self.last = Some((input, out));
        out
    }
}

/// Apply the SAME band filter
///
/// Low-pass at [`BAND_LOW_PASS_HZ`], then high-pass at
/// [`BAND_HIGH_PASS_HZ`].
pub fn band_filter(audio: &AudioBuffer) -> AudioBuffer {
    audio
        .low_pass(BAND_LOW_PASS_HZ)
        .high_pass(BAND_HIGH_PASS_HZ)
}

// RC time constant and sample period, in seconds
fn rc_dt(cutoff_hz: f64, fs: u32) -> (f64, f64) {
    let rc = 1.0 / (cutoff_hz * 2.0 * std::f64::consts::PI);
    let dt = 1.0 / fs as f64;
    (rc, dt)
}
