//! Waveform parameters for SAME

use std::time::Duration;

/// Mark frequency (Hz)
pub const FSK_MARK_HZ: f64 = 2083.3;

/// Space frequency (Hz)
pub const FSK_SPACE_HZ: f64 = 1562.5;

/// Baud rate (Hz)
pub const BAUD_HZ: f64 = 520.83;

/// Gain of each mark or space tone (dBFS)
pub const BIT_GAIN_DB: f64 = -3.0;

/// Preamble byte
///
/// The preamble byte is repeated sixteen times before every
/// SAME burst. It contains many bit transitions to ensure
/// that bit and byte synchronization is acquired quickly.
pub const PREAMBLE: u8 = 0xab;

/// Number of preamble bytes which precede each burst
pub const PREAMBLE_LEN: usize = 16;

/// Data which marks the end of a SAME message
pub const PREFIX_MESSAGE_END: &str = "NNNN";

/// Duration of one SAME bit
///
/// One period of the 520.83 Hz baud rate, about 1.92 ms.
pub fn bit_period() -> Duration {
    Duration::from_secs_f64(1.0 / BAUD_HZ)
}

/// Whole samples in one SAME bit at the given sampling frequency
///
/// Every bit is truncated to an integer number of samples, so
/// this is `floor(fs / 520.83)`.
pub fn samples_per_symbol(fs: u32) -> usize {
    samples_in(bit_period(), fs)
}

/// Whole samples in `duration` at sampling rate `fs`
///
/// The fractional sample, if any, is discarded.
pub fn samples_in(duration: Duration, fs: u32) -> usize {
    (duration.as_nanos() * fs as u128 / 1_000_000_000) as usize
}

/// Convert bytes to bits
///
/// The bits are output in SAME order: least significant
/// bit first. `true` is a one bit.
pub fn bytes_to_bits(bytes: &[u8]) -> impl Iterator<Item = bool> + '_ {
    bytes
        .iter()
        .flat_map(|byte| (0..8).map(move |shift| (byte >> shift) & 0x01 == 1))
}

/// The SAME preamble
pub fn preamble() -> [u8; PREAMBLE_LEN] {
    [PREAMBLE; PREAMBLE_LEN]
}
