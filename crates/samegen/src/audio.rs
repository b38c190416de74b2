//! Audio buffers
//!
//! An [`AudioBuffer`] holds interleaved PCM samples along with
//! their sampling rate, channel count, and sample width. Every
//! combinator returns a new buffer, with the exception of
//! [`append()`](AudioBuffer::append), which consumes its left
//! operand so that long chains of short tones concatenate in
//! linear time.
//!
//! Buffers are joined with `+` or `append()`. If the right-hand
//! buffer has a different format, it is converted to the format
//! of the left-hand buffer first.

use std::borrow::Cow;
use std::ops::Add;
use std::path::Path;
use std::time::Duration;

use crate::error::{AudioFormatError, ExportError};
use crate::filter::{HighPass, LowPass};
use crate::waveform::samples_in;

/// PCM sample width
///
/// Samples of every width are stored as signed integers
/// in the range of that width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SampleWidth {
    /// 8-bit samples
    Eight,

    /// 16-bit samples
    #[default]
    Sixteen,

    /// 24-bit samples
    TwentyFour,

    /// 32-bit samples
    ThirtyTwo,
}

impl SampleWidth {
    /// Sample width from a byte count
    pub fn from_bytes(bytes: u16) -> Result<Self, AudioFormatError> {
        match bytes {
            1 => Ok(Self::Eight),
            2 => Ok(Self::Sixteen),
            3 => Ok(Self::TwentyFour),
            4 => Ok(Self::ThirtyTwo),
            _ => Err(AudioFormatError::UnsupportedWidth(bytes)),
        }
    }

    /// Bytes per sample
    pub fn bytes(&self) -> u16 {
        match self {
            Self::Eight => 1,
            Self::Sixteen => 2,
            Self::TwentyFour => 3,
            Self::ThirtyTwo => 4,
        }
    }

    /// Bits per sample
    pub fn bits(&self) -> u32 {
        self.bytes() as u32 * 8
    }

    /// Largest sample value
    pub fn max_value(&self) -> i32 {
        ((1i64 << (self.bits() - 1)) - 1) as i32
    }

    /// Smallest sample value
    pub fn min_value(&self) -> i32 {
        (-(1i64 << (self.bits() - 1))) as i32
    }

    // Saturate `value` to the range of this width
    #[inline]
    fn saturate(&self, value: i64) -> i32 {
        value.clamp(self.min_value() as i64, self.max_value() as i64) as i32
    }
}

/// A buffer of PCM audio
///
/// Samples are interleaved by channel. The buffer always
/// contains a whole number of frames.
///
/// ```
/// use std::time::Duration;
/// use samegen::AudioBuffer;
///
/// let quiet = AudioBuffer::silent(Duration::from_millis(500), 24000);
/// let longer = quiet.clone() + &quiet;
/// assert_eq!(24000, longer.frame_count());
/// assert_eq!(Duration::from_secs(1), longer.duration());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AudioBuffer {
    samples: Vec<i32>,
    rate: u32,
    channels: u16,
    width: SampleWidth,
}

impl AudioBuffer {
    /// Empty 16-bit mono buffer
    pub fn empty(rate: u32) -> Self {
        Self::mono16(Vec::new(), rate)
    }

    /// 16-bit mono silence
    ///
    /// The buffer contains the whole number of samples which
    /// fit in `duration` at the sampling `rate`.
    pub fn silent(duration: Duration, rate: u32) -> Self {
        Self::mono16(vec![0; samples_in(duration, rate)], rate)
    }

    /// Buffer from interleaved samples
    ///
    /// Each sample must fit in the given `width`, and the
    /// samples must fill a whole number of frames.
    pub fn from_samples(
        samples: Vec<i32>,
        rate: u32,
        channels: u16,
        width: SampleWidth,
    ) -> Result<Self, AudioFormatError> {
        check_format(rate, channels)?;
        if samples.len() % channels as usize != 0 {
            return Err(AudioFormatError::PartialFrame {
                samples: samples.len(),
                channels,
            });
        }
        if let Some((index, &value)) = samples
            .iter()
            .enumerate()
            .find(|(_, &sa)| sa < width.min_value() || sa > width.max_value())
        {
            return Err(AudioFormatError::SampleOutOfRange { index, value });
        }

        Ok(Self {
            samples,
            rate,
            channels,
            width,
        })
    }

    /// Buffer from interleaved 16-bit samples
    pub fn from_i16(samples: &[i16], rate: u32, channels: u16) -> Result<Self, AudioFormatError> {
        Self::from_samples(
            samples.iter().map(|&sa| sa as i32).collect(),
            rate,
            channels,
            SampleWidth::Sixteen,
        )
    }

    // Mono buffer from samples known to fit `width`
    pub(crate) fn mono(samples: Vec<i32>, rate: u32, width: SampleWidth) -> Self {
        Self {
            samples,
            rate,
            channels: 1,
            width,
        }
    }

    pub(crate) fn mono16(samples: Vec<i32>, rate: u32) -> Self {
        Self::mono(samples, rate, SampleWidth::Sixteen)
    }

    /// Sampling rate (Hz)
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Number of interleaved channels
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Sample width
    pub fn sample_width(&self) -> SampleWidth {
        self.width
    }

    /// Interleaved samples
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Release the interleaved samples
    pub fn into_samples(self) -> Vec<i32> {
        self.samples
    }

    /// Number of frames
    ///
    /// One frame holds one sample for each channel.
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// True if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback duration
    pub fn duration(&self) -> Duration {
        if self.rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos((self.frame_count() as u128 * 1_000_000_000 / self.rate as u128) as u64)
    }

    /// True if `other` has the same rate, channels, and width
    pub fn same_format(&self, other: &AudioBuffer) -> bool {
        self.rate == other.rate && self.channels == other.channels && self.width == other.width
    }

    /// Concatenate `other` onto the end of this buffer
    ///
    /// `other` is converted to this buffer's format if needed.
    /// The allocation of `self` is reused and grows in amortized
    /// linear time.
    pub fn append(mut self, other: &AudioBuffer) -> Self {
        let other = other.conformed_to(&self);
        self.samples.extend_from_slice(&other.samples);
        self
    }

    /// Repeat the buffer `count` times
    pub fn repeat(&self, count: usize) -> Self {
        Self {
            samples: self.samples.repeat(count),
            ..*self
        }
    }

    /// Extract the audio between `start` and `end`
    ///
    /// Times are measured from the start of the buffer and
    /// are clamped to its length.
    pub fn slice(&self, start: Duration, end: Duration) -> Self {
        let frames = self.frame_count();
        let start = usize::min(samples_in(start, self.rate), frames);
        let end = usize::clamp(samples_in(end, self.rate), start, frames);
        let ch = self.channels as usize;
        Self {
            samples: self.samples[start * ch..end * ch].to_vec(),
            ..*self
        }
    }

    /// The first `duration` of the buffer
    pub fn take(&self, duration: Duration) -> Self {
        self.slice(Duration::ZERO, duration)
    }

    /// Mix `other` into this buffer
    ///
    /// Samples are summed and saturate at the limits of the
    /// sample width. The output has the same length as `self`:
    /// any part of `other` which runs past the end of `self`
    /// is discarded.
    pub fn overlay(&self, other: &AudioBuffer) -> Self {
        let other = other.conformed_to(self);
        let mut samples = self.samples.clone();
        for (out, add) in samples.iter_mut().zip(other.samples.iter()) {
            *out = self.width.saturate(*out as i64 + *add as i64);
        }
        Self {
            samples,
            ..*self
        }
    }

    /// Resample to a new sampling `rate`
    ///
    /// Uses linear interpolation. The output contains
    /// `floor(frames * rate / self.rate())` frames.
    pub fn resample(&self, rate: u32) -> Result<Self, AudioFormatError> {
        check_format(rate, self.channels)?;
        Ok(self.resampled(rate))
    }

    /// Change the number of channels
    ///
    /// Multichannel audio is mixed to mono by averaging.
    /// Mono audio is copied to every output channel.
    pub fn set_channels(&self, channels: u16) -> Result<Self, AudioFormatError> {
        if channels == 0 {
            return Err(AudioFormatError::InvalidChannels);
        }
        Ok(self.rechanneled(channels))
    }

    /// Change the sample width
    ///
    /// Narrowing discards the least significant bits.
    pub fn set_sample_width(&self, width: SampleWidth) -> Self {
        if width == self.width {
            return self.clone();
        }

        let from = self.width.bits();
        let to = width.bits();
        let samples = self
            .samples
            .iter()
            .map(|&sa| {
                let sa = sa as i64;
                let out = if to > from {
                    sa << (to - from)
                } else {
                    sa >> (from - to)
                };
                width.saturate(out)
            })
            .collect();

        Self {
            samples,
            rate: self.rate,
            channels: self.channels,
            width,
        }
    }

    /// Convert to the given rate, channel count, and width
    ///
    /// Resampling happens first, then channel conversion,
    /// then width conversion.
    pub fn convert(
        &self,
        rate: u32,
        channels: u16,
        width: SampleWidth,
    ) -> Result<Self, AudioFormatError> {
        check_format(rate, channels)?;
        Ok(self
            .resampled(rate)
            .rechanneled(channels)
            .set_sample_width(width))
    }

    /// Convert to 16-bit mono at the given `rate`
    pub fn to_mono16(&self, rate: u32) -> Result<Self, AudioFormatError> {
        self.convert(rate, 1, SampleWidth::Sixteen)
    }

    /// Single-pole low-pass filter, each channel independently
    pub fn low_pass(&self, cutoff_hz: f64) -> Self {
        let ch = self.channels as usize;
        let mut filters = vec![LowPass::new(cutoff_hz, self.rate); ch];
        self.map_channels(|chan, sa| filters[chan].filter(sa))
    }

    /// Single-pole high-pass filter, each channel independently
    pub fn high_pass(&self, cutoff_hz: f64) -> Self {
        let ch = self.channels as usize;
        let mut filters = vec![HighPass::new(cutoff_hz, self.rate); ch];
        self.map_channels(|chan, sa| filters[chan].filter(sa))
    }

    /// Write a 16-bit PCM WAV file
    ///
    /// The audio is converted to the requested `rate` and
    /// number of `channels` before writing.
    pub fn export_wav<P>(&self, path: P, rate: u32, channels: u16) -> Result<(), ExportError>
    where
        P: AsRef<Path>,
    {
        let out = self.convert(rate, channels, SampleWidth::Sixteen)?;
        let spec = hound::WavSpec {
            channels,
            sample_rate: rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path, spec)?;
        for &sa in out.samples.iter() {
            writer.write_sample(sa as i16)?;
        }
        writer.finalize()?;
        Ok(())
    }

    // Append samples which are already in this buffer's format
    pub(crate) fn extend_from_slice(&mut self, samples: &[i32]) {
        self.samples.extend_from_slice(samples);
    }

    // Reserve room for `frames` more frames
    pub(crate) fn reserve_frames(&mut self, frames: usize) {
        self.samples.reserve(frames * self.channels as usize);
    }

    // `self` in the format of `like`
    fn conformed_to(&self, like: &AudioBuffer) -> Cow<'_, AudioBuffer> {
        if self.same_format(like) {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(
                self.resampled(like.rate)
                    .rechanneled(like.channels)
                    .set_sample_width(like.width),
            )
        }
    }

    // Linear-interpolation resampler; `rate` must be nonzero
    fn resampled(&self, rate: u32) -> Self {
        let frames = self.frame_count();
        if rate == self.rate || frames == 0 {
            return Self {
                samples: self.samples.clone(),
                rate,
                channels: self.channels,
                width: self.width,
            };
        }

        let ch = self.channels as usize;
        let out_frames = (frames as u64 * rate as u64 / self.rate as u64) as usize;
        let step = self.rate as f64 / rate as f64;
        let mut samples = Vec::with_capacity(out_frames * ch);
        for i in 0..out_frames {
            let pos = i as f64 * step;
            let lo = usize::min(pos.floor() as usize, frames - 1);
            let hi = usize::min(lo + 1, frames - 1);
            let frac = pos - lo as f64;
            for c in 0..ch {
                let a = self.samples[lo * ch + c] as f64;
                let b = self.samples[hi * ch + c] as f64;
                samples.push(self.width.saturate((a + (b - a) * frac).round() as i64));
            }
        }

        Self {
            samples,
            rate,
            channels: self.channels,
            width: self.width,
        }
    }

    // Channel conversion; `channels` must be nonzero
    fn rechanneled(&self, channels: u16) -> Self {
        if channels == self.channels {
            return self.clone();
        }

        let ch = self.channels as usize;
        let mono: Vec<i32> = if ch == 1 {
            self.samples.clone()
        } else {
            self.samples
                .chunks_exact(ch)
                .map(|frame| (frame.iter().map(|&sa| sa as i64).sum::<i64>() / ch as i64) as i32)
                .collect()
        };

        let samples = if channels == 1 {
            mono
        } else {
            mono.iter()
                .flat_map(|&sa| std::iter::repeat(sa).take(channels as usize))
                .collect()
        };

        Self {
            samples,
            rate: self.rate,
            channels,
            width: self.width,
        }
    }

    // Apply a per-sample operation which knows the channel index.
    // Outputs are truncated toward zero and saturate.
    fn map_channels<F>(&self, mut op: F) -> Self
    where
        F: FnMut(usize, f64) -> f64,
    {
        let ch = self.channels as usize;
        let samples = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, &sa)| self.width.saturate(op(i % ch, sa as f64) as i64))
            .collect();
        Self {
            samples,
            ..*self
        }
    }
}

impl Add<&AudioBuffer> for AudioBuffer {
    type Output = AudioBuffer;

    fn add(self, rhs: &AudioBuffer) -> AudioBuffer {
        self.append(rhs)
    }
}

impl Add<AudioBuffer> for AudioBuffer {
    type Output = AudioBuffer;

    fn add(self, rhs: AudioBuffer) -> AudioBuffer {
        self.append(&rhs)
    }
}

/// Write `audio` to a 16-bit PCM WAV file
///
/// The audio is converted to the requested sampling `rate`
/// and number of `channels` first.
pub fn export_wav<P>(path: P, audio: &AudioBuffer, rate: u32, channels: u16) -> Result<(), ExportError>
where
    P: AsRef<Path>,
{
    audio.export_wav(path, rate, channels)
}

fn check_format(rate: u32, channels: u16) -> Result<(), AudioFormatError> {
    if rate == 0 {
        Err(AudioFormatError::InvalidSampleRate)
    } else if channels == 0 {
        Err(AudioFormatError::InvalidChannels)
    } else {
        Ok(())
    }
}
