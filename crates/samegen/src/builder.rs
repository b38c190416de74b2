use crate::encoder::SameEncoder;
use crate::mode::EncoderMode;

/// Builds a SAME/EAS alert encoder
///
/// The builder comes with a sensible set of default options:
///
/// * 24000 Hz output
/// * [`EncoderMode::Default`] framing
/// * attention signal and end of message enabled
/// * no band filter
///
/// ```
/// use samegen::{EncoderMode, SameEncoderBuilder};
///
/// let encoder = SameEncoderBuilder::new(22050)
///     .with_mode(EncoderMode::Nws)
///     .with_attention_tone(false)
///     .build();
/// assert_eq!(22050, encoder.rate());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SameEncoderBuilder {
    rate: u32,
    mode: EncoderMode,
    attention_tone: bool,
    end_of_message: bool,
    bandpass: bool,
}

impl SameEncoderBuilder {
    /// New encoder with "sensible" defaults
    ///
    /// The only mandatory parameter is the output sampling
    /// rate, in Hz. Every buffer the encoder produces is
    /// 16-bit mono at this rate.
    pub fn new(rate: u32) -> Self {
        Self {
            rate,
            mode: EncoderMode::Default,
            attention_tone: true,
            end_of_message: true,
            bandpass: false,
        }
    }

    /// Build an encoder
    ///
    /// The attention signal and end of message bursts are
    /// synthesized now, once, and reused for every alert.
    pub fn build(&self) -> SameEncoder {
        SameEncoder::from(self)
    }

    /// Encoder emulation mode
    ///
    /// Selects the byte framing, burst timing, and attention
    /// signal of a family of real-world encoders.
    pub fn with_mode(&mut self, mode: EncoderMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Send the attention signal
    ///
    /// The attention signal follows the header bursts. It is
    /// always sent by [`EncoderMode::Npas`] and
    /// [`EncoderMode::Wea`], regardless of this setting.
    pub fn with_attention_tone(&mut self, enable: bool) -> &mut Self {
        self.attention_tone = enable;
        self
    }

    /// Send end of message bursts
    ///
    /// Attention-only modes never send bursts, regardless of
    /// this setting.
    pub fn with_end_of_message(&mut self, enable: bool) -> &mut Self {
        self.end_of_message = enable;
        self
    }

    /// Pass the finished alert through the band filter
    ///
    /// See [`band_filter()`](crate::filter::band_filter).
    pub fn with_bandpass(&mut self, enable: bool) -> &mut Self {
        self.bandpass = enable;
        self
    }

    /// Output sampling rate (Hz)
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Encoder emulation mode
    pub fn mode(&self) -> EncoderMode {
        self.mode
    }

    /// Attention signal requested
    ///
    /// This is the configured value. The mode may still
    /// force the attention signal on.
    pub fn attention_tone(&self) -> bool {
        self.attention_tone
    }

    /// End of message bursts requested
    pub fn end_of_message(&self) -> bool {
        self.end_of_message
    }

    /// Band filter requested
    pub fn bandpass(&self) -> bool {
        self.bandpass
    }
}

impl std::default::Default for SameEncoderBuilder {
    fn default() -> Self {
        Self::new(24000)
    }
}
