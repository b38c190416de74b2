//! Encoder emulation modes

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use arrayvec::ArrayVec;
use strum::EnumMessage;

#[cfg(not(test))]
use log::warn;

#[cfg(test)]
use std::println as warn;

use crate::waveform::{preamble, PREAMBLE_LEN, PREFIX_MESSAGE_END};

/// Encoder emulation mode
///
/// Real-world SAME encoders differ in the padding they place
/// around each burst, in the silence between bursts, and in the
/// attention signal which follows the header. Each mode mimics
/// one family of encoders.
///
/// Modes may be created [`from_name()`](EncoderMode::from_name),
/// which is not case-sensitive. Unrecognized names select
/// [`EncoderMode::Default`]. Use `from_str()` instead if you
/// would rather have an error.
///
/// ```
/// use samegen::EncoderMode;
///
/// assert_eq!(EncoderMode::Sage, EncoderMode::from_name("SAGE"));
/// assert_eq!(EncoderMode::Nws, EncoderMode::from_name("nws"));
/// assert_eq!("TRILITHIC", EncoderMode::Trilithic.as_str());
/// assert_eq!(EncoderMode::Default, EncoderMode::from_name("HUH"));
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumIter,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum EncoderMode {
    /// Generic encoder: preamble and data, nothing else
    #[default]
    #[strum(serialize = "DEFAULT", detailed_message = "Generic SAME encoder")]
    Default,

    /// SAGE EAS ENDEC
    ///
    /// Ends each burst with one `0xFF` byte.
    #[strum(serialize = "SAGE", detailed_message = "SAGE EAS ENDEC")]
    Sage,

    /// SAGE DIGITAL ENDEC
    ///
    /// Ends each burst with three `0xFF` bytes. The first burst
    /// of each group also begins with a `0x00` byte.
    #[strum(serialize = "DIGITAL", detailed_message = "SAGE DIGITAL ENDEC")]
    Digital,

    /// Trilithic EASyPLUS
    ///
    /// Shorter silence between bursts.
    #[strum(serialize = "TRILITHIC", detailed_message = "Trilithic EASyPLUS")]
    Trilithic,

    /// NOAA Weather Radio transmitter
    ///
    /// Ends each burst with two `0x00` bytes and uses the
    /// 1050 Hz attention tone.
    #[strum(serialize = "NWS", detailed_message = "NOAA Weather Radio")]
    Nws,

    /// Broadcast-chain encoder
    ///
    /// Ends each burst with three `0x00` bytes. Tones are
    /// synthesized at 44.1 kHz.
    #[strum(serialize = "BROADCASTER", detailed_message = "Broadcast station encoder")]
    Broadcaster,

    /// Public alerting attention signal only
    ///
    /// No digital bursts are sent.
    #[strum(serialize = "NPAS", detailed_message = "Public alerting attention signal")]
    Npas,

    /// Wireless Emergency Alert attention signal only
    ///
    /// No digital bursts are sent.
    #[strum(serialize = "WEA", detailed_message = "Wireless Emergency Alert")]
    Wea,
}

impl EncoderMode {
    /// Mode name, like "`SAGE`"
    pub fn as_str(&self) -> &'static str {
        self.get_serializations()[0]
    }

    /// Human-readable description
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Mode from its name, falling back to `DEFAULT`
    ///
    /// Names are not case-sensitive. An unrecognized name is
    /// logged and selects [`EncoderMode::Default`]; the empty
    /// string selects it quietly.
    pub fn from_name(name: &str) -> EncoderMode {
        match EncoderMode::from_str(name) {
            Ok(mode) => mode,
            Err(_e) => {
                if !name.is_empty() {
                    warn!("unrecognized encoder mode \"{}\": using DEFAULT", name);
                }
                EncoderMode::Default
            }
        }
    }

    /// True if the mode always sends its attention signal
    ///
    /// The attention-only modes have no digital bursts, so
    /// the attention signal is all there is to hear.
    pub fn forces_attention_tone(&self) -> bool {
        matches!(self, Self::Npas | Self::Wea)
    }

    /// Byte framing and timing rules for this mode
    pub fn framing(&self) -> Framing {
        match self {
            Self::Default => Framing::new(&[], &[]),
            Self::Sage => Framing::new(&[], &[0xff]),
            Self::Digital => Framing::new(&[0x00], &[0xff, 0xff, 0xff]),
            Self::Trilithic => Framing::new(&[], &[])
                .with_gap(Duration::from_millis(850))
                .with_header_pad(Duration::from_millis(150)),
            Self::Nws => Framing::new(&[], &[0x00, 0x00]),
            Self::Broadcaster => {
                Framing::new(&[], &[0x00, 0x00, 0x00]).with_tone_rate(BROADCASTER_TONE_RATE)
            }
            Self::Npas | Self::Wea => Framing::silent(),
        }
    }
}

impl AsRef<str> for EncoderMode {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EncoderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_display_str().fmt(f)
    }
}

/// Tone synthesis rate for [`EncoderMode::Broadcaster`] (Hz)
pub const BROADCASTER_TONE_RATE: u32 = 44100;

/// Number of times each burst is sent
pub const BURST_REPEATS: usize = 3;

/// Default silence between bursts
pub const BURST_GAP: Duration = Duration::from_secs(1);

/// Byte framing and timing rules for one [`EncoderMode`]
///
/// Every burst is the SAME preamble, then the data, then a
/// mode-specific suffix. The first burst of each group may
/// also carry leading bytes before its preamble.
///
/// ```
/// use samegen::EncoderMode;
///
/// let bursts = EncoderMode::Sage.framing().header_bursts(b"ZCZC-TEST");
/// assert_eq!(3, bursts.len());
/// assert_eq!(&[0xab; 16], &bursts[0][0..16]);
/// assert_eq!(b"ZCZC-TEST", &bursts[0][16..25]);
/// assert_eq!(&[0xff], &bursts[0][25..]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Framing {
    lead: ArrayVec<u8, 1>,
    suffix: ArrayVec<u8, 3>,
    repeats: usize,
    gap: Duration,
    header_pad: Duration,
    tone_rate: Option<u32>,
}

impl Framing {
    // Three bursts, one second apart
    fn new(lead: &[u8], suffix: &[u8]) -> Self {
        Self {
            lead: lead.iter().copied().collect(),
            suffix: suffix.iter().copied().collect(),
            repeats: BURST_REPEATS,
            gap: BURST_GAP,
            header_pad: Duration::ZERO,
            tone_rate: None,
        }
    }

    // No bursts at all
    fn silent() -> Self {
        Self {
            repeats: 0,
            ..Self::new(&[], &[])
        }
    }

    fn with_gap(mut self, gap: Duration) -> Self {
        self.gap = gap;
        self
    }

    fn with_header_pad(mut self, pad: Duration) -> Self {
        self.header_pad = pad;
        self
    }

    fn with_tone_rate(mut self, rate: u32) -> Self {
        self.tone_rate = Some(rate);
        self
    }

    /// Bytes sent before the preamble of the first burst only
    pub fn lead(&self) -> &[u8] {
        &self.lead
    }

    /// Bytes sent after the data of every burst
    pub fn suffix(&self) -> &[u8] {
        &self.suffix
    }

    /// Number of bursts in each group
    ///
    /// Zero for modes which send no digital data.
    pub fn repeats(&self) -> usize {
        self.repeats
    }

    /// True if this mode sends digital bursts
    pub fn has_bursts(&self) -> bool {
        self.repeats > 0
    }

    /// Silence between bursts
    ///
    /// Header bursts are each followed by this gap. End of
    /// message bursts are each preceded by it.
    pub fn gap(&self) -> Duration {
        self.gap
    }

    /// Extra silence after the last header gap
    pub fn header_pad(&self) -> Duration {
        self.header_pad
    }

    /// Fixed tone synthesis rate, if the mode has one
    pub fn tone_rate(&self) -> Option<u32> {
        self.tone_rate
    }

    /// Bytes of one burst carrying `data`
    ///
    /// If `first` is set, the leading bytes are included.
    pub fn burst(&self, data: &[u8], first: bool) -> Vec<u8> {
        let lead: &[u8] = if first { &self.lead } else { &[] };
        let mut out = Vec::with_capacity(lead.len() + PREAMBLE_LEN + data.len() + self.suffix.len());
        out.extend_from_slice(lead);
        out.extend_from_slice(&preamble());
        out.extend_from_slice(data);
        out.extend_from_slice(&self.suffix);
        out
    }

    /// Bytes of every header burst, in transmission order
    pub fn header_bursts(&self, data: &[u8]) -> Vec<Vec<u8>> {
        (0..self.repeats).map(|i| self.burst(data, i == 0)).collect()
    }

    /// Bytes of every end-of-message burst, in transmission order
    pub fn eom_bursts(&self) -> Vec<Vec<u8>> {
        self.header_bursts(PREFIX_MESSAGE_END.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    const P: [u8; 16] = [0xab; 16];

    fn cat(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    #[test]
    fn test_mode_names() {
        for mode in EncoderMode::iter() {
            assert_eq!(mode, EncoderMode::from_name(mode.as_str()));
            assert_eq!(Ok(mode), EncoderMode::from_str(mode.as_str()));
            assert!(!mode.to_string().is_empty());
        }

        assert_eq!(EncoderMode::Digital, EncoderMode::from_name("Digital"));
        assert_eq!(EncoderMode::Broadcaster, EncoderMode::from_name("broadcaster"));
        assert_eq!(EncoderMode::Default, EncoderMode::from_name(""));
        assert_eq!(EncoderMode::Default, EncoderMode::from_name("EAS-O-MATIC"));
        assert!(EncoderMode::try_from("EAS-O-MATIC").is_err());
        assert_eq!(Ok(EncoderMode::Wea), EncoderMode::try_from("wea"));
        assert!(EncoderMode::from_str("EAS-O-MATIC").is_err());
        assert_eq!(EncoderMode::Default, EncoderMode::default());
        assert_eq!("NOAA Weather Radio", EncoderMode::Nws.to_string());
    }

    #[test]
    fn test_forces_attention() {
        let forced: Vec<EncoderMode> = EncoderMode::iter()
            .filter(|m| m.forces_attention_tone())
            .collect();
        assert_eq!(vec![EncoderMode::Npas, EncoderMode::Wea], forced);
    }

    #[test]
    fn test_sage_framing() {
        let framing = EncoderMode::Sage.framing();
        let bursts = framing.header_bursts(b"ZCZC-TEST");
        let expect = cat(&[&P, b"ZCZC-TEST", &[0xff]]);
        assert_eq!(vec![expect.clone(), expect.clone(), expect], bursts);
        assert_eq!(BURST_GAP, framing.gap());

        let eom = cat(&[&P, b"NNNN", &[0xff]]);
        assert_eq!(vec![eom.clone(), eom.clone(), eom], framing.eom_bursts());
    }

    #[test]
    fn test_simple_framings() {
        let data = b"ZCZC-EAS-RMT-011000+0100-3340000-WXYZ/FM -";
        let cases: &[(EncoderMode, &[u8])] = &[
            (EncoderMode::Default, &[]),
            (EncoderMode::Trilithic, &[]),
            (EncoderMode::Nws, &[0x00, 0x00]),
            (EncoderMode::Broadcaster, &[0x00, 0x00, 0x00]),
        ];
        for (mode, suffix) in cases {
            let bursts = mode.framing().header_bursts(data);
            assert_eq!(3, bursts.len());
            for burst in bursts.iter() {
                assert_eq!(&cat(&[&P, data, *suffix]), burst);
            }
        }
    }

    #[test]
    fn test_digital_framing() {
        let framing = EncoderMode::Digital.framing();
        let bursts = framing.header_bursts(b"ZCZC");
        assert_eq!(3, bursts.len());
        assert_eq!(1 + PREAMBLE_LEN + 4 + 3, framing.burst(b"ZCZC", true).len());
        assert_eq!(PREAMBLE_LEN + 4 + 3, framing.burst(b"ZCZC", false).len());
        assert_eq!(cat(&[&[0x00], &P, b"ZCZC", &[0xff; 3]]), bursts[0]);
        assert_eq!(cat(&[&P, b"ZCZC", &[0xff; 3]]), bursts[1]);
        assert_eq!(bursts[1], bursts[2]);

        let eoms = framing.eom_bursts();
        assert_eq!(cat(&[&[0x00], &P, b"NNNN", &[0xff; 3]]), eoms[0]);
        assert_eq!(cat(&[&P, b"NNNN", &[0xff; 3]]), eoms[2]);
    }

    #[test]
    fn test_timing() {
        let tri = EncoderMode::Trilithic.framing();
        assert_eq!(Duration::from_millis(850), tri.gap());
        assert_eq!(Duration::from_millis(150), tri.header_pad());

        assert_eq!(
            Some(BROADCASTER_TONE_RATE),
            EncoderMode::Broadcaster.framing().tone_rate()
        );
        assert_eq!(None, EncoderMode::Nws.framing().tone_rate());
    }

    #[test]
    fn test_attention_only_modes() {
        for mode in &[EncoderMode::Npas, EncoderMode::Wea] {
            let framing = mode.framing();
            assert!(!framing.has_bursts());
            assert!(framing.header_bursts(b"ZCZC").is_empty());
            assert!(framing.eom_bursts().is_empty());
        }
    }
}
