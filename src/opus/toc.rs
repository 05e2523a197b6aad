//! Opus TOC (table-of-contents) interpretation.
//!
//! Implements the framing side of RFC 6716 section 3.1: the TOC byte's
//! config/stereo/code split, the per-frame sample count at the 48 kHz
//! reference rate, and the frame-count rules for the four packing codes.

use crate::error::{ReadError, Result};

/// Fixed Opus reference rate in samples per second.
const REFERENCE_RATE: u32 = 48_000;

/// TOC byte of an Opus packet.
///
/// Layout:
/// ```text
///  0 1 2 3 4 5 6 7
/// +-+-+-+-+-+-+-+-+
/// | config  |s| c |
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toc(pub u8);

impl Toc {
    pub const fn new(byte: u8) -> Self {
        Self(byte)
    }

    /// Reads the TOC byte off a packet payload.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        payload.first().map(|&b| Self(b)).ok_or(ReadError::InvalidToc)
    }

    /// Configuration number (0..=31).
    pub fn config(&self) -> Config {
        Config(self.0 >> 3)
    }

    /// True when the packet codes stereo audio.
    pub fn is_stereo(&self) -> bool {
        (self.0 & 0b0000_0100) != 0
    }

    /// Frame-packing code from the two low bits.
    pub fn frame_code(&self) -> FrameCode {
        FrameCode::from_bits(self.0 & 0b11)
    }

    /// Samples per frame at the 48 kHz reference rate.
    ///
    /// Three branches cover the CELT, Hybrid and SILK thirds of the config
    /// space without materializing the standard's 32-entry table.
    pub fn samples_per_frame(&self) -> u32 {
        let b = u32::from(self.0);
        if b & 0x80 != 0 {
            // CELT: 2.5, 5, 10 or 20 ms
            (REFERENCE_RATE << ((b >> 3) & 0x3)) / 400
        } else if b & 0x60 == 0x60 {
            // Hybrid: 10 or 20 ms
            if b & 0x08 != 0 {
                REFERENCE_RATE / 50
            } else {
                REFERENCE_RATE / 100
            }
        } else {
            // SILK: 10, 20, 40 or 60 ms
            let shift = (b >> 3) & 0x3;
            if shift == 3 {
                REFERENCE_RATE * 60 / 1000
            } else {
                (REFERENCE_RATE << shift) / 100
            }
        }
    }

    /// Number of frames in the packet carrying this TOC byte.
    ///
    /// Code-3 packets store the count in the byte after the TOC; a code-3
    /// packet without that byte is malformed.
    pub fn frame_count(&self, payload: &[u8]) -> Result<u32> {
        match self.frame_code() {
            FrameCode::Single => Ok(1),
            FrameCode::TwoEqual | FrameCode::TwoVariable => Ok(2),
            FrameCode::Arbitrary => {
                let byte = payload.get(1).copied().ok_or(ReadError::InvalidToc)?;
                let (_, _, count) = parse_frame_count_byte(byte);
                Ok(u32::from(count))
            }
        }
    }
}

impl std::fmt::Display for Toc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "config={}, stereo={}, mode={}, bandwidth={}, {}",
            self.config().0,
            self.is_stereo(),
            self.config().mode(),
            self.config().bandwidth(),
            self.frame_code(),
        )
    }
}

/// Opus configuration number (0..=31).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config(pub u8);

impl Config {
    /// Operating mode for this configuration.
    pub fn mode(&self) -> Mode {
        match self.0 {
            0..=11 => Mode::Silk,
            12..=15 => Mode::Hybrid,
            _ => Mode::Celt,
        }
    }

    /// Coded audio bandwidth.
    pub fn bandwidth(&self) -> Bandwidth {
        match self.0 {
            0..=3 => Bandwidth::NB,
            4..=7 => Bandwidth::MB,
            8..=11 => Bandwidth::WB,
            12..=13 => Bandwidth::SWB,
            14..=15 => Bandwidth::FB,
            16..=19 => Bandwidth::NB,
            20..=23 => Bandwidth::WB,
            24..=27 => Bandwidth::SWB,
            _ => Bandwidth::FB,
        }
    }
}

/// Operating mode (SILK, Hybrid or CELT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Silk,
    Hybrid,
    Celt,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Silk => write!(f, "SILK"),
            Self::Hybrid => write!(f, "Hybrid"),
            Self::Celt => write!(f, "CELT"),
        }
    }
}

/// Coded audio bandwidth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bandwidth {
    /// Narrowband (4 kHz audio)
    NB,
    /// Medium-band (6 kHz audio)
    MB,
    /// Wideband (8 kHz audio)
    WB,
    /// Super-wideband (12 kHz audio)
    SWB,
    /// Fullband (20 kHz audio)
    FB,
}

impl Bandwidth {
    /// Effective sample rate for this bandwidth.
    pub fn sample_rate(&self) -> u32 {
        match self {
            Self::NB => 8_000,
            Self::MB => 12_000,
            Self::WB => 16_000,
            Self::SWB => 24_000,
            Self::FB => 48_000,
        }
    }
}

impl std::fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NB => write!(f, "Narrowband"),
            Self::MB => write!(f, "Mediumband"),
            Self::WB => write!(f, "Wideband"),
            Self::SWB => write!(f, "Superwideband"),
            Self::FB => write!(f, "Fullband"),
        }
    }
}

/// Frame-packing code (TOC bits 1..0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCode {
    /// One frame.
    Single,
    /// Two frames of equal compressed size.
    TwoEqual,
    /// Two frames with an explicit first-frame size.
    TwoVariable,
    /// Arbitrary frame count taken from the byte after the TOC.
    Arbitrary,
}

impl FrameCode {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Single,
            1 => Self::TwoEqual,
            2 => Self::TwoVariable,
            _ => Self::Arbitrary,
        }
    }
}

impl std::fmt::Display for FrameCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "Single Frame"),
            Self::TwoEqual => write!(f, "Two Equal Frames"),
            Self::TwoVariable => write!(f, "Two Different Frames"),
            Self::Arbitrary => write!(f, "Arbitrary Frames"),
        }
    }
}

/// Splits the frame-count byte of a code-3 packet.
///
/// Returns (is_vbr, has_padding, frame_count).
pub fn parse_frame_count_byte(byte: u8) -> (bool, bool, u8) {
    let is_vbr = (byte & 0b1000_0000) != 0;
    let has_padding = (byte & 0b0100_0000) != 0;
    let frame_count = byte & 0b0011_1111;
    (is_vbr, has_padding, frame_count)
}
