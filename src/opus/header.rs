//! Opus header packets (RFC 7845 sections 5.1 and 5.2).

use crate::error::{ReadError, Result};

const ID_MAGIC: &[u8] = b"OpusHead";
const TAGS_MAGIC: &[u8] = b"OpusTags";

/// Fixed layout size of the family-0 identification header.
const ID_HEADER_SIZE: usize = 19;

/// Opus identification header, the mandatory first packet of the stream.
#[derive(Debug, Clone)]
pub struct IdHeader {
    /// Encapsulation version.
    pub version: u8,
    /// Output channel count, at least 1.
    pub channel_count: u8,
    /// 48 kHz samples to discard at the start of the stream.
    pub pre_skip: u16,
    /// Sample rate of the encoder input; informational only.
    pub input_sample_rate: u32,
    /// Output gain as carried on the wire (signed Q7.8 when interpreted).
    pub output_gain: u16,
    /// Channel mapping family; only family 0 is supported.
    pub channel_mapping_family: u8,
}

impl IdHeader {
    /// Parses the identification header from the first stream packet.
    pub fn parse(packet: &[u8]) -> Result<Self> {
        if packet.len() < ID_HEADER_SIZE || &packet[..8] != ID_MAGIC {
            return Err(ReadError::InvalidIdHeader);
        }
        let channel_count = packet[9];
        if channel_count == 0 {
            return Err(ReadError::ZeroChannels);
        }
        let channel_mapping_family = packet[18];
        if channel_mapping_family != 0 {
            return Err(ReadError::UnsupportedChannelMapping(channel_mapping_family));
        }
        Ok(Self {
            version: packet[8],
            channel_count,
            pre_skip: u16::from_le_bytes(packet[10..12].try_into().unwrap()),
            input_sample_rate: u32::from_le_bytes(packet[12..16].try_into().unwrap()),
            output_gain: u16::from_le_bytes(packet[16..18].try_into().unwrap()),
            channel_mapping_family,
        })
    }

    /// Output gain in dB. The wire field is a signed Q7.8 fixed-point value.
    pub fn output_gain_db(&self) -> f32 {
        f32::from(self.output_gain as i16) / 256.0
    }
}

/// Parses the vendor string out of the comment header packet.
///
/// Only the vendor string is read; the user comment list that follows is
/// left uninterpreted.
pub fn parse_vendor(packet: &[u8]) -> Result<String> {
    if packet.len() < 12 || &packet[..8] != TAGS_MAGIC {
        return Err(ReadError::InvalidTagsHeader);
    }
    let len = u32::from_le_bytes(packet[8..12].try_into().unwrap()) as usize;
    let vendor = packet
        .get(12..12 + len)
        .ok_or(ReadError::InvalidTagsHeader)?;
    Ok(String::from_utf8_lossy(vendor).into_owned())
}
