//! Ogg page values.

/// Header-type flag bits.
pub mod flags {
    /// First packet on the page continues one left open by the previous page.
    pub const CONTINUATION: u8 = 0x01;
    /// Beginning of stream.
    pub const BOS: u8 = 0x02;
    /// End of stream.
    pub const EOS: u8 = 0x04;
}

/// A parsed Ogg page.
///
/// The page owns its body buffer. Complete packets are slices into the body;
/// the trailing fragment, if any, belongs to a packet that keeps going on
/// the next page. Consecutive 255-byte segments concatenate into one packet,
/// closed by the first segment shorter than 255 bytes.
#[derive(Debug, Clone)]
pub struct Page {
    /// Stream structure version (always 0).
    pub version: u8,
    /// Header-type flags, see [`flags`].
    pub header_type: u8,
    /// Granule position at the end of this page; -1 means none.
    pub granule_position: i64,
    /// Bitstream serial number.
    pub serial: u32,
    /// Page sequence number.
    pub sequence: u32,
    /// CRC checksum as carried on the wire. Not validated.
    pub checksum: u32,
    body: Vec<u8>,
    /// End offset within `body` of each complete packet.
    packet_ends: Vec<usize>,
    /// Start of the trailing fragment; equals `body.len()` when none.
    fragment_start: usize,
}

impl Page {
    /// Builds a page from its parsed header fields, segment table and body.
    ///
    /// The caller guarantees `body.len()` equals the segment table sum.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        version: u8,
        header_type: u8,
        granule_position: i64,
        serial: u32,
        sequence: u32,
        checksum: u32,
        segment_table: &[u8],
        body: Vec<u8>,
    ) -> Self {
        let mut packet_ends = Vec::new();
        let mut pos = 0usize;
        for &segment in segment_table {
            pos += segment as usize;
            if segment < 0xFF {
                packet_ends.push(pos);
            }
        }
        let fragment_start = packet_ends.last().copied().unwrap_or(0);
        Self {
            version,
            header_type,
            granule_position,
            serial,
            sequence,
            checksum,
            body,
            packet_ends,
            fragment_start,
        }
    }

    /// True when this page continues a packet from the previous page.
    pub fn is_continuation(&self) -> bool {
        (self.header_type & flags::CONTINUATION) != 0
    }

    /// True when this is a beginning-of-stream page.
    pub fn is_bos(&self) -> bool {
        (self.header_type & flags::BOS) != 0
    }

    /// True when this is an end-of-stream page.
    pub fn is_eos(&self) -> bool {
        (self.header_type & flags::EOS) != 0
    }

    /// Number of packets fully contained in this page.
    pub fn packet_count(&self) -> usize {
        self.packet_ends.len()
    }

    /// The `index`-th complete packet.
    ///
    /// Panics when `index >= packet_count()`.
    pub fn packet(&self, index: usize) -> &[u8] {
        let start = if index == 0 {
            0
        } else {
            self.packet_ends[index - 1]
        };
        &self.body[start..self.packet_ends[index]]
    }

    /// True when the final packet of this page spills into the next page.
    pub fn continues(&self) -> bool {
        self.fragment_start < self.body.len()
    }

    /// Bytes of the unfinished packet at the end of the page.
    pub fn trailing_fragment(&self) -> &[u8] {
        &self.body[self.fragment_start..]
    }

    /// Removes and returns the trailing fragment, leaving the page without
    /// a continuation.
    pub(crate) fn take_trailing(&mut self) -> Vec<u8> {
        self.body.split_off(self.fragment_start)
    }
}
