//! Ogg page reading and packet reassembly.

use std::io::Read;

use tracing::{trace, warn};

use crate::error::{ReadError, Result};
use crate::source::ByteSource;

use super::page::Page;

const CAPTURE_PATTERN: &[u8] = b"OggS";
const PAGE_HEADER_SIZE: usize = 27;

/// Granule value meaning "no timestamp on this page".
const NO_GRANULE: i64 = -1;

/// A logical packet reassembled from one or more page segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Packet payload, exactly the concatenation of its segments.
    pub data: Vec<u8>,
    /// True when this is the stream's final packet: its page carries the
    /// end-of-stream flag and nothing follows it there.
    pub last: bool,
}

/// Reads Ogg pages from a byte source and yields reassembled logical
/// packets in bitstream order.
///
/// Packets that spill across page boundaries are stitched back together:
/// a page's trailing run of 255-byte segments is held as a pending
/// fragment and prepended to the first packet of the next page when that
/// page claims the continuation.
pub struct OggReader<R: Read> {
    source: ByteSource<R>,
    /// The page currently being drained. `None` before the first page and
    /// between pages.
    current: Option<Page>,
    packet_index: usize,
    /// Accumulated bytes of a packet still waiting for its final segment.
    pending: Vec<u8>,
    /// True while discarding an unterminated packet run the stream opened
    /// with (a continuation with no prior page to continue from).
    skip_orphan: bool,
    /// False until the first page was read.
    started: bool,
    last_granule: i64,
}

impl<R: Read> OggReader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            source: ByteSource::new(stream),
            current: None,
            packet_index: 0,
            pending: Vec::new(),
            skip_orphan: false,
            started: false,
            last_granule: 0,
        }
    }

    /// Granule position of the most recent page that carried one.
    pub fn last_granule_position(&self) -> i64 {
        self.last_granule
    }

    /// Bytes consumed from the source by completed reads.
    pub fn bytes_consumed(&self) -> u64 {
        self.source.bytes_consumed()
    }

    /// Replaces the byte source, resuming at the consumed-byte offset.
    ///
    /// Reader state (current page, packet index, pending fragment) is kept.
    pub fn reset_stream<F>(&mut self, replace: F)
    where
        F: FnOnce(u64) -> R,
    {
        self.source.reset(replace);
    }

    /// Returns the next logical packet.
    ///
    /// Fails with [`ReadError::ShortRead`] once the input is exhausted
    /// after the last page.
    pub fn next_packet(&mut self) -> Result<Packet> {
        loop {
            let mut page = match self.current.take() {
                Some(page) => page,
                None => self.load_page()?,
            };

            if self.packet_index < page.packet_count() {
                let mut data = std::mem::take(&mut self.pending);
                data.extend_from_slice(page.packet(self.packet_index));
                self.packet_index += 1;
                let last = self.packet_index == page.packet_count()
                    && page.is_eos()
                    && !page.continues();
                self.current = Some(page);
                return Ok(Packet { data, last });
            }

            // Complete packets of this page are spent; carry its unfinished
            // tail toward the next page. While skipping an orphan run the
            // fragment belongs to the orphan and is dropped with it.
            let fragment = page.take_trailing();
            if !self.skip_orphan && !fragment.is_empty() {
                self.pending.extend_from_slice(&fragment);
            }

            if page.is_eos() && !self.pending.is_empty() {
                // The final page ended on a 255-valued segment: the packet
                // is truncated. Surface what accumulated as the last packet.
                let data = std::mem::take(&mut self.pending);
                return Ok(Packet { data, last: true });
            }
            // The spent page is dropped; the next loop turn reads onward.
        }
    }

    /// Reads the next page and applies the continuation bookkeeping that
    /// belongs to a page transition.
    fn load_page(&mut self) -> Result<Page> {
        let page = self.read_page()?;
        if page.granule_position != NO_GRANULE {
            self.last_granule = page.granule_position;
        }
        self.packet_index = 0;

        if !self.started {
            self.started = true;
            if page.is_continuation() {
                // The stream opens mid-packet; there is no prior fragment,
                // so the leading run is an orphan.
                if page.packet_count() > 0 {
                    self.packet_index = 1;
                } else {
                    self.skip_orphan = true;
                }
            }
        } else if self.skip_orphan {
            if page.is_continuation() {
                if page.packet_count() > 0 {
                    // The orphan run terminates at this page's first
                    // complete packet; step past it.
                    self.packet_index = 1;
                    self.skip_orphan = false;
                }
            } else {
                self.skip_orphan = false;
            }
        } else if !self.pending.is_empty() && !page.is_continuation() {
            warn!(
                sequence = page.sequence,
                dropped = self.pending.len(),
                "continuation promised but not claimed; dropping fragment"
            );
            self.pending.clear();
        }
        Ok(page)
    }

    fn read_page(&mut self) -> Result<Page> {
        let mut header = [0u8; PAGE_HEADER_SIZE];
        self.source.read_exact(&mut header)?;
        if &header[..4] != CAPTURE_PATTERN {
            return Err(ReadError::MissingCapturePattern);
        }
        let version = header[4];
        if version != 0 {
            return Err(ReadError::UnsupportedVersion(version));
        }
        let header_type = header[5];
        let granule_position = i64::from_le_bytes(header[6..14].try_into().unwrap());
        let serial = u32::from_le_bytes(header[14..18].try_into().unwrap());
        let sequence = u32::from_le_bytes(header[18..22].try_into().unwrap());
        let checksum = u32::from_le_bytes(header[22..26].try_into().unwrap());

        let segment_table = self.source.read_vec(header[26] as usize)?;
        let body_len: usize = segment_table.iter().map(|&s| s as usize).sum();
        let body = self.source.read_vec(body_len)?;
        trace!(
            sequence,
            granule_position,
            segments = segment_table.len(),
            body_len,
            "ogg page"
        );

        Ok(Page::assemble(
            version,
            header_type,
            granule_position,
            serial,
            sequence,
            checksum,
            &segment_table,
            body,
        ))
    }
}
