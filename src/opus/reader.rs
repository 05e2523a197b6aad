//! Streaming reader for Opus packets in an Ogg container.

use std::io::Read;
use std::time::Duration;

use tracing::debug;

use crate::error::{ReadError, Result};
use crate::ogg::OggReader;

use super::header::{self, IdHeader};
use super::toc::Toc;

/// An Opus audio packet annotated with framing metadata from its TOC byte.
#[derive(Debug, Clone)]
pub struct OpusPacket {
    /// Raw packet payload, exactly as carried by the container.
    pub data: Vec<u8>,
    /// The packet's TOC byte.
    pub toc: Toc,
    /// Number of frames in the packet.
    pub frame_count: u32,
    /// Samples per frame at the 48 kHz reference rate.
    pub samples_per_frame: u32,
    /// Decodable samples in this packet, after pre-skip deduction.
    pub total_samples: u32,
}

/// Reads an Ogg-encapsulated Opus stream: validates the two mandatory
/// header packets, then yields audio packets with frame and sample
/// annotations while keeping a running pre-skip balance and playback
/// duration.
///
/// The reader owns its byte source and is single-threaded; all I/O happens
/// on demand inside [`next_packet`](Self::next_packet).
pub struct OpusReader<R: Read> {
    ogg: OggReader<R>,
    id: Option<IdHeader>,
    vendor: String,
    /// Pre-skip samples already deducted from reported packet totals.
    skipped: u32,
    duration_micros: u64,
    end_of_stream: bool,
}

impl<R: Read> OpusReader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            ogg: OggReader::new(stream),
            id: None,
            vendor: String::new(),
            skipped: 0,
            duration_micros: 0,
            end_of_stream: false,
        }
    }

    /// Identification header fields, available once the headers were read.
    pub fn header(&self) -> Option<&IdHeader> {
        self.id.as_ref()
    }

    /// Vendor string from the comment header.
    pub fn vendor(&self) -> Option<&str> {
        self.id.is_some().then_some(self.vendor.as_str())
    }

    /// True once both header packets were validated.
    pub fn is_initialized(&self) -> bool {
        self.id.is_some()
    }

    /// True after the stream's last packet was delivered.
    pub fn end_of_stream(&self) -> bool {
        self.end_of_stream
    }

    /// Accumulated duration of all yielded packets, in microseconds.
    pub fn duration_micros(&self) -> u64 {
        self.duration_micros
    }

    /// Accumulated duration of all yielded packets.
    pub fn duration(&self) -> Duration {
        Duration::from_micros(self.duration_micros)
    }

    /// Granule position of the most recent page that carried one.
    pub fn last_granule_position(&self) -> i64 {
        self.ogg.last_granule_position()
    }

    /// Bytes consumed from the source by completed reads.
    pub fn bytes_consumed(&self) -> u64 {
        self.ogg.bytes_consumed()
    }

    /// Replaces the byte source, resuming at the consumed-byte offset.
    ///
    /// For live streams whose tail grew past a premature end-of-file. All
    /// parser state is kept; only the source is swapped.
    pub fn reset_stream<F>(&mut self, replace: F)
    where
        F: FnOnce(u64) -> R,
    {
        self.ogg.reset_stream(replace);
    }

    /// Returns the next audio packet.
    ///
    /// The first call validates the `OpusHead` and `OpusTags` packets
    /// before any audio is read. Once the last packet was delivered, every
    /// further call fails with [`ReadError::EndOfStream`].
    pub fn next_packet(&mut self) -> Result<OpusPacket> {
        loop {
            if self.end_of_stream {
                return Err(ReadError::EndOfStream);
            }
            if self.id.is_none() {
                self.read_headers()?;
            }

            let packet = self.ogg.next_packet()?;
            if packet.last {
                self.end_of_stream = true;
            }
            // Oversized comment packets span several Ogg packets; the later
            // chunks lack the full OpusTags magic but keep the Op prefix.
            if packet.data.len() >= 2 && &packet.data[..2] == b"Op" {
                continue;
            }

            let toc = Toc::parse(&packet.data)?;
            let frame_count = toc.frame_count(&packet.data)?;
            let samples_per_frame = toc.samples_per_frame();
            let mut total_samples = frame_count * samples_per_frame;

            // Pre-skip reduces the reported sample count, never the payload.
            let pre_skip = self.id.as_ref().map_or(0, |h| u32::from(h.pre_skip));
            let need = pre_skip.saturating_sub(self.skipped);
            if need > 0 {
                let take = need.min(total_samples);
                total_samples -= take;
                self.skipped += take;
            }
            self.duration_micros += u64::from(total_samples) * 1_000_000 / 48_000;

            return Ok(OpusPacket {
                data: packet.data,
                toc,
                frame_count,
                samples_per_frame,
                total_samples,
            });
        }
    }

    fn read_headers(&mut self) -> Result<()> {
        let first = self.ogg.next_packet()?;
        let id = IdHeader::parse(&first.data)?;
        let second = self.ogg.next_packet()?;
        let vendor = header::parse_vendor(&second.data)?;
        debug!(
            channels = id.channel_count,
            pre_skip = id.pre_skip,
            vendor = %vendor,
            "opus stream initialized"
        );
        self.vendor = vendor;
        self.id = Some(id);
        Ok(())
    }
}
