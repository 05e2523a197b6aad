//! Error types for Ogg and Opus stream reading.

use thiserror::Error;

/// Errors surfaced while de-framing Ogg pages or reading Opus packets.
///
/// Every error is terminal to the call that produced it; nothing is retried
/// internally. A reader that returned an error is left in an unspecified
/// state and further calls are not guaranteed to succeed.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The byte source failed or ended before a full read completed.
    #[error("ogg: short read: {0}")]
    ShortRead(#[from] std::io::Error),

    /// A page did not start with the `OggS` capture pattern.
    #[error("ogg: missing capture pattern")]
    MissingCapturePattern,

    /// A page declared a stream structure version other than 0.
    #[error("ogg: unsupported version {0}")]
    UnsupportedVersion(u8),

    /// The first stream packet did not carry a valid `OpusHead` header.
    #[error("opus: invalid id header prefix")]
    InvalidIdHeader,

    /// The second stream packet did not carry a valid `OpusTags` header.
    #[error("opus: invalid tags header prefix")]
    InvalidTagsHeader,

    /// The id header declared zero channels.
    #[error("opus: channel count must be at least 1")]
    ZeroChannels,

    /// The id header declared a channel mapping family this reader does not
    /// support.
    #[error("opus: unsupported channel mapping family {0}")]
    UnsupportedChannelMapping(u8),

    /// An audio packet was too short to carry its framing information.
    #[error("opus: invalid TOC")]
    InvalidToc,

    /// `next_packet` was called after the last packet was delivered.
    #[error("opus: end of stream")]
    EndOfStream,
}

pub type Result<T> = std::result::Result<T, ReadError>;
