//! Streaming reader for Ogg-encapsulated Opus bitstreams.
//!
//! De-frames Ogg pages (RFC 3533), reassembles logical packets across page
//! boundaries, validates the two mandatory Opus header packets (RFC 7845),
//! and yields audio packets annotated with the frame count and per-frame
//! sample count derived from the Opus TOC byte (RFC 6716). The reader keeps
//! a running pre-skip balance and a microsecond-accurate playback duration.
//!
//! No audio is decoded: packets carry their payload bytes verbatim, and no
//! PCM is ever produced. One logical stream is assumed.
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use oggopus::{OpusReader, ReadError};
//!
//! # fn main() -> oggopus::Result<()> {
//! let file = File::open("speech.ogg")?;
//! let mut reader = OpusReader::new(file);
//! loop {
//!     match reader.next_packet() {
//!         Ok(packet) => println!(
//!             "{} frames x {} samples, {} bytes",
//!             packet.frame_count,
//!             packet.samples_per_frame,
//!             packet.data.len()
//!         ),
//!         Err(ReadError::EndOfStream) => break,
//!         Err(e) => return Err(e),
//!     }
//! }
//! println!("duration: {:?}", reader.duration());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ogg;
pub mod opus;
mod source;

pub use error::{ReadError, Result};
pub use opus::{OpusPacket, OpusReader};
pub use source::ByteSource;

#[cfg(test)]
pub(crate) mod testutil;
