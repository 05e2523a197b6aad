//! Ogg container de-framing.
//!
//! Implements the transport side of RFC 3533: page parsing and logical
//! packet reassembly across page boundaries. One logical stream is assumed;
//! serial numbers are parsed and exposed but never checked for stability.

mod page;
mod reader;

pub use page::{flags, Page};
pub use reader::{OggReader, Packet};
