//! Byte source adapter with consumed-byte accounting.

use std::io::Read;

use crate::error::Result;

/// Wraps a byte stream behind a read-exact capability and tracks how many
/// bytes completed reads have consumed.
///
/// The counter advances only when a read fills its whole buffer, so it
/// always points at a boundary the stream delivered in full. Live-stream
/// callers use that offset to build a replacement source once the upstream
/// has produced more data than was available at the failed read.
pub struct ByteSource<R: Read> {
    stream: R,
    consumed: u64,
}

impl<R: Read> ByteSource<R> {
    pub fn new(stream: R) -> Self {
        Self {
            stream,
            consumed: 0,
        }
    }

    /// Bytes consumed by successfully completed reads.
    pub fn bytes_consumed(&self) -> u64 {
        self.consumed
    }

    /// Fills `buf` from the stream, or fails without advancing the counter.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.stream.read_exact(buf)?;
        self.consumed += buf.len() as u64;
        Ok(())
    }

    /// Reads exactly `len` bytes into a fresh buffer.
    pub fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Replaces the underlying stream.
    ///
    /// The callback receives the count of bytes consumed so far and must
    /// return a stream positioned at that offset. Parser state held by the
    /// owning reader is untouched; only the source is swapped.
    pub fn reset<F>(&mut self, replace: F)
    where
        F: FnOnce(u64) -> R,
    {
        self.stream = replace(self.consumed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_counts_completed_reads() {
        let mut source = ByteSource::new(Cursor::new(vec![1u8, 2, 3, 4, 5]));
        let mut buf = [0u8; 3];
        source.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(source.bytes_consumed(), 3);

        let rest = source.read_vec(2).unwrap();
        assert_eq!(rest, vec![4, 5]);
        assert_eq!(source.bytes_consumed(), 5);
    }

    #[test]
    fn test_failed_read_does_not_advance() {
        let mut source = ByteSource::new(Cursor::new(vec![1u8, 2]));
        let mut buf = [0u8; 4];
        assert!(source.read_exact(&mut buf).is_err());
        assert_eq!(source.bytes_consumed(), 0);
    }

    #[test]
    fn test_zero_length_read() {
        let mut source = ByteSource::new(Cursor::new(Vec::<u8>::new()));
        assert!(source.read_vec(0).unwrap().is_empty());
        assert_eq!(source.bytes_consumed(), 0);
    }

    #[test]
    fn test_reset_resumes_at_consumed_offset() {
        let data = vec![10u8, 11, 12, 13, 14, 15];
        let mut source = ByteSource::new(Cursor::new(data[..3].to_vec()));
        let head = source.read_vec(3).unwrap();
        assert_eq!(head, vec![10, 11, 12]);

        // The truncated source is exhausted; swap in the grown stream.
        assert!(source.read_vec(1).is_err());
        source.reset(|consumed| {
            assert_eq!(consumed, 3);
            let mut cursor = Cursor::new(data.clone());
            cursor.set_position(consumed);
            cursor
        });

        assert_eq!(source.read_vec(3).unwrap(), vec![13, 14, 15]);
        assert_eq!(source.bytes_consumed(), 6);
    }
}
