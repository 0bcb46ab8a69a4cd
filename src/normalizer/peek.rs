use std::io::{self, Read};

/// Number of leading bytes inspected before choosing a decoder.
pub const PEEK_LEN: usize = 4096;

/// A reader that has buffered its first bytes for inspection and replays
/// them before continuing with the rest of the stream.
///
/// If the look-ahead read failed, the error is held back and returned once
/// the buffered bytes have been replayed, so a consumer observes it exactly
/// where it happened in the stream.
pub struct PeekedReader<R> {
    prefix: Vec<u8>,
    pos: usize,
    pending: Option<io::Error>,
    inner: R,
}

impl<R: Read> PeekedReader<R> {
    /// Reads up to `limit` bytes ahead from `inner`.
    pub fn peek(mut inner: R, limit: usize) -> Self {
        let mut prefix = Vec::with_capacity(limit);
        // read_to_end keeps whatever it managed to read before failing
        let pending = inner
            .by_ref()
            .take(limit as u64)
            .read_to_end(&mut prefix)
            .err();

        Self {
            prefix,
            pos: 0,
            pending,
            inner,
        }
    }

    /// The buffered look-ahead bytes.
    pub fn peeked(&self) -> &[u8] {
        &self.prefix
    }

    /// Whether the look-ahead read hit an I/O error.
    pub fn peek_failed(&self) -> bool {
        self.pending.is_some()
    }
}

impl<R: Read> Read for PeekedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.pos < self.prefix.len() {
            let remaining = &self.prefix[self.pos..];
            let n = remaining.len().min(buf.len());
            buf[..n].copy_from_slice(&remaining[..n]);
            self.pos += n;
            return Ok(n);
        }

        if let Some(err) = self.pending.take() {
            return Err(err);
        }

        self.inner.read(buf)
    }
}
