//! Line splitting over a chunked response body.
//!
//! Chunks arrive with arbitrary boundaries, so bytes are buffered until a
//! terminator is seen. A line ends at `\n`, `\r\n`, or a lone `\r`; a `\r`
//! at the end of one chunk followed by `\n` at the start of the next counts
//! as a single terminator. Lines are decoded as UTF-8 with invalid sequences
//! replaced, and a final unterminated line is still delivered at EOF.

use bytes::{Buf, BytesMut};
use futures::Stream;
use futures_util::stream;
use futures_util::StreamExt;

use crate::traits::HttpError;

/// Byte buffer that yields complete lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: BytesMut,
    /// The previous line ended in `\r`; a leading `\n` belongs to it.
    skip_lf: bool,
    /// Bytes already searched for a terminator.
    scanned: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of body bytes.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Take the next complete line, if one is buffered.
    pub fn next_line(&mut self) -> Option<String> {
        if self.skip_lf {
            match self.buf.first() {
                Some(b'\n') => {
                    self.buf.advance(1);
                    self.skip_lf = false;
                }
                Some(_) => self.skip_lf = false,
                None => return None,
            }
        }

        let Some(offset) = self.buf[self.scanned..]
            .iter()
            .position(|b| *b == b'\n' || *b == b'\r')
        else {
            self.scanned = self.buf.len();
            return None;
        };
        let pos = self.scanned + offset;
        self.scanned = 0;
        let line = self.buf.split_to(pos);
        if self.buf[0] == b'\r' {
            self.skip_lf = true;
        }
        self.buf.advance(1);
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Take whatever remains once the body has ended.
    pub fn finish(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        self.scanned = 0;
        let rest = self.buf.split();
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

/// Turn a byte stream into a stream of lines.
///
/// A transport error is yielded once and ends the stream.
pub fn lines<S>(bytes: S) -> impl Stream<Item = Result<String, HttpError>> + Send
where
    S: Stream<Item = Result<bytes::Bytes, HttpError>> + Send + Unpin,
{
    stream::unfold(
        (bytes, LineBuffer::new(), false),
        |(mut bytes, mut buffer, mut done)| async move {
            loop {
                if let Some(line) = buffer.next_line() {
                    return Some((Ok(line), (bytes, buffer, done)));
                }
                if done {
                    return None;
                }

                match bytes.next().await {
                    Some(Ok(chunk)) => buffer.push(&chunk),
                    Some(Err(e)) => {
                        done = true;
                        buffer = LineBuffer::new();
                        return Some((Err(e), (bytes, buffer, done)));
                    }
                    None => {
                        done = true;
                        if let Some(line) = buffer.finish() {
                            return Some((Ok(line), (bytes, buffer, done)));
                        }
                        return None;
                    }
                }
            }
        },
    )
}
