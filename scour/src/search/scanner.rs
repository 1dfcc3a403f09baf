use std::io::BufRead;

use crate::errors::{SearchError, SearchResult};

/// Longest line content the scanner will return
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Lazily yields `(line_number, text)` pairs from a readable file.
///
/// Line numbers are 1-based. Terminator sequences (`\n`, `\r\n`) delimit
/// lines and are not included in the returned text. A line whose content
/// exceeds [`MAX_LINE_BYTES`] fails the scan with
/// [`SearchError::LineTooLong`]; the iterator fuses after any error, so a
/// failed file yields no further lines and no partial line is ever
/// returned. Invalid UTF-8 is decoded lossily.
#[derive(Debug)]
pub struct LineScanner<R> {
    reader: R,
    line_number: usize,
    failed: bool,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            failed: false,
        }
    }

    /// Reads one line's content into `buf`, terminator stripped.
    ///
    /// Returns false at end of input. Stops consuming as soon as the
    /// content ceiling is exceeded, so an overlong line is never buffered
    /// whole.
    fn fill_line(&mut self, buf: &mut Vec<u8>) -> SearchResult<bool> {
        loop {
            let chunk = self.reader.fill_buf()?;
            if chunk.is_empty() {
                // EOF: a non-empty buffer is a final unterminated line.
                if buf.is_empty() {
                    return Ok(false);
                }
                break;
            }
            if let Some(pos) = chunk.iter().position(|&b| b == b'\n') {
                buf.extend_from_slice(&chunk[..pos]);
                self.reader.consume(pos + 1);
                break;
            }
            buf.extend_from_slice(chunk);
            let consumed = chunk.len();
            self.reader.consume(consumed);
            // One byte of slack for a trailing \r the strip below removes.
            if buf.len() > MAX_LINE_BYTES + 1 {
                return Err(self.too_long());
            }
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        if buf.len() > MAX_LINE_BYTES {
            return Err(self.too_long());
        }
        Ok(true)
    }

    fn too_long(&self) -> SearchError {
        SearchError::LineTooLong {
            line: self.line_number,
            limit: MAX_LINE_BYTES,
        }
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = SearchResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.line_number += 1;
        let mut buf = Vec::new();
        match self.fill_line(&mut buf) {
            Ok(true) => Some(Ok((
                self.line_number,
                String::from_utf8_lossy(&buf).into_owned(),
            ))),
            Ok(false) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
