//! Trace file reader.
//!
//! Reads valgrind-lackey style traces, one reference per line:
//!
//! ```text
//! I  0400d7d4,8
//!  S 7ff000398,8
//!  L 7ff0003a0,8
//!  M 0421c7f0,4
//! ==1234== comment lines are skipped
//! ```
//!
//! The first non-blank character selects the kind (`I` fetch, `L` load, `S` or `M`
//! store); any other line is skipped. A malformed reference line ends the stream with
//! an error; there is no recovery.

use std::io::BufRead;

use crate::common::{AccessType, MemoryReference, TraceError};

/// Lazily parses references from a buffered reader.
///
/// Yields `Some(Ok(_))` per reference, `Some(Err(_))` once on the first failure (and
/// `None` afterwards), and `None` at end of input.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
    failed: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a reader positioned at the start of a trace.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
            failed: false,
        }
    }

    /// 1-based number of the last line read.
    pub const fn line_number(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<MemoryReference, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(source) => {
                    self.failed = true;
                    return Some(Err(TraceError::Io {
                        line: self.line + 1,
                        source,
                    }));
                }
            }
            match parse_line(&self.buf, self.line) {
                Ok(Some(reference)) => return Some(Ok(reference)),
                Ok(None) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Parses one trace line.
///
/// Only the kind byte is inspected before a line is known to be a reference, so
/// non-reference lines may hold arbitrary bytes. Invalid UTF-8 in a reference line is
/// replaced and then treated like any other unexpected character.
///
/// # Returns
///
/// `Ok(None)` for lines that are not references (blank, comments, tool banners).
///
/// # Errors
///
/// [`TraceError::Malformed`] when a reference line lacks the `,` separator, has no
/// length or a zero length, its address or length does not fit in 64 bits, or it
/// runs past the top of the address space.
pub fn parse_line(
    text: impl AsRef<[u8]>,
    line: usize,
) -> Result<Option<MemoryReference>, TraceError> {
    let malformed = |reason: String| TraceError::Malformed { line, reason };

    let Some((&first, body)) = text.as_ref().trim_ascii_start().split_first() else {
        return Ok(None);
    };
    let kind = match first {
        b'I' => AccessType::Fetch,
        b'L' => AccessType::Load,
        b'S' | b'M' => AccessType::Store,
        _ => return Ok(None),
    };

    let body = String::from_utf8_lossy(body);
    let body = body.trim_start();
    let body = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
        .unwrap_or(body);
    let hex_len = body
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(body.len());
    let (hex, rest) = body.split_at(hex_len);

    let Some(rest) = rest.strip_prefix(',') else {
        let found = rest.chars().next().map_or_else(
            || "end of line".to_string(),
            |c| format!("{c:?}"),
        );
        return Err(malformed(format!("expected ',' after address, found {found}")));
    };
    let address = if hex.is_empty() {
        0
    } else {
        u64::from_str_radix(hex, 16)
            .map_err(|e| malformed(format!("address {hex}: {e}")))?
    };

    let digits_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_len];
    if digits.is_empty() {
        return Err(malformed("missing reference length".to_string()));
    }
    let length: u64 = digits
        .parse()
        .map_err(|e| malformed(format!("length {digits}: {e}")))?;
    if length == 0 {
        return Err(malformed("zero-length reference".to_string()));
    }
    if address.checked_add(length).is_none() {
        return Err(malformed(format!(
            "reference {address:#x},{length} runs past the end of the address space"
        )));
    }

    Ok(Some(MemoryReference::new(kind, address, length)))
}
