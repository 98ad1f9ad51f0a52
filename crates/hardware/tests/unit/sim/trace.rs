//! # Trace Reader Tests
//!
//! Parsing of lackey-style traces: kinds, skipped lines, line numbering, and
//! termination on the first malformed line.

use std::io::{self, BufReader, Read};

use cachesim_core::common::{MemoryReference, TraceError};
use cachesim_core::sim::TraceReader;
use cachesim_core::sim::trace::parse_line;

const SAMPLE: &str = "\
==4821== Lackey, an example Valgrind tool
I  04016c40,3
 S 7ff0003b8,8

 L 04222cac,4
 M 0421d7f0,4
==4821== done
";

#[test]
fn reads_every_reference_in_order() {
    let refs: Vec<_> = TraceReader::new(SAMPLE.as_bytes())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        refs,
        vec![
            MemoryReference::fetch(0x0401_6c40, 3),
            MemoryReference::store(0x7_ff00_03b8, 8),
            MemoryReference::load(0x0422_2cac, 4),
            MemoryReference::store(0x0421_d7f0, 4),
        ]
    );
}

#[test]
fn empty_trace_is_an_empty_stream() {
    assert_eq!(TraceReader::new(&b""[..]).count(), 0);
}

#[test]
fn malformed_line_ends_stream_with_line_number() {
    let trace = "I 10,4\n\n L 20;4\n L 30,4\n";
    let mut reader = TraceReader::new(trace.as_bytes());

    assert!(matches!(reader.next(), Some(Ok(_))));
    match reader.next() {
        Some(Err(TraceError::Malformed { line, reason })) => {
            assert_eq!(line, 3);
            assert!(reason.contains("','"), "reason: {reason}");
        }
        other => panic!("expected a malformed line, got {other:?}"),
    }
    assert!(reader.next().is_none(), "no recovery after an error");
}

#[test]
fn missing_or_zero_length_is_malformed() {
    assert!(matches!(
        parse_line(" L 20,\n", 7),
        Err(TraceError::Malformed { line: 7, .. })
    ));
    assert!(matches!(
        parse_line(" L 20,0\n", 8),
        Err(TraceError::Malformed { line: 8, .. })
    ));
}

#[test]
fn oversized_address_is_malformed() {
    assert!(matches!(
        parse_line(" L 1ffffffffffffffff,4", 1),
        Err(TraceError::Malformed { .. })
    ));
}

#[test]
fn reference_wrapping_address_space_is_malformed() {
    assert!(matches!(
        parse_line(" L ffffffffffffffee,20", 4),
        Err(TraceError::Malformed { line: 4, .. })
    ));
    assert!(parse_line(" L fffffffffffffff0,16", 5).is_err());
    let top = parse_line(" L fffffffffffffff0,15", 6).unwrap().unwrap();
    assert_eq!(top, MemoryReference::load(0xffff_ffff_ffff_fff0, 15));
}

#[test]
fn non_utf8_banner_line_is_skipped() {
    let trace: &[u8] = b"==1== Command: ./a.out caf\xe9\n L 10,4\n";
    let refs: Vec<_> = TraceReader::new(trace).collect::<Result<_, _>>().unwrap();
    assert_eq!(refs, vec![MemoryReference::load(0x10, 4)]);
}

#[test]
fn non_utf8_text_after_length_is_ignored() {
    let r = parse_line(&b" S 20,8 \xff\xfe"[..], 1).unwrap().unwrap();
    assert_eq!(r, MemoryReference::store(0x20, 8));
}

#[test]
fn non_utf8_in_address_is_malformed() {
    assert!(matches!(
        parse_line(&b" L 2\xe90,4"[..], 9),
        Err(TraceError::Malformed { line: 9, .. })
    ));
}

#[test]
fn optional_hex_prefix_accepted() {
    let r = parse_line(" S 0x1f,2", 1).unwrap().unwrap();
    assert_eq!(r, MemoryReference::store(0x1f, 2));
}

/// Reader that fails after yielding its first chunk.
struct FailingReader {
    sent: bool,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            return Err(io::Error::other("disk on fire"));
        }
        self.sent = true;
        let line = b"I 10,4\n";
        buf[..line.len()].copy_from_slice(line);
        Ok(line.len())
    }
}

#[test]
fn read_error_is_reported_once() {
    let mut trace = TraceReader::new(BufReader::new(FailingReader { sent: false }));
    assert!(matches!(trace.next(), Some(Ok(_))));
    assert!(matches!(trace.next(), Some(Err(TraceError::Io { line: 2, .. }))));
    assert!(trace.next().is_none());
    assert_eq!(trace.line_number(), 1);
}
