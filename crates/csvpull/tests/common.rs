#![allow(missing_docs, dead_code)]

use core::fmt::Write;

use bstr::ByteSlice;
use csvpull::{ByteSource, CsvCoreTokenizer, CsvSession, SessionOptions, SliceSource};

/// Order records arrive in from a small inventory export. Chunk sizes in the
/// tests cut through quoted fields and CRLF pairs.
pub const INVENTORY: &[u8] = b"sku,description,qty\r\n\
A-100,\"Widget, large\",3\r\n\
B-200,\"Gadget \"\"pro\"\"\",12\r\n\
C-300,\"Two\nlines\",0\r\n\
D-400,,7";

pub fn pipe_options(chunk_size: usize) -> SessionOptions {
    SessionOptions {
        separator: b'|',
        terminator: b'\n',
        chunk_size,
        ..Default::default()
    }
}

/// One line per record: the payload (as a debug string) and its length.
pub fn render_session<S: ByteSource>(session: &mut CsvSession<S>) -> String {
    let mut out = String::new();
    loop {
        match session.next_record() {
            Ok(Some(record)) => {
                writeln!(
                    out,
                    "{:?} ({} bytes)",
                    record.payload().to_str_lossy(),
                    record.len()
                )
                .unwrap();
            }
            Ok(None) => {
                out.push_str("<end>\n");
                return out;
            }
            Err(err) => {
                writeln!(out, "<error: {err}>").unwrap();
                return out;
            }
        }
    }
}

pub fn render(input: &[u8], chunk_size: usize) -> String {
    let mut session = CsvSession::new(
        SliceSource::new(input),
        CsvCoreTokenizer::default(),
        pipe_options(chunk_size),
    )
    .expect("session");
    render_session(&mut session)
}
