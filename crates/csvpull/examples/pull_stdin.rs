//! Reads CSV from standard input and prints one line per record, with fields
//! joined by `|`.
//!
//! ```text
//! printf 'a,b\n"c,d",e\n' | cargo run --example pull_stdin
//! ```

use std::io::{self, Write};

use csvpull::{CsvInputParser, InputParser, IoSource, SessionOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let parser = CsvInputParser {
        options: SessionOptions {
            separator: b'|',
            terminator: b'\n',
            ..Default::default()
        },
        ..Default::default()
    };

    let source = IoSource::new(io::stdin().lock());
    let Some(mut session) = parser.take_control_of(Some(source))? else {
        return Ok(());
    };

    let mut out = io::stdout().lock();
    let mut count = 0usize;
    while let Some(record) = session.next_record()? {
        out.write_all(record.payload())?;
        out.write_all(record.terminator())?;
        count += 1;
    }
    writeln!(io::stderr(), "{count} records")?;
    Ok(())
}
