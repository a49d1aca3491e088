#![no_main]

use arbitrary::Arbitrary;
use csvpull::{
    ChunkedSource, CsvCoreTokenizer, CsvSession, Error, SessionOptions, SliceSource,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    csv: &'a [u8],
    splits: Vec<u16>,
    chunk_size: u8,
}

fn collect<S: csvpull::ByteSource>(session: &mut CsvSession<S>) -> Result<Vec<Vec<u8>>, Error> {
    let mut out = Vec::new();
    while let Some(record) = session.next_record()? {
        out.push(record.payload().to_vec());
    }
    Ok(out)
}

fn run(input: Input<'_>) {
    let whole = SessionOptions {
        chunk_size: input.csv.len().max(1),
        ..Default::default()
    };
    let mut reference =
        CsvSession::new(SliceSource::new(input.csv), CsvCoreTokenizer::default(), whole)
            .expect("reference session");
    let expected = collect(&mut reference).expect("in-memory input cannot fail");

    let mut chunks = Vec::<&[u8]>::new();
    let mut rest = input.csv;
    for s in input.splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + usize::from(s) % rest.len());
        chunks.push(head);
        rest = tail;
    }
    chunks.push(rest);

    let split = SessionOptions {
        chunk_size: 1 + usize::from(input.chunk_size),
        ..Default::default()
    };
    let mut session =
        CsvSession::new(ChunkedSource::new(chunks), CsvCoreTokenizer::default(), split)
            .expect("split session");
    let actual = collect(&mut session).expect("in-memory input cannot fail");

    assert_eq!(expected, actual);
    assert!(session.next_record().expect("sticky end").is_none());
}

fuzz_target!(|input: Input<'_>| run(input));
