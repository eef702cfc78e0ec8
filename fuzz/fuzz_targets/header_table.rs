#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use segtag::{RunHeader, decode_table, encode_table};

fuzz_target!(|data: Vec<u8>| {
    // Arbitrary bytes must decode or fail cleanly, never panic
    let mut input = &data[..];
    while !input.is_empty() {
        match RunHeader::decode(&mut input) {
            Ok((header, used)) => {
                assert!((2..=5).contains(&used));
                assert!(header.length() > 0);
                assert!(header.encoded_len() <= used);
            }
            Err(_) => break,
        }
    }

    // Whatever decodes must survive a re-encode
    if let Ok(headers) = decode_table(Bytes::from(data.clone())) {
        let table = encode_table(&headers);
        // Non-minimal length widths decode fine but re-encode shorter
        assert!(table.len() <= data.len());
        assert_eq!(decode_table(table).unwrap(), headers);
    }
});
