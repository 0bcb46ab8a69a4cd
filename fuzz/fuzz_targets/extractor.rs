#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

use metagrab::extractor::extract;
use metagrab::normalizer::normalize;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes, sniffed and decoded like a page without a content type
    let _ = extract(normalize(Cursor::new(data.to_vec()), None));

    // Same bytes with a declared charset, so the header path is hit too
    let _ = extract(normalize(
        Cursor::new(data.to_vec()),
        Some("text/html; charset=windows-1252"),
    ));
});
