use std::collections::HashMap;
use std::fs;
use std::io::{self, Cursor, Read};

use crate::extractor::{ExtractError, ExtractionResult, extract};
use crate::normalizer::{normalize, pass_through};

fn extract_str(html: &str) -> ExtractionResult {
    extract(normalize(Cursor::new(html.as_bytes().to_vec()), Some("text/html"))).unwrap()
}

fn metas(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Serves `data`, then fails instead of reporting end of stream.
struct CutOff {
    data: Cursor<Vec<u8>>,
}

impl Read for CutOff {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionAborted, "connection aborted")),
            n => Ok(n),
        }
    }
}

#[test]
fn test_title_and_description() {
    let result = extract_str(
        r#"<head><title>Hello</title><meta name="description" content="world"></head>"#,
    );

    assert_eq!(result.title, "Hello");
    assert_eq!(result.metas, metas(&[("description", "world")]));
}

#[test]
fn test_extract_article() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let result = extract_str(&html);

    assert_eq!(result.title, "Sample Article - News Site");
    assert_eq!(
        result.metas,
        metas(&[
            ("charset", "utf-8"),
            ("viewport", "width=device-width, initial-scale=1"),
            ("description", "A short summary of the sample article."),
            ("og_title", "Sample Article"),
            ("og_site_name", "News Site"),
            ("og_image", "https://example.com/images/sample.jpg"),
            ("twitter_card", "summary_large_image"),
            ("author", "Jane Doe"),
            ("", "IE=edge"),
        ])
    );
}

#[test]
fn test_missing_head_close_reads_to_end() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/no_head_close.html")
        .expect("Failed to read test fixture");

    let result = extract_str(&html);

    assert_eq!(result.title, "");
    assert_eq!(
        result.metas,
        metas(&[
            ("generator", "handwritten"),
            ("og_type", "website"),
            ("late", "still head-scanned"),
        ])
    );
}

#[test]
fn test_colon_keys_are_rewritten() {
    let result = extract_str(r#"<meta property="og:title" content="Colons">"#);
    assert_eq!(result.metas, metas(&[("og_title", "Colons")]));
}

#[test]
fn test_charset_attribute_wins_its_tag() {
    let result = extract_str(
        r#"<head><meta name="x" charset="EUC-JP" content="y"><meta content="z" charset="utf-8" name="w"></head>"#,
    );
    assert_eq!(result.metas, metas(&[("charset", "utf-8")]));
}

#[test]
fn test_later_duplicate_key_overwrites() {
    let result = extract_str(
        r#"<head>
            <meta name="description" content="first">
            <meta property="description" content="second">
            <meta http-equiv="refresh" content="30">
            <meta http-equiv="content-language" content="en">
        </head>"#,
    );

    assert_eq!(
        result.metas,
        metas(&[("description", "second"), ("", "en")])
    );
}

#[test]
fn test_empty_document() {
    let result = extract_str("<p>no head here</p>");
    assert_eq!(result, ExtractionResult::default());

    let result = extract(normalize(Cursor::new(Vec::new()), None)).unwrap();
    assert_eq!(result.title, "");
    assert!(result.metas.is_empty());
}

#[test]
fn test_last_title_before_head_end_wins() {
    let result = extract_str("<head><title>One</title><title>Two</title></head><title>Three</title>");
    assert_eq!(result.title, "Two");
}

#[test]
fn test_title_entities_and_markup() {
    let result = extract_str("<title>Fish &amp; Chips <b>daily</b></title>");
    assert_eq!(result.title, "Fish & Chips <b>daily</b>");

    let result = extract_str("<title></title><meta name=\"a\" content=\"b\">");
    assert_eq!(result.title, "");
    assert_eq!(result.metas, metas(&[("a", "b")]));
}

#[test]
fn test_uppercase_markup() {
    let result = extract_str(
        r#"<HEAD><TITLE>Shouting</TITLE><META NAME="Keywords" CONTENT="a,b"></HEAD><META NAME="after" CONTENT="x">"#,
    );

    assert_eq!(result.title, "Shouting");
    assert_eq!(result.metas, metas(&[("Keywords", "a,b")]));
}

#[test]
fn test_legacy_encoding_from_header_is_load_bearing() {
    let html = "<html><head><title>日本語のページ</title></head></html>";
    let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(html);

    let normalized = extract(normalize(
        Cursor::new(bytes.to_vec()),
        Some("text/html; charset=Shift_JIS"),
    ))
    .unwrap();
    let raw = extract(pass_through(Cursor::new(bytes.to_vec()))).unwrap();

    assert_eq!(normalized.title, "日本語のページ");
    assert_ne!(raw.title, normalized.title);
}

#[test]
fn test_legacy_encoding_from_meta_is_load_bearing() {
    let html = r#"<html><head><meta charset="windows-1251"><title>Новости дня</title></head></html>"#;
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode(html);

    let normalized = extract(normalize(Cursor::new(bytes.to_vec()), Some("text/html"))).unwrap();
    let raw = extract(pass_through(Cursor::new(bytes.to_vec()))).unwrap();

    assert_eq!(normalized.title, "Новости дня");
    assert_eq!(normalized.metas, metas(&[("charset", "windows-1251")]));
    assert_ne!(raw.title, normalized.title);
}

#[test]
fn test_unknown_header_charset_falls_back_to_meta() {
    let html = r#"<html><head><meta charset="shift_jis"><title>日本語のページ</title></head></html>"#;
    let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(html);

    let result = extract(normalize(
        Cursor::new(bytes.to_vec()),
        Some("text/html; charset=x-bogus"),
    ))
    .unwrap();

    assert_eq!(result.title, "日本語のページ");
    assert_eq!(result.metas, metas(&[("charset", "shift_jis")]));
}

#[test]
fn test_meta_utf16_alias_does_not_garble_ascii_page() {
    let result = extract_str(r#"<meta charset="utf16"><title>Hello</title>"#);

    assert_eq!(result.title, "Hello");
    assert_eq!(result.metas, metas(&[("charset", "utf16")]));
}

#[test]
fn test_stream_failure_is_propagated() {
    let reader = CutOff {
        data: Cursor::new(b"<html><head><meta name=\"a\" content=\"b\"><title>Par".to_vec()),
    };

    let result = extract(normalize(reader, Some("text/html")));

    match result {
        Err(ExtractError::Tokenize(err)) => {
            assert_eq!(err.kind(), io::ErrorKind::ConnectionAborted);
        }
        other => panic!("Expected Tokenize error, got {:?}", other),
    }
}

#[test]
fn test_head_end_stops_before_stream_failure() {
    let reader = CutOff {
        data: Cursor::new(b"<head><title>Done</title></head>".to_vec()),
    };

    // The reader fails right after </head>; extraction must not get that far.
    let result = extract(pass_through(reader)).unwrap();
    assert_eq!(result.title, "Done");
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            bytes in proptest::collection::vec(any::<u8>(), 0..8192),
            content_type in proptest::option::of("text/html(; charset=[a-z0-9_-]{1,12})?"),
        ) {
            let _ = extract(normalize(Cursor::new(bytes), content_type.as_deref()));
        }

        #[test]
        fn test_meta_keys_never_contain_colons(
            key in "[a-z:]{0,16}",
            value in "[a-zA-Z0-9 ]{0,16}",
        ) {
            let html = format!(r#"<meta property="{}" content="{}">"#, key, value);
            let result = extract_str(&html);
            prop_assert!(result.metas.keys().all(|k| !k.contains(':')));
            prop_assert_eq!(result.metas.get(&key.replace(':', "_")), Some(&value));
        }
    }
}
