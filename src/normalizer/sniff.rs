use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>;]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// In-document declarations only count within this many leading bytes.
const PRESCAN_LEN: usize = 1024;

/// Where a declared charset label was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declared {
    Header,
    Meta,
}

/// Outcome of content sniffing.
#[derive(Debug, Clone, PartialEq)]
pub enum Sniff {
    /// An encoding the WHATWG table resolves.
    Decoder(&'static Encoding),
    /// A declared label the WHATWG table does not know.
    Label { label: String, declared: Declared },
}

/// Sniffs the encoding of a document from its leading bytes and the
/// declared content-type.
///
/// Order: byte-order mark, a known content-type `charset=`, a known
/// `<meta>` declaration, the first unknown declared label, then a
/// statistical guess. The guess only runs when nothing was declared.
pub fn sniff(peeked: &[u8], content_type: Option<&str>) -> Option<Sniff> {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(peeked) {
        return Some(Sniff::Decoder(encoding));
    }

    let header = content_type
        .and_then(charset_param)
        .map(|label| resolve(label, Declared::Header));
    if let Some(Sniff::Decoder(encoding)) = header {
        return Some(Sniff::Decoder(encoding));
    }

    let meta = meta_charset(peeked).map(|label| resolve(label, Declared::Meta));
    if let Some(Sniff::Decoder(encoding)) = meta {
        return Some(Sniff::Decoder(meta_override(encoding)));
    }

    header.or(meta).or_else(|| guess(peeked).map(Sniff::Decoder))
}

/// Extracts the `charset` parameter from a content-type value.
pub fn charset_param(content_type: &str) -> Option<&str> {
    CHARSET_REGEX
        .captures(content_type)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

fn meta_charset(peeked: &[u8]) -> Option<String> {
    let search_bytes = &peeked[..peeked.len().min(PRESCAN_LEN)];
    let search_str = String::from_utf8_lossy(search_bytes);

    // Look for <meta charset="...">
    if let Some(captures) = META_CHARSET_REGEX.captures(&search_str)
        && let Some(charset_str) = captures.get(1)
    {
        return Some(charset_str.as_str().to_string());
    }

    // Look for <meta http-equiv="Content-Type" content="...; charset=...">
    if let Some(captures) = META_HTTP_EQUIV_REGEX.captures(&search_str)
        && let Some(charset_str) = captures.get(1)
    {
        return Some(charset_str.as_str().to_string());
    }

    None
}

fn resolve(label: impl AsRef<str>, declared: Declared) -> Sniff {
    let label = label.as_ref();
    match Encoding::for_label(label.trim().as_bytes()) {
        Some(encoding) => Sniff::Decoder(encoding),
        None => Sniff::Label {
            label: label.to_string(),
            declared,
        },
    }
}

/// A document whose `<meta>` we could read as ASCII cannot really be
/// UTF-16, and `x-user-defined` is never honoured from markup.
pub(crate) fn meta_override(encoding: &'static Encoding) -> &'static Encoding {
    if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE {
        encoding_rs::UTF_8
    } else if encoding == encoding_rs::X_USER_DEFINED {
        encoding_rs::WINDOWS_1252
    } else {
        encoding
    }
}

fn guess(peeked: &[u8]) -> Option<&'static Encoding> {
    if peeked.is_empty() {
        return None;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(peeked, false);
    Some(detector.guess(None, true))
}
