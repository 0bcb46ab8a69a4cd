//! Fallback label registry.
//!
//! `encoding_rs` only knows the WHATWG label table. Servers in the wild also
//! declare vendor code page names (`cp932`, `ms936`), Java/Python style
//! spellings (`shift-jis`, `euc_kr`, `utf_8`) and a handful of legacy
//! aliases. This module maps those onto the closest WHATWG encoding.

use encoding_rs::Encoding;

/// Resolves a charset label, first through the WHATWG table and then
/// through the alias table with separators stripped.
pub fn lookup(label: &str) -> Option<&'static Encoding> {
    let label = label.trim().trim_matches(|c| c == '"' || c == '\'');
    if label.is_empty() {
        return None;
    }

    if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
        return Some(encoding);
    }

    let compact: String = label
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    alias(&compact)
}

fn alias(compact: &str) -> Option<&'static Encoding> {
    let encoding = match compact {
        "utf8" | "cp65001" | "unicode11utf8" | "unicode20utf8" | "xunicode20utf8" => {
            encoding_rs::UTF_8
        }
        "utf16" | "utf16le" | "ucs2" | "ucs2le" | "unicode" | "csunicode" => encoding_rs::UTF_16LE,
        "utf16be" | "ucs2be" | "unicodefffe" => encoding_rs::UTF_16BE,
        "shiftjis" | "sjis" | "xsjis" | "cp932" | "ms932" | "mskanji" | "windows31j"
        | "csshiftjis" | "cswindows31j" => encoding_rs::SHIFT_JIS,
        "eucjp" | "xeuc" | "xeucjp" | "ujis" | "cp51932" => encoding_rs::EUC_JP,
        "iso2022jp" | "csiso2022jp" | "jis" | "cp50220" | "cp50221" => encoding_rs::ISO_2022_JP,
        "gbk" | "cp936" | "ms936" | "windows936" | "gb2312" | "gb231280" | "euccn"
        | "xeuccn" | "csgb2312" | "chinese" => encoding_rs::GBK,
        "gb18030" | "cp54936" => encoding_rs::GB18030,
        "big5" | "big5hkscs" | "cp950" | "ms950" | "cnbig5" | "xxbig5" | "csbig5" => {
            encoding_rs::BIG5
        }
        "euckr" | "cp949" | "ms949" | "uhc" | "windows949" | "ksc5601" | "ksc56011987"
        | "korean" => encoding_rs::EUC_KR,
        "koi8" | "koi8r" | "cskoi8r" | "cp20866" => encoding_rs::KOI8_R,
        "koi8u" | "koi8ru" | "cp21866" => encoding_rs::KOI8_U,
        "ascii" | "usascii" | "latin1" | "l1" | "iso88591" | "cp819" | "ibm819" | "cp1252"
        | "windows1252" | "ansi" => encoding_rs::WINDOWS_1252,
        "latin2" | "l2" | "iso88592" | "cp28592" => encoding_rs::ISO_8859_2,
        "latin3" | "iso88593" => encoding_rs::ISO_8859_3,
        "latin4" | "iso88594" => encoding_rs::ISO_8859_4,
        "cyrillic" | "iso88595" | "cp28595" => encoding_rs::ISO_8859_5,
        "arabic" | "iso88596" => encoding_rs::ISO_8859_6,
        "greek" | "iso88597" => encoding_rs::ISO_8859_7,
        "hebrew" | "iso88598" => encoding_rs::ISO_8859_8,
        "latin6" | "iso885910" => encoding_rs::ISO_8859_10,
        "iso885913" => encoding_rs::ISO_8859_13,
        "iso885914" => encoding_rs::ISO_8859_14,
        "latin9" | "iso885915" => encoding_rs::ISO_8859_15,
        "iso885916" => encoding_rs::ISO_8859_16,
        "cp866" | "ibm866" | "866" => encoding_rs::IBM866,
        "tis620" | "cp874" | "windows874" | "iso885911" => encoding_rs::WINDOWS_874,
        "cp1250" => encoding_rs::WINDOWS_1250,
        "cp1251" => encoding_rs::WINDOWS_1251,
        "cp1253" => encoding_rs::WINDOWS_1253,
        "cp1254" | "latin5" | "iso88599" => encoding_rs::WINDOWS_1254,
        "cp1255" => encoding_rs::WINDOWS_1255,
        "cp1256" => encoding_rs::WINDOWS_1256,
        "cp1257" => encoding_rs::WINDOWS_1257,
        "cp1258" => encoding_rs::WINDOWS_1258,
        "mac" | "macroman" | "macintosh" | "xmacroman" => encoding_rs::MACINTOSH,
        "maccyrillic" | "xmaccyrillic" | "xmacukrainian" => encoding_rs::X_MAC_CYRILLIC,
        _ => return None,
    };
    Some(encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatwg_labels_resolve_directly() {
        assert_eq!(lookup("utf-8"), Some(encoding_rs::UTF_8));
        assert_eq!(lookup("  Shift_JIS "), Some(encoding_rs::SHIFT_JIS));
        assert_eq!(lookup("iso-8859-1"), Some(encoding_rs::WINDOWS_1252));
    }

    #[test]
    fn test_vendor_code_pages() {
        assert_eq!(lookup("cp932"), Some(encoding_rs::SHIFT_JIS));
        assert_eq!(lookup("MS936"), Some(encoding_rs::GBK));
        assert_eq!(lookup("cp949"), Some(encoding_rs::EUC_KR));
        assert_eq!(lookup("CP65001"), Some(encoding_rs::UTF_8));
    }

    #[test]
    fn test_separator_variants() {
        assert_eq!(lookup("shift-jis"), Some(encoding_rs::SHIFT_JIS));
        assert_eq!(lookup("utf_8"), Some(encoding_rs::UTF_8));
        assert_eq!(lookup("euc_kr"), Some(encoding_rs::EUC_KR));
        assert_eq!(lookup("Big5-HKSCS"), Some(encoding_rs::BIG5));
        assert_eq!(lookup("\"x-euc\""), Some(encoding_rs::EUC_JP));
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(lookup(""), None);
        assert_eq!(lookup("klingon-8"), None);
        assert_eq!(lookup("ebcdic"), None);
    }
}
